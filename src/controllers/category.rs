//! Category controller: unique names and post-count projections

use crate::controllers::base::CrudController;
use crate::core::error::{AppError, AppResult};
use crate::core::query::{Filters, ListQuery};
use crate::models::{Category, CategoryCreate, CategoryUpdate, CategoryWithPostCount};
use crate::store::MemoryStore;

/// Controller for [`Category`] records
#[derive(Clone)]
pub struct CategoryController {
    crud: CrudController<Category>,
}

impl CategoryController {
    pub fn new(store: MemoryStore) -> Self {
        Self {
            crud: CrudController::new(store),
        }
    }

    /// Create a category; the name must be unused
    pub async fn create(&self, input: CategoryCreate) -> AppResult<Category> {
        self.ensure_name_free(&input.name, None).await?;
        self.crud
            .create(Category::new(input.name, input.description))
            .await
    }

    pub async fn get(&self, id: i64) -> AppResult<Category> {
        self.crud.get(id).await
    }

    pub async fn get_by_name(&self, name: &str) -> AppResult<Category> {
        self.crud
            .find_first(&Filters::new().eq("name", name))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category with name '{name}' not found")))
    }

    pub async fn list(&self, query: ListQuery) -> AppResult<Vec<Category>> {
        self.crud.list(query, &Filters::new(), None).await
    }

    /// Every category with its post count, in creation order
    pub async fn with_post_counts(
        &self,
        query: ListQuery,
    ) -> AppResult<Vec<CategoryWithPostCount>> {
        Ok(self
            .counted()?
            .into_iter()
            .skip(query.skip())
            .take(query.limit())
            .collect())
    }

    /// Categories by descending post count; ties keep creation order
    pub async fn popular(&self, query: ListQuery) -> AppResult<Vec<CategoryWithPostCount>> {
        let mut counts = self.counted()?;
        counts.sort_by(|a, b| b.post_count.cmp(&a.post_count));
        Ok(counts
            .into_iter()
            .skip(query.skip())
            .take(query.limit())
            .collect())
    }

    fn counted(&self) -> AppResult<Vec<CategoryWithPostCount>> {
        Ok(self
            .crud
            .store()
            .category_post_counts()?
            .into_iter()
            .map(|(category, post_count)| CategoryWithPostCount {
                category,
                post_count,
            })
            .collect())
    }

    /// Rename or re-describe a category; a changed name is checked for
    /// uniqueness against everyone else
    pub async fn update(&self, id: i64, input: CategoryUpdate) -> AppResult<Category> {
        let current = self.crud.get(id).await?;
        if let Some(name) = &input.name {
            if *name != current.name {
                self.ensure_name_free(name, Some(id)).await?;
            }
        }
        self.crud.update(id, &input).await
    }

    /// Delete a category; its post pairings go with it, the posts stay
    pub async fn delete(&self, id: i64) -> AppResult<Category> {
        self.crud.delete(id).await
    }

    pub async fn count(&self) -> AppResult<usize> {
        self.crud.count(&Filters::new()).await
    }

    async fn ensure_name_free(&self, name: &str, exclude: Option<i64>) -> AppResult<()> {
        let existing = self
            .crud
            .find_first(&Filters::new().eq("name", name))
            .await?;
        match existing {
            Some(category) if Some(category.id) != exclude => Err(AppError::Conflict(format!(
                "Category with name '{name}' already exists"
            ))),
            _ => Ok(()),
        }
    }
}
