//! Generic CRUD operations shared by every domain controller
//!
//! The domain controllers wrap this with input validation, uniqueness
//! checks and relationship queries; the plain get/list/create/update/
//! delete plumbing lives here once.

use std::marker::PhantomData;

use crate::core::error::{AppError, AppResult};
use crate::core::query::{Filters, ListQuery, SortOrder};
use crate::core::record::{Patch, Record};
use crate::store::{MemoryStore, Stored};

/// CRUD operations over one entity table
#[derive(Clone)]
pub struct CrudController<T: Stored> {
    store: MemoryStore,
    _entity: PhantomData<T>,
}

impl<T: Stored> CrudController<T> {
    pub fn new(store: MemoryStore) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    /// Fetch one record by id
    pub async fn get(&self, id: i64) -> AppResult<T> {
        self.store
            .fetch::<T>(id)?
            .ok_or_else(|| AppError::not_found(T::resource_name(), id))
    }

    /// List records matching `filters`, ordered and paginated.
    ///
    /// Without an explicit order, records come back in insertion order.
    /// A window past the end of the result set is an empty page, not an
    /// error.
    pub async fn list(
        &self,
        query: ListQuery,
        filters: &Filters,
        order: Option<SortOrder>,
    ) -> AppResult<Vec<T>> {
        let mut records: Vec<T> = self
            .store
            .list::<T>()?
            .into_iter()
            .filter(|r| filters.matches(r))
            .collect();
        if let Some(order) = order {
            order.apply(&mut records);
        }
        Ok(records
            .into_iter()
            .skip(query.skip())
            .take(query.limit())
            .collect())
    }

    /// Persist a new record; the store assigns id and created_at
    pub async fn create(&self, record: T) -> AppResult<T> {
        Ok(self.store.insert(record)?)
    }

    /// Apply a partial update to an existing record
    pub async fn update(&self, id: i64, patch: &dyn Patch<T>) -> AppResult<T> {
        let mut record = self.get(id).await?;
        patch.apply(&mut record);
        Ok(self.store.replace(record)?)
    }

    /// Delete a record and everything it owns; returns the record as it
    /// was just before deletion
    pub async fn delete(&self, id: i64) -> AppResult<T> {
        self.store
            .remove::<T>(id)?
            .ok_or_else(|| AppError::not_found(T::resource_name(), id))
    }

    /// Check whether a record exists
    pub async fn exists(&self, id: i64) -> AppResult<bool> {
        Ok(self.store.contains::<T>(id)?)
    }

    /// Count records matching `filters`, ignoring pagination
    pub async fn count(&self, filters: &Filters) -> AppResult<usize> {
        Ok(self
            .store
            .list::<T>()?
            .iter()
            .filter(|r| filters.matches(*r))
            .count())
    }

    /// First record matching `filters`, in insertion order
    pub async fn find_first(&self, filters: &Filters) -> AppResult<Option<T>> {
        Ok(self
            .store
            .list::<T>()?
            .into_iter()
            .find(|r| filters.matches(r)))
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CategoryUpdate};

    fn controller() -> CrudController<Category> {
        CrudController::new(MemoryStore::new())
    }

    #[tokio::test]
    async fn test_get_after_create() {
        let crud = controller();
        let created = crud
            .create(Category::new("rust".into(), None))
            .await
            .unwrap();
        let fetched = crud.get(created.id).await.unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.name, "rust");
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let crud = controller();
        let err = crud.get(99).await.unwrap_err();
        assert_eq!(err, AppError::not_found("Category", 99));
    }

    #[tokio::test]
    async fn test_list_window_past_end_is_empty() {
        let crud = controller();
        crud.create(Category::new("a".into(), None)).await.unwrap();
        let page = crud
            .list(ListQuery::new(10, 10), &Filters::new(), None)
            .await
            .unwrap();
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn test_update_touches_only_given_fields() {
        let crud = controller();
        let created = crud
            .create(Category::new("rust".into(), Some("systems".into())))
            .await
            .unwrap();
        let patch = CategoryUpdate {
            description: Some("systems programming".into()),
            ..Default::default()
        };
        let updated = crud.update(created.id, &patch).await.unwrap();
        assert_eq!(updated.name, "rust");
        assert_eq!(updated.description.as_deref(), Some("systems programming"));
        assert!(updated.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_delete_twice_is_not_found() {
        let crud = controller();
        let created = crud
            .create(Category::new("rust".into(), None))
            .await
            .unwrap();
        let removed = crud.delete(created.id).await.unwrap();
        assert_eq!(removed.name, "rust");
        assert!(matches!(
            crud.delete(created.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_count_ignores_pagination() {
        let crud = controller();
        for n in 0..5 {
            crud.create(Category::new(format!("c{n}"), None))
                .await
                .unwrap();
        }
        assert_eq!(crud.count(&Filters::new()).await.unwrap(), 5);
    }
}
