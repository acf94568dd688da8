//! Post controller: authorship checks, publication state, search,
//! category pairing

use crate::controllers::base::CrudController;
use crate::core::error::{AppError, AppResult};
use crate::core::query::{Filters, ListQuery, SortOrder};
use crate::models::{
    Category, Post, PostCreate, PostDetail, PostUpdate, User, UserSummary,
};
use crate::store::MemoryStore;

/// Controller for [`Post`] records
#[derive(Clone)]
pub struct PostController {
    crud: CrudController<Post>,
}

impl PostController {
    pub fn new(store: MemoryStore) -> Self {
        Self {
            crud: CrudController::new(store),
        }
    }

    fn store(&self) -> &MemoryStore {
        self.crud.store()
    }

    /// Create a post for an existing author; new posts start unpublished
    pub async fn create(&self, input: PostCreate) -> AppResult<Post> {
        if !self.store().contains::<User>(input.user_id)? {
            return Err(AppError::not_found("User", input.user_id));
        }
        self.crud
            .create(Post::new(input.title, input.content, input.user_id))
            .await
    }

    pub async fn get(&self, id: i64) -> AppResult<Post> {
        self.crud.get(id).await
    }

    /// Post with author and categories resolved in the same snapshot
    pub async fn get_detail(&self, id: i64) -> AppResult<PostDetail> {
        let post = self.crud.get(id).await?;
        let author = self
            .store()
            .fetch::<User>(post.user_id)?
            .map(|u| UserSummary::from(&u));
        let categories = self
            .store()
            .categories_of_post(post.id)?
            .iter()
            .map(Into::into)
            .collect();
        Ok(PostDetail {
            post,
            author,
            categories,
        })
    }

    pub async fn list(&self, query: ListQuery) -> AppResult<Vec<Post>> {
        self.crud.list(query, &Filters::new(), None).await
    }

    /// Posts by one author, newest first
    pub async fn by_user(&self, user_id: i64, query: ListQuery) -> AppResult<Vec<Post>> {
        if !self.store().contains::<User>(user_id)? {
            return Err(AppError::not_found("User", user_id));
        }
        self.crud
            .list(
                query,
                &Filters::new().eq("user_id", user_id),
                Some(SortOrder::created_desc()),
            )
            .await
    }

    /// Posts filed under one category, in pairing order
    pub async fn by_category(&self, category_id: i64, query: ListQuery) -> AppResult<Vec<Post>> {
        if !self.store().contains::<Category>(category_id)? {
            return Err(AppError::not_found("Category", category_id));
        }
        Ok(self
            .store()
            .posts_in_category(category_id)?
            .into_iter()
            .skip(query.skip())
            .take(query.limit())
            .collect())
    }

    /// Only published posts
    pub async fn published(&self, query: ListQuery) -> AppResult<Vec<Post>> {
        self.crud
            .list(query, &Filters::new().eq("is_published", true), None)
            .await
    }

    /// Recently published posts, newest first
    pub async fn recent_published(&self, query: ListQuery) -> AppResult<Vec<Post>> {
        self.crud
            .list(
                query,
                &Filters::new().eq("is_published", true),
                Some(SortOrder::created_desc()),
            )
            .await
    }

    /// Case-insensitive substring search over title and content, newest
    /// first
    pub async fn search(&self, term: &str, query: ListQuery) -> AppResult<Vec<Post>> {
        let needle = term.to_lowercase();
        let mut matches: Vec<Post> = self
            .store()
            .list::<Post>()?
            .into_iter()
            .filter(|p| {
                p.title.to_lowercase().contains(&needle)
                    || p.content.to_lowercase().contains(&needle)
            })
            .collect();
        SortOrder::created_desc().apply(&mut matches);
        Ok(matches
            .into_iter()
            .skip(query.skip())
            .take(query.limit())
            .collect())
    }

    pub async fn update(&self, id: i64, input: PostUpdate) -> AppResult<Post> {
        self.crud.update(id, &input).await
    }

    /// Flip `is_published` on
    pub async fn publish(&self, id: i64) -> AppResult<Post> {
        self.set_published(id, true).await
    }

    /// Flip `is_published` off
    pub async fn unpublish(&self, id: i64) -> AppResult<Post> {
        self.set_published(id, false).await
    }

    async fn set_published(&self, id: i64, is_published: bool) -> AppResult<Post> {
        let patch = PostUpdate {
            is_published: Some(is_published),
            ..Default::default()
        };
        self.crud.update(id, &patch).await
    }

    /// Delete a post along with its comments and category pairings
    pub async fn delete(&self, id: i64) -> AppResult<Post> {
        self.crud.delete(id).await
    }

    /// File a post under a category. Pairing twice is a conflict.
    pub async fn add_category(&self, post_id: i64, category_id: i64) -> AppResult<PostDetail> {
        if !self.crud.exists(post_id).await? {
            return Err(AppError::not_found("Post", post_id));
        }
        if !self.store().contains::<Category>(category_id)? {
            return Err(AppError::not_found("Category", category_id));
        }
        if self.store().post_category_exists(post_id, category_id)? {
            return Err(AppError::Conflict(format!(
                "Post {post_id} is already in category {category_id}"
            )));
        }
        self.store().link_post_category(post_id, category_id)?;
        self.get_detail(post_id).await
    }

    /// Unfile a post from a category. Removing an absent pairing is a
    /// no-op; both sides still have to exist.
    pub async fn remove_category(&self, post_id: i64, category_id: i64) -> AppResult<PostDetail> {
        if !self.crud.exists(post_id).await? {
            return Err(AppError::not_found("Post", post_id));
        }
        if !self.store().contains::<Category>(category_id)? {
            return Err(AppError::not_found("Category", category_id));
        }
        self.store().unlink_post_category(post_id, category_id)?;
        self.get_detail(post_id).await
    }

    pub async fn count(&self) -> AppResult<usize> {
        self.crud.count(&Filters::new()).await
    }
}
