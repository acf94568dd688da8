//! Comment controller: the reply tree and its integrity rules

use crate::controllers::base::CrudController;
use crate::core::error::{AppError, AppResult};
use crate::core::query::{Filters, ListQuery};
use crate::models::{
    Comment, CommentCreate, CommentDetail, CommentUpdate, Post, ReplyCreate, User, UserSummary,
};
use crate::store::MemoryStore;

/// Controller for [`Comment`] records
#[derive(Clone)]
pub struct CommentController {
    crud: CrudController<Comment>,
}

impl CommentController {
    pub fn new(store: MemoryStore) -> Self {
        Self {
            crud: CrudController::new(store),
        }
    }

    fn store(&self) -> &MemoryStore {
        self.crud.store()
    }

    /// Create a comment. Author and post must exist; if `parent_id` is
    /// given, the parent must exist and sit on the same post. Nothing is
    /// persisted when any check fails.
    pub async fn create(&self, input: CommentCreate) -> AppResult<Comment> {
        if !self.store().contains::<User>(input.user_id)? {
            return Err(AppError::not_found("User", input.user_id));
        }
        if !self.store().contains::<Post>(input.post_id)? {
            return Err(AppError::not_found("Post", input.post_id));
        }
        if let Some(parent_id) = input.parent_id {
            let parent = self
                .store()
                .fetch::<Comment>(parent_id)?
                .ok_or_else(|| AppError::not_found("Comment", parent_id))?;
            if parent.post_id != input.post_id {
                return Err(AppError::Validation(format!(
                    "parent comment {parent_id} belongs to post {}, not post {}",
                    parent.post_id, input.post_id
                )));
            }
        }
        self.crud
            .create(Comment::new(
                input.content,
                input.user_id,
                input.post_id,
                input.parent_id,
            ))
            .await
    }

    /// Reply to an existing comment; the reply lands on the parent's post
    pub async fn create_reply(&self, parent_id: i64, input: ReplyCreate) -> AppResult<Comment> {
        let parent = self
            .store()
            .fetch::<Comment>(parent_id)?
            .ok_or_else(|| AppError::not_found("Comment", parent_id))?;
        self.create(CommentCreate {
            content: input.content,
            user_id: input.user_id,
            post_id: parent.post_id,
            parent_id: Some(parent_id),
        })
        .await
    }

    pub async fn get(&self, id: i64) -> AppResult<Comment> {
        self.crud.get(id).await
    }

    /// Comment with author and first-level replies resolved
    pub async fn get_detail(&self, id: i64) -> AppResult<CommentDetail> {
        let comment = self.crud.get(id).await?;
        let author = self
            .store()
            .fetch::<User>(comment.user_id)?
            .map(|u| UserSummary::from(&u));
        let replies = self
            .crud
            .list(
                ListQuery::default(),
                &Filters::new().eq("parent_id", id),
                None,
            )
            .await?;
        Ok(CommentDetail {
            comment,
            author,
            replies,
        })
    }

    pub async fn list(&self, query: ListQuery) -> AppResult<Vec<Comment>> {
        self.crud.list(query, &Filters::new(), None).await
    }

    /// All comments on one post, replies included, in insertion order
    pub async fn by_post(&self, post_id: i64, query: ListQuery) -> AppResult<Vec<Comment>> {
        if !self.store().contains::<Post>(post_id)? {
            return Err(AppError::not_found("Post", post_id));
        }
        self.crud
            .list(query, &Filters::new().eq("post_id", post_id), None)
            .await
    }

    /// Top-level comments on one post, replies excluded
    pub async fn top_level_by_post(
        &self,
        post_id: i64,
        query: ListQuery,
    ) -> AppResult<Vec<Comment>> {
        if !self.store().contains::<Post>(post_id)? {
            return Err(AppError::not_found("Post", post_id));
        }
        self.crud
            .list(
                query,
                &Filters::new().eq("post_id", post_id).is_null("parent_id"),
                None,
            )
            .await
    }

    /// Direct replies to one comment
    pub async fn replies(&self, comment_id: i64, query: ListQuery) -> AppResult<Vec<Comment>> {
        if !self.crud.exists(comment_id).await? {
            return Err(AppError::not_found("Comment", comment_id));
        }
        self.crud
            .list(query, &Filters::new().eq("parent_id", comment_id), None)
            .await
    }

    /// All comments left by one user
    pub async fn by_user(&self, user_id: i64, query: ListQuery) -> AppResult<Vec<Comment>> {
        if !self.store().contains::<User>(user_id)? {
            return Err(AppError::not_found("User", user_id));
        }
        self.crud
            .list(query, &Filters::new().eq("user_id", user_id), None)
            .await
    }

    pub async fn update(&self, id: i64, input: CommentUpdate) -> AppResult<Comment> {
        self.crud.update(id, &input).await
    }

    /// Delete a comment and its whole reply subtree
    pub async fn delete(&self, id: i64) -> AppResult<Comment> {
        self.crud.delete(id).await
    }

    pub async fn count(&self) -> AppResult<usize> {
        self.crud.count(&Filters::new()).await
    }
}
