//! Comment entity with its self-referential reply tree

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::field::FieldValue;
use crate::core::record::{Patch, Record};
use crate::models::user::UserSummary;

/// A comment on a post. `parent_id` is `None` for top-level comments;
/// replies point back at their parent, forming a tree. Deleting a comment
/// deletes its whole reply subtree.
#[derive(Debug, Clone, Serialize)]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub user_id: i64,
    pub post_id: i64,
    pub parent_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Comment {
    pub fn new(content: String, user_id: i64, post_id: i64, parent_id: Option<i64>) -> Self {
        Self {
            id: 0,
            content,
            user_id,
            post_id,
            parent_id,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

impl Record for Comment {
    fn resource_name() -> &'static str {
        "Comment"
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    fn stamp_created(&mut self, at: DateTime<Utc>) {
        self.created_at = at;
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = Some(at);
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(FieldValue::Integer(self.id)),
            "content" => Some(FieldValue::String(self.content.clone())),
            "user_id" => Some(FieldValue::Integer(self.user_id)),
            "post_id" => Some(FieldValue::Integer(self.post_id)),
            "parent_id" => Some(self.parent_id.into()),
            "created_at" => Some(FieldValue::DateTime(self.created_at)),
            "updated_at" => Some(self.updated_at.into()),
            _ => None,
        }
    }
}

/// Input for creating a comment
#[derive(Debug, Clone, Deserialize)]
pub struct CommentCreate {
    pub content: String,
    pub user_id: i64,
    pub post_id: i64,
    #[serde(default)]
    pub parent_id: Option<i64>,
}

/// Input for replying to an existing comment; the post is inherited from
/// the parent
#[derive(Debug, Clone, Deserialize)]
pub struct ReplyCreate {
    pub content: String,
    pub user_id: i64,
}

/// Partial update for a comment
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentUpdate {
    pub content: Option<String>,
}

impl Patch<Comment> for CommentUpdate {
    fn apply(&self, comment: &mut Comment) {
        if let Some(content) = &self.content {
            comment.content = content.clone();
        }
    }
}

/// Comment with author and direct replies eager-loaded.
///
/// Only the first level of replies is materialized; deeper levels are
/// fetched on demand via the replies query.
#[derive(Debug, Clone, Serialize)]
pub struct CommentDetail {
    #[serde(flatten)]
    pub comment: Comment,
    pub author: Option<UserSummary>,
    pub replies: Vec<Comment>,
}
