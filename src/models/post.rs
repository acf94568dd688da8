//! Post entity, its inputs, and the detail shape with author/categories

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::field::FieldValue;
use crate::core::record::{Patch, Record};
use crate::models::category::CategorySummary;
use crate::models::user::UserSummary;

/// A blog post. Belongs to one author; deleting a post takes its comments
/// and category pairings with it.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub user_id: i64,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Post {
    pub fn new(title: String, content: String, user_id: i64) -> Self {
        Self {
            id: 0,
            title,
            content,
            user_id,
            is_published: false,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

impl Record for Post {
    fn resource_name() -> &'static str {
        "Post"
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
            "title" => Some(FieldValue::String(self.title.clone())),
            "content" => Some(FieldValue::String(self.content.clone())),
            "user_id" => Some(FieldValue::Integer(self.user_id)),
            "is_published" => Some(FieldValue::Boolean(self.is_published)),
            "created_at" => Some(FieldValue::DateTime(self.created_at)),
            "updated_at" => Some(self.updated_at.into()),
            _ => None,
        }
    }
}

/// Input for creating a post
#[derive(Debug, Clone, Deserialize)]
pub struct PostCreate {
    pub title: String,
    pub content: String,
    pub user_id: i64,
}

/// Partial update for a post
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_published: Option<bool>,
}

impl Patch<Post> for PostUpdate {
    fn apply(&self, post: &mut Post) {
        if let Some(title) = &self.title {
            post.title = title.clone();
        }
        if let Some(content) = &self.content {
            post.content = content.clone();
        }
        if let Some(is_published) = self.is_published {
            post.is_published = is_published;
        }
    }
}

/// Post with author and categories eager-loaded in one fetch
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: Post,
    pub author: Option<UserSummary>,
    pub categories: Vec<CategorySummary>,
}
