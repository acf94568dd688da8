//! Category entity and the post-count projection

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::field::FieldValue;
use crate::core::record::{Patch, Record};

/// A post category. Names are globally unique.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Category {
    pub fn new(name: String, description: Option<String>) -> Self {
        Self {
            id: 0,
            name,
            description,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

impl Record for Category {
    fn resource_name() -> &'static str {
        "Category"
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
            "name" => Some(FieldValue::String(self.name.clone())),
            "description" => Some(self.description.clone().into()),
            "created_at" => Some(FieldValue::DateTime(self.created_at)),
            "updated_at" => Some(self.updated_at.into()),
            _ => None,
        }
    }
}

/// Input for creating a category
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryCreate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial update for a category
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Patch<Category> for CategoryUpdate {
    fn apply(&self, category: &mut Category) {
        if let Some(name) = &self.name {
            category.name = name.clone();
        }
        if let Some(description) = &self.description {
            category.description = Some(description.clone());
        }
    }
}

/// Compact category reference embedded in post detail responses
#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub id: i64,
    pub name: String,
}

impl From<&Category> for CategorySummary {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
        }
    }
}

/// A category paired with the number of posts filed under it
#[derive(Debug, Clone, Serialize)]
pub struct CategoryWithPostCount {
    pub category: Category,
    pub post_count: usize,
}
