//! Role entity and the user/role association row

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::field::FieldValue;
use crate::core::record::{Patch, Record};
use crate::models::user::UserSummary;

/// An assignable role. Names are globally unique.
#[derive(Debug, Clone, Serialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Role {
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

impl Record for Role {
    fn resource_name() -> &'static str {
        "Role"
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

/// Input for creating a role
#[derive(Debug, Clone, Deserialize)]
pub struct RoleCreate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial update for a role
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Patch<Role> for RoleUpdate {
    fn apply(&self, role: &mut Role) {
        if let Some(name) = &self.name {
            role.name = name.clone();
        }
        if let Some(description) = &self.description {
            role.description = Some(description.clone());
        }
    }
}

/// Association row linking one user to one role; keyed by the pair
#[derive(Debug, Clone, Serialize)]
pub struct RoleAssignment {
    pub user_id: i64,
    pub role_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Role with its assigned users eager-loaded
#[derive(Debug, Clone, Serialize)]
pub struct RoleDetail {
    #[serde(flatten)]
    pub role: Role,
    pub users: Vec<UserSummary>,
}
