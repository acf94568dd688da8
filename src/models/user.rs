//! User entity and its input/response shapes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::field::FieldValue;
use crate::core::record::{Patch, Record};

/// A registered author. Email and username are globally unique;
/// deactivation flips `is_active` and keeps the row.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    /// Argon2 hash; never serialized into responses
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(email: String, username: String, password_hash: String, is_active: bool) -> Self {
        Self {
            id: 0,
            email,
            username,
            password_hash,
            is_active,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

impl Record for User {
    fn resource_name() -> &'static str {
        "User"
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
            "email" => Some(FieldValue::String(self.email.clone())),
            "username" => Some(FieldValue::String(self.username.clone())),
            "is_active" => Some(FieldValue::Boolean(self.is_active)),
            "created_at" => Some(FieldValue::DateTime(self.created_at)),
            "updated_at" => Some(self.updated_at.into()),
            _ => None,
        }
    }
}

/// Input for creating a user; the plaintext password is hashed before
/// anything is persisted
#[derive(Debug, Clone, Deserialize)]
pub struct UserCreate {
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Partial update for a user; only supplied fields are applied
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub username: Option<String>,
    pub is_active: Option<bool>,
}

impl Patch<User> for UserUpdate {
    fn apply(&self, user: &mut User) {
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(username) = &self.username {
            user.username = username.clone();
        }
        if let Some(is_active) = self.is_active {
            user.is_active = is_active;
        }
    }
}

/// Compact user reference embedded in detail responses
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User::new(
            "a@x.com".into(),
            "a".into(),
            "$argon2id$secret".into(),
            true,
        );
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "a@x.com");
    }

    #[test]
    fn test_partial_update_keeps_omitted_fields() {
        let mut user = User::new("a@x.com".into(), "a".into(), "hash".into(), true);
        let patch = UserUpdate {
            is_active: Some(false),
            ..Default::default()
        };
        patch.apply(&mut user);
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.username, "a");
        assert!(!user.is_active);
    }

    #[test]
    fn test_field_value_lookup() {
        let user = User::new("a@x.com".into(), "a".into(), "hash".into(), true);
        assert_eq!(user.field_value("email"), Some(FieldValue::from("a@x.com")));
        assert_eq!(user.field_value("updated_at"), Some(FieldValue::Null));
        assert_eq!(user.field_value("password_hash"), None);
        assert_eq!(user.field_value("no_such_field"), None);
    }
}
