//! Profile entity: at most one per user

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::field::FieldValue;
use crate::core::record::{Patch, Record};
use crate::models::user::UserSummary;

/// A user's public profile. One per user, enforced by a uniqueness check
/// before create.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub id: i64,
    pub user_id: i64,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Profile {
    pub fn new(
        user_id: i64,
        bio: Option<String>,
        website: Option<String>,
        location: Option<String>,
        avatar_url: Option<String>,
    ) -> Self {
        Self {
            id: 0,
            user_id,
            bio,
            website,
            location,
            avatar_url,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

impl Record for Profile {
    fn resource_name() -> &'static str {
        "Profile"
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
            "user_id" => Some(FieldValue::Integer(self.user_id)),
            "bio" => Some(self.bio.clone().into()),
            "website" => Some(self.website.clone().into()),
            "location" => Some(self.location.clone().into()),
            "avatar_url" => Some(self.avatar_url.clone().into()),
            "created_at" => Some(FieldValue::DateTime(self.created_at)),
            "updated_at" => Some(self.updated_at.into()),
            _ => None,
        }
    }
}

/// Input for creating a profile
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileCreate {
    pub user_id: i64,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Partial update for a profile
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub bio: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub avatar_url: Option<String>,
}

impl Patch<Profile> for ProfileUpdate {
    fn apply(&self, profile: &mut Profile) {
        if let Some(bio) = &self.bio {
            profile.bio = Some(bio.clone());
        }
        if let Some(website) = &self.website {
            profile.website = Some(website.clone());
        }
        if let Some(location) = &self.location {
            profile.location = Some(location.clone());
        }
        if let Some(avatar_url) = &self.avatar_url {
            profile.avatar_url = Some(avatar_url.clone());
        }
    }
}

/// Profile with its owning user eager-loaded
#[derive(Debug, Clone, Serialize)]
pub struct ProfileDetail {
    #[serde(flatten)]
    pub profile: Profile,
    pub user: Option<UserSummary>,
}
