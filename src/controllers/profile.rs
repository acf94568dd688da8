//! Profile controller: one profile per user, URL-shaped fields validated

use crate::controllers::base::CrudController;
use crate::core::error::{AppError, AppResult};
use crate::core::field::FieldFormat;
use crate::core::query::{Filters, ListQuery};
use crate::models::{
    Profile, ProfileCreate, ProfileDetail, ProfileUpdate, User, UserSummary,
};
use crate::store::MemoryStore;

/// Controller for [`Profile`] records
#[derive(Clone)]
pub struct ProfileController {
    crud: CrudController<Profile>,
}

impl ProfileController {
    pub fn new(store: MemoryStore) -> Self {
        Self {
            crud: CrudController::new(store),
        }
    }

    fn store(&self) -> &MemoryStore {
        self.crud.store()
    }

    /// Create a profile for an existing user who does not have one yet
    pub async fn create(&self, input: ProfileCreate) -> AppResult<Profile> {
        if !self.store().contains::<User>(input.user_id)? {
            return Err(AppError::not_found("User", input.user_id));
        }
        let existing = self
            .crud
            .find_first(&Filters::new().eq("user_id", input.user_id))
            .await?;
        if existing.is_some() {
            return Err(AppError::Conflict(format!(
                "User with id {} already has a profile",
                input.user_id
            )));
        }
        validate_url_field("website", input.website.as_deref())?;
        validate_url_field("avatar_url", input.avatar_url.as_deref())?;

        self.crud
            .create(Profile::new(
                input.user_id,
                input.bio,
                input.website,
                input.location,
                input.avatar_url,
            ))
            .await
    }

    pub async fn get(&self, id: i64) -> AppResult<Profile> {
        self.crud.get(id).await
    }

    /// Profile with its owner resolved
    pub async fn get_detail(&self, id: i64) -> AppResult<ProfileDetail> {
        let profile = self.crud.get(id).await?;
        let user = self
            .store()
            .fetch::<User>(profile.user_id)?
            .map(|u| UserSummary::from(&u));
        Ok(ProfileDetail { profile, user })
    }

    pub async fn get_by_user_id(&self, user_id: i64) -> AppResult<Profile> {
        self.crud
            .find_first(&Filters::new().eq("user_id", user_id))
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Profile for user with id {user_id} not found"))
            })
    }

    /// Resolve a profile through its owner's username
    pub async fn get_by_username(&self, username: &str) -> AppResult<Profile> {
        let user = self
            .store()
            .list::<User>()?
            .into_iter()
            .find(|u| u.username == username)
            .ok_or_else(|| {
                AppError::NotFound(format!("User with username '{username}' not found"))
            })?;
        self.get_by_user_id(user.id).await
    }

    pub async fn list(&self, query: ListQuery) -> AppResult<Vec<Profile>> {
        self.crud.list(query, &Filters::new(), None).await
    }

    /// Profiles declaring an exact location
    pub async fn by_location(&self, location: &str, query: ListQuery) -> AppResult<Vec<Profile>> {
        self.crud
            .list(query, &Filters::new().eq("location", location), None)
            .await
    }

    pub async fn update(&self, id: i64, input: ProfileUpdate) -> AppResult<Profile> {
        validate_url_field("website", input.website.as_deref())?;
        validate_url_field("avatar_url", input.avatar_url.as_deref())?;
        self.crud.update(id, &input).await
    }

    /// Update a profile addressed by its owner rather than its own id
    pub async fn update_by_user_id(
        &self,
        user_id: i64,
        input: ProfileUpdate,
    ) -> AppResult<Profile> {
        let profile = self.get_by_user_id(user_id).await?;
        self.update(profile.id, input).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<Profile> {
        self.crud.delete(id).await
    }

    pub async fn count(&self) -> AppResult<usize> {
        self.crud.count(&Filters::new()).await
    }
}

fn validate_url_field(field: &str, value: Option<&str>) -> AppResult<()> {
    match value {
        Some(url) if !FieldFormat::Url.validate(url) => Err(AppError::Validation(format!(
            "invalid URL in field '{field}': '{url}'"
        ))),
        _ => Ok(()),
    }
}
