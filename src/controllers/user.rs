//! User controller: account lifecycle, uniqueness, credential hashing

use std::sync::Arc;

use crate::controllers::base::CrudController;
use crate::core::error::{AppError, AppResult};
use crate::core::field::FieldFormat;
use crate::core::password::PasswordHasher;
use crate::core::query::{Filters, ListQuery, SortOrder};
use crate::models::{User, UserCreate, UserUpdate};
use crate::store::MemoryStore;

/// Controller for [`User`] records
#[derive(Clone)]
pub struct UserController {
    crud: CrudController<User>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserController {
    pub fn new(store: MemoryStore, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            crud: CrudController::new(store),
            hasher,
        }
    }

    /// Register a user. The email must be well-formed and both email and
    /// username must be unused; the password is hashed before anything is
    /// persisted.
    pub async fn create(&self, input: UserCreate) -> AppResult<User> {
        if !FieldFormat::Email.validate(&input.email) {
            return Err(AppError::Validation(format!(
                "invalid email address: '{}'",
                input.email
            )));
        }
        self.ensure_email_free(&input.email, None).await?;
        self.ensure_username_free(&input.username, None).await?;

        let password_hash = self.hasher.hash(&input.password)?;
        self.crud
            .create(User::new(
                input.email,
                input.username,
                password_hash,
                input.is_active,
            ))
            .await
    }

    pub async fn get(&self, id: i64) -> AppResult<User> {
        self.crud.get(id).await
    }

    pub async fn list(&self, query: ListQuery) -> AppResult<Vec<User>> {
        self.crud.list(query, &Filters::new(), None).await
    }

    /// Only users whose `is_active` flag is set, newest first
    pub async fn active_users(&self, query: ListQuery) -> AppResult<Vec<User>> {
        self.crud
            .list(
                query,
                &Filters::new().eq("is_active", true),
                Some(SortOrder::created_desc()),
            )
            .await
    }

    pub async fn get_by_email(&self, email: &str) -> AppResult<User> {
        self.crud
            .find_first(&Filters::new().eq("email", email))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with email '{email}' not found")))
    }

    pub async fn get_by_username(&self, username: &str) -> AppResult<User> {
        self.crud
            .find_first(&Filters::new().eq("username", username))
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("User with username '{username}' not found"))
            })
    }

    /// Apply a partial update; a changed email or username is re-validated
    /// for format and uniqueness against everyone else
    pub async fn update(&self, id: i64, input: UserUpdate) -> AppResult<User> {
        // Existence first, so a bad payload for a missing user is a 404.
        let current = self.crud.get(id).await?;

        if let Some(email) = &input.email {
            if !FieldFormat::Email.validate(email) {
                return Err(AppError::Validation(format!(
                    "invalid email address: '{email}'"
                )));
            }
            if *email != current.email {
                self.ensure_email_free(email, Some(id)).await?;
            }
        }
        if let Some(username) = &input.username {
            if *username != current.username {
                self.ensure_username_free(username, Some(id)).await?;
            }
        }

        self.crud.update(id, &input).await
    }

    /// Delete a user along with their posts, comments, profile and role
    /// assignments
    pub async fn delete(&self, id: i64) -> AppResult<User> {
        self.crud.delete(id).await
    }

    /// Clear `is_active`; the row and everything it owns stay put
    pub async fn deactivate(&self, id: i64) -> AppResult<User> {
        self.set_active(id, false).await
    }

    /// Set `is_active` again on a previously deactivated user
    pub async fn activate(&self, id: i64) -> AppResult<User> {
        self.set_active(id, true).await
    }

    async fn set_active(&self, id: i64, is_active: bool) -> AppResult<User> {
        let patch = UserUpdate {
            is_active: Some(is_active),
            ..Default::default()
        };
        self.crud.update(id, &patch).await
    }

    /// Check a plaintext password against a user's stored hash
    pub async fn verify_password(&self, id: i64, password: &str) -> AppResult<bool> {
        let user = self.crud.get(id).await?;
        self.hasher.verify(password, &user.password_hash)
    }

    pub async fn count(&self) -> AppResult<usize> {
        self.crud.count(&Filters::new()).await
    }

    async fn ensure_email_free(&self, email: &str, exclude: Option<i64>) -> AppResult<()> {
        let existing = self
            .crud
            .find_first(&Filters::new().eq("email", email))
            .await?;
        match existing {
            Some(user) if Some(user.id) != exclude => Err(AppError::Conflict(format!(
                "User with email '{email}' already exists"
            ))),
            _ => Ok(()),
        }
    }

    async fn ensure_username_free(&self, username: &str, exclude: Option<i64>) -> AppResult<()> {
        let existing = self
            .crud
            .find_first(&Filters::new().eq("username", username))
            .await?;
        match existing {
            Some(user) if Some(user.id) != exclude => Err(AppError::Conflict(format!(
                "User with username '{username}' already exists"
            ))),
            _ => Ok(()),
        }
    }
}
