//! Role controller: unique role names and the user/role assignment pairs

use crate::controllers::base::CrudController;
use crate::core::error::{AppError, AppResult};
use crate::core::query::{Filters, ListQuery};
use crate::models::{
    Role, RoleAssignment, RoleCreate, RoleDetail, RoleUpdate, User, UserSummary,
};
use crate::store::MemoryStore;

/// Controller for [`Role`] records
#[derive(Clone)]
pub struct RoleController {
    crud: CrudController<Role>,
}

impl RoleController {
    pub fn new(store: MemoryStore) -> Self {
        Self {
            crud: CrudController::new(store),
        }
    }

    fn store(&self) -> &MemoryStore {
        self.crud.store()
    }

    /// Create a role; the name must be unused
    pub async fn create(&self, input: RoleCreate) -> AppResult<Role> {
        self.ensure_name_free(&input.name, None).await?;
        self.crud
            .create(Role::new(input.name, input.description))
            .await
    }

    pub async fn get(&self, id: i64) -> AppResult<Role> {
        self.crud.get(id).await
    }

    /// Role with every assigned user resolved
    pub async fn get_detail(&self, id: i64) -> AppResult<RoleDetail> {
        let role = self.crud.get(id).await?;
        let users = self
            .store()
            .users_with_role(id)?
            .iter()
            .map(UserSummary::from)
            .collect();
        Ok(RoleDetail { role, users })
    }

    pub async fn get_by_name(&self, name: &str) -> AppResult<Role> {
        self.crud
            .find_first(&Filters::new().eq("name", name))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Role with name '{name}' not found")))
    }

    pub async fn list(&self, query: ListQuery) -> AppResult<Vec<Role>> {
        self.crud.list(query, &Filters::new(), None).await
    }

    pub async fn update(&self, id: i64, input: RoleUpdate) -> AppResult<Role> {
        let current = self.crud.get(id).await?;
        if let Some(name) = &input.name {
            if *name != current.name {
                self.ensure_name_free(name, Some(id)).await?;
            }
        }
        self.crud.update(id, &input).await
    }

    /// Delete a role; its assignments go with it, the users stay
    pub async fn delete(&self, id: i64) -> AppResult<Role> {
        self.crud.delete(id).await
    }

    /// Assign a role to a user. Assigning twice is a conflict.
    pub async fn assign_to_user(&self, role_id: i64, user_id: i64) -> AppResult<RoleAssignment> {
        if !self.crud.exists(role_id).await? {
            return Err(AppError::not_found("Role", role_id));
        }
        if !self.store().contains::<User>(user_id)? {
            return Err(AppError::not_found("User", user_id));
        }
        if self.store().role_assignment_exists(user_id, role_id)? {
            return Err(AppError::Conflict(format!(
                "User {user_id} already has role {role_id}"
            )));
        }
        Ok(self.store().assign_role(user_id, role_id)?)
    }

    /// Remove a role from a user; reports whether an assignment existed.
    /// Removing an absent assignment is a no-op, not an error.
    pub async fn remove_from_user(&self, role_id: i64, user_id: i64) -> AppResult<bool> {
        if !self.crud.exists(role_id).await? {
            return Err(AppError::not_found("Role", role_id));
        }
        if !self.store().contains::<User>(user_id)? {
            return Err(AppError::not_found("User", user_id));
        }
        Ok(self.store().unassign_role(user_id, role_id)?)
    }

    /// All roles held by one user, in assignment order
    pub async fn roles_of_user(&self, user_id: i64) -> AppResult<Vec<Role>> {
        if !self.store().contains::<User>(user_id)? {
            return Err(AppError::not_found("User", user_id));
        }
        Ok(self.store().roles_of_user(user_id)?)
    }

    /// All users holding one role, in assignment order
    pub async fn users_with_role(&self, role_id: i64) -> AppResult<Vec<User>> {
        if !self.crud.exists(role_id).await? {
            return Err(AppError::not_found("Role", role_id));
        }
        Ok(self.store().users_with_role(role_id)?)
    }

    pub async fn count(&self) -> AppResult<usize> {
        self.crud.count(&Filters::new()).await
    }

    async fn ensure_name_free(&self, name: &str, exclude: Option<i64>) -> AppResult<()> {
        let existing = self
            .crud
            .find_first(&Filters::new().eq("name", name))
            .await?;
        match existing {
            Some(role) if Some(role.id) != exclude => Err(AppError::Conflict(format!(
                "Role with name '{name}' already exists"
            ))),
            _ => Ok(()),
        }
    }
}
