//! Role routes, including user assignment

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::core::error::AppError;
use crate::core::query::ListQuery;
use crate::models::{Role, RoleAssignment, RoleCreate, RoleDetail, RoleUpdate, User, UserSummary};
use crate::server::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/roles", post(create_role).get(list_roles))
        .route("/roles/name/{name}", get(get_role_by_name))
        .route(
            "/roles/{id}",
            get(get_role).put(update_role).delete(delete_role),
        )
        .route("/roles/{id}/users", get(list_role_users))
        .route(
            "/roles/{id}/users/{user_id}",
            post(assign_role).delete(unassign_role),
        )
        .route("/users/{id}/roles", get(list_user_roles))
}

async fn create_role(
    State(state): State<AppState>,
    Json(input): Json<RoleCreate>,
) -> Result<(StatusCode, Json<Role>), AppError> {
    let created = state.roles.create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn list_roles(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Role>>, AppError> {
    Ok(Json(state.roles.list(query).await?))
}

async fn get_role(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<RoleDetail>, AppError> {
    Ok(Json(state.roles.get_detail(id).await?))
}

async fn get_role_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Role>, AppError> {
    Ok(Json(state.roles.get_by_name(&name).await?))
}

async fn update_role(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<RoleUpdate>,
) -> Result<Json<Role>, AppError> {
    Ok(Json(state.roles.update(id, input).await?))
}

async fn delete_role(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.roles.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn assign_role(
    State(state): State<AppState>,
    Path((role_id, user_id)): Path<(i64, i64)>,
) -> Result<(StatusCode, Json<RoleAssignment>), AppError> {
    let assignment = state.roles.assign_to_user(role_id, user_id).await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

async fn unassign_role(
    State(state): State<AppState>,
    Path((role_id, user_id)): Path<(i64, i64)>,
) -> Result<StatusCode, AppError> {
    state.roles.remove_from_user(role_id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_role_users(
    State(state): State<AppState>,
    Path(role_id): Path<i64>,
) -> Result<Json<Vec<UserSummary>>, AppError> {
    let users: Vec<User> = state.roles.users_with_role(role_id).await?;
    Ok(Json(users.iter().map(UserSummary::from).collect()))
}

async fn list_user_roles(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<Role>>, AppError> {
    Ok(Json(state.roles.roles_of_user(user_id).await?))
}
