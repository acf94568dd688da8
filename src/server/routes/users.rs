//! User routes

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::core::error::AppError;
use crate::core::query::ListQuery;
use crate::models::{User, UserCreate, UserUpdate};
use crate::server::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user).get(list_users))
        .route("/users/active", get(list_active_users))
        .route("/users/email/{email}", get(get_user_by_email))
        .route("/users/username/{username}", get(get_user_by_username))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/users/{id}/activate", post(activate_user))
        .route("/users/{id}/deactivate", post(deactivate_user))
}

async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<UserCreate>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = state.users.create(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(state.users.list(query).await?))
}

async fn list_active_users(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(state.users.active_users(query).await?))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<User>, AppError> {
    Ok(Json(state.users.get(id).await?))
}

async fn get_user_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<User>, AppError> {
    Ok(Json(state.users.get_by_email(&email).await?))
}

async fn get_user_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<User>, AppError> {
    Ok(Json(state.users.get_by_username(&username).await?))
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UserUpdate>,
) -> Result<Json<User>, AppError> {
    Ok(Json(state.users.update(id, input).await?))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.users.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn activate_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<User>, AppError> {
    Ok(Json(state.users.activate(id).await?))
}

async fn deactivate_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<User>, AppError> {
    Ok(Json(state.users.deactivate(id).await?))
}
