//! Profile routes, addressable by profile id or by owning user

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::core::error::AppError;
use crate::core::query::ListQuery;
use crate::models::{Profile, ProfileCreate, ProfileDetail, ProfileUpdate};
use crate::server::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profiles", post(create_profile).get(list_profiles))
        .route("/profiles/location/{location}", get(list_by_location))
        .route("/profiles/username/{username}", get(get_by_username))
        .route(
            "/profiles/users/{user_id}",
            get(get_by_user).put(update_by_user),
        )
        .route(
            "/profiles/{id}",
            get(get_profile).put(update_profile).delete(delete_profile),
        )
}

async fn create_profile(
    State(state): State<AppState>,
    Json(input): Json<ProfileCreate>,
) -> Result<(StatusCode, Json<Profile>), AppError> {
    let created = state.profiles.create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn list_profiles(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Profile>>, AppError> {
    Ok(Json(state.profiles.list(query).await?))
}

async fn list_by_location(
    State(state): State<AppState>,
    Path(location): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Profile>>, AppError> {
    Ok(Json(state.profiles.by_location(&location, query).await?))
}

async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProfileDetail>, AppError> {
    Ok(Json(state.profiles.get_detail(id).await?))
}

async fn get_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Profile>, AppError> {
    Ok(Json(state.profiles.get_by_user_id(user_id).await?))
}

async fn get_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Profile>, AppError> {
    Ok(Json(state.profiles.get_by_username(&username).await?))
}

async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<ProfileUpdate>,
) -> Result<Json<Profile>, AppError> {
    Ok(Json(state.profiles.update(id, input).await?))
}

async fn update_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(input): Json<ProfileUpdate>,
) -> Result<Json<Profile>, AppError> {
    Ok(Json(state.profiles.update_by_user_id(user_id, input).await?))
}

async fn delete_profile(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.profiles.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
