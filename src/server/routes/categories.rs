//! Category routes

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::core::error::AppError;
use crate::core::query::ListQuery;
use crate::models::{Category, CategoryCreate, CategoryUpdate, CategoryWithPostCount};
use crate::server::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", post(create_category).get(list_categories))
        .route("/categories/popular", get(list_popular))
        .route("/categories/counts", get(list_with_post_counts))
        .route("/categories/name/{name}", get(get_category_by_name))
        .route(
            "/categories/{id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
}

async fn create_category(
    State(state): State<AppState>,
    Json(input): Json<CategoryCreate>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    let created = state.categories.create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Category>>, AppError> {
    Ok(Json(state.categories.list(query).await?))
}

async fn list_popular(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<CategoryWithPostCount>>, AppError> {
    Ok(Json(state.categories.popular(query).await?))
}

async fn list_with_post_counts(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<CategoryWithPostCount>>, AppError> {
    Ok(Json(state.categories.with_post_counts(query).await?))
}

async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Category>, AppError> {
    Ok(Json(state.categories.get(id).await?))
}

async fn get_category_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Category>, AppError> {
    Ok(Json(state.categories.get_by_name(&name).await?))
}

async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<CategoryUpdate>,
) -> Result<Json<Category>, AppError> {
    Ok(Json(state.categories.update(id, input).await?))
}

async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.categories.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
