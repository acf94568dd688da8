//! Post routes, including the per-author listing and category pairing

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::core::error::AppError;
use crate::core::query::ListQuery;
use crate::models::{Post, PostCreate, PostDetail, PostUpdate};
use crate::server::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/posts", post(create_post).get(list_posts))
        .route("/posts/published", get(list_published))
        .route("/posts/recent", get(list_recent))
        .route("/posts/search", get(search_posts))
        .route(
            "/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/posts/{id}/publish", post(publish_post))
        .route("/posts/{id}/unpublish", post(unpublish_post))
        .route(
            "/posts/{id}/categories/{category_id}",
            post(add_category).delete(remove_category),
        )
        .route("/users/{id}/posts", get(list_by_user))
        .route("/categories/{id}/posts", get(list_by_category))
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: String,
    skip: Option<usize>,
    limit: Option<usize>,
}

impl SearchParams {
    fn page(&self) -> ListQuery {
        let defaults = ListQuery::default();
        ListQuery::new(
            self.skip.unwrap_or(defaults.skip),
            self.limit.unwrap_or(defaults.limit),
        )
    }
}

async fn create_post(
    State(state): State<AppState>,
    Json(input): Json<PostCreate>,
) -> Result<(StatusCode, Json<Post>), AppError> {
    let created = state.posts.create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Post>>, AppError> {
    Ok(Json(state.posts.list(query).await?))
}

async fn list_published(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Post>>, AppError> {
    Ok(Json(state.posts.published(query).await?))
}

async fn list_recent(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Post>>, AppError> {
    Ok(Json(state.posts.recent_published(query).await?))
}

async fn search_posts(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Post>>, AppError> {
    Ok(Json(state.posts.search(&params.q, params.page()).await?))
}

async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PostDetail>, AppError> {
    Ok(Json(state.posts.get_detail(id).await?))
}

async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<PostUpdate>,
) -> Result<Json<Post>, AppError> {
    Ok(Json(state.posts.update(id, input).await?))
}

async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.posts.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn publish_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Post>, AppError> {
    Ok(Json(state.posts.publish(id).await?))
}

async fn unpublish_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Post>, AppError> {
    Ok(Json(state.posts.unpublish(id).await?))
}

async fn add_category(
    State(state): State<AppState>,
    Path((post_id, category_id)): Path<(i64, i64)>,
) -> Result<(StatusCode, Json<PostDetail>), AppError> {
    let detail = state.posts.add_category(post_id, category_id).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

async fn remove_category(
    State(state): State<AppState>,
    Path((post_id, category_id)): Path<(i64, i64)>,
) -> Result<Json<PostDetail>, AppError> {
    Ok(Json(state.posts.remove_category(post_id, category_id).await?))
}

async fn list_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Post>>, AppError> {
    Ok(Json(state.posts.by_user(user_id, query).await?))
}

async fn list_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Post>>, AppError> {
    Ok(Json(state.posts.by_category(category_id, query).await?))
}
