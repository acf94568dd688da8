//! Comment routes, including the nested reply endpoints

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::core::error::AppError;
use crate::core::query::ListQuery;
use crate::models::{Comment, CommentCreate, CommentDetail, CommentUpdate, ReplyCreate};
use crate::server::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/comments", post(create_comment).get(list_comments))
        .route(
            "/comments/{id}",
            get(get_comment).put(update_comment).delete(delete_comment),
        )
        .route(
            "/comments/{id}/replies",
            post(create_reply).get(list_replies),
        )
        .route("/posts/{id}/comments", get(list_by_post))
        .route(
            "/posts/{id}/comments/top-level",
            get(list_top_level_by_post),
        )
        .route("/users/{id}/comments", get(list_by_user))
}

async fn create_comment(
    State(state): State<AppState>,
    Json(input): Json<CommentCreate>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    let created = state.comments.create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn list_comments(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Comment>>, AppError> {
    Ok(Json(state.comments.list(query).await?))
}

async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CommentDetail>, AppError> {
    Ok(Json(state.comments.get_detail(id).await?))
}

async fn update_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<CommentUpdate>,
) -> Result<Json<Comment>, AppError> {
    Ok(Json(state.comments.update(id, input).await?))
}

async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.comments.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn create_reply(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<ReplyCreate>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    let created = state.comments.create_reply(id, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn list_replies(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Comment>>, AppError> {
    Ok(Json(state.comments.replies(id, query).await?))
}

async fn list_by_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Comment>>, AppError> {
    Ok(Json(state.comments.by_post(post_id, query).await?))
}

async fn list_top_level_by_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Comment>>, AppError> {
    Ok(Json(state.comments.top_level_by_post(post_id, query).await?))
}

async fn list_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Comment>>, AppError> {
    Ok(Json(state.comments.by_user(user_id, query).await?))
}
