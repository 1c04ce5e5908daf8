use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    app::{
        models::api_error::ApiError,
        structs::json_from_request::{JsonFromRequest, QueryFromRequest},
    },
    AppState,
};

use super::{
    dtos::{
        create_post_dto::CreatePostDto, edit_post_dto::EditPostDto,
        get_posts_filter_dto::GetPostsFilterDto,
    },
    errors::PostsApiError,
    models::{pagination::PostsPage, post::Post},
    service,
};

pub async fn create_post(
    State(state): State<Arc<AppState>>,
    JsonFromRequest(dto): JsonFromRequest<CreatePostDto>,
) -> Result<Json<Post>, ApiError> {
    if let Err(e) = dto.validate() {
        return Err(ApiError {
            code: StatusCode::BAD_REQUEST,
            message: e.to_string(),
        });
    }

    match service::create_post(&dto, state.store.as_ref()).await {
        Ok(post) => Ok(Json(post)),
        Err(e) => Err(e),
    }
}

pub async fn get_posts(
    State(state): State<Arc<AppState>>,
    QueryFromRequest(dto): QueryFromRequest<GetPostsFilterDto>,
) -> Result<Json<PostsPage>, ApiError> {
    if let Err(e) = dto.validate() {
        return Err(ApiError {
            code: StatusCode::BAD_REQUEST,
            message: e.to_string(),
        });
    }

    match service::get_posts(&dto, state.store.as_ref()).await {
        Ok(page) => Ok(Json(page)),
        Err(e) => Err(e),
    }
}

pub async fn get_post_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Post>, ApiError> {
    let id = parse_id(&id)?;

    match service::get_post_by_id(id, state.store.as_ref()).await {
        Ok(post) => Ok(Json(post)),
        Err(e) => Err(e),
    }
}

pub async fn edit_post_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonFromRequest(dto): JsonFromRequest<EditPostDto>,
) -> Result<Json<Post>, ApiError> {
    let id = parse_id(&id)?;

    if let Err(e) = dto.validate() {
        return Err(ApiError {
            code: StatusCode::BAD_REQUEST,
            message: e.to_string(),
        });
    }

    match service::edit_post_by_id(id, &dto, state.store.as_ref()).await {
        Ok(post) => Ok(Json(post)),
        Err(e) => Err(e),
    }
}

pub async fn delete_post_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Post>, ApiError> {
    let id = parse_id(&id)?;

    match service::delete_post_by_id(id, state.store.as_ref()).await {
        Ok(post) => Ok(Json(post)),
        Err(e) => Err(e),
    }
}

fn parse_id(id: &str) -> Result<i32, ApiError> {
    id.parse::<i32>()
        .map_err(|_| PostsApiError::InvalidId.value())
}
