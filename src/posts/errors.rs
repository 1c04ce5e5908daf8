use axum::http::StatusCode;

use crate::app::models::api_error::ApiError;

#[derive(Debug)]
pub enum PostsApiError {
    PostNotFound,
    InvalidId,
    NothingToEdit,
    MissingFields,
}

impl PostsApiError {
    pub fn value(&self) -> ApiError {
        match *self {
            Self::PostNotFound => ApiError {
                code: StatusCode::NOT_FOUND,
                message: "Post not found.".to_string(),
            },
            Self::InvalidId => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "Invalid post id.".to_string(),
            },
            Self::NothingToEdit => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "Received nothing to edit.".to_string(),
            },
            Self::MissingFields => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "title and content are required.".to_string(),
            },
        }
    }
}
