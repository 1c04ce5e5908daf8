use axum::http::StatusCode;

use super::models::api_error::ApiError;

#[derive(Debug)]
pub enum DefaultApiError {
    InternalServerError,
    Overloaded,
}

impl DefaultApiError {
    pub fn value(&self) -> ApiError {
        match *self {
            Self::InternalServerError => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Internal Server Error".to_string(),
            },
            Self::Overloaded => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Server is overloaded, try again later.".to_string(),
            },
        }
    }
}
