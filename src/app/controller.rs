use std::sync::Arc;

use axum::{extract::State, response::Html};

use crate::{
    client::list_view::render_posts_page,
    posts::{dtos::get_posts_filter_dto::GetPostsFilterDto, service},
    AppState,
};

use super::{errors::DefaultApiError, models::api_error::ApiError};

/// Server-rendered first page of the posts list.
pub async fn get_root(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let page = service::get_posts(&GetPostsFilterDto::default(), state.store.as_ref()).await?;

    match render_posts_page(&page) {
        Ok(html) => Ok(Html(html)),
        Err(e) => {
            tracing::error!(%e);
            Err(DefaultApiError::InternalServerError.value())
        }
    }
}
