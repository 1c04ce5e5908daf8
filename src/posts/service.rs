use crate::app::{
    errors::DefaultApiError,
    models::api_error::ApiError,
    util::sqlx::{get_code_from_db_err, SqlStateCodes},
};

use super::{
    dtos::{
        create_post_dto::CreatePostDto, edit_post_dto::EditPostDto,
        get_posts_filter_dto::GetPostsFilterDto,
    },
    errors::PostsApiError,
    models::{
        pagination::{Pagination, PostsPage},
        post::Post,
    },
    store::PostStore,
};

pub async fn create_post(dto: &CreatePostDto, store: &dyn PostStore) -> Result<Post, ApiError> {
    match store.create_post(dto).await {
        Ok(post) => {
            tracing::info!(id = post.id, "post created");
            Ok(post)
        }
        Err(e) => {
            let Some(db_err) = e.as_database_error() else {
                tracing::error!(%e);
                return Err(DefaultApiError::InternalServerError.value());
            };

            let Some(code) = get_code_from_db_err(db_err) else {
                tracing::error!(%e);
                return Err(DefaultApiError::InternalServerError.value());
            };

            match code.as_str() {
                SqlStateCodes::NOT_NULL_VIOLATION | SqlStateCodes::CHECK_VIOLATION => {
                    tracing::warn!(%e);
                    Err(PostsApiError::MissingFields.value())
                }
                _ => {
                    tracing::error!(%e);
                    Err(DefaultApiError::InternalServerError.value())
                }
            }
        }
    }
}

pub async fn get_posts(
    dto: &GetPostsFilterDto,
    store: &dyn PostStore,
) -> Result<PostsPage, ApiError> {
    let page = dto.page();
    let page_size = dto.page_size();
    let offset = Pagination::offset(page, page_size);

    let posts = match store.list_posts(offset, i64::from(page_size)).await {
        Ok(posts) => posts,
        Err(e) => {
            tracing::error!(%e);
            return Err(DefaultApiError::InternalServerError.value());
        }
    };

    let total_posts = match store.count_posts().await {
        Ok(count) => count.max(0) as u64,
        Err(e) => {
            tracing::error!(%e);
            return Err(DefaultApiError::InternalServerError.value());
        }
    };

    Ok(PostsPage {
        posts,
        pagination: Pagination::new(page, page_size, total_posts),
    })
}

pub async fn get_post_by_id(id: i32, store: &dyn PostStore) -> Result<Post, ApiError> {
    match store.get_post_by_id(id).await {
        Ok(post) => match post {
            Some(post) => Ok(post),
            None => Err(PostsApiError::PostNotFound.value()),
        },
        Err(e) => {
            tracing::error!(%e);
            Err(DefaultApiError::InternalServerError.value())
        }
    }
}

pub async fn edit_post_by_id(
    id: i32,
    dto: &EditPostDto,
    store: &dyn PostStore,
) -> Result<Post, ApiError> {
    if !dto.has_changes() {
        return Err(PostsApiError::NothingToEdit.value());
    }

    match store.edit_post_by_id(id, dto).await {
        Ok(post) => match post {
            Some(post) => Ok(post),
            None => Err(PostsApiError::PostNotFound.value()),
        },
        Err(e) => {
            tracing::error!(%e);
            Err(DefaultApiError::InternalServerError.value())
        }
    }
}

pub async fn delete_post_by_id(id: i32, store: &dyn PostStore) -> Result<Post, ApiError> {
    match store.delete_post_by_id(id).await {
        Ok(post) => match post {
            Some(post) => {
                tracing::info!(id = post.id, "post deleted");
                Ok(post)
            }
            None => Err(PostsApiError::PostNotFound.value()),
        },
        Err(e) => {
            tracing::error!(%e);
            Err(DefaultApiError::InternalServerError.value())
        }
    }
}
