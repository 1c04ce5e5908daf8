//! Persistence seam for posts.
//!
//! Handlers only ever see `dyn PostStore`; the server picks the Postgres
//! adapter when a database URL is configured and the in-memory one otherwise.

use async_trait::async_trait;

use super::{
    dtos::{create_post_dto::CreatePostDto, edit_post_dto::EditPostDto},
    models::post::Post,
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryPostStore;
pub use postgres::PgPostStore;

#[async_trait]
pub trait PostStore: Send + Sync {
    /// Rows ordered by id, newest first.
    async fn list_posts(&self, offset: i64, limit: i64) -> Result<Vec<Post>, sqlx::Error>;

    async fn count_posts(&self) -> Result<i64, sqlx::Error>;

    async fn create_post(&self, dto: &CreatePostDto) -> Result<Post, sqlx::Error>;

    async fn get_post_by_id(&self, id: i32) -> Result<Option<Post>, sqlx::Error>;

    /// `None` when no row has this id.
    async fn edit_post_by_id(&self, id: i32, dto: &EditPostDto)
        -> Result<Option<Post>, sqlx::Error>;

    /// Returns the removed row, `None` when no row has this id.
    async fn delete_post_by_id(&self, id: i32) -> Result<Option<Post>, sqlx::Error>;
}
