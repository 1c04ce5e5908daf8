use async_trait::async_trait;
use sqlx::PgPool;

use crate::posts::{
    dtos::{create_post_dto::CreatePostDto, edit_post_dto::EditPostDto},
    models::post::Post,
};

use super::PostStore;

#[derive(Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn list_posts(&self, offset: i64, limit: i64) -> Result<Vec<Post>, sqlx::Error> {
        sqlx::query_as::<_, Post>(
            "
            SELECT id, title, content FROM posts
            ORDER BY id DESC
            OFFSET $1 LIMIT $2
            ",
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    async fn count_posts(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await
    }

    async fn create_post(&self, dto: &CreatePostDto) -> Result<Post, sqlx::Error> {
        sqlx::query_as::<_, Post>(
            "
            INSERT INTO posts (title, content)
            VALUES ($1, $2)
            RETURNING id, title, content
            ",
        )
        .bind(&dto.title)
        .bind(&dto.content)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_post_by_id(&self, id: i32) -> Result<Option<Post>, sqlx::Error> {
        sqlx::query_as::<_, Post>(
            "
            SELECT id, title, content FROM posts
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn edit_post_by_id(
        &self,
        id: i32,
        dto: &EditPostDto,
    ) -> Result<Option<Post>, sqlx::Error> {
        let sql = dto.to_sql();
        let mut sqlx = sqlx::query_as::<_, Post>(&sql);

        if let Some(title) = &dto.title {
            sqlx = sqlx.bind(title);
        }
        if let Some(content) = &dto.content {
            sqlx = sqlx.bind(content);
        }
        sqlx = sqlx.bind(id);

        sqlx.fetch_optional(&self.pool).await
    }

    async fn delete_post_by_id(&self, id: i32) -> Result<Option<Post>, sqlx::Error> {
        sqlx::query_as::<_, Post>(
            "
            DELETE FROM posts
            WHERE id = $1
            RETURNING id, title, content
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }
}
