use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::posts::{
    dtos::{create_post_dto::CreatePostDto, edit_post_dto::EditPostDto},
    models::post::Post,
};

use super::PostStore;

/// Process-local store. Ids start at 1 and are never reused.
#[derive(Default)]
pub struct MemoryPostStore {
    inner: RwLock<Rows>,
}

#[derive(Default)]
struct Rows {
    last_id: i32,
    posts: BTreeMap<i32, Post>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn list_posts(&self, offset: i64, limit: i64) -> Result<Vec<Post>, sqlx::Error> {
        let rows = self.inner.read().await;

        Ok(rows
            .posts
            .values()
            .rev()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn count_posts(&self) -> Result<i64, sqlx::Error> {
        Ok(self.inner.read().await.posts.len() as i64)
    }

    async fn create_post(&self, dto: &CreatePostDto) -> Result<Post, sqlx::Error> {
        let mut rows = self.inner.write().await;
        rows.last_id += 1;

        let post = Post::new(rows.last_id, &dto.title, &dto.content);
        rows.posts.insert(post.id, post.clone());

        Ok(post)
    }

    async fn get_post_by_id(&self, id: i32) -> Result<Option<Post>, sqlx::Error> {
        Ok(self.inner.read().await.posts.get(&id).cloned())
    }

    async fn edit_post_by_id(
        &self,
        id: i32,
        dto: &EditPostDto,
    ) -> Result<Option<Post>, sqlx::Error> {
        let mut rows = self.inner.write().await;
        let Some(post) = rows.posts.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(title) = &dto.title {
            post.title = title.to_string();
        }
        if let Some(content) = &dto.content {
            post.content = content.to_string();
        }

        Ok(Some(post.clone()))
    }

    async fn delete_post_by_id(&self, id: i32) -> Result<Option<Post>, sqlx::Error> {
        Ok(self.inner.write().await.posts.remove(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_dto(title: &str) -> CreatePostDto {
        CreatePostDto {
            title: title.to_string(),
            content: format!("{} body", title),
        }
    }

    #[tokio::test]
    async fn lists_newest_first_with_offset() {
        let store = MemoryPostStore::new();
        for title in ["a", "b", "c", "d"] {
            store.create_post(&create_dto(title)).await.unwrap();
        }

        let ids: Vec<i32> = store
            .list_posts(1, 2)
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();

        assert_eq!(ids, vec![3, 2]);
        assert_eq!(store.count_posts().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn does_not_reuse_deleted_ids() {
        let store = MemoryPostStore::new();
        let first = store.create_post(&create_dto("a")).await.unwrap();
        store.delete_post_by_id(first.id).await.unwrap();

        let second = store.create_post(&create_dto("b")).await.unwrap();

        assert_eq!(second.id, first.id + 1);
        assert!(store.get_post_by_id(first.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn edits_only_provided_fields() {
        let store = MemoryPostStore::new();
        let post = store.create_post(&create_dto("a")).await.unwrap();

        let dto = EditPostDto {
            title: Some("renamed".to_string()),
            content: None,
        };
        let edited = store.edit_post_by_id(post.id, &dto).await.unwrap().unwrap();

        assert_eq!(edited.title, "renamed");
        assert_eq!(edited.content, "a body");
        assert!(store.edit_post_by_id(99, &dto).await.unwrap().is_none());
    }
}
