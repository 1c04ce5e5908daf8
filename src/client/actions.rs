use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::posts::models::{pagination::PostsPage, post::Post};

/// A failed action. Carries the attempted operation and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to {operation}")]
pub struct ActionError {
    pub operation: &'static str,
}

impl ActionError {
    pub fn new(operation: &'static str) -> Self {
        Self { operation }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostInput {
    pub title: String,
    pub content: String,
}

#[async_trait]
pub trait PostActions: Send + Sync {
    async fn fetch_posts(&self, page: u32, page_size: u32) -> Result<PostsPage, ActionError>;

    async fn fetch_post(&self, id: i32) -> Result<Post, ActionError>;

    async fn submit_post(&self, input: &PostInput) -> Result<Post, ActionError>;

    async fn update_post(&self, id: i32, input: &PostInput) -> Result<Post, ActionError>;

    async fn delete_post(&self, id: i32) -> Result<Post, ActionError>;
}

/// [`PostActions`] over the JSON API. One request per call, no retries.
#[derive(Debug, Clone)]
pub struct HttpPostActions {
    client: Client,
    base_url: String,
}

impl HttpPostActions {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn posts_url(&self) -> String {
        format!("{}/api/route", self.base_url)
    }

    fn post_url(&self, id: i32) -> String {
        format!("{}/api/route/{}", self.base_url, id)
    }
}

async fn decode<T: DeserializeOwned>(
    result: Result<Response, reqwest::Error>,
    operation: &'static str,
) -> Result<T, ActionError> {
    let res = match result {
        Ok(res) => res,
        Err(e) => {
            tracing::error!(%e, operation);
            return Err(ActionError::new(operation));
        }
    };

    if !res.status().is_success() {
        tracing::error!(status = %res.status(), operation);
        return Err(ActionError::new(operation));
    }

    match res.json::<T>().await {
        Ok(body) => Ok(body),
        Err(e) => {
            tracing::error!(%e, operation);
            Err(ActionError::new(operation))
        }
    }
}

#[async_trait]
impl PostActions for HttpPostActions {
    async fn fetch_posts(&self, page: u32, page_size: u32) -> Result<PostsPage, ActionError> {
        let result = self
            .client
            .get(self.posts_url())
            .query(&[("page", page), ("pageSize", page_size)])
            .send()
            .await;

        decode(result, "fetch posts").await
    }

    async fn fetch_post(&self, id: i32) -> Result<Post, ActionError> {
        let result = self.client.get(self.post_url(id)).send().await;

        decode(result, "fetch post").await
    }

    async fn submit_post(&self, input: &PostInput) -> Result<Post, ActionError> {
        let result = self
            .client
            .post(self.posts_url())
            .json(input)
            .send()
            .await;

        decode(result, "submit post").await
    }

    async fn update_post(&self, id: i32, input: &PostInput) -> Result<Post, ActionError> {
        let result = self
            .client
            .patch(self.post_url(id))
            .json(input)
            .send()
            .await;

        decode(result, "update post").await
    }

    async fn delete_post(&self, id: i32) -> Result<Post, ActionError> {
        let result = self.client.delete(self.post_url(id)).send().await;

        decode(result, "delete post").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_names_only_the_operation() {
        assert_eq!(
            ActionError::new("delete post").to_string(),
            "Failed to delete post"
        );
    }

    #[test]
    fn strips_trailing_slash_from_base_url() {
        let actions = HttpPostActions::new("http://localhost:3000/");

        assert_eq!(actions.posts_url(), "http://localhost:3000/api/route");
        assert_eq!(actions.post_url(4), "http://localhost:3000/api/route/4");
    }
}
