use std::collections::BTreeMap;

use askama::Template;
use thiserror::Error;
use validator::Validate;

use crate::posts::models::post::Post;

use super::actions::{ActionError, PostActions, PostInput};

#[derive(Debug, Error)]
pub enum FormError {
    #[error("form has invalid fields")]
    Invalid,
    #[error(transparent)]
    Action(#[from] ActionError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Created(Post),
    Updated(Post),
}

impl FormOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Created(_) => "Post added successfully",
            Self::Updated(_) => "Post updated successfully",
        }
    }

    pub fn post(&self) -> &Post {
        match self {
            Self::Created(post) | Self::Updated(post) => post,
        }
    }
}

/// Add/edit panel. An `id` makes the submit an update, otherwise a create.
#[derive(Debug, Clone, Default, Validate)]
pub struct PostForm {
    pub id: Option<i32>,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    errors: BTreeMap<String, String>,
}

#[derive(Template)]
#[template(path = "posts/form.html")]
struct FormTemplate<'a> {
    title: &'a str,
    content: &'a str,
    title_error: Option<&'a str>,
    content_error: Option<&'a str>,
    submit_label: &'a str,
}

impl PostForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_post(post: &Post) -> Self {
        Self {
            id: Some(post.id),
            title: post.title.to_string(),
            content: post.content.to_string(),
            errors: BTreeMap::new(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn set_field(&mut self, name: &str, value: &str) {
        match name {
            "title" => self.title = value.to_string(),
            "content" => self.content = value.to_string(),
            _ => tracing::debug!(name, "ignored unknown form field"),
        }
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn check(&mut self) -> bool {
        self.errors.clear();

        let Err(e) = self.validate() else {
            return true;
        };

        for (field, errors) in e.field_errors() {
            if let Some(message) = errors.iter().find_map(|error| error.message.as_ref()) {
                self.errors.insert(field.to_string(), message.to_string());
            }
        }

        false
    }

    pub async fn submit<A>(&mut self, actions: &A) -> Result<FormOutcome, FormError>
    where
        A: PostActions + ?Sized,
    {
        if !self.check() {
            return Err(FormError::Invalid);
        }

        let input = PostInput {
            title: self.title.to_string(),
            content: self.content.to_string(),
        };

        match self.id {
            Some(id) => Ok(FormOutcome::Updated(actions.update_post(id, &input).await?)),
            None => Ok(FormOutcome::Created(actions.submit_post(&input).await?)),
        }
    }

    pub fn render(&self) -> Result<String, askama::Error> {
        FormTemplate {
            title: &self.title,
            content: &self.content,
            title_error: self.error("title"),
            content_error: self.error("content"),
            submit_label: if self.is_edit() { "Update" } else { "Submit" },
        }
        .render()
    }
}
