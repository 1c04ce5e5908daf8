//! Client side of the posts board: HTTP actions, the list query cache, and
//! the list/form views rendered to HTML fragments.

pub mod actions;
pub mod cache;
pub mod flash;
pub mod form;
pub mod list_view;

/// Cache resource shared by every posts list query.
pub const POSTS_RESOURCE: &str = "posts";
