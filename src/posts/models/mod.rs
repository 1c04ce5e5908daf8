pub mod pagination;
pub mod post;
