use serde::{Deserialize, Serialize};

use super::post::Post;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Page metadata recomputed on every list request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u64,
    pub page_size: u32,
    pub total_posts: u64,
}

impl Pagination {
    pub fn new(current_page: u32, page_size: u32, total_posts: u64) -> Self {
        Self {
            current_page,
            total_pages: total_posts.div_ceil(u64::from(page_size.max(1))),
            page_size,
            total_posts,
        }
    }

    pub fn offset(page: u32, page_size: u32) -> i64 {
        i64::from(page.saturating_sub(1)) * i64::from(page_size)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostsPage {
    pub posts: Vec<Post>,
    #[serde(flatten)]
    pub pagination: Pagination,
}
