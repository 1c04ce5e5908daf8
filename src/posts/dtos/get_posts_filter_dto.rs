use serde::Deserialize;
use validator::Validate;

use crate::posts::models::pagination::DEFAULT_PAGE_SIZE;

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GetPostsFilterDto {
    #[validate(range(min = 1, message = "Invalid page parameter"))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 100, message = "Invalid pageSize parameter"))]
    pub page_size: Option<u32>,
}

impl GetPostsFilterDto {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }
}
