use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Default, Deserialize, Validate)]
pub struct EditPostDto {
    #[validate(length(
        min = 1,
        max = 512,
        message = "title must be between 1 and 512 characters."
    ))]
    pub title: Option<String>,
    #[validate(length(
        min = 1,
        max = 65535,
        message = "content must be between 1 and 65535 characters."
    ))]
    pub content: Option<String>,
}

impl EditPostDto {
    pub fn has_changes(&self) -> bool {
        self.title.is_some() || self.content.is_some()
    }

    /// Builds the UPDATE statement. Placeholders are bound in field order,
    /// title then content, with the post id last.
    pub fn to_sql(&self) -> String {
        let mut sql = "UPDATE posts SET ".to_string();
        let mut clauses = Vec::new();

        let mut index: u8 = 1;

        // SET CLAUSES
        if self.title.is_some() {
            clauses.push(["title = $", &index.to_string()].concat());
            index += 1;
        }
        if self.content.is_some() {
            clauses.push(["content = $", &index.to_string()].concat());
            index += 1;
        }

        sql.push_str(&clauses.join(", "));
        sql.push_str(&[" WHERE id = $", &index.to_string()].concat());
        sql.push_str(" RETURNING *");

        tracing::debug!(%sql, "built post update");

        sql
    }
}
