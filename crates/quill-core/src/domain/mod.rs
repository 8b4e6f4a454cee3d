//! Domain entities - the core business objects.

mod category;
mod pagination;
mod post;
mod user;

pub use category::{Category, CategoryChanges, slugify};
pub use pagination::{PageRequest, Pagination};
pub use post::{
    COMMENT_MAX, COMMENT_MIN, CONTENT_MIN, Comment, EXCERPT_LENGTH, NewPost, Post, PostChanges,
    PostStatus, TITLE_MAX, TITLE_MIN, derive_excerpt,
};
pub use user::User;

use uuid::Uuid;

/// Filters accepted when listing posts. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub user_id: Option<String>,
    pub category: Option<Uuid>,
    pub status: Option<PostStatus>,
    pub search: Option<String>,
}

impl PostFilter {
    /// Lowercased search terms; a document matches when any term matches.
    pub fn search_terms(&self) -> Vec<String> {
        self.search
            .as_deref()
            .map(|s| {
                s.split_whitespace()
                    .map(|t| {
                        t.trim_matches(|c: char| !c.is_alphanumeric())
                            .to_lowercase()
                    })
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}
