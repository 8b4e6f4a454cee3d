use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Number of content characters copied into a derived excerpt.
pub const EXCERPT_LENGTH: usize = 150;

pub const TITLE_MIN: usize = 5;
pub const TITLE_MAX: usize = 200;
pub const CONTENT_MIN: usize = 10;
pub const COMMENT_MIN: usize = 1;
pub const COMMENT_MAX: usize = 500;

/// Publication state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    #[default]
    Published,
    Archived,
}

impl PostStatus {
    /// Wire names of every status, in declaration order.
    pub const NAMES: &'static [&'static str] = &["draft", "published", "archived"];

    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
            PostStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            "archived" => Ok(PostStatus::Archived),
            other => Err(DomainError::InvalidStatus(other.to_string())),
        }
    }
}

/// A comment embedded in its parent post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user_id: String,
    pub user_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(user_id: String, user_name: String, content: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            user_name,
            content: content.trim().to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let len = self.content.chars().count();
        if !(COMMENT_MIN..=COMMENT_MAX).contains(&len) {
            return Err(DomainError::Validation(format!(
                "Comment must be between {COMMENT_MIN} and {COMMENT_MAX} characters"
            )));
        }
        Ok(())
    }
}

/// Post entity - a blog article with embedded comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user_id: String,
    pub user_email: Option<String>,
    pub user_name: String,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub featured_image: String,
    pub categories: Vec<Uuid>,
    pub tags: Vec<String>,
    pub status: PostStatus,
    pub comments: Vec<Comment>,
    pub likes: u64,
    pub views: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Everything needed to create a post.
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub user_id: String,
    pub user_email: Option<String>,
    pub user_name: String,
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub categories: Vec<Uuid>,
    pub tags: Vec<String>,
    pub status: Option<PostStatus>,
}

/// Owner edits. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub categories: Option<Vec<Uuid>>,
    pub tags: Option<Vec<String>>,
    pub status: Option<PostStatus>,
}

/// First [`EXCERPT_LENGTH`] characters of `content` followed by an ellipsis.
pub fn derive_excerpt(content: &str) -> String {
    let mut excerpt: String = content.chars().take(EXCERPT_LENGTH).collect();
    excerpt.push_str("...");
    excerpt
}

fn clean_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter().map(|t| t.trim().to_string()).collect()
}

impl Post {
    /// Create a new post, deriving the excerpt and defaulting the status.
    pub fn new(new: NewPost) -> Self {
        let now = Utc::now();
        let mut post = Self {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            user_email: new.user_email,
            user_name: new.user_name,
            title: new.title.trim().to_string(),
            content: new.content,
            excerpt: new.excerpt.unwrap_or_default(),
            featured_image: new.featured_image.unwrap_or_default(),
            categories: new.categories,
            tags: clean_tags(new.tags),
            status: new.status.unwrap_or_default(),
            comments: Vec::new(),
            likes: 0,
            views: 0,
            created_at: now,
            updated_at: now,
        };
        post.fill_excerpt();
        post
    }

    /// Apply owner edits. Only supplied fields are written.
    pub fn apply(&mut self, changes: PostChanges) {
        if let Some(title) = changes.title {
            self.title = title.trim().to_string();
        }
        if let Some(content) = changes.content {
            self.content = content;
        }
        if let Some(excerpt) = changes.excerpt {
            self.excerpt = excerpt;
        }
        if let Some(featured_image) = changes.featured_image {
            self.featured_image = featured_image;
        }
        if let Some(categories) = changes.categories {
            self.categories = categories;
        }
        if let Some(tags) = changes.tags {
            self.tags = clean_tags(tags);
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        self.fill_excerpt();
        self.updated_at = Utc::now();
    }

    /// Copy the owner-editable fields from `edited`.
    pub fn take_edits(&mut self, edited: Post) {
        self.title = edited.title;
        self.content = edited.content;
        self.excerpt = edited.excerpt;
        self.featured_image = edited.featured_image;
        self.categories = edited.categories;
        self.tags = edited.tags;
        self.status = edited.status;
    }

    fn fill_excerpt(&mut self) {
        if self.excerpt.is_empty() && !self.content.is_empty() {
            self.excerpt = derive_excerpt(&self.content);
        }
    }

    /// Schema-level checks, run on create and again after every edit.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.user_id.trim().is_empty() || self.user_name.trim().is_empty() {
            return Err(DomainError::Validation(
                "User information is required".to_string(),
            ));
        }

        let title_len = self.title.chars().count();
        if !(TITLE_MIN..=TITLE_MAX).contains(&title_len) {
            return Err(DomainError::Validation(format!(
                "Title must be between {TITLE_MIN} and {TITLE_MAX} characters"
            )));
        }

        if self.content.trim().chars().count() < CONTENT_MIN {
            return Err(DomainError::Validation(format!(
                "Content must be at least {CONTENT_MIN} characters"
            )));
        }

        self.comments.iter().try_for_each(Comment::validate)
    }
}
