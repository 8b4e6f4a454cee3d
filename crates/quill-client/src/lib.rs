//! # Quill Client
//!
//! Typed async facade over the Quill REST API, plus the small formatting
//! helpers the frontend renders posts with.
//!
//! ```no_run
//! # async fn run() -> Result<(), quill_client::ClientError> {
//! use quill_client::ApiClient;
//! use quill_shared::dto::ListPostsQuery;
//!
//! let api = ApiClient::new("http://localhost:5000");
//! let page = api.posts().list(&ListPostsQuery::default()).await?;
//! println!("{} posts", page.pagination.total);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
pub mod format;

pub use client::{ApiClient, AuthApi, CategoriesApi, PostsApi};
pub use error::ClientError;
pub use format::{format_relative_time, truncate_text};
