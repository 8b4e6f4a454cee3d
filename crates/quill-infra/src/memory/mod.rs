//! In-memory repositories - used as fallback when no database is configured.
//!
//! Every mutation runs under a single write lock, so counter and comment
//! updates are atomic with respect to concurrent requests.
//! Note: Data is lost on process restart.

mod categories;
mod posts;
mod users;

pub use categories::InMemoryCategoryRepository;
pub use posts::InMemoryPostRepository;
pub use users::InMemoryUserRepository;
