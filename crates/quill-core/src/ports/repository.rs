use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Category, Comment, PageRequest, Post, PostFilter, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn create(&self, entity: T) -> Result<T, RepoError>;

    /// Replace an existing entity. Fails with [`RepoError::NotFound`] when absent.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Fails with [`RepoError::NotFound`] when absent.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
///
/// Counter and comment mutations are single atomic store operations; they
/// return `None` when the post does not exist.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Matching posts, newest first, limited to one page.
    async fn find_page(
        &self,
        filter: &PostFilter,
        page: PageRequest,
    ) -> Result<Vec<Post>, RepoError>;

    /// Number of posts matching `filter`.
    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError>;

    /// Write the owner-editable fields of `edited` onto the stored post.
    /// Comments and counters are left as stored.
    async fn save_edits(&self, edited: Post) -> Result<Option<Post>, RepoError>;

    async fn increment_views(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    async fn increment_likes(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Append a comment to the end of the post's comment sequence.
    async fn push_comment(&self, id: Uuid, comment: Comment) -> Result<Option<Post>, RepoError>;

    /// Remove every comment whose id equals `comment_id`.
    async fn pull_comment(&self, id: Uuid, comment_id: Uuid) -> Result<Option<Post>, RepoError>;
}

/// Category repository.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, Uuid> {
    /// All categories sorted by name ascending.
    async fn list_by_name(&self) -> Result<Vec<Category>, RepoError>;

    /// Categories for the given ids. Unknown ids are skipped.
    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Category>, RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Find a user holding either the email or the username.
    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<User>, RepoError>;
}
