use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, PostChanges, User};
use crate::error::RepoError;
use crate::pagination::{Page, PageRequest};
use crate::query::PostFilter;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with identity lookups.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Batch lookup for embedding authors in list views. Missing ids are skipped.
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError>;
}

/// Post store. Every read, update and delete takes a predicate so callers can
/// scope access in the query itself.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// First post matching `filter`.
    async fn find_one(&self, filter: &PostFilter) -> Result<Option<Post>, RepoError>;

    /// One page of matching posts, newest first.
    async fn find_page(
        &self,
        filter: &PostFilter,
        request: PageRequest,
    ) -> Result<Page<Post>, RepoError>;

    /// Store a freshly created post.
    async fn insert(&self, post: Post) -> Result<Post, RepoError>;

    /// Apply `changes` to the single post matching `filter`.
    /// Returns `None` when nothing matched.
    async fn update_where(
        &self,
        filter: &PostFilter,
        changes: PostChanges,
    ) -> Result<Option<Post>, RepoError>;

    /// Remove every matching post, returning how many were removed.
    async fn delete_where(&self, filter: &PostFilter) -> Result<u64, RepoError>;
}
