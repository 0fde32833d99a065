//! Post use cases: each one authorizes, runs a scoped store query and projects.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::domain::{Caller, Post, PostChanges, PostDraft};
use crate::error::DomainError;
use crate::pagination::{Page, PageRequest};
use crate::policy;
use crate::ports::{BaseRepository, PostRepository, UserRepository};
use crate::projection::{AuthorSummary, PostDetail, PostEcho, PostPreview};
use crate::query;

/// Blog post operations on top of the post and user stores.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { posts, users }
    }

    /// Published posts, optionally searched by title or content. Open to anyone.
    #[instrument(skip(self))]
    pub async fn list_public(
        &self,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<PostPreview>, DomainError> {
        let filter = query::public_list(search);
        let found = self.posts.find_page(&filter, page).await?.ensure_in_range()?;
        self.previews(found).await
    }

    /// A single published post. Drafts are reported as not found.
    #[instrument(skip(self))]
    pub async fn get_public(&self, id: Uuid) -> Result<PostDetail, DomainError> {
        let post = self
            .posts
            .find_one(&query::public_detail(id))
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;

        let author = self.author_of(post.author_id).await?;
        Ok(PostDetail::project(post, author))
    }

    /// Create a post authored by the caller.
    #[instrument(skip(self, draft))]
    pub async fn create(&self, caller: &Caller, draft: PostDraft) -> Result<PostDetail, DomainError> {
        let author_id = policy::require_authenticated(caller)?;
        let new_post = draft.validate()?;

        let post = self.posts.insert(Post::new(author_id, new_post)).await?;
        tracing::info!(post_id = %post.id, author_id = %author_id, published = post.is_published, "Post created");

        let author = self.author_of(author_id).await?;
        Ok(PostDetail::project(post, author))
    }

    /// Edit one of the caller's own posts. Anyone else's post is not found.
    #[instrument(skip(self, changes))]
    pub async fn update_own(
        &self,
        caller: &Caller,
        id: Uuid,
        changes: PostChanges,
    ) -> Result<PostEcho, DomainError> {
        let owner = policy::require_authenticated(caller)?;
        let scope = query::own_scoped(owner, id);

        let current = self
            .posts
            .find_one(&scope)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;
        policy::require_owner(caller, &current)?;
        changes.validate()?;

        let updated = self
            .posts
            .update_where(&scope, changes)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;
        tracing::info!(post_id = %id, published = updated.is_published, "Post updated");

        Ok(PostEcho::from(updated))
    }

    /// Permanently remove one of the caller's own posts.
    #[instrument(skip(self))]
    pub async fn delete_own(&self, caller: &Caller, id: Uuid) -> Result<(), DomainError> {
        let owner = policy::require_authenticated(caller)?;
        let scope = query::own_scoped(owner, id);

        let current = self
            .posts
            .find_one(&scope)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;
        policy::require_owner(caller, &current)?;

        if self.posts.delete_where(&scope).await? == 0 {
            return Err(DomainError::post_not_found(id));
        }
        tracing::info!(post_id = %id, "Post deleted");

        Ok(())
    }

    /// All of the caller's posts, drafts included.
    #[instrument(skip(self))]
    pub async fn list_own(
        &self,
        caller: &Caller,
        page: PageRequest,
    ) -> Result<Page<PostPreview>, DomainError> {
        let owner = policy::require_authenticated(caller)?;
        let found = self
            .posts
            .find_page(&query::own_list(owner), page)
            .await?
            .ensure_in_range()?;
        self.previews(found).await
    }

    async fn author_of(&self, author_id: Uuid) -> Result<AuthorSummary, DomainError> {
        let user = self.users.find_by_id(author_id).await?;
        Ok(user
            .as_ref()
            .map_or_else(|| AuthorSummary::unknown(author_id), AuthorSummary::from))
    }

    async fn previews(&self, page: Page<Post>) -> Result<Page<PostPreview>, DomainError> {
        let mut author_ids: Vec<Uuid> = page.items.iter().map(|p| p.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();

        let authors: HashMap<Uuid, AuthorSummary> = if author_ids.is_empty() {
            HashMap::new()
        } else {
            self.users
                .find_by_ids(&author_ids)
                .await?
                .iter()
                .map(|user| (user.id, AuthorSummary::from(user)))
                .collect()
        };

        Ok(page.map(|post| {
            let author = authors
                .get(&post.author_id)
                .cloned()
                .unwrap_or_else(|| AuthorSummary::unknown(post.author_id));
            PostPreview::project(post, author)
        }))
    }
}
