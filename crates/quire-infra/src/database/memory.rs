//! In-memory stores - used when no database is configured, and in tests.
//! Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quire_core::domain::{Post, PostChanges, User};
use quire_core::error::RepoError;
use quire_core::pagination::{Page, PageRequest};
use quire_core::ports::{BaseRepository, PostRepository, UserRepository};
use quire_core::query::PostFilter;

/// In-memory post store using a HashMap behind an async RwLock.
///
/// Every predicate operation runs under a single lock acquisition, so a post is
/// never observed half-updated.
#[derive(Default)]
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Matching posts, newest first.
    fn select<'a>(posts: &'a HashMap<Uuid, Post>, filter: &PostFilter) -> Vec<&'a Post> {
        let mut matched: Vec<&Post> = posts.values().filter(|p| filter.matches(p)).collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        matched
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        self.store.write().await.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.store.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_one(&self, filter: &PostFilter) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(Self::select(&store, filter).first().map(|p| (*p).clone()))
    }

    async fn find_page(
        &self,
        filter: &PostFilter,
        request: PageRequest,
    ) -> Result<Page<Post>, RepoError> {
        let store = self.store.read().await;
        let matched = Self::select(&store, filter);
        let total = matched.len() as u64;

        let items = if request.is_within(total) {
            matched
                .into_iter()
                .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
                .take(usize::try_from(request.page_size).unwrap_or(usize::MAX))
                .cloned()
                .collect()
        } else {
            Vec::new()
        };

        Ok(Page::new(items, total, request))
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        if store.contains_key(&post.id) {
            return Err(RepoError::Constraint("Post id already exists".to_string()));
        }
        store.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update_where(
        &self,
        filter: &PostFilter,
        changes: PostChanges,
    ) -> Result<Option<Post>, RepoError> {
        let mut store = self.store.write().await;
        let Some(id) = Self::select(&store, filter).first().map(|p| p.id) else {
            return Ok(None);
        };

        Ok(store.get_mut(&id).map(|post| {
            post.apply(changes);
            post.clone()
        }))
    }

    async fn delete_where(&self, filter: &PostFilter) -> Result<u64, RepoError> {
        let mut store = self.store.write().await;
        let before = store.len();
        store.retain(|_, post| !filter.matches(post));
        Ok((before - store.len()) as u64)
    }
}

/// In-memory user store. Email and username are unique.
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;
        let taken = store.values().any(|existing| {
            existing.id != user.id
                && (existing.email == user.email || existing.username == user.username)
        });
        if taken {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }

        store.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.store.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        let store = self.store.read().await;
        Ok(ids.iter().filter_map(|id| store.get(id).cloned()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, Utc};
    use quire_core::domain::NewPost;
    use quire_core::query;

    fn post(author: Uuid, title: &str, is_published: bool) -> Post {
        Post::new(
            author,
            NewPost {
                title: title.to_string(),
                content: format!("{title} body"),
                is_published,
            },
        )
    }

    fn user(email: &str, username: &str) -> User {
        User::new(
            email.to_string(),
            username.to_string(),
            String::new(),
            String::new(),
            "hash".to_string(),
        )
    }

    #[tokio::test]
    async fn test_find_page_orders_newest_first_and_counts_all_matches() {
        let repo = InMemoryPostRepository::new();
        let author = Uuid::new_v4();
        let base = Utc::now();

        for (i, title) in ["oldest", "middle", "newest"].iter().enumerate() {
            let mut p = post(author, title, true);
            p.created_at = base + TimeDelta::seconds(i as i64);
            p.updated_at = p.created_at;
            repo.insert(p).await.unwrap();
        }
        repo.insert(post(author, "draft", false)).await.unwrap();

        let page = repo
            .find_page(&query::public_list(None), PageRequest::new(1, 2))
            .await
            .unwrap();

        assert_eq!(page.total, 3);
        let titles: Vec<_> = page.items.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["newest", "middle"]);

        let second = repo
            .find_page(&query::public_list(None), PageRequest::new(2, 2))
            .await
            .unwrap();
        assert_eq!(second.items.len(), 1);
        assert_eq!(second.items[0].title, "oldest");
    }

    #[tokio::test]
    async fn test_update_where_only_touches_matching_post() {
        let repo = InMemoryPostRepository::new();
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let original = repo.insert(post(owner, "Mine", false)).await.unwrap();

        let changes = PostChanges {
            title: Some("Hijacked".to_string()),
            ..Default::default()
        };
        let missed = repo
            .update_where(&query::own_scoped(stranger, original.id), changes.clone())
            .await
            .unwrap();
        assert!(missed.is_none());
        assert_eq!(repo.find_by_id(original.id).await.unwrap().unwrap(), original);

        let updated = repo
            .update_where(&query::own_scoped(owner, original.id), changes)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "Hijacked");
        assert_eq!(updated.author_id, owner);
    }

    #[tokio::test]
    async fn test_delete_where_reports_removed_rows() {
        let repo = InMemoryPostRepository::new();
        let owner = Uuid::new_v4();
        let p = repo.insert(post(owner, "Gone", true)).await.unwrap();

        let removed = repo
            .delete_where(&query::own_scoped(Uuid::new_v4(), p.id))
            .await
            .unwrap();
        assert_eq!(removed, 0);

        let removed = repo
            .delete_where(&query::own_scoped(owner, p.id))
            .await
            .unwrap();
        assert_eq!(removed, 1);
        assert!(repo.find_by_id(p.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_post_id_is_rejected() {
        let repo = InMemoryPostRepository::new();
        let p = post(Uuid::new_v4(), "Once", true);
        repo.insert(p.clone()).await.unwrap();

        assert!(matches!(
            repo.insert(p).await,
            Err(RepoError::Constraint(_))
        ));
    }

    #[tokio::test]
    async fn test_user_email_and_username_are_unique() {
        let repo = InMemoryUserRepository::new();
        let alice = repo.save(user("alice@example.com", "alice")).await.unwrap();

        assert!(repo.save(user("alice@example.com", "other")).await.is_err());
        assert!(repo.save(user("other@example.com", "alice")).await.is_err());

        // Re-saving the same user is an update, not a conflict.
        assert!(repo.save(alice.clone()).await.is_ok());

        let found = repo.find_by_ids(&[alice.id, Uuid::new_v4()]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(
            repo.find_by_username("alice").await.unwrap().unwrap().id,
            alice.id
        );
    }
}
