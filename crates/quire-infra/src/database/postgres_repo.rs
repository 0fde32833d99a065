//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use quire_core::domain::{Post, PostChanges, User};
use quire_core::error::RepoError;
use quire_core::pagination::{Page, PageRequest};
use quire_core::ports::{PostRepository, UserRepository};
use quire_core::query::PostFilter;

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::filter::post_condition;
use super::postgres_base::{PostgresBaseRepository, query_error, write_error};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// Mask an email address for logging to avoid PII in logs.
fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) => {
            let (local, domain) = email.split_at(at_pos);
            let masked_local = match local.chars().next() {
                Some(first) if local.chars().count() > 1 => format!("{first}***"),
                _ => "***".to_string(),
            };
            format!("{masked_local}{domain}")
        }
        None => "***".to_string(),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = UserEntity::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_one(&self, filter: &PostFilter) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post_condition(filter))
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn find_page(
        &self,
        filter: &PostFilter,
        request: PageRequest,
    ) -> Result<Page<Post>, RepoError> {
        let paginator = PostEntity::find()
            .filter(post_condition(filter))
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .paginate(&self.db, request.page_size);

        let total = paginator.num_items().await.map_err(query_error)?;
        let models = if request.is_within(total) {
            paginator
                .fetch_page(request.page - 1)
                .await
                .map_err(query_error)?
        } else {
            Vec::new()
        };

        tracing::debug!(total, page = request.page, "Fetched post page");
        Ok(Page::new(
            models.into_iter().map(Into::into).collect(),
            total,
            request,
        ))
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let model = post::ActiveModel::from(post)
            .insert(&self.db)
            .await
            .map_err(write_error)?;

        Ok(model.into())
    }

    async fn update_where(
        &self,
        filter: &PostFilter,
        changes: PostChanges,
    ) -> Result<Option<Post>, RepoError> {
        let txn = self.db.begin().await.map_err(query_error)?;

        let Some(model) = PostEntity::find()
            .filter(post_condition(filter))
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(query_error)?
        else {
            return Ok(None);
        };

        let mut edited = Post::from(model.clone());
        edited.apply(changes);

        // Only editable columns are written; id, author and created_at stay as stored.
        let mut active = model.into_active_model();
        active.title = Set(edited.title);
        active.content = Set(edited.content);
        active.is_published = Set(edited.is_published);
        active.updated_at = Set(edited.updated_at.into());

        let updated = active.update(&txn).await.map_err(write_error)?;
        txn.commit().await.map_err(query_error)?;

        Ok(Some(updated.into()))
    }

    async fn delete_where(&self, filter: &PostFilter) -> Result<u64, RepoError> {
        let result = PostEntity::delete_many()
            .filter(post_condition(filter))
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::mask_email;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("alice@example.com"), "a***@example.com");
        assert_eq!(mask_email("a@example.com"), "***@example.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }
}
