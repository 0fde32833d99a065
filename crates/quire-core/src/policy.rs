//! Visibility policy - who may see and who may change a post.
//!
//! These are pure predicates. Handlers never surface a "forbidden" outcome for a
//! single post: a caller without rights gets the same not-found as for an absent id.

use uuid::Uuid;

use crate::domain::{Caller, Post};
use crate::error::DomainError;

/// Published posts are visible to everyone; drafts only to their author.
pub fn can_view(caller: &Caller, post: &Post) -> bool {
    post.is_published || is_author(caller, post)
}

/// Only the author may edit or delete. No admin override.
pub fn can_mutate(caller: &Caller, post: &Post) -> bool {
    is_author(caller, post)
}

fn is_author(caller: &Caller, post: &Post) -> bool {
    caller.user_id() == Some(post.author_id)
}

/// Guard for operations that need a signed-in caller.
pub fn require_authenticated(caller: &Caller) -> Result<Uuid, DomainError> {
    caller.user_id().ok_or(DomainError::Unauthorized)
}

/// Guard for owner-only operations on an already fetched post.
pub fn require_owner(caller: &Caller, post: &Post) -> Result<(), DomainError> {
    if can_mutate(caller, post) {
        Ok(())
    } else {
        Err(DomainError::post_not_found(post.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewPost;

    fn post_by(author: Uuid, is_published: bool) -> Post {
        Post::new(
            author,
            NewPost {
                title: "Title".to_string(),
                content: "Content".to_string(),
                is_published,
            },
        )
    }

    #[test]
    fn test_anonymous_sees_exactly_published_posts() {
        let author = Uuid::new_v4();
        for is_published in [true, false] {
            let post = post_by(author, is_published);
            assert_eq!(can_view(&Caller::Anonymous, &post), is_published);
        }
    }

    #[test]
    fn test_author_sees_own_drafts_but_others_do_not() {
        let author = Uuid::new_v4();
        let draft = post_by(author, false);

        assert!(can_view(&Caller::User(author), &draft));
        assert!(!can_view(&Caller::User(Uuid::new_v4()), &draft));
    }

    #[test]
    fn test_only_author_can_mutate() {
        let author = Uuid::new_v4();
        for is_published in [true, false] {
            let post = post_by(author, is_published);
            assert!(can_mutate(&Caller::User(author), &post));
            assert!(!can_mutate(&Caller::User(Uuid::new_v4()), &post));
            assert!(!can_mutate(&Caller::Anonymous, &post));
        }
    }

    #[test]
    fn test_guards() {
        let author = Uuid::new_v4();
        let post = post_by(author, true);

        assert!(matches!(
            require_authenticated(&Caller::Anonymous),
            Err(DomainError::Unauthorized)
        ));
        assert_eq!(require_authenticated(&Caller::User(author)).unwrap(), author);

        assert!(require_owner(&Caller::User(author), &post).is_ok());
        assert!(matches!(
            require_owner(&Caller::User(Uuid::new_v4()), &post),
            Err(DomainError::NotFound { .. })
        ));
    }
}
