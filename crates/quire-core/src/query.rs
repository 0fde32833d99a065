//! Query builder - turns a caller's intent into a store predicate.
//!
//! Access control is expressed in the predicate itself: a store only ever
//! returns rows the caller is allowed to see or change.

use uuid::Uuid;

use crate::domain::Post;

/// Composable predicate over posts.
///
/// An empty `And` matches everything, an empty `Or` matches nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostFilter {
    Published,
    AuthorIs(Uuid),
    IdIs(Uuid),
    /// Case-insensitive substring match on the title.
    TitleContains(String),
    /// Case-insensitive substring match on the content.
    ContentContains(String),
    And(Vec<PostFilter>),
    Or(Vec<PostFilter>),
}

impl PostFilter {
    /// Conjunction, flattening nested `And`s.
    pub fn and(self, other: PostFilter) -> PostFilter {
        match (self, other) {
            (PostFilter::And(mut left), PostFilter::And(right)) => {
                left.extend(right);
                PostFilter::And(left)
            }
            (PostFilter::And(mut left), other) => {
                left.push(other);
                PostFilter::And(left)
            }
            (this, PostFilter::And(mut right)) => {
                right.insert(0, this);
                PostFilter::And(right)
            }
            (this, other) => PostFilter::And(vec![this, other]),
        }
    }

    /// Disjunction, flattening nested `Or`s.
    pub fn or(self, other: PostFilter) -> PostFilter {
        match (self, other) {
            (PostFilter::Or(mut left), PostFilter::Or(right)) => {
                left.extend(right);
                PostFilter::Or(left)
            }
            (PostFilter::Or(mut left), other) => {
                left.push(other);
                PostFilter::Or(left)
            }
            (this, PostFilter::Or(mut right)) => {
                right.insert(0, this);
                PostFilter::Or(right)
            }
            (this, other) => PostFilter::Or(vec![this, other]),
        }
    }

    /// Evaluate against a single post.
    pub fn matches(&self, post: &Post) -> bool {
        match self {
            PostFilter::Published => post.is_published,
            PostFilter::AuthorIs(author_id) => post.author_id == *author_id,
            PostFilter::IdIs(id) => post.id == *id,
            PostFilter::TitleContains(term) => contains_ignore_case(&post.title, term),
            PostFilter::ContentContains(term) => contains_ignore_case(&post.content, term),
            PostFilter::And(filters) => filters.iter().all(|f| f.matches(post)),
            PostFilter::Or(filters) => filters.iter().any(|f| f.matches(post)),
        }
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Only an absent or empty parameter means no search; the term is used as sent.
pub fn search_term(raw: Option<&str>) -> Option<&str> {
    raw.filter(|term| !term.is_empty())
}

/// Public listing: published posts, optionally narrowed by a title/content search.
pub fn public_list(search: Option<&str>) -> PostFilter {
    match search_term(search) {
        Some(term) => PostFilter::Published.and(
            PostFilter::TitleContains(term.to_string())
                .or(PostFilter::ContentContains(term.to_string())),
        ),
        None => PostFilter::Published,
    }
}

/// Public single-post lookup. Drafts are never matched, even for their author.
pub fn public_detail(id: Uuid) -> PostFilter {
    PostFilter::Published.and(PostFilter::IdIs(id))
}

/// Every post the owner wrote, drafts included.
pub fn own_list(owner: Uuid) -> PostFilter {
    PostFilter::AuthorIs(owner)
}

/// One post, only if `owner` wrote it. Used for update and delete.
pub fn own_scoped(owner: Uuid, id: Uuid) -> PostFilter {
    PostFilter::AuthorIs(owner).and(PostFilter::IdIs(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Caller, NewPost};
    use crate::policy;

    fn post(author: Uuid, title: &str, content: &str, is_published: bool) -> Post {
        Post::new(
            author,
            NewPost {
                title: title.to_string(),
                content: content.to_string(),
                is_published,
            },
        )
    }

    fn sample_posts() -> Vec<Post> {
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        vec![
            post(alice, "Hello World", "first post", true),
            post(alice, "Draft", "hello from a draft", false),
            post(bob, "Rust tips", "Borrowing, HELLO lifetimes", true),
            post(bob, "Notes", "nothing here", true),
        ]
    }

    #[test]
    fn test_public_list_never_returns_drafts() {
        let posts = sample_posts();
        for search in [None, Some(""), Some("hello"), Some("draft"), Some("zzz")] {
            let filter = public_list(search);
            for p in posts.iter().filter(|p| filter.matches(p)) {
                assert!(p.is_published, "draft leaked for search {search:?}");
            }
        }
    }

    #[test]
    fn test_public_list_search_is_case_insensitive_over_title_and_content() {
        let posts = sample_posts();
        let filter = public_list(Some("hello"));
        let titles: Vec<_> = posts
            .iter()
            .filter(|p| filter.matches(p))
            .map(|p| p.title.as_str())
            .collect();

        assert_eq!(titles, vec!["Hello World", "Rust tips"]);
    }

    #[test]
    fn test_search_term_is_used_as_sent() {
        let posts = sample_posts();

        let spaced = public_list(Some(" hello "));
        assert!(posts.iter().all(|p| !spaced.matches(p)));

        let blank = public_list(Some("   "));
        assert_ne!(blank, public_list(None));
        assert!(posts.iter().all(|p| !blank.matches(p)));
    }

    #[test]
    fn test_empty_search_adds_no_restriction() {
        assert_eq!(public_list(Some("")), public_list(None));
        assert_eq!(public_list(None), PostFilter::Published);
        let posts = sample_posts();
        let published = posts.iter().filter(|p| public_list(None).matches(p)).count();
        assert_eq!(published, 3);
    }

    #[test]
    fn test_public_list_agrees_with_anonymous_visibility() {
        let filter = public_list(None);
        for p in sample_posts() {
            assert_eq!(filter.matches(&p), policy::can_view(&Caller::Anonymous, &p));
        }
    }

    #[test]
    fn test_public_detail_skips_unpublished() {
        let draft = post(Uuid::new_v4(), "Draft", "x", false);
        assert!(!public_detail(draft.id).matches(&draft));

        let published = post(Uuid::new_v4(), "Live", "x", true);
        assert!(public_detail(published.id).matches(&published));
        assert!(!public_detail(Uuid::new_v4()).matches(&published));
    }

    #[test]
    fn test_owner_scopes_agree_with_mutate_policy() {
        let posts = sample_posts();
        let alice = posts[0].author_id;
        let caller = Caller::User(alice);

        for p in &posts {
            assert_eq!(own_list(alice).matches(p), policy::can_mutate(&caller, p));
            assert_eq!(
                own_scoped(alice, p.id).matches(p),
                policy::can_mutate(&caller, p)
            );
        }
    }

    #[test]
    fn test_combinators_flatten() {
        let id = Uuid::new_v4();
        let filter = PostFilter::Published
            .and(PostFilter::IdIs(id))
            .and(PostFilter::AuthorIs(id));
        assert!(matches!(&filter, PostFilter::And(parts) if parts.len() == 3));

        let any = PostFilter::Or(vec![]);
        let all = PostFilter::And(vec![]);
        let p = post(id, "t", "c", true);
        assert!(!any.matches(&p));
        assert!(all.matches(&p));
    }
}
