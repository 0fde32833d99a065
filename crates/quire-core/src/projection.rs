//! View projection - the record shapes handed back to callers.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{Post, User};

/// Characters kept in a list preview before the `...` marker.
pub const PREVIEW_CHARS: usize = 200;
const PREVIEW_MARKER: &str = "...";

/// Public summary of a post's author. Never carries credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorSummary {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub date_joined: Option<DateTime<Utc>>,
}

impl AuthorSummary {
    /// Placeholder for an author id whose user record is gone.
    pub fn unknown(id: Uuid) -> Self {
        Self {
            id,
            email: String::new(),
            username: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            date_joined: None,
        }
    }
}

impl From<&User> for AuthorSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            date_joined: Some(user.date_joined),
        }
    }
}

/// Full single-post view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostDetail {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: AuthorSummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_published: bool,
}

impl PostDetail {
    pub fn project(post: Post, author: AuthorSummary) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            author,
            created_at: post.created_at,
            updated_at: post.updated_at,
            is_published: post.is_published,
        }
    }
}

/// Echo of the editable fields, returned by update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostEcho {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub is_published: bool,
}

impl From<Post> for PostEcho {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            is_published: post.is_published,
        }
    }
}

/// List entry with truncated content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostPreview {
    pub id: Uuid,
    pub title: String,
    pub content_preview: String,
    pub author: AuthorSummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostPreview {
    pub fn project(post: Post, author: AuthorSummary) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content_preview: content_preview(&post.content),
            author,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// First `PREVIEW_CHARS` characters, with `...` appended only when something was cut.
pub fn content_preview(content: &str) -> String {
    match content.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}{}", &content[..cut], PREVIEW_MARKER),
        None => content.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewPost;

    fn sample_post(content: &str) -> Post {
        Post::new(
            Uuid::new_v4(),
            NewPost {
                title: "Hello".to_string(),
                content: content.to_string(),
                is_published: true,
            },
        )
    }

    #[test]
    fn test_short_content_is_untouched() {
        assert_eq!(content_preview("short"), "short");
        assert_eq!(content_preview(""), "");
    }

    #[test]
    fn test_exactly_limit_has_no_marker() {
        let content = "x".repeat(PREVIEW_CHARS);
        assert_eq!(content_preview(&content), content);
    }

    #[test]
    fn test_long_content_is_cut_and_marked() {
        let content = "x".repeat(250);
        let expected = format!("{}...", "x".repeat(PREVIEW_CHARS));
        assert_eq!(content_preview(&content), expected);

        let one_over = "y".repeat(PREVIEW_CHARS + 1);
        assert_eq!(
            content_preview(&one_over),
            format!("{}...", "y".repeat(PREVIEW_CHARS))
        );
    }

    #[test]
    fn test_preview_counts_characters_not_bytes() {
        let content = "é".repeat(PREVIEW_CHARS + 5);
        let preview = content_preview(&content);
        assert_eq!(preview.chars().count(), PREVIEW_CHARS + PREVIEW_MARKER.len());
        assert!(preview.starts_with(&"é".repeat(PREVIEW_CHARS)));
    }

    #[test]
    fn test_echo_omits_author_and_timestamps() {
        let post = sample_post("body");
        let echo = PostEcho::from(post.clone());
        let json = serde_json::to_value(&echo).unwrap();

        assert_eq!(json["id"], post.id.to_string());
        assert!(json.get("author").is_none());
        assert!(json.get("created_at").is_none());
        assert!(json.get("updated_at").is_none());
        assert_eq!(json["is_published"], true);
    }

    #[test]
    fn test_detail_and_preview_embed_author() {
        let post = sample_post(&"z".repeat(300));
        let author = AuthorSummary::unknown(post.author_id);

        let detail = PostDetail::project(post.clone(), author.clone());
        assert_eq!(detail.author.id, post.author_id);
        assert_eq!(detail.content.len(), 300);

        let preview = PostPreview::project(post, author);
        let json = serde_json::to_value(&preview).unwrap();
        assert!(json.get("content").is_none());
        assert!(json["content_preview"].as_str().unwrap().ends_with("..."));
        assert!(json.get("is_published").is_none());
    }
}
