use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, FieldError};

/// Longest accepted title, in characters.
pub const TITLE_MAX_CHARS: usize = 200;

/// Post entity - one blog entry.
///
/// `id`, `author_id` and `created_at` never change after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post owned by `author_id`.
    pub fn new(author_id: Uuid, new_post: NewPost) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            title: new_post.title,
            content: new_post.content,
            is_published: new_post.is_published,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply owner edits and refresh `updated_at`.
    pub fn apply(&mut self, changes: PostChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(content) = changes.content {
            self.content = content;
        }
        if let Some(is_published) = changes.is_published {
            self.is_published = is_published;
        }
        self.touch();
    }

    fn touch(&mut self) {
        // Clock skew must not break updated_at >= created_at.
        self.updated_at = Utc::now().max(self.created_at);
    }
}

/// Unvalidated create input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostDraft {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_published: Option<bool>,
}

/// Validated create input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub is_published: bool,
}

impl PostDraft {
    /// Check every field, reporting all failures at once.
    pub fn validate(self) -> Result<NewPost, DomainError> {
        let mut errors = Vec::new();

        match &self.title {
            None => errors.push(FieldError::new("title", "This field is required.")),
            Some(title) => check_title(title, &mut errors),
        }
        match &self.content {
            None => errors.push(FieldError::new("content", "This field is required.")),
            Some(content) => check_content(content, &mut errors),
        }

        match (self.title, self.content) {
            (Some(title), Some(content)) if errors.is_empty() => Ok(NewPost {
                title,
                content,
                is_published: self.is_published.unwrap_or(false),
            }),
            _ => Err(DomainError::Validation(errors)),
        }
    }
}

/// Partial owner edit. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_published: Option<bool>,
}

impl PostChanges {
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut errors = Vec::new();
        if let Some(title) = &self.title {
            check_title(title, &mut errors);
        }
        if let Some(content) = &self.content {
            check_content(content, &mut errors);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(errors))
        }
    }
}

fn check_title(title: &str, errors: &mut Vec<FieldError>) {
    if title.trim().is_empty() {
        errors.push(FieldError::new("title", "This field may not be blank."));
    } else if title.chars().count() > TITLE_MAX_CHARS {
        errors.push(FieldError::new(
            "title",
            format!("Ensure this field has no more than {TITLE_MAX_CHARS} characters."),
        ));
    }
}

fn check_content(content: &str, errors: &mut Vec<FieldError>) {
    if content.trim().is_empty() {
        errors.push(FieldError::new("content", "This field may not be blank."));
    }
}
