//! Domain entities - the core business objects.

mod caller;
mod post;
mod user;

pub use caller::Caller;
pub use post::{NewPost, Post, PostChanges, PostDraft, TITLE_MAX_CHARS};
pub use user::User;
