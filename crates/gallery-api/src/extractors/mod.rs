//! Axum extractors for request handling
//!
//! Custom extractors for caller identity, path ids, validated JSON, and the
//! JSON-or-multipart comment form.

mod form;
mod identity;
mod path;
mod validated;

pub use form::CommentForm;
pub use identity::Identity;
pub use path::{CommentPath, PhotoCommentPath, PhotoPath};
pub use validated::{OptionalValidatedJson, ValidatedJson};
