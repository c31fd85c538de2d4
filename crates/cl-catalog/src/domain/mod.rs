//! Domain Models
//!
//! Entity shapes mapped field-for-field onto the `users`, `sessions` and
//! `comments` collections. String UUIDs as `_id` values.

pub mod comment;
pub mod critic;
pub mod session;
pub mod user;

pub use comment::*;
pub use critic::*;
pub use session::*;
pub use user::*;
