//! Cinelog Catalog
//!
//! MongoDB data-access layer for the movie catalog:
//! - User and session management (majority-acknowledged writes)
//! - Ownership-scoped comment CRUD
//! - Most-active-commenters reporting aggregation

pub mod domain;
pub mod error;
pub mod mongo;
pub mod repository;
pub mod seed;

pub use error::CatalogError;
