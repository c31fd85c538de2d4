//! Index Provisioning
//!
//! Idempotent index creation, run once at startup. The unique index on
//! `users.email` backs the duplicate-email conflict surfaced by
//! `UserRepository::insert`. No uniqueness constraint on `sessions.userId`;
//! the one-session invariant lives in the upsert.

use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Database, IndexModel};
use tracing::info;

use crate::domain::{Comment, Session, User};
use crate::error::{CatalogError, Result};

pub async fn ensure_indexes(db: &Database) -> Result<()> {
    let unique_email = IndexModel::builder()
        .keys(doc! { "email": 1 })
        .options(IndexOptions::builder().unique(true).build())
        .build();
    db.collection::<User>("users")
        .create_index(unique_email)
        .await
        .map_err(|e| CatalogError::operation_failed("create index", "users.email", e))?;

    db.collection::<Session>("sessions")
        .create_index(IndexModel::builder().keys(doc! { "userId": 1 }).build())
        .await
        .map_err(|e| CatalogError::operation_failed("create index", "sessions.userId", e))?;

    db.collection::<Comment>("comments")
        .create_index(IndexModel::builder().keys(doc! { "email": 1 }).build())
        .await
        .map_err(|e| CatalogError::operation_failed("create index", "comments.email", e))?;

    info!("Catalog indexes ensured");
    Ok(())
}
