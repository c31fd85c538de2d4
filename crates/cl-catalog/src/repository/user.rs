//! User Repository
//!
//! CRUD over the `users` and `sessions` collections. Session state is
//! keyed by user id: logging in upserts the one session row, logging in
//! elsewhere overwrites the previous token.

use std::collections::HashMap;

use mongodb::bson::doc;
use mongodb::options::{Acknowledgment, InsertOneOptions, UpdateOptions, WriteConcern};
use mongodb::{Client, Collection, Database};
use tracing::{error, warn};

use crate::domain::{Session, User};
use crate::error::{is_duplicate_key, CatalogError, Result};
use crate::repository::PreferenceUpdate;

pub struct UserRepository {
    client: Client,
    users: Collection<User>,
    sessions: Collection<Session>,
}

impl UserRepository {
    pub fn new(client: &Client, db: &Database) -> Self {
        Self {
            client: client.clone(),
            users: db.collection("users"),
            sessions: db.collection("sessions"),
        }
    }

    /// Insert a user, requiring majority acknowledgment.
    ///
    /// A second insert with the same email violates the unique index and
    /// comes back as `Duplicate`.
    pub async fn insert(&self, user: &User) -> Result<()> {
        let options = InsertOneOptions::builder()
            .write_concern(WriteConcern::builder().w(Acknowledgment::Majority).build())
            .build();

        match self.users.insert_one(user).with_options(options).await {
            Ok(_) => Ok(()),
            Err(e) if is_duplicate_key(&e) => {
                error!("Could not insert `{}` into `users`: {}", user.email, e);
                Err(CatalogError::duplicate("User", "email", &user.email))
            }
            Err(e) => Err(CatalogError::operation_failed("insert user", &user.email, e)),
        }
    }

    /// Create or refresh the session for a user id.
    ///
    /// Upsert keyed by `userId`: the row is created if absent, otherwise
    /// its token is overwritten.
    pub async fn create_session(&self, user_id: &str, token: &str) -> Result<()> {
        let options = UpdateOptions::builder().upsert(true).build();
        self.sessions
            .update_one(doc! { "userId": user_id }, doc! { "$set": { "token": token } })
            .with_options(options)
            .await
            .map_err(|e| CatalogError::operation_failed("upsert session", user_id, e))?;
        Ok(())
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.users
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| CatalogError::operation_failed("find user", email, e))
    }

    pub async fn find_session(&self, user_id: &str) -> Result<Option<Session>> {
        self.sessions
            .find_one(doc! { "userId": user_id })
            .await
            .map_err(|e| CatalogError::operation_failed("find session", user_id, e))
    }

    /// Delete every session row for a user id.
    ///
    /// Uses `delete_many`: duplicate session rows, should the one-session
    /// invariant ever be violated, are all removed. `Ok` means the delete
    /// was acknowledged; the row count is not part of the contract.
    pub async fn delete_sessions(&self, user_id: &str) -> Result<()> {
        self.sessions
            .delete_many(doc! { "userId": user_id })
            .await
            .map_err(|e| CatalogError::operation_failed("delete sessions", user_id, e))?;
        Ok(())
    }

    /// Delete a user and all of their sessions.
    ///
    /// Sessions go first; both deletes run in one multi-document
    /// transaction (requires a replica set, as does the majority write
    /// concern). Returns `false` when no user matches the email.
    pub async fn delete(&self, email: &str) -> Result<bool> {
        let user = match self.find_by_email(email).await? {
            Some(user) => user,
            None => {
                warn!("User `{}` not found, nothing to delete", email);
                return Ok(false);
            }
        };

        let mut session = self
            .client
            .start_session()
            .await
            .map_err(|e| CatalogError::operation_failed("delete user", email, e))?;
        session
            .start_transaction()
            .await
            .map_err(|e| CatalogError::operation_failed("delete user", email, e))?;

        let deleted = async {
            self.sessions
                .delete_many(doc! { "userId": &user.id })
                .session(&mut session)
                .await?;
            self.users
                .delete_one(doc! { "email": email })
                .session(&mut session)
                .await
        }
        .await;

        match deleted {
            Ok(res) => {
                session
                    .commit_transaction()
                    .await
                    .map_err(|e| CatalogError::operation_failed("delete user", email, e))?;
                if res.deleted_count == 0 {
                    warn!("User `{}` vanished mid-delete. Concurrent operation?", email);
                }
                Ok(true)
            }
            Err(e) => {
                if let Err(abort) = session.abort_transaction().await {
                    warn!("Could not abort delete of `{}`: {}", email, abort);
                }
                Err(CatalogError::operation_failed("delete user", email, e))
            }
        }
    }

    /// Replace the whole preferences field of the user matching `email`.
    ///
    /// An absent map is rejected before any round trip. Matched and
    /// modified counts are both returned; a matched-but-unmodified write
    /// usually means the same preferences were resubmitted.
    pub async fn update_preferences(
        &self,
        email: &str,
        preferences: Option<&HashMap<String, serde_json::Value>>,
    ) -> Result<PreferenceUpdate> {
        let preferences = preferences
            .ok_or_else(|| CatalogError::validation("preferences cannot be absent"))?;

        let update = doc! { "$set": { "preferences": bson::to_bson(preferences)? } };
        let res = self
            .users
            .update_one(doc! { "email": email }, update)
            .await
            .map_err(|e| CatalogError::operation_failed("update preferences", email, e))?;

        if res.modified_count < 1 {
            warn!(
                "User `{}` was not updated. Re-writing the same `preferences` field?",
                email
            );
        }
        Ok(PreferenceUpdate {
            matched: res.matched_count,
            modified: res.modified_count,
        })
    }

    pub async fn count(&self) -> Result<u64> {
        self.users
            .count_documents(doc! {})
            .await
            .map_err(|e| CatalogError::operation_failed("count users", "*", e))
    }
}
