//! Session Entity

use serde::{Deserialize, Serialize};

/// An authentication session.
///
/// At most one live session per user id, enforced by upsert-on-`userId`
/// rather than a uniqueness constraint. The collection `_id` is
/// server-assigned and not carried here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Owning user id
    pub user_id: String,

    /// Bearer token issued at login
    pub token: String,
}
