//! User Entity

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A registered catalog user.
///
/// Email is unique across the collection (backed by a unique index) and
/// immutable after creation. Preferences are an opaque string-to-scalar
/// mapping replaced wholesale on update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,

    /// Display name
    pub name: String,

    /// Unique login identity
    pub email: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hashed_password: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<HashMap<String, serde_json::Value>>,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            email: email.into(),
            hashed_password: None,
            preferences: None,
        }
    }

    pub fn with_password_hash(mut self, hash: impl Into<String>) -> Self {
        self.hashed_password = Some(hash.into());
        self
    }

    pub fn with_preferences(mut self, preferences: HashMap<String, serde_json::Value>) -> Self {
        self.preferences = Some(preferences);
        self
    }
}
