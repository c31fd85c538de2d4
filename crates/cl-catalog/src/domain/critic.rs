//! Critic Report Row

use serde::{Deserialize, Serialize};

/// One row of the most-active-commenters report.
///
/// Derived by the `$group` stage of the reporting aggregation, never
/// persisted. `_id` carries the grouped author email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Critic {
    #[serde(rename = "_id")]
    pub email: String,

    /// Total comments by this author
    pub count: i64,
}
