//! Comment Entity

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user comment on a movie.
///
/// The author email is a foreign key by value. Mutation is scoped to the
/// author: updates and deletes filter on both `_id` and `email`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: String,

    /// Author email
    pub email: String,

    /// Movie the comment is attached to
    pub movie_id: String,

    pub text: String,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub date: DateTime<Utc>,
}

impl Comment {
    pub fn new(
        email: impl Into<String>,
        movie_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.into(),
            movie_id: movie_id.into(),
            text: text.into(),
            date: Utc::now(),
        }
    }
}
