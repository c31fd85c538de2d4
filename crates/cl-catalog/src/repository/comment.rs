//! Comment Repository
//!
//! Ownership-scoped CRUD over the `comments` collection plus the
//! most-active-commenters report.

use bson::Document;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::{AggregateOptions, ReadConcern};
use mongodb::{Collection, Database};
use tracing::{error, warn};

use crate::domain::{Comment, Critic};
use crate::error::{is_duplicate_key, CatalogError, Result};
use crate::repository::MutationOutcome;

/// Row cap on the most-active-commenters report.
const MOST_ACTIVE_LIMIT: i64 = 20;

pub struct CommentRepository {
    collection: Collection<Comment>,
}

impl CommentRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("comments"),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Comment>> {
        self.collection
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| CatalogError::operation_failed("find comment", id, e))
    }

    /// Insert a comment.
    ///
    /// The id must be set by the caller; beyond that there is no duplicate
    /// protection other than the `_id` constraint the storage enforces.
    pub async fn insert(&self, comment: &Comment) -> Result<()> {
        if comment.id.is_empty() {
            return Err(CatalogError::validation("comments need an id field set"));
        }

        match self.collection.insert_one(comment).await {
            Ok(_) => Ok(()),
            Err(e) if is_duplicate_key(&e) => {
                Err(CatalogError::duplicate("Comment", "_id", &comment.id))
            }
            Err(e) => Err(CatalogError::operation_failed("insert comment", &comment.id, e)),
        }
    }

    /// Update the text of a comment owned by `email`, refreshing its date.
    ///
    /// The filter requires both the id and the author email, so a wrong
    /// owner and a missing comment both come back as `NoMatch`.
    pub async fn update_text(
        &self,
        comment_id: &str,
        text: &str,
        email: &str,
    ) -> Result<MutationOutcome> {
        let filter = doc! { "_id": comment_id, "email": email };
        let update = doc! {
            "$set": {
                "text": text,
                "date": bson::DateTime::from_chrono(chrono::Utc::now()),
            }
        };

        let res = self
            .collection
            .update_one(filter, update)
            .await
            .map_err(|e| CatalogError::operation_failed("update comment", comment_id, e))?;

        if res.matched_count == 0 {
            error!(
                "Could not update comment `{}`. Make sure it is owned by `{}`",
                comment_id, email
            );
            return Ok(MutationOutcome::NoMatch);
        }
        if res.modified_count != 1 {
            warn!("Comment `{}` text was not updated. Is it the same text?", comment_id);
            return Ok(MutationOutcome::Unchanged);
        }
        Ok(MutationOutcome::Applied)
    }

    /// Delete the comment matching `comment_id` owned by `email`.
    ///
    /// `true` iff exactly one document was deleted; an ownership mismatch
    /// or an already-gone comment returns `false`.
    pub async fn delete(&self, comment_id: &str, email: &str) -> Result<bool> {
        if comment_id.is_empty() {
            return Err(CatalogError::validation("comment id is required"));
        }

        let res = self
            .collection
            .delete_one(doc! { "_id": comment_id, "email": email })
            .await
            .map_err(|e| CatalogError::operation_failed("delete comment", comment_id, e))?;

        if res.deleted_count != 1 {
            warn!(
                "Not able to delete comment `{}` for `{}`. Not the owner, or already deleted",
                comment_id, email
            );
            return Ok(false);
        }
        Ok(true)
    }

    /// Report the top 20 most active commenters, most active first.
    ///
    /// Runs with majority read concern: the counts reflect
    /// majority-committed writes. Tie order between equal counts is
    /// unspecified.
    pub async fn most_active_commenters(&self) -> Result<Vec<Critic>> {
        let options = AggregateOptions::builder()
            .read_concern(ReadConcern::majority())
            .build();

        let cursor = self
            .collection
            .aggregate(most_active_pipeline(MOST_ACTIVE_LIMIT))
            .with_options(options)
            .with_type::<Critic>()
            .await
            .map_err(|e| CatalogError::operation_failed("aggregate commenters", "comments", e))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| CatalogError::operation_failed("aggregate commenters", "comments", e))
    }

    pub async fn count(&self) -> Result<u64> {
        self.collection
            .count_documents(doc! {})
            .await
            .map_err(|e| CatalogError::operation_failed("count comments", "*", e))
    }
}

/// Group comments by author email, count, order by count descending, cap.
fn most_active_pipeline(limit: i64) -> Vec<Document> {
    vec![
        doc! { "$group": { "_id": "$email", "count": { "$sum": 1_i64 } } },
        doc! { "$sort": { "count": -1 } },
        doc! { "$limit": limit },
    ]
}
