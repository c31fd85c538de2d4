//! Catalog Tests
//!
//! Tests for domain models, outcome types, and the fail-fast validation
//! paths of the repositories. Validation rejections happen before any
//! round trip, so they run against a lazy (unconnected) client.

use std::collections::HashMap;

use cl_catalog::domain::{Comment, Critic, Session, User};
use cl_catalog::repository::{CommentRepository, MutationOutcome, UserRepository};
use cl_catalog::CatalogError;

mod domain_tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new("Ada Doyle", "ada@example.com");
        assert!(!user.id.is_empty());
        assert_eq!(user.name, "Ada Doyle");
        assert_eq!(user.email, "ada@example.com");
        assert!(user.hashed_password.is_none());
        assert!(user.preferences.is_none());
    }

    #[test]
    fn test_user_ids_are_unique() {
        let a = User::new("Ada", "ada@example.com");
        let b = User::new("Ada", "ada@example.com");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_user_builder_methods() {
        let mut preferences = HashMap::new();
        preferences.insert("layout".to_string(), serde_json::json!("compact"));

        let user = User::new("Ada", "ada@example.com")
            .with_password_hash("$argon2$...")
            .with_preferences(preferences);

        assert_eq!(user.hashed_password.as_deref(), Some("$argon2$..."));
        assert_eq!(
            user.preferences.unwrap().get("layout"),
            Some(&serde_json::json!("compact"))
        );
    }

    #[test]
    fn test_user_serializes_with_id_field() {
        let user = User::new("Ada", "ada@example.com");
        let doc = bson::to_document(&user).unwrap();
        assert_eq!(doc.get_str("_id").unwrap(), user.id);
        assert_eq!(doc.get_str("email").unwrap(), "ada@example.com");
        // absent optionals stay off the wire
        assert!(!doc.contains_key("hashedPassword"));
        assert!(!doc.contains_key("preferences"));
    }

    #[test]
    fn test_comment_creation() {
        let comment = Comment::new("ada@example.com", "movie-1", "a fine film");
        assert!(!comment.id.is_empty());
        assert_eq!(comment.email, "ada@example.com");
        assert_eq!(comment.movie_id, "movie-1");
        assert_eq!(comment.text, "a fine film");
    }

    #[test]
    fn test_comment_date_round_trips_as_bson_datetime() {
        let comment = Comment::new("ada@example.com", "movie-1", "a fine film");
        let doc = bson::to_document(&comment).unwrap();
        assert!(doc.get_datetime("date").is_ok());

        let back: Comment = bson::from_document(doc).unwrap();
        assert_eq!(back.date.timestamp_millis(), comment.date.timestamp_millis());
    }

    #[test]
    fn test_session_ignores_server_assigned_id() {
        let doc = bson::doc! {
            "_id": bson::oid::ObjectId::new(),
            "userId": "u-1",
            "token": "tok-2",
        };
        let session: Session = bson::from_document(doc).unwrap();
        assert_eq!(session.user_id, "u-1");
        assert_eq!(session.token, "tok-2");
    }

    #[test]
    fn test_critic_report_row_shape() {
        let critic: Critic =
            bson::from_document(bson::doc! { "_id": "ada@example.com", "count": 5_i64 }).unwrap();
        assert_eq!(critic.email, "ada@example.com");
        assert_eq!(critic.count, 5);
    }
}

mod outcome_tests {
    use super::*;

    #[test]
    fn test_mutation_outcome_matched() {
        assert!(MutationOutcome::Applied.matched());
        assert!(MutationOutcome::Unchanged.matched());
        assert!(!MutationOutcome::NoMatch.matched());
    }
}

// Validation rejections must not touch the database, so a client that has
// never connected anywhere is enough to exercise them.
mod validation_tests {
    use super::*;

    async fn lazy_db() -> (mongodb::Client, mongodb::Database) {
        let client = mongodb::Client::with_uri_str("mongodb://localhost:27017")
            .await
            .expect("parse local uri");
        let db = client.database("cinelog_test");
        (client, db)
    }

    #[tokio::test]
    async fn test_insert_comment_without_id_fails_fast() {
        let (_client, db) = lazy_db().await;
        let repo = CommentRepository::new(&db);

        let mut comment = Comment::new("ada@example.com", "movie-1", "text");
        comment.id = String::new();

        let err = repo.insert(&comment).await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_delete_comment_with_empty_id_fails_fast() {
        let (_client, db) = lazy_db().await;
        let repo = CommentRepository::new(&db);

        let err = repo.delete("", "ada@example.com").await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_update_preferences_rejects_absent_map() {
        let (client, db) = lazy_db().await;
        let repo = UserRepository::new(&client, &db);

        let err = repo
            .update_preferences("ada@example.com", None)
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation { .. }));
    }
}

mod error_tests {
    use super::*;

    #[test]
    fn test_duplicate_error_message_names_the_key() {
        let err = CatalogError::duplicate("User", "email", "ada@example.com");
        let message = err.to_string();
        assert!(message.contains("User"));
        assert!(message.contains("email=ada@example.com"));
    }

    #[test]
    fn test_validation_error_message() {
        let err = CatalogError::validation("comment id is required");
        assert_eq!(err.to_string(), "Validation error: comment id is required");
    }
}
