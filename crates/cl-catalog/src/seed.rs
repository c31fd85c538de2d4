//! Dev Data Seeder
//!
//! Populates a local database with a small user/comment fixture so the
//! reporting aggregation has something to chew on. Dev mode only; a
//! non-empty `users` collection is left untouched.

use mongodb::{Client, Database};
use tracing::info;

use crate::domain::{Comment, User};
use crate::error::Result;
use crate::repository::{CommentRepository, UserRepository};

pub struct DevDataSeeder {
    users: UserRepository,
    comments: CommentRepository,
}

impl DevDataSeeder {
    pub fn new(client: &Client, db: &Database) -> Self {
        Self {
            users: UserRepository::new(client, db),
            comments: CommentRepository::new(db),
        }
    }

    pub async fn seed(&self) -> Result<()> {
        if self.users.count().await? > 0 {
            info!("Users collection not empty, skipping dev seed");
            return Ok(());
        }

        // (email, name, number of comments), counts kept distinct
        let fixtures = [
            ("ada@example.com", "Ada Doyle", 5),
            ("bram@example.com", "Bram Okafor", 3),
            ("ceci@example.com", "Ceci Marsh", 1),
        ];

        for (email, name, comment_count) in fixtures {
            self.users.insert(&User::new(name, email)).await?;
            for n in 0..comment_count {
                let comment = Comment::new(
                    email,
                    format!("movie-{}", n % 2),
                    format!("take #{} from {}", n + 1, name),
                );
                self.comments.insert(&comment).await?;
            }
        }

        info!("Seeded {} dev users with comments", fixtures.len());
        Ok(())
    }
}
