//! MongoDB Client Provisioning
//!
//! One client per process. Writes are majority-acknowledged with a bounded
//! wait; a write that cannot be acknowledged within the timeout surfaces as
//! an error rather than being retried.

use std::time::Duration;

use mongodb::options::{Acknowledgment, ClientOptions, WriteConcern};
use mongodb::Client;
use tracing::info;

use crate::error::{CatalogError, Result};

/// Upper bound on waiting for majority acknowledgment of a write.
pub const WRITE_CONCERN_TIMEOUT: Duration = Duration::from_millis(2500);

/// Build the shared client from a connection string.
///
/// Parse or connectivity failures are configuration errors, fatal at
/// startup. Pass the returned client (and a database handle derived from it)
/// to each repository constructor.
pub async fn connect(uri: &str) -> Result<Client> {
    let mut options = ClientOptions::parse(uri)
        .await
        .map_err(|e| CatalogError::configuration(format!("invalid connection string: {}", e)))?;

    options.write_concern = Some(
        WriteConcern::builder()
            .w(Acknowledgment::Majority)
            .w_timeout(WRITE_CONCERN_TIMEOUT)
            .build(),
    );

    let client = Client::with_options(options)
        .map_err(|e| CatalogError::configuration(format!("could not build client: {}", e)))?;

    // Fails at startup rather than on the first query.
    client
        .database("admin")
        .run_command(mongodb::bson::doc! { "ping": 1 })
        .await
        .map_err(|e| CatalogError::configuration(format!("could not reach server: {}", e)))?;

    info!("Connected to MongoDB");
    Ok(client)
}
