//! Connection management for MongoDB
//!
//! This module provides the single short-lived connection used by the
//! one-shot CLI:
//! - Connection establishment with MongoDB Stable API v1 pinned
//! - A bounded connection timeout
//! - A `ping` round trip to verify the connection before dispatch
//! - Explicit teardown before process exit

use mongodb::bson::doc;
use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Database};
use std::time::Duration;
use tracing::{debug, info};

use crate::config::ConnectionConfig;
use crate::error::{ConnectionError, Result};

/// MongoDB connection manager
///
/// Owns the client for the lifetime of the process. One connection is
/// opened per invocation and shut down before exit; there is no pooling
/// policy beyond driver defaults and no reconnection.
pub struct ConnectionManager {
    /// MongoDB client instance, present only while connected
    client: Option<Client>,

    /// Connection configuration
    config: ConnectionConfig,

    /// Connection URI
    uri: String,
}

impl ConnectionManager {
    /// Create a new connection manager
    ///
    /// # Arguments
    /// * `uri` - MongoDB connection URI
    /// * `config` - Connection configuration
    pub fn new(uri: String, config: ConnectionConfig) -> Self {
        Self {
            client: None,
            config,
            uri,
        }
    }

    /// Establish connection to MongoDB
    ///
    /// Parses the URI, pins the Stable API version, applies the configured
    /// timeout, and verifies the connection with a `ping` against the
    /// `admin` database. Any failure is fatal to the caller.
    pub async fn connect(&mut self) -> Result<()> {
        let mut options = ClientOptions::parse(&self.uri)
            .await
            .map_err(|e| ConnectionError::InvalidUri(e.to_string()))?;

        let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
        options.server_api = Some(server_api);

        let timeout = Duration::from_secs(self.config.timeout);
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);
        options.app_name = Some(self.config.app_name.clone());

        debug!("Connecting with timeout {:?}", timeout);

        let client = Client::with_options(options)
            .map_err(|e| ConnectionError::ConnectionFailed(e.to_string()))?;

        Self::ping(&client).await?;
        info!("Connected to MongoDB");

        self.client = Some(client);
        Ok(())
    }

    /// Disconnect from MongoDB
    ///
    /// Closes the connection and cleans up driver resources. Safe to call
    /// when not connected.
    pub async fn disconnect(&mut self) -> Result<()> {
        if let Some(client) = self.client.take() {
            client.shutdown().await;
            debug!("Disconnected from MongoDB");
        }
        Ok(())
    }

    /// Get a database handle
    ///
    /// # Arguments
    /// * `name` - Database name
    pub fn database(&self, name: &str) -> Result<Database> {
        Ok(self.client()?.database(name))
    }

    /// Get the MongoDB client
    pub fn client(&self) -> Result<&Client> {
        self.client
            .as_ref()
            .ok_or_else(|| ConnectionError::NotConnected.into())
    }

    /// Check if currently connected
    pub fn is_connected(&self) -> bool {
        self.client.is_some()
    }

    /// Verify the connection is alive by sending a ping
    async fn ping(client: &Client) -> Result<()> {
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| ConnectionError::PingFailed(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_manager_is_disconnected() {
        let manager = ConnectionManager::new(
            "mongodb://localhost:27017".to_string(),
            ConnectionConfig::default(),
        );
        assert!(!manager.is_connected());
    }

    #[test]
    fn test_client_before_connect_fails() {
        let manager = ConnectionManager::new(
            "mongodb://localhost:27017".to_string(),
            ConnectionConfig::default(),
        );
        assert!(manager.client().is_err());
        assert!(manager.database("sample_training").is_err());
    }

    #[test]
    fn test_disconnect_without_connect_is_noop() {
        let mut manager = ConnectionManager::new(
            "mongodb://localhost:27017".to_string(),
            ConnectionConfig::default(),
        );
        tokio_test::block_on(async {
            assert!(manager.disconnect().await.is_ok());
        });
    }
}
