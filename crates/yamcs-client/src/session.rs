// crates/yamcs-client/src/session.rs
// ============================================================================
// Module: Session Manager
// Description: Lazy, shared Yamcs connection with invalidation on failure.
// Purpose: Let the bridge start without a reachable Yamcs server and
//          reconnect transparently on the next call.
// Dependencies: tokio, yamcs-client::client, yamcs-client::error
// ============================================================================

//! ## Overview
//! The session manager owns at most one live [`YamcsClient`] behind an async
//! mutex. [`SessionManager::acquire`] returns the cached client or connects a
//! fresh one, so startup never requires Yamcs to be reachable. Callers that
//! observe a connection or authentication failure report it through
//! [`SessionManager::reset`], which drops the cached client and forces the
//! next acquire to reconnect.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::client::ClientConfig;
use crate::client::YamcsClient;
use crate::error::YamcsError;

// ============================================================================
// SECTION: Session Manager
// ============================================================================

/// Shared handle to a lazily established Yamcs connection.
#[derive(Debug)]
pub struct SessionManager {
    /// Connection settings used for every (re)connect.
    config: ClientConfig,
    /// The live client, when one has been established.
    slot: Mutex<Option<Arc<YamcsClient>>>,
}

impl SessionManager {
    /// Creates a manager that will connect on first use.
    #[must_use]
    pub const fn new(config: ClientConfig) -> Self {
        Self { config, slot: Mutex::const_new(None) }
    }

    /// Returns the connection settings backing this manager.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the cached client, connecting if none is live.
    ///
    /// Connection attempts are serialized: concurrent callers wait on the
    /// slot lock rather than racing duplicate logins.
    ///
    /// # Errors
    ///
    /// Returns [`YamcsError::Connection`] when Yamcs is unreachable,
    /// [`YamcsError::Authentication`] when credentials are refused, or
    /// [`YamcsError::Validation`] when the configured URL is unusable.
    pub async fn acquire(&self) -> Result<Arc<YamcsClient>, YamcsError> {
        let mut slot = self.slot.lock().await;
        if let Some(client) = slot.as_ref() {
            return Ok(Arc::clone(client));
        }
        let client = Arc::new(YamcsClient::connect(&self.config).await?);
        *slot = Some(Arc::clone(&client));
        Ok(client)
    }

    /// Drops the cached client so the next acquire reconnects.
    pub async fn reset(&self) {
        let mut slot = self.slot.lock().await;
        *slot = None;
    }

    /// Returns the cached client without connecting, if one is live.
    pub async fn peek(&self) -> Option<Arc<YamcsClient>> {
        self.slot.lock().await.as_ref().map(Arc::clone)
    }
}
