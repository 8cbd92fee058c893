//! Lazily established store handle.
//!
//! Request handlers never own a connection; they ask the handle, which
//! hands out the established store or connects on first use under a
//! bounded timeout. Concurrent first uses may each run a connect; the
//! first result stored wins and later racers adopt it. A failed connect
//! leaves the slot empty so the next request tries again. Work is never
//! buffered while disconnected: a connect either succeeds within the
//! bound or the caller's request fails.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::timeout;
use tracing::debug;

use super::ScheduleStore;
use super::error::StoreError;

/// Something that can establish a store.
#[allow(async_fn_in_trait)]
pub trait Connector {
    type Store: ScheduleStore;

    async fn connect(&self) -> Result<Self::Store, StoreError>;
}

/// Tuning for [`StoreHandle`].
#[derive(Debug, Clone)]
pub struct HandleConfig {
    /// Bound on a single connect attempt.
    pub connect_timeout: Duration,
}

impl Default for HandleConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_millis(1000),
        }
    }
}

impl HandleConfig {
    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }
}

/// Hands out a shared store, connecting on first use.
pub struct StoreHandle<C: Connector> {
    connector: C,
    config: HandleConfig,
    established: RwLock<Option<Arc<C::Store>>>,
}

impl<C: Connector> StoreHandle<C> {
    pub fn new(connector: C) -> Self {
        Self::with_config(connector, HandleConfig::default())
    }

    pub fn with_config(connector: C, config: HandleConfig) -> Self {
        Self {
            connector,
            config,
            established: RwLock::new(None),
        }
    }

    /// Reuse the established store, or connect and store it.
    ///
    /// The lock guards only the slot swap, never the connect itself, so a
    /// slow connect cannot block readers of an already-established store.
    pub async fn get(&self) -> Result<Arc<C::Store>, StoreError> {
        if let Some(store) = self.established.read().await.as_ref() {
            return Ok(Arc::clone(store));
        }

        let connect_timeout = self.config.connect_timeout;
        let connected = timeout(connect_timeout, self.connector.connect())
            .await
            .map_err(|_| StoreError::ConnectTimeout(connect_timeout.as_millis() as u64))??;

        let mut slot = self.established.write().await;
        if let Some(existing) = slot.as_ref() {
            // Another request connected first; adopt its store
            return Ok(Arc::clone(existing));
        }
        debug!("established store connection");
        let store = Arc::new(connected);
        *slot = Some(Arc::clone(&store));
        Ok(store)
    }
}
