use lattice_core::{ClientConfig, ResponseEnvelope};
use serde_json::Value;
use std::sync::Arc;

use crate::collections::Collections;
use crate::documents::Documents;
use crate::error::{LatticeError, Result};
use crate::indexes::Indexes;
use crate::schemas::Schemas;
use crate::searching::Search;
use crate::transport::Transport;

/// Lattice REST API Client
///
/// Cloning is cheap; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    transport: Transport,
    config: Arc<ClientConfig>,
}

impl Client {
    /// Create a new client connected to the given base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::new(base_url))
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let transport = Transport::new(&config)?;
        tracing::debug!(api_url = %config.api_url(), timeout_secs = config.timeout_secs, "client created");
        Ok(Self {
            transport,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn collections(&self) -> Collections<'_> {
        Collections::new(self)
    }

    pub fn documents(&self) -> Documents<'_> {
        Documents::new(self)
    }

    pub fn search(&self) -> Search<'_> {
        Search::new(self)
    }

    pub fn schemas(&self) -> Schemas<'_> {
        Schemas::new(self)
    }

    pub fn indexes(&self) -> Indexes<'_> {
        Indexes::new(self)
    }

    /// Health check. Never fails: any error is reported as `false`.
    pub async fn health_check(&self) -> bool {
        match self.transport.get("/health").await {
            Ok(envelope) => envelope.success,
            Err(e) => {
                tracing::debug!(error = %e, "health check failed");
                false
            }
        }
    }

    /// Payload of a response, or `None` when the server reported failure.
    ///
    /// With `raise_api_errors` set, failures are returned as `LatticeError::Api`.
    pub(crate) fn accept(&self, envelope: ResponseEnvelope) -> Result<Option<Value>> {
        if envelope.success {
            return Ok(envelope.into_payload());
        }
        self.reject(&envelope)?;
        Ok(None)
    }

    /// Success flag of a mutation response
    pub(crate) fn accept_status(&self, envelope: ResponseEnvelope) -> Result<bool> {
        if envelope.success {
            return Ok(true);
        }
        self.reject(&envelope)?;
        Ok(false)
    }

    fn reject(&self, envelope: &ResponseEnvelope) -> Result<()> {
        if self.config.raise_api_errors {
            return Err(LatticeError::from_envelope(envelope));
        }
        tracing::debug!(
            status = envelope.status_code,
            error = %envelope.failure_message(),
            "server reported failure"
        );
        Ok(())
    }
}
