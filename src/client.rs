//! # Secretsd Client
//!
//! High-level client for the secretsd secret-retrieval API. Converts typed
//! arguments into wire requests, issues a single remote call per operation,
//! and maps transport faults into [`ClientError`] with the original status
//! preserved as the cause.

use std::collections::HashMap;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::{AuthInterceptor, GrpcClientConfig};
use crate::error::{ClientError, ClientResult};
use crate::proto;
use crate::transport::{GrpcBackend, SecretsBackend};

/// Client for the secretsd secret-retrieval operations.
///
/// Arguments are copied into the outgoing request verbatim: no validation,
/// no key parsing, no metadata interpretation. Keys containing path-like
/// separators (`"us-west-1/org/xpto/secretabc"`) are treated as opaque
/// strings.
///
/// # Examples
///
/// ```rust,ignore
/// use secretsd_client::SecretsdClient;
/// use std::collections::HashMap;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = SecretsdClient::connect("http://localhost:50051").await?;
///
///     let secret = client
///         .get_secret("vault", "database/password", HashMap::new())
///         .await?;
///
///     println!("fields: {}", secret.len());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SecretsdClient {
    backend: Arc<dyn SecretsBackend>,
    endpoint: Option<String>,
}

impl SecretsdClient {
    /// Connect to a gRPC endpoint with default configuration.
    pub async fn connect(endpoint: impl Into<String>) -> ClientResult<Self> {
        Self::connect_with_config(GrpcClientConfig::new(endpoint)).await
    }

    /// Connect with full configuration.
    pub async fn connect_with_config(config: GrpcClientConfig) -> ClientResult<Self> {
        let endpoint = config.endpoint.clone();
        let channel = config.connect().await?;
        let interceptor = AuthInterceptor::new(config.auth);

        info!(endpoint = %endpoint, "Connected to secretsd gRPC endpoint");

        Ok(Self {
            backend: Arc::new(GrpcBackend::new(channel, interceptor)),
            endpoint: Some(endpoint),
        })
    }

    /// Build a client over an explicit backend.
    ///
    /// This is the substitution seam the request-capture harness uses; it is
    /// equally suited to custom transports (in-process daemons, unix
    /// sockets behind a custom connector).
    #[must_use]
    pub fn with_backend(backend: Arc<dyn SecretsBackend>) -> Self {
        Self {
            backend,
            endpoint: None,
        }
    }

    /// The configured endpoint URL, if this client was built from one.
    #[must_use]
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Retrieve a single secret from a named store.
    ///
    /// Returns the secret's fields as a name/value mapping, exactly as the
    /// daemon returned them.
    pub async fn get_secret(
        &self,
        store_name: &str,
        key: &str,
        metadata: HashMap<String, String>,
    ) -> ClientResult<HashMap<String, String>> {
        self.get_secret_with_cancellation(store_name, key, metadata, &CancellationToken::new())
            .await
    }

    /// Retrieve a single secret, aborting early if `cancel` fires.
    ///
    /// An already-cancelled token fails with [`ClientError::Cancelled`]
    /// before the request is issued; a token cancelled mid-call wins over a
    /// late reply. Cancellation is never reported as an rpc fault.
    pub async fn get_secret_with_cancellation(
        &self,
        store_name: &str,
        key: &str,
        metadata: HashMap<String, String>,
        cancel: &CancellationToken,
    ) -> ClientResult<HashMap<String, String>> {
        if cancel.is_cancelled() {
            return Err(ClientError::Cancelled);
        }

        debug!(store_name = %store_name, key = %key, "Fetching secret via gRPC");

        let request = proto::GetSecretRequest {
            store_name: store_name.to_string(),
            key: key.to_string(),
            metadata,
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ClientError::Cancelled),
            result = self.backend.get_secret(request) => {
                let response = result.map_err(ClientError::Rpc)?;
                Ok(response.data)
            }
        }
    }

    /// Retrieve every secret a store will disclose.
    ///
    /// Returns a mapping from secret name to that secret's fields.
    pub async fn get_bulk_secret(
        &self,
        store_name: &str,
        metadata: HashMap<String, String>,
    ) -> ClientResult<HashMap<String, HashMap<String, String>>> {
        self.get_bulk_secret_with_cancellation(store_name, metadata, &CancellationToken::new())
            .await
    }

    /// Bulk retrieval with the same cancellation rules as
    /// [`get_secret_with_cancellation`](Self::get_secret_with_cancellation).
    pub async fn get_bulk_secret_with_cancellation(
        &self,
        store_name: &str,
        metadata: HashMap<String, String>,
        cancel: &CancellationToken,
    ) -> ClientResult<HashMap<String, HashMap<String, String>>> {
        if cancel.is_cancelled() {
            return Err(ClientError::Cancelled);
        }

        debug!(store_name = %store_name, "Fetching bulk secrets via gRPC");

        let request = proto::GetBulkSecretRequest {
            store_name: store_name.to_string(),
            metadata,
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ClientError::Cancelled),
            result = self.backend.get_bulk_secret(request) => {
                let response = result.map_err(ClientError::Rpc)?;
                Ok(response
                    .data
                    .into_iter()
                    .map(|(name, secret)| (name, secret.secrets))
                    .collect())
            }
        }
    }
}
