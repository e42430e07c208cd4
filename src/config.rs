//! # Client Configuration
//!
//! Channel and authentication configuration for the secretsd gRPC client.
//! Supports environment variables, JSON config files, and builder-style
//! overrides.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tonic::{
    metadata::MetadataValue,
    service::Interceptor,
    transport::{Channel, Endpoint},
    Request, Status,
};
use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// Environment variable naming the daemon's gRPC endpoint.
pub const ENDPOINT_ENV: &str = "SECRETSD_GRPC_ENDPOINT";
/// Environment variable carrying the daemon API token.
pub const API_TOKEN_ENV: &str = "SECRETSD_API_TOKEN";

/// Metadata key the daemon expects the API token under.
const API_TOKEN_HEADER: &str = "secretsd-api-token";

/// Configuration for client authentication.
///
/// The daemon authenticates callers with an opaque API token sent as
/// request metadata on every call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// API token value
    pub api_token: Option<String>,
}

impl AuthConfig {
    /// Create auth config with an API token
    #[must_use]
    pub fn with_api_token(token: impl Into<String>) -> Self {
        Self {
            api_token: Some(token.into()),
        }
    }

    /// Check if any authentication is configured
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_token.is_some()
    }
}

/// Configuration for the gRPC channel to the daemon.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GrpcClientConfig {
    /// gRPC endpoint URL (e.g., "http://localhost:50051")
    pub endpoint: String,
    /// Request timeout
    pub timeout: Duration,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Authentication configuration
    pub auth: Option<AuthConfig>,
    /// TCP keepalive interval
    pub tcp_keepalive: Option<Duration>,
    /// HTTP/2 keepalive interval
    pub http2_keepalive_interval: Option<Duration>,
    /// HTTP/2 keepalive timeout
    pub http2_keepalive_timeout: Option<Duration>,
}

impl Default for GrpcClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:50051".to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            auth: None,
            tcp_keepalive: Some(Duration::from_secs(30)),
            http2_keepalive_interval: Some(Duration::from_secs(30)),
            http2_keepalive_timeout: Some(Duration::from_secs(10)),
        }
    }
}

impl GrpcClientConfig {
    /// Create a new config with the given endpoint
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Build a config from `SECRETSD_GRPC_ENDPOINT` and `SECRETSD_API_TOKEN`,
    /// falling back to defaults for anything unset.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            if !endpoint.is_empty() {
                config.endpoint = endpoint;
            }
        }
        if let Ok(token) = std::env::var(API_TOKEN_ENV) {
            if !token.is_empty() {
                config.auth = Some(AuthConfig::with_api_token(token));
            }
        }

        config
    }

    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading client config from file");

        let raw = std::fs::read_to_string(path).map_err(|e| {
            ClientError::config(format!("failed to read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            ClientError::config(format!("invalid config file {}: {}", path.display(), e))
        })
    }

    /// Set the request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connection timeout
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set authentication configuration
    #[must_use]
    pub fn with_auth(mut self, auth: AuthConfig) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Build a tonic Channel from this configuration
    pub async fn connect(&self) -> Result<Channel, ClientError> {
        let mut endpoint = Endpoint::from_shared(self.endpoint.clone()).map_err(|e| {
            ClientError::config(format!("invalid gRPC endpoint '{}': {}", self.endpoint, e))
        })?;

        endpoint = endpoint
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout);

        if let Some(keepalive) = self.tcp_keepalive {
            endpoint = endpoint.tcp_keepalive(Some(keepalive));
        }

        if let Some(interval) = self.http2_keepalive_interval {
            endpoint = endpoint.http2_keep_alive_interval(interval);
        }

        if let Some(timeout) = self.http2_keepalive_timeout {
            endpoint = endpoint.keep_alive_timeout(timeout);
        }

        debug!(endpoint = %self.endpoint, "Connecting to secretsd gRPC endpoint");

        endpoint
            .connect()
            .await
            .map_err(|e| ClientError::connect(self.endpoint.clone(), e.to_string()))
    }
}

/// gRPC interceptor that attaches the daemon API token to outgoing requests.
#[derive(Debug, Clone)]
pub struct AuthInterceptor {
    auth: Option<AuthConfig>,
}

impl AuthInterceptor {
    /// Create a new auth interceptor with the given configuration
    #[must_use]
    pub fn new(auth: Option<AuthConfig>) -> Self {
        Self { auth }
    }

    /// Create an interceptor with no authentication
    #[must_use]
    pub fn none() -> Self {
        Self { auth: None }
    }
}

impl Interceptor for AuthInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        if let Some(ref auth) = self.auth {
            if let Some(ref token) = auth.api_token {
                let value = token
                    .parse::<MetadataValue<_>>()
                    .map_err(|e| Status::internal(format!("invalid API token: {}", e)))?;
                request.metadata_mut().insert(API_TOKEN_HEADER, value);
            }
        }

        Ok(request)
    }
}
