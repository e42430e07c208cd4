//! # Secretsd Client Library
//!
//! Client library for the secretsd secrets daemon gRPC API. Provides the
//! high-level call wrapper ([`SecretsdClient`]), the transport seam it runs
//! on ([`transport::SecretsBackend`]), and request-capture test support
//! ([`testing`]) for asserting on outgoing requests without a live daemon.

pub mod client;
pub mod config;
pub mod error;
pub mod proto;
pub mod testing;
pub mod transport;

// Re-export commonly used types for convenience
pub use client::SecretsdClient;
pub use config::{AuthConfig, AuthInterceptor, GrpcClientConfig};
pub use error::{ClientError, ClientResult};
pub use transport::{GrpcBackend, SecretsBackend};
