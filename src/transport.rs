//! Backend seam between the call wrapper and the daemon.
//!
//! The wrapper depends on [`SecretsBackend`] rather than a concrete tonic
//! client, so the transport can be substituted. [`GrpcBackend`] is the
//! production implementation; the capture backend in [`crate::testing`]
//! is the other.

use async_trait::async_trait;
use tonic::service::interceptor::InterceptedService;
use tonic::transport::Channel;
use tonic::Status;

use crate::config::AuthInterceptor;
use crate::proto::secrets_client::SecretsClient;
use crate::proto::{
    GetBulkSecretRequest, GetBulkSecretResponse, GetSecretRequest, GetSecretResponse,
};

/// A transport capable of performing the daemon's secret-retrieval calls.
///
/// Implementations issue exactly one remote call per method invocation and
/// report faults as raw `tonic::Status`; translating faults into
/// [`crate::ClientError`] is the wrapper's job, not the backend's.
#[async_trait]
pub trait SecretsBackend: Send + Sync + std::fmt::Debug {
    async fn get_secret(&self, request: GetSecretRequest) -> Result<GetSecretResponse, Status>;

    async fn get_bulk_secret(
        &self,
        request: GetBulkSecretRequest,
    ) -> Result<GetBulkSecretResponse, Status>;
}

/// Production backend over an established tonic channel.
#[derive(Debug, Clone)]
pub struct GrpcBackend {
    client: SecretsClient<InterceptedService<Channel, AuthInterceptor>>,
}

impl GrpcBackend {
    /// Wrap an established channel, attaching the auth interceptor to every
    /// outgoing request.
    #[must_use]
    pub fn new(channel: Channel, interceptor: AuthInterceptor) -> Self {
        Self {
            client: SecretsClient::with_interceptor(channel, interceptor),
        }
    }
}

#[async_trait]
impl SecretsBackend for GrpcBackend {
    async fn get_secret(&self, request: GetSecretRequest) -> Result<GetSecretResponse, Status> {
        self.client
            .clone()
            .get_secret(request)
            .await
            .map(tonic::Response::into_inner)
    }

    async fn get_bulk_secret(
        &self,
        request: GetBulkSecretRequest,
    ) -> Result<GetBulkSecretResponse, Status> {
        self.client
            .clone()
            .get_bulk_secret(request)
            .await
            .map(tonic::Response::into_inner)
    }
}
