//! # Request-Capture Test Support
//!
//! Intercepts a [`SecretsdClient`] call before it reaches any backend,
//! exposes the outgoing request for inspection, and lets the test deliver
//! a synthesized reply or fault to the suspended caller.
//!
//! Each captured call follows a two-phase lifecycle: first inspect the
//! request, then either complete it (success or fault) or dismiss it.
//! Exactly one [`CapturedRequest`] exists per intercepted call, and
//! completing it resumes exactly the one caller that issued it.
//!
//! # Examples
//!
//! ```rust,ignore
//! use secretsd_client::proto::{GetSecretRequest, GetSecretResponse};
//! use secretsd_client::testing::TestClient;
//!
//! #[tokio::test]
//! async fn get_secret_round_trip() -> anyhow::Result<()> {
//!     let mut client = TestClient::new();
//!
//!     let mut request = client
//!         .capture(|c| async move {
//!             c.get_secret("vault", "db/password", Default::default()).await
//!         })
//!         .await?;
//!
//!     let envelope: GetSecretRequest = request.request_envelope()?;
//!     assert_eq!(envelope.store_name, "vault");
//!
//!     let reply = GetSecretResponse::default();
//!     let secret = request.complete_with_message(reply).await??;
//!     assert!(secret.is_empty());
//!     Ok(())
//! }
//! ```

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tonic::Status;

use crate::client::SecretsdClient;
use crate::error::ClientResult;
use crate::proto::{
    GetBulkSecretRequest, GetBulkSecretResponse, GetSecretRequest, GetSecretResponse,
};
use crate::transport::SecretsBackend;

/// Misuse of the capture/complete/dismiss lifecycle.
///
/// These are programming-error signals for tests; nothing a production
/// caller does can produce one.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("captured request was already completed")]
    AlreadyCompleted,

    #[error("captured request was dismissed; completion is no longer allowed")]
    Dismissed,

    #[error("no request was captured: {0}")]
    NothingCaptured(String),

    #[error("caller task failed before producing a result: {0}")]
    CallerGone(String),

    #[error("captured request could not be decoded as the requested type: {0}")]
    Decode(#[from] prost::DecodeError),
}

/// A call intercepted on its way to the backend, paired with the oneshot
/// that resumes the suspended caller.
struct InterceptedCall {
    method: &'static str,
    request: Vec<u8>,
    reply: oneshot::Sender<Result<Vec<u8>, Status>>,
}

/// Backend that hands every call to the owning [`TestClient`] instead of a
/// real daemon.
#[derive(Clone)]
struct CaptureBackend {
    calls: mpsc::UnboundedSender<InterceptedCall>,
}

impl fmt::Debug for CaptureBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureBackend").finish_non_exhaustive()
    }
}

impl CaptureBackend {
    /// Park the call on a oneshot until the test delivers a payload.
    ///
    /// Requests and replies cross the seam as encoded bytes so one channel
    /// serves both operations; [`CapturedRequest::request_envelope`] decodes
    /// back to the typed message on demand.
    async fn intercept<Req, Res>(&self, method: &'static str, request: Req) -> Result<Res, Status>
    where
        Req: prost::Message,
        Res: prost::Message + Default,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        let call = InterceptedCall {
            method,
            request: request.encode_to_vec(),
            reply: reply_tx,
        };

        self.calls
            .send(call)
            .map_err(|_| Status::unavailable("test client dropped before the call was captured"))?;

        let payload = reply_rx
            .await
            .map_err(|_| Status::cancelled("captured request dropped without a reply"))??;

        Res::decode(payload.as_slice())
            .map_err(|e| Status::internal(format!("undecodable reply injected: {}", e)))
    }
}

#[async_trait]
impl SecretsBackend for CaptureBackend {
    async fn get_secret(&self, request: GetSecretRequest) -> Result<GetSecretResponse, Status> {
        self.intercept("GetSecret", request).await
    }

    async fn get_bulk_secret(
        &self,
        request: GetBulkSecretRequest,
    ) -> Result<GetBulkSecretResponse, Status> {
        self.intercept("GetBulkSecret", request).await
    }
}

/// Test fixture owning a [`SecretsdClient`] wired to the capture backend.
///
/// One fixture per test; captured calls are serviced in the order they are
/// issued and there is no cross-test sharing.
pub struct TestClient {
    client: SecretsdClient,
    calls: mpsc::UnboundedReceiver<InterceptedCall>,
}

impl TestClient {
    #[must_use]
    pub fn new() -> Self {
        let (calls_tx, calls_rx) = mpsc::unbounded_channel();
        let backend = CaptureBackend { calls: calls_tx };

        Self {
            client: SecretsdClient::with_backend(Arc::new(backend)),
            calls: calls_rx,
        }
    }

    /// A client handle for calls made outside of [`capture`](Self::capture),
    /// e.g. exercising cancellation paths that never reach the backend.
    #[must_use]
    pub fn client(&self) -> SecretsdClient {
        self.client.clone()
    }

    /// Run `invocation` concurrently and resolve as soon as its outgoing
    /// request has been formed - not when the call completes.
    ///
    /// The invocation must perform exactly one call through the client it is
    /// handed. If it finishes without the backend ever seeing a request
    /// (e.g. an already-cancelled token), this resolves with
    /// [`ProtocolError::NothingCaptured`] instead of waiting forever.
    pub async fn capture<F, Fut, R>(
        &mut self,
        invocation: F,
    ) -> Result<CapturedRequest<R>, ProtocolError>
    where
        F: FnOnce(SecretsdClient) -> Fut,
        Fut: Future<Output = ClientResult<R>> + Send + 'static,
        R: Send + 'static,
    {
        let mut call = tokio::spawn(invocation(self.client.clone()));

        tokio::select! {
            // Prefer the captured request when both are ready: a call that
            // was cancelled after issuing its request still counts as
            // captured.
            biased;
            intercepted = self.calls.recv() => {
                let Some(intercepted) = intercepted else {
                    return Err(ProtocolError::NothingCaptured(
                        "capture channel closed".to_string(),
                    ));
                };
                Ok(CapturedRequest {
                    method: intercepted.method,
                    request: intercepted.request,
                    reply: Some(intercepted.reply),
                    call: Some(call),
                    dismissed: false,
                })
            }
            finished = &mut call => {
                let detail = match finished {
                    Ok(Ok(_)) => "call succeeded without reaching the backend".to_string(),
                    Ok(Err(e)) => format!("call failed before reaching the backend: {}", e),
                    Err(e) => format!("call task failed: {}", e),
                };
                Err(ProtocolError::NothingCaptured(detail))
            }
        }
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}

/// An in-flight call intercepted before any backend saw it.
///
/// Holds the pending call's outgoing request and the handle used to later
/// deliver a reply or fault. Transitions from pending to completed or
/// dismissed, never both.
pub struct CapturedRequest<R> {
    method: &'static str,
    request: Vec<u8>,
    reply: Option<oneshot::Sender<Result<Vec<u8>, Status>>>,
    call: Option<JoinHandle<ClientResult<R>>>,
    dismissed: bool,
}

impl<R> CapturedRequest<R> {
    /// The rpc method the call targeted (`"GetSecret"` / `"GetBulkSecret"`).
    #[must_use]
    pub fn method(&self) -> &'static str {
        self.method
    }

    /// Decode the captured request as `M` for field-by-field inspection.
    ///
    /// Decoding does not consume the capture; it can be repeated, before or
    /// after completion.
    pub fn request_envelope<M>(&self) -> Result<M, ProtocolError>
    where
        M: prost::Message + Default,
    {
        M::decode(self.request.as_slice()).map_err(ProtocolError::from)
    }

    /// Deliver `reply` as the backend's answer and return what the
    /// suspended caller's own `await` produced.
    pub async fn complete_with_message<M>(
        &mut self,
        reply: M,
    ) -> Result<ClientResult<R>, ProtocolError>
    where
        M: prost::Message,
    {
        self.complete(Ok(reply.encode_to_vec())).await
    }

    /// Deliver `fault` as a transport-level failure and return what the
    /// suspended caller's own `await` produced.
    pub async fn complete_with_fault(
        &mut self,
        fault: Status,
    ) -> Result<ClientResult<R>, ProtocolError> {
        self.complete(Err(fault)).await
    }

    /// Mark this capture as intentionally not validated further.
    ///
    /// Does not resume the caller; any later completion attempt is a
    /// [`ProtocolError::Dismissed`].
    pub fn dismiss(&mut self) {
        self.dismissed = true;
    }

    async fn complete(
        &mut self,
        payload: Result<Vec<u8>, Status>,
    ) -> Result<ClientResult<R>, ProtocolError> {
        if self.dismissed {
            return Err(ProtocolError::Dismissed);
        }
        let reply = self.reply.take().ok_or(ProtocolError::AlreadyCompleted)?;
        let call = self.call.take().ok_or(ProtocolError::AlreadyCompleted)?;

        // A send failure means the caller already settled on its own
        // (cancellation fired mid-flight). Its result is still the answer.
        let _ = reply.send(payload);

        call.await
            .map_err(|e| ProtocolError::CallerGone(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_capture_records_method_name() {
        let mut client = TestClient::new();

        let mut request = client
            .capture(|c| async move { c.get_secret("store", "key", HashMap::new()).await })
            .await
            .unwrap();

        assert_eq!(request.method(), "GetSecret");
        request.dismiss();
    }

    #[tokio::test]
    async fn test_request_envelope_is_repeatable() {
        let mut client = TestClient::new();

        let mut request = client
            .capture(|c| async move { c.get_secret("store", "key", HashMap::new()).await })
            .await
            .unwrap();

        let first: GetSecretRequest = request.request_envelope().unwrap();
        let second: GetSecretRequest = request.request_envelope().unwrap();
        assert_eq!(first, second);
        request.dismiss();
    }

    #[tokio::test]
    async fn test_sequential_captures_on_one_fixture() {
        let mut client = TestClient::new();

        for expected_key in ["first", "second"] {
            let key = expected_key.to_string();
            let mut request = client
                .capture(move |c| async move { c.get_secret("store", &key, HashMap::new()).await })
                .await
                .unwrap();

            let envelope: GetSecretRequest = request.request_envelope().unwrap();
            assert_eq!(envelope.key, expected_key);

            let outcome = request
                .complete_with_message(GetSecretResponse::default())
                .await
                .unwrap();
            assert!(outcome.unwrap().is_empty());
        }
    }
}
