//! Wire protocol for the `secretsd.v1.Secrets` service.
//!
//! Message and client definitions are vendored rather than compiled from
//! `.proto` sources at build time, so the crate builds without a system
//! `protoc`. The definitions must stay byte-compatible with the daemon's
//! published schema; field tags are part of the wire contract.

/// Request for a single secret from a named store.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetSecretRequest {
    /// Name of the secret store to query.
    #[prost(string, tag = "1")]
    pub store_name: ::prost::alloc::string::String,
    /// Key identifying the secret. Opaque to the daemon; may contain
    /// path-like separators.
    #[prost(string, tag = "2")]
    pub key: ::prost::alloc::string::String,
    /// Store-specific request metadata, passed through uninterpreted.
    #[prost(map = "string, string", tag = "3")]
    pub metadata:
        ::std::collections::HashMap<::prost::alloc::string::String, ::prost::alloc::string::String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetSecretResponse {
    /// Named fields of the requested secret.
    #[prost(map = "string, string", tag = "1")]
    pub data:
        ::std::collections::HashMap<::prost::alloc::string::String, ::prost::alloc::string::String>,
}

/// Request for every secret a store will disclose.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetBulkSecretRequest {
    #[prost(string, tag = "1")]
    pub store_name: ::prost::alloc::string::String,
    #[prost(map = "string, string", tag = "2")]
    pub metadata:
        ::std::collections::HashMap<::prost::alloc::string::String, ::prost::alloc::string::String>,
}

/// One secret's fields inside a bulk response.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SecretResponse {
    #[prost(map = "string, string", tag = "1")]
    pub secrets:
        ::std::collections::HashMap<::prost::alloc::string::String, ::prost::alloc::string::String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetBulkSecretResponse {
    /// Secret name to secret contents.
    #[prost(map = "string, message", tag = "1")]
    pub data: ::std::collections::HashMap<::prost::alloc::string::String, SecretResponse>,
}

/// Generated client implementations.
pub mod secrets_client {
    #![allow(unused_variables, dead_code, missing_docs, clippy::wildcard_imports)]
    use tonic::codegen::*;

    /// Unary client for the `secretsd.v1.Secrets` service.
    #[derive(Debug, Clone)]
    pub struct SecretsClient<T> {
        inner: tonic::client::Grpc<T>,
    }

    impl SecretsClient<tonic::transport::Channel> {
        /// Attempt to create a new client by connecting to a given endpoint.
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }

    impl<T> SecretsClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::Error: Into<StdError>,
        T::ResponseBody: Body<Data = Bytes> + std::marker::Send + 'static,
        <T::ResponseBody as Body>::Error: Into<StdError> + std::marker::Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }

        pub fn with_interceptor<F>(
            inner: T,
            interceptor: F,
        ) -> SecretsClient<InterceptedService<T, F>>
        where
            F: tonic::service::Interceptor,
            T::ResponseBody: Default,
            T: tonic::codegen::Service<
                http::Request<tonic::body::BoxBody>,
                Response = http::Response<
                    <T as tonic::client::GrpcService<tonic::body::BoxBody>>::ResponseBody,
                >,
            >,
            <T as tonic::codegen::Service<http::Request<tonic::body::BoxBody>>>::Error:
                Into<StdError> + std::marker::Send + std::marker::Sync,
        {
            SecretsClient::new(InterceptedService::new(inner, interceptor))
        }

        pub async fn get_secret(
            &mut self,
            request: impl tonic::IntoRequest<super::GetSecretRequest>,
        ) -> std::result::Result<tonic::Response<super::GetSecretResponse>, tonic::Status>
        {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/secretsd.v1.Secrets/GetSecret");
            let mut req = request.into_request();
            req.extensions_mut()
                .insert(GrpcMethod::new("secretsd.v1.Secrets", "GetSecret"));
            self.inner.unary(req, path, codec).await
        }

        pub async fn get_bulk_secret(
            &mut self,
            request: impl tonic::IntoRequest<super::GetBulkSecretRequest>,
        ) -> std::result::Result<tonic::Response<super::GetBulkSecretResponse>, tonic::Status>
        {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/secretsd.v1.Secrets/GetBulkSecret");
            let mut req = request.into_request();
            req.extensions_mut()
                .insert(GrpcMethod::new("secretsd.v1.Secrets", "GetBulkSecret"));
            self.inner.unary(req, path, codec).await
        }
    }
}
