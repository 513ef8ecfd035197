//! The seam between the finder and the external generative-language service.
//!
//! The finder only knows [`GenerativeClient`]; the production implementation
//! is [`crate::gemini::GeminiClient`] and tests substitute stubs.

use crate::prompt::AlternativesRequest;
use async_trait::async_trait;
use std::sync::Arc;

/// Transport or service-side failure of a single generation call.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to decode service envelope: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("service returned no text: {0}")]
    EmptyResponse(String),
}

/// A service that answers a formatted request with raw structured text.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Performs exactly one call. Implementations must not retry.
    async fn generate(&self, request: &AlternativesRequest) -> Result<String, ClientError>;
}

#[async_trait]
impl<C: GenerativeClient + ?Sized> GenerativeClient for Arc<C> {
    async fn generate(&self, request: &AlternativesRequest) -> Result<String, ClientError> {
        (**self).generate(request).await
    }
}

#[async_trait]
impl<C: GenerativeClient + ?Sized> GenerativeClient for Box<C> {
    async fn generate(&self, request: &AlternativesRequest) -> Result<String, ClientError> {
        (**self).generate(request).await
    }
}
