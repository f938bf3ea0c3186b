// src/infra/errors.rs — Error types for Draftmill

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DraftmillError {
    // Transport errors (the completion channel itself)
    #[error("Provider '{provider}' error: {message}")]
    Provider {
        provider: String,
        message: String,
        retriable: bool,
    },

    #[error("Rate limited by '{provider}', retry after {retry_after_ms}ms")]
    RateLimited {
        provider: String,
        retry_after_ms: u64,
    },

    #[error("Model response from '{provider}' contained no text content")]
    EmptyResponse { provider: String },

    // Extraction errors (structured output)
    #[error("No JSON payload found in model output")]
    NoJsonPayload,

    #[error("Malformed JSON payload: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("Structured payload had unexpected shape: expected {expected}")]
    PayloadShape { expected: String },

    // Caller errors
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter { name: &'static str, message: String },

    #[error("Unsupported media file '{path}' (expected .jpg/.jpeg/.png or .mp4)")]
    UnsupportedMedia { path: String },

    #[error("Worker pool has been shut down")]
    PoolClosed,

    // Infra
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DraftmillError {
    /// Whether the failure is transient at the transport level.
    /// This core does not retry automatically; callers may.
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            DraftmillError::Provider {
                retriable: true,
                ..
            } | DraftmillError::RateLimited { .. }
        )
    }

    /// Whether the error came from structured-output extraction rather
    /// than the transport. The evaluator scoring path downgrades these
    /// to a zero-score sentinel instead of aborting the round.
    pub fn is_extraction(&self) -> bool {
        matches!(
            self,
            DraftmillError::NoJsonPayload
                | DraftmillError::MalformedJson(_)
                | DraftmillError::PayloadShape { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_is_retriable() {
        let err = DraftmillError::RateLimited {
            provider: "bedrock".into(),
            retry_after_ms: 5000,
        };
        assert!(err.is_retriable());
    }

    #[test]
    fn test_non_retriable_provider() {
        let err = DraftmillError::Provider {
            provider: "bedrock".into(),
            message: "HTTP 400".into(),
            retriable: false,
        };
        assert!(!err.is_retriable());
    }

    #[test]
    fn test_extraction_classification() {
        assert!(DraftmillError::NoJsonPayload.is_extraction());
        assert!(DraftmillError::PayloadShape {
            expected: "array of strings".into()
        }
        .is_extraction());
        assert!(!DraftmillError::PoolClosed.is_extraction());
        assert!(!DraftmillError::EmptyResponse {
            provider: "bedrock".into()
        }
        .is_extraction());
    }
}
