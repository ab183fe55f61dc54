use kube::core::admission::{ConvertAdmissionReviewError, SerializePatchError};

#[derive(Debug, thiserror::Error)]
pub(crate) enum WebhookError {
    #[error("admission review carries no request")]
    MissingRequest(#[from] ConvertAdmissionReviewError),

    #[error("expected {expected} object, got {actual}")]
    KindMismatch { expected: String, actual: String },

    #[error("failed to decode {kind} object: {source}")]
    Decode {
        kind: &'static str,
        source: serde_json::Error,
    },

    #[error("failed to encode admission object: {0}")]
    Encode(#[source] serde_json::Error),

    #[error(transparent)]
    Patch(#[from] SerializePatchError),
}
