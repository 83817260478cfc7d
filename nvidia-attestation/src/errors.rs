use thiserror::Error;

pub type Result<T> = std::result::Result<T, GpuAttestError>;

#[derive(Debug, Error)]
pub enum GpuAttestError {
    #[error("Failed to send attestation request: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Attestation service responded with status {status}: {body}")]
    ServiceStatus {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("Invalid attestation response: {0}")]
    MalformedResponse(String),
    #[error("Invalid platform token format")]
    InvalidPlatformToken,
    #[error("Failed to serialize evidence payload")]
    Json(#[from] serde_json::Error),
    #[error("Failed to parse service key")]
    ServiceKeyParse(#[from] reqwest::header::InvalidHeaderValue),
}
