use thiserror::Error;

/// Manager-level failure conditions.
///
/// These never escape the engine as errors; each is converted into a
/// failed [`crate::types::VerificationVerdict`] at the boundary where it
/// arises.
#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("CPU evidence is mandatory for verification")]
    MissingCpuEvidence,
    #[error("Failed to parse GPU payload as JSON: {0}")]
    GpuPayloadParse(#[from] serde_json::Error),
    #[error("GPU payload must be a JSON object")]
    GpuPayloadNotObject,
}
