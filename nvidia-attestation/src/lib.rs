//! Remote attestation for NVIDIA GPUs
//!
//! This crate submits GPU attestation evidence to a remote verification
//! service (NRAS) and appraises the returned chain of signed tokens into a
//! pass/fail outcome with a merged claim set.

pub mod appraisal;
pub mod attest;
pub mod constants;
pub mod errors;
#[cfg(test)]
mod tests;
pub mod token;
pub mod types;
pub mod utils;

pub use appraisal::appraise_response;
pub use attest::{verify_gpu_attestation, verify_gpu_evidence, AttestationService, NrasClient};
pub use errors::{GpuAttestError, Result};
pub use token::decode_token_claims;
pub use types::{AttestGpuOptions, DeviceEvidence, GpuAttestation, GpuEvidencePayload};
