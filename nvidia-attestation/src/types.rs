use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Represents attestation evidence for a single GPU device.
///
/// This structure contains the certificate chain and attestation evidence
/// required to verify the authenticity and integrity of the device. The
/// certificate and evidence fields are stored as base64 encoded strings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeviceEvidence {
    /// The certificate chain for the device, in base64 encoded format
    pub certificate: String,

    /// The remote attestation evidence for the device, in base64 encoded
    /// format
    pub evidence: String,

    /// The architecture the evidence was collected on, e.g. `HOPPER`
    pub arch: String,
}

/// The evidence submission sent to the GPU attestation service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GpuEvidencePayload {
    /// Hex-encoded 32-byte nonce binding the evidence to this request
    pub nonce: String,

    /// Evidence for each GPU taking part in the attestation
    pub evidence_list: Vec<DeviceEvidence>,

    /// The platform architecture the submission is appraised against
    pub arch: String,
}

/// The appraised outcome of a GPU attestation round.
///
/// `claims` stays populated even when the attestation did not pass, so
/// callers can inspect what the service asserted.
#[derive(Debug, Clone)]
pub struct GpuAttestation {
    /// Whether the platform token's overall attestation result was `true`
    pub attestation_passed: bool,

    /// Platform claims with the first device's claims merged on top
    pub claims: Map<String, Value>,

    /// The complete token array returned by the attestation service
    pub raw: Value,
}

/// Options for remote attestation
#[derive(Debug, Default, Clone)]
pub struct AttestGpuOptions {
    /// Optional URL of the verification service. If `None`, uses the default URL
    pub verifier_url: Option<String>,
    /// Optional service key for authorization
    pub service_key: Option<String>,
    /// Optional flag to allow certificate hold status. If `None`, uses the system default
    pub allow_hold_cert: Option<bool>,
    /// Optional architecture tag for built submissions. If `None`, uses the default
    pub arch: Option<String>,
    /// Optional request timeout
    pub timeout: Option<Duration>,
}
