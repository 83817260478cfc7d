use intel_attestation::{CollateralVerifier, DcapCollateralVerifier};
use nvidia_attestation::{AttestGpuOptions, AttestationService, NrasClient};
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::{
    errors::VerificationError,
    intel::IntelVerifier,
    nvidia::NvidiaVerifier,
    types::{AttestationReport, CompositeResult, HardwareDomain, VerificationVerdict},
};

/// Endpoint configuration for the two hardware-domain verifiers.
#[derive(Debug, Default, Clone)]
pub struct VerificationConfig {
    /// PCCS endpoint for Intel collateral; `None` uses the default
    pub pccs_url: Option<String>,
    /// Options for the NVIDIA attestation service client
    pub nras: AttestGpuOptions,
}

/// Orchestrates per-domain verification of a composite attestation report.
///
/// CPU evidence is mandatory: without it the composite result carries a
/// failed Intel verdict and nothing else. GPU evidence is optional and its
/// absence is not a failure. The two domains are verified concurrently and
/// independently; neither can disturb the other's verdict.
#[derive(Debug, Clone)]
pub struct VerificationManager<V = DcapCollateralVerifier, S = NrasClient> {
    intel: IntelVerifier<V>,
    nvidia: NvidiaVerifier<S>,
}

impl VerificationManager {
    /// Creates a manager wired to the production verification services.
    pub fn new(config: VerificationConfig) -> Self {
        Self {
            intel: IntelVerifier::new(config.pccs_url),
            nvidia: NvidiaVerifier::new(config.nras),
        }
    }
}

impl<V: CollateralVerifier, S: AttestationService> VerificationManager<V, S> {
    /// Creates a manager over injected domain verifiers.
    pub fn with_verifiers(intel: IntelVerifier<V>, nvidia: NvidiaVerifier<S>) -> Self {
        Self { intel, nvidia }
    }

    /// Verifies one attestation report into a composite result.
    ///
    /// Never fails: every failure mode is reported inside the returned
    /// verdicts. Dropping the returned future abandons both in-flight
    /// domain verifications.
    #[instrument(level = "info", name = "verify_report", skip_all)]
    pub async fn verify_report(&self, report: &AttestationReport) -> CompositeResult {
        if report.intel_quote.trim().is_empty() {
            warn!("Report carries no CPU evidence, refusing verification");
            return CompositeResult {
                intel: VerificationVerdict::invalid(
                    HardwareDomain::Unknown,
                    VerificationError::MissingCpuEvidence.to_string(),
                ),
                nvidia: None,
            };
        }

        let intel_verdict = self.intel.verify_hex(&report.intel_quote);
        let nvidia_verdict = self.verify_gpu(report.nvidia_payload.as_ref());
        let (intel, nvidia) = tokio::join!(intel_verdict, nvidia_verdict);
        info!(
            intel_valid = intel.is_valid,
            nvidia_valid = nvidia.as_ref().map(|verdict| verdict.is_valid),
            "Report verification completed"
        );
        CompositeResult { intel, nvidia }
    }

    async fn verify_gpu(&self, payload: Option<&Value>) -> Option<VerificationVerdict> {
        let payload = payload?;
        match normalize_gpu_payload(payload) {
            Ok(payload) => Some(self.nvidia.verify(&payload).await),
            Err(err) => {
                warn!("GPU payload rejected before verification: {err}");
                Some(VerificationVerdict::invalid(
                    HardwareDomain::NvidiaCc,
                    err.to_string(),
                ))
            }
        }
    }
}

/// Normalizes GPU evidence into a payload object.
///
/// A JSON-encoded string form is parsed first; anything that is not an
/// object after normalization is rejected without calling the verifier.
fn normalize_gpu_payload(payload: &Value) -> Result<Value, VerificationError> {
    match payload {
        Value::Object(_) => Ok(payload.clone()),
        Value::String(encoded) => match serde_json::from_str::<Value>(encoded)? {
            parsed @ Value::Object(_) => Ok(parsed),
            _ => Err(VerificationError::GpuPayloadNotObject),
        },
        _ => Err(VerificationError::GpuPayloadNotObject),
    }
}
