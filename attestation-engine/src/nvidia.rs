use nvidia_attestation::{
    verify_gpu_evidence, AttestGpuOptions, AttestationService, NrasClient,
};
use serde_json::Value;
use tracing::{instrument, warn};

use crate::types::{HardwareDomain, VerificationVerdict};

/// Verifies NVIDIA GPU evidence payloads into domain verdicts.
///
/// Transport, response-shape, and token failures all become failed
/// verdicts with empty claims; a rejected attestation (overall result not
/// `true`) keeps the decoded claims and raw response for inspection. This
/// type never returns an error to its caller.
#[derive(Debug, Clone)]
pub struct NvidiaVerifier<S = NrasClient> {
    service: S,
}

impl NvidiaVerifier {
    /// Creates a verifier backed by the NRAS endpoint in `options`.
    pub fn new(options: AttestGpuOptions) -> Self {
        Self {
            service: NrasClient::new(options),
        }
    }
}

impl<S: AttestationService> NvidiaVerifier<S> {
    /// Creates a verifier over an injected attestation service.
    pub fn with_service(service: S) -> Self {
        Self { service }
    }

    /// Verifies a GPU evidence submission payload.
    #[instrument(level = "info", name = "verify_nvidia_evidence", skip_all)]
    pub async fn verify(&self, payload: &Value) -> VerificationVerdict {
        match verify_gpu_evidence(&self.service, payload).await {
            Ok(outcome) => {
                let verdict = if outcome.attestation_passed {
                    VerificationVerdict::valid(HardwareDomain::NvidiaCc, outcome.claims)
                } else {
                    VerificationVerdict::invalid(
                        HardwareDomain::NvidiaCc,
                        "Nvidia attestation result is false",
                    )
                    .with_claims(outcome.claims)
                };
                verdict.with_raw(outcome.raw)
            }
            Err(err) => {
                warn!("GPU attestation failed: {err}");
                VerificationVerdict::invalid(HardwareDomain::NvidiaCc, err.to_string())
            }
        }
    }
}
