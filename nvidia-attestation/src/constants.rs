use std::time::Duration;

/// Default URL for the NRAS GPU attestation endpoint.
///
/// This URL is used as the default endpoint for remote attestation of GPU
/// devices when no verifier URL is configured.
pub const NRAS_GPU_ATTESTATION_URL: &str = "https://nras.attestation.nvidia.com/v3/attest/gpu";

/// Claim carrying the platform-level overall attestation result.
///
/// The attestation is considered passed only when this claim is the
/// boolean `true` in the decoded platform token.
pub const OVERALL_ATTESTATION_RESULT_CLAIM: &str = "x-nvidia-overall-att-result";

/// Tag marking a signed-token entry in the attestation response.
///
/// The response's platform entry is the pair `[PLATFORM_TOKEN_TAG, token]`.
pub const PLATFORM_TOKEN_TAG: &str = "JWT";

/// Environment variable key for certificate hold status.
/// This key is used to check if certificates should be allowed to be held.
pub const NV_ALLOW_HOLD_CERT_KEY: &str = "NV_ALLOW_HOLD_CERT";

/// Header key for allowing certificate holds in NVIDIA OCSP requests.
///
/// This header is used to indicate that the OCSP responder should allow
/// certificate holds when checking the status of a certificate.
pub const NVIDIA_OCSP_ALLOW_CERT_HOLD_HEADER: &str = "X-NVIDIA-OCSP-ALLOW-CERT-HOLD";

/// Default architecture tag for attestation submissions.
pub const HOPPER_ARCH: &str = "HOPPER";

/// Default timeout for remote attestation requests.
///
/// This timeout is used as the default duration for requests to the remote
/// attestation service.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
