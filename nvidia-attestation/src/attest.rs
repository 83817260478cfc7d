use std::future::Future;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use tracing::{error, info, instrument, Instrument};

use crate::{
    appraisal::appraise_response,
    constants::{
        DEFAULT_TIMEOUT, HOPPER_ARCH, NRAS_GPU_ATTESTATION_URL,
        NVIDIA_OCSP_ALLOW_CERT_HOLD_HEADER,
    },
    errors::{GpuAttestError, Result},
    types::{AttestGpuOptions, DeviceEvidence, GpuAttestation, GpuEvidencePayload},
    utils::get_allow_hold_cert,
};

/// Submits an evidence payload to a GPU attestation service.
///
/// The production implementation is [`NrasClient`]; tests substitute a
/// double returning a canned token array.
pub trait AttestationService {
    /// Sends `payload` and returns the service's JSON response.
    fn attest(&self, payload: &Value) -> impl Future<Output = Result<Value>> + Send;
}

/// HTTP client for the NVIDIA Remote Attestation Service.
#[derive(Debug, Clone)]
pub struct NrasClient {
    verifier_url: String,
    service_key: Option<String>,
    allow_hold_cert: bool,
    timeout: std::time::Duration,
}

impl NrasClient {
    /// Creates a client from `options`, resolving every unset field to its
    /// documented default.
    pub fn new(options: AttestGpuOptions) -> Self {
        Self {
            verifier_url: options
                .verifier_url
                .unwrap_or_else(|| NRAS_GPU_ATTESTATION_URL.to_string()),
            service_key: options.service_key,
            allow_hold_cert: options.allow_hold_cert.unwrap_or_else(get_allow_hold_cert),
            timeout: options.timeout.unwrap_or(DEFAULT_TIMEOUT),
        }
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if self.allow_hold_cert {
            headers.insert(
                NVIDIA_OCSP_ALLOW_CERT_HOLD_HEADER,
                HeaderValue::from_static("true"),
            );
        }
        if let Some(ref service_key) = self.service_key {
            headers.insert(AUTHORIZATION, HeaderValue::from_str(service_key)?);
        }
        Ok(headers)
    }
}

impl AttestationService for NrasClient {
    async fn attest(&self, payload: &Value) -> Result<Value> {
        let headers = self.headers()?;
        let client = reqwest::Client::builder().timeout(self.timeout).build()?;
        let request_span = tracing::info_span!("nras_request", url = %self.verifier_url);
        let response = client
            .post(&self.verifier_url)
            .headers(headers)
            .json(payload)
            .send()
            .instrument(request_span)
            .await
            .map_err(|e| {
                error!("Failed to send attestation request: {e}");
                GpuAttestError::Transport(e)
            })?;
        if !response.status().is_success() {
            let status = response.status();
            error!("Attestation request failed with status code {status}");
            let body = response.text().await.unwrap_or_default();
            return Err(GpuAttestError::ServiceStatus { status, body });
        }
        response.json::<Value>().await.map_err(GpuAttestError::Transport)
    }
}

/// Verifies an already-built evidence payload against a GPU attestation
/// service and appraises the returned token chain.
///
/// # Errors
///
/// Returns `GpuAttestError` if the HTTP request fails, the server returns
/// a non-success status code, or the response does not have the expected
/// token-array shape. A failed attestation result is returned as an
/// outcome, not an error.
#[instrument(level = "info", name = "verify_gpu_evidence", skip_all)]
pub async fn verify_gpu_evidence<S: AttestationService>(
    service: &S,
    payload: &Value,
) -> Result<GpuAttestation> {
    let response = service.attest(payload).await?;
    let attestation = appraise_response(&response)?;
    info!(
        attestation_passed = attestation.attestation_passed,
        claims = attestation.claims.len(),
        "GPU attestation appraised"
    );
    Ok(attestation)
}

/// Performs remote attestation of GPU devices by sending evidence to a
/// verification service.
///
/// Builds the evidence submission from `gpu_evidences` and `nonce` and
/// appraises the result. The verifier URL, authorization key, architecture
/// tag, and timeout come from `options`, falling back to the defaults in
/// [`crate::constants`].
///
/// # Errors
///
/// Returns `GpuAttestError` if the payload cannot be serialized, the HTTP
/// request fails, or the response cannot be appraised.
#[instrument(
    level = "info",
    name = "verify_gpu_attestation",
    skip(gpu_evidences, nonce, options),
    fields(nonce = %nonce)
)]
pub async fn verify_gpu_attestation(
    gpu_evidences: &[DeviceEvidence],
    nonce: &str,
    options: AttestGpuOptions,
) -> Result<GpuAttestation> {
    let arch = options
        .arch
        .clone()
        .unwrap_or_else(|| HOPPER_ARCH.to_string());
    let payload = serde_json::to_value(GpuEvidencePayload {
        nonce: nonce.to_string(),
        evidence_list: gpu_evidences.to_vec(),
        arch,
    })?;
    let client = NrasClient::new(options);
    verify_gpu_evidence(&client, &payload).await
}
