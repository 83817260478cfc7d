use serde_json::Value;
use tracing::debug;

use crate::{
    constants::{OVERALL_ATTESTATION_RESULT_CLAIM, PLATFORM_TOKEN_TAG},
    errors::{GpuAttestError, Result},
    token::decode_token_claims,
    types::GpuAttestation,
};

/// Appraises the token array returned by the GPU attestation service.
///
/// The response must be a non-empty array whose first element is the
/// platform entry `["JWT", <token>]`. The platform token's claims decide
/// the outcome: attestation passes only when the overall-attestation-result
/// claim is the boolean `true`. If a second element holds per-device
/// tokens, the first device's claims are merged on top of the platform
/// claims; on key collisions the device claim wins.
///
/// # Errors
///
/// Returns `GpuAttestError` if the response is not a non-empty array or
/// the platform entry does not have the expected shape. A failed
/// attestation result is NOT an error: the outcome is returned with
/// `attestation_passed` false and the decoded claims intact.
pub fn appraise_response(tokens: &Value) -> Result<GpuAttestation> {
    let entries = tokens.as_array().ok_or_else(|| {
        GpuAttestError::MalformedResponse("expected a JSON array of tokens".to_string())
    })?;
    let platform_entry = entries
        .first()
        .ok_or_else(|| GpuAttestError::MalformedResponse("empty token array".to_string()))?;

    let platform_token = platform_token_str(platform_entry)?;
    let mut claims = decode_token_claims(platform_token);
    let attestation_passed = matches!(
        claims.get(OVERALL_ATTESTATION_RESULT_CLAIM),
        Some(Value::Bool(true))
    );

    if let Some(device_tokens) = entries.get(1).and_then(Value::as_object) {
        if let Some((device_id, device_token)) = device_tokens.iter().next() {
            if let Some(device_token) = device_token.as_str() {
                let device_claims = decode_token_claims(device_token);
                debug!(
                    device = %device_id,
                    device_claims = device_claims.len(),
                    "Merging device claims over platform claims"
                );
                claims.extend(device_claims);
            }
        }
    }

    Ok(GpuAttestation {
        attestation_passed,
        claims,
        raw: tokens.clone(),
    })
}

/// Extracts the platform token string from the response's first entry.
fn platform_token_str(entry: &Value) -> Result<&str> {
    let pair = entry.as_array().ok_or(GpuAttestError::InvalidPlatformToken)?;
    if pair.first().and_then(Value::as_str) != Some(PLATFORM_TOKEN_TAG) {
        return Err(GpuAttestError::InvalidPlatformToken);
    }
    pair.get(1)
        .and_then(Value::as_str)
        .ok_or(GpuAttestError::InvalidPlatformToken)
}
