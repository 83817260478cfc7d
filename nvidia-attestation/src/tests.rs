use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde_json::{json, Value};

use crate::{
    appraisal::appraise_response,
    attest::{verify_gpu_evidence, AttestationService},
    errors::{GpuAttestError, Result},
    token::decode_token_claims,
    types::{DeviceEvidence, GpuEvidencePayload},
};

/// Builds an unsigned token whose payload is `claims`.
fn make_token(claims: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"ES384","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.signature")
}

/// Attestation service double returning a canned response.
struct StaticService {
    response: Value,
}

impl AttestationService for StaticService {
    async fn attest(&self, _payload: &Value) -> Result<Value> {
        Ok(self.response.clone())
    }
}

#[test]
fn decode_token_claims_reads_the_payload_segment() {
    let token = make_token(&json!({"x-nvidia-overall-att-result": true, "eat_nonce": "abc"}));
    let claims = decode_token_claims(&token);
    assert_eq!(claims["x-nvidia-overall-att-result"], Value::Bool(true));
    assert_eq!(claims["eat_nonce"], "abc");
}

#[test]
fn decode_token_claims_swallows_malformed_tokens() {
    assert!(decode_token_claims("no separators at all").is_empty());
    assert!(decode_token_claims("one.two").is_empty());
    assert!(decode_token_claims("a.b.c.d").is_empty());
    assert!(decode_token_claims("header..signature").is_empty());
    assert!(decode_token_claims("header.!!!not-base64!!!.signature").is_empty());

    // Valid base64 but not JSON, and valid JSON but not an object.
    let not_json = URL_SAFE_NO_PAD.encode(b"garbage");
    assert!(decode_token_claims(&format!("h.{not_json}.s")).is_empty());
    let not_object = URL_SAFE_NO_PAD.encode(b"[1,2,3]");
    assert!(decode_token_claims(&format!("h.{not_object}.s")).is_empty());
}

#[test]
fn appraisal_passes_on_true_overall_result() {
    let platform = make_token(&json!({"x-nvidia-overall-att-result": true}));
    let device = make_token(&json!({"x-nvidia-gpu-arch": "HOPPER"}));
    let response = json!([["JWT", platform], {"GPU-0": device}]);

    let outcome = appraise_response(&response).expect("well-formed response");
    assert!(outcome.attestation_passed);
    assert_eq!(outcome.claims["x-nvidia-overall-att-result"], true);
    assert_eq!(outcome.claims["x-nvidia-gpu-arch"], "HOPPER");
    assert_eq!(outcome.raw, response);
}

#[test]
fn appraisal_fails_on_false_or_missing_overall_result() {
    let failed = make_token(&json!({"x-nvidia-overall-att-result": false, "reason": "mismatch"}));
    let outcome = appraise_response(&json!([["JWT", failed]])).expect("well-formed response");
    assert!(!outcome.attestation_passed);
    // Claims stay available for inspection.
    assert_eq!(outcome.claims["reason"], "mismatch");

    let silent = make_token(&json!({"some-other-claim": 1}));
    let outcome = appraise_response(&json!([["JWT", silent]])).expect("well-formed response");
    assert!(!outcome.attestation_passed);

    // A non-boolean result does not count as passed either.
    let stringy = make_token(&json!({"x-nvidia-overall-att-result": "true"}));
    let outcome = appraise_response(&json!([["JWT", stringy]])).expect("well-formed response");
    assert!(!outcome.attestation_passed);
}

#[test]
fn appraisal_merges_device_claims_over_platform_claims() {
    let platform = make_token(&json!({
        "x-nvidia-overall-att-result": true,
        "x-nvidia-version": "platform",
    }));
    let device = make_token(&json!({"x-nvidia-version": "device"}));
    let response = json!([["JWT", platform], {"GPU-0": device}]);

    let outcome = appraise_response(&response).expect("well-formed response");
    // Device claims are applied on top; the device value wins collisions.
    assert_eq!(outcome.claims["x-nvidia-version"], "device");
    assert!(outcome.attestation_passed);
}

#[test]
fn appraisal_rejects_malformed_responses() {
    assert!(matches!(
        appraise_response(&json!({"not": "an array"})),
        Err(GpuAttestError::MalformedResponse(_))
    ));
    assert!(matches!(
        appraise_response(&json!([])),
        Err(GpuAttestError::MalformedResponse(_))
    ));
    assert!(matches!(
        appraise_response(&json!(["bare token string"])),
        Err(GpuAttestError::InvalidPlatformToken)
    ));
    assert!(matches!(
        appraise_response(&json!([["NOT-JWT", "token"]])),
        Err(GpuAttestError::InvalidPlatformToken)
    ));
    assert!(matches!(
        appraise_response(&json!([["JWT", 42]])),
        Err(GpuAttestError::InvalidPlatformToken)
    ));
}

#[test]
fn evidence_payload_serializes_to_the_submission_shape() {
    let payload = GpuEvidencePayload {
        nonce: "ab".repeat(32),
        evidence_list: vec![DeviceEvidence {
            certificate: "Y2VydA==".to_string(),
            evidence: "ZXZpZGVuY2U=".to_string(),
            arch: "HOPPER".to_string(),
        }],
        arch: "HOPPER".to_string(),
    };
    let value = serde_json::to_value(&payload).expect("payload serializes");
    assert_eq!(value["nonce"], "ab".repeat(32));
    assert_eq!(value["arch"], "HOPPER");
    assert_eq!(value["evidence_list"][0]["certificate"], "Y2VydA==");
    assert_eq!(value["evidence_list"][0]["evidence"], "ZXZpZGVuY2U=");
    assert_eq!(value["evidence_list"][0]["arch"], "HOPPER");
}

#[tokio::test]
async fn verify_gpu_evidence_appraises_the_service_response() {
    let platform = make_token(&json!({"x-nvidia-overall-att-result": true}));
    let service = StaticService {
        response: json!([["JWT", platform]]),
    };
    let outcome = verify_gpu_evidence(&service, &json!({"nonce": "00"}))
        .await
        .expect("stub service must verify");
    assert!(outcome.attestation_passed);
}
