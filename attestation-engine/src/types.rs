use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The hardware domain a verdict belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HardwareDomain {
    IntelTdx,
    NvidiaCc,
    /// Used when evidence is missing and no domain could be appraised
    Unknown,
}

/// One hardware attestation bundle, as recovered from a provider.
///
/// `intel_quote` is mandatory for composite verification; `nvidia_payload`
/// may be an already-parsed object or a JSON-encoded string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttestationReport {
    #[serde(default)]
    pub intel_quote: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nvidia_payload: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
}

/// The verdict for one hardware domain.
///
/// Verdicts are produced per domain and never merged across domains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationVerdict {
    #[serde(rename = "isValid")]
    pub is_valid: bool,

    /// Unix-epoch milliseconds at which the verdict was produced
    pub timestamp: u64,

    #[serde(rename = "hardwareType")]
    pub hardware_domain: HardwareDomain,

    /// Claims asserted by the verified evidence
    pub claims: Map<String, Value>,

    /// Raw verifier output, kept for inspection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl VerificationVerdict {
    /// A passing verdict carrying `claims`.
    pub fn valid(hardware_domain: HardwareDomain, claims: Map<String, Value>) -> Self {
        Self {
            is_valid: true,
            timestamp: now_millis(),
            hardware_domain,
            claims,
            raw: None,
            error: None,
        }
    }

    /// A failing verdict with empty claims and a descriptive error.
    pub fn invalid(hardware_domain: HardwareDomain, error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            timestamp: now_millis(),
            hardware_domain,
            claims: Map::new(),
            raw: None,
            error: Some(error.into()),
        }
    }

    /// Replaces the verdict's claims.
    pub fn with_claims(mut self, claims: Map<String, Value>) -> Self {
        self.claims = claims;
        self
    }

    /// Attaches raw verifier output.
    pub fn with_raw(mut self, raw: Value) -> Self {
        self.raw = Some(raw);
        self
    }
}

/// The composite, per-domain-independent result for one report.
///
/// `intel` is always present, even on total failure; `nvidia` is present
/// iff GPU evidence was supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeResult {
    pub intel: VerificationVerdict,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nvidia: Option<VerificationVerdict>,
}

pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}
