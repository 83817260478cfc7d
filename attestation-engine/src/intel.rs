use intel_attestation::{
    best_effort_claims, verify_tdx_quote, ClaimsMap, CollateralVerifier, DcapCollateralVerifier,
    QuoteVerifyError,
};
use serde_json::{Map, Value};
use tracing::{instrument, warn};

use crate::types::{HardwareDomain, VerificationVerdict};

/// Verifies Intel TDX quotes into domain verdicts.
///
/// Every failure mode — undecodable input, collateral outage, rejected TCB
/// status, unsupported report variant — is converted into a failed verdict;
/// this type never returns an error to its caller.
#[derive(Debug, Clone)]
pub struct IntelVerifier<V = DcapCollateralVerifier> {
    collateral: V,
}

impl IntelVerifier {
    /// Creates a verifier backed by DCAP collateral services at `pccs_url`
    /// (or the default endpoint when `None`).
    pub fn new(pccs_url: Option<String>) -> Self {
        Self {
            collateral: DcapCollateralVerifier::new(pccs_url),
        }
    }
}

impl<V: CollateralVerifier> IntelVerifier<V> {
    /// Creates a verifier over an injected collateral verifier.
    pub fn with_collateral_verifier(collateral: V) -> Self {
        Self { collateral }
    }

    /// Verifies a hex-encoded quote.
    #[instrument(level = "info", name = "verify_intel_quote", skip_all)]
    pub async fn verify_hex(&self, quote_hex: &str) -> VerificationVerdict {
        match hex::decode(quote_hex.trim()) {
            Ok(raw_quote) => self.verify_bytes(&raw_quote).await,
            Err(err) => {
                warn!("CPU quote is not valid hex: {err}");
                VerificationVerdict::invalid(
                    HardwareDomain::IntelTdx,
                    QuoteVerifyError::HexDecode(err).to_string(),
                )
            }
        }
    }

    /// Verifies a raw quote byte string.
    pub async fn verify_bytes(&self, raw_quote: &[u8]) -> VerificationVerdict {
        match verify_tdx_quote(&self.collateral, raw_quote).await {
            Ok(attestation) => {
                VerificationVerdict::valid(HardwareDomain::IntelTdx, hex_claims(attestation.claims))
                    .with_raw(attestation.raw)
            }
            Err(err) => {
                warn!("TDX quote verification failed: {err}");
                // On a collateral outage the quote itself is still at hand;
                // surface its registers next to the failure.
                let claims = match &err {
                    QuoteVerifyError::Collateral(_) => hex_claims(best_effort_claims(raw_quote)),
                    _ => Map::new(),
                };
                VerificationVerdict::invalid(HardwareDomain::IntelTdx, err.to_string())
                    .with_claims(claims)
            }
        }
    }
}

fn hex_claims(claims: ClaimsMap) -> Map<String, Value> {
    claims
        .into_iter()
        .map(|(name, value)| (name, Value::String(value)))
        .collect()
}
