use serde_json::Value;
use tracing::{debug, instrument};

use crate::{
    claims::extract_claims,
    collateral::CollateralVerifier,
    constants::ACCEPTABLE_TCB_STATUSES,
    errors::{QuoteVerifyError, Result},
    types::TdxAttestation,
};

/// Returns whether a collateral TCB status counts as verification success.
pub fn is_acceptable_status(status: &str) -> bool {
    ACCEPTABLE_TCB_STATUSES.contains(&status)
}

/// Verifies a TDX quote and extracts its measurement claims.
///
/// The collateral check is delegated to `verifier`; its result is then
/// appraised locally:
///
/// 1. the TCB status must be in the acceptable set;
/// 2. the report must be a recognized TD report variant;
/// 3. the extracted claims must be non-empty.
///
/// A quote that clears the collateral check but fails any of these is
/// still a verification failure.
///
/// # Errors
///
/// Returns `QuoteVerifyError` if the collateral call fails, the status is
/// rejected, the report variant is unsupported, or no claims come out.
#[instrument(level = "info", name = "verify_tdx_quote", skip_all)]
pub async fn verify_tdx_quote<V: CollateralVerifier>(
    verifier: &V,
    raw_quote: &[u8],
) -> Result<TdxAttestation> {
    let verified = verifier.verify_quote(raw_quote).await?;
    debug!(
        status = %verified.status,
        advisories = verified.advisory_ids.len(),
        "Collateral verification completed"
    );
    if !is_acceptable_status(&verified.status) {
        return Err(QuoteVerifyError::UnacceptableStatus(verified.status));
    }
    let claims = extract_claims(&verified.report)?;
    if claims.is_empty() {
        return Err(QuoteVerifyError::EmptyClaims);
    }
    let raw = serde_json::to_value(&verified).unwrap_or(Value::Null);
    Ok(TdxAttestation {
        status: verified.status,
        advisory_ids: verified.advisory_ids,
        claims,
        raw,
    })
}
