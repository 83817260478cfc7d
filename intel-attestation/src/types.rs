use std::collections::BTreeMap;

use dcap_qvl::quote::Report;
use serde::Serialize;
use serde_json::Value;

/// Measurement claims extracted from a TD report.
///
/// Keys are register names, values are lower-case hex with no prefix.
pub type ClaimsMap = BTreeMap<String, String>;

/// The outcome of the external collateral verification of a quote.
///
/// The cryptographic correctness of this result is delegated to the
/// collateral verifier; this crate only interprets its status and report.
#[derive(Debug, Clone, Serialize)]
pub struct VerifiedQuote {
    /// TCB status reported by the collateral check, e.g. `UpToDate`
    pub status: String,

    /// Intel security advisories applicable to the platform
    pub advisory_ids: Vec<String>,

    /// The parsed quote report carried by the verified quote
    pub report: Report,
}

/// A fully appraised TDX quote: acceptable status and extracted claims.
#[derive(Debug, Clone)]
pub struct TdxAttestation {
    /// TCB status the quote was accepted under
    pub status: String,

    /// Intel security advisories applicable to the platform
    pub advisory_ids: Vec<String>,

    /// Hex-encoded measurement claims for the report variant
    pub claims: ClaimsMap,

    /// The serialized verified quote, kept for inspection
    pub raw: Value,
}
