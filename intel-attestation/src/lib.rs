//! Intel TDX quote attestation
//!
//! This crate verifies Intel TDX attestation quotes through Intel's DCAP
//! collateral services and extracts measurement claims from the verified
//! report, across the supported TD report versions.

pub mod claims;
pub mod collateral;
pub mod constants;
pub mod errors;
pub mod report_data;
#[cfg(test)]
mod tests;
pub mod types;
pub mod verify;

pub use claims::{best_effort_claims, extract_claims};
pub use collateral::{CollateralVerifier, DcapCollateralVerifier};
pub use dcap_qvl::quote::{Report, TDReport10, TDReport15};
pub use errors::{QuoteVerifyError, Result};
pub use report_data::{verify_report_data_binding, ReportDataBinding};
pub use types::{ClaimsMap, TdxAttestation, VerifiedQuote};
pub use verify::verify_tdx_quote;
