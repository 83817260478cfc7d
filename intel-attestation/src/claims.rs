use dcap_qvl::quote::{Quote, Report, TDReport10, TDReport15};
use tracing::debug;

use crate::{
    errors::{QuoteVerifyError, Result},
    types::ClaimsMap,
};

/// Extracts the measurement claims for a quote report.
///
/// The report variants form a closed set; anything other than a TD report
/// is rejected rather than guessed at.
///
/// # Returns
///
/// * TD 1.0 reports yield `mr_seam`, `mr_td`, `rt_mr0`..`rt_mr3`,
///   `tee_tcb_svn` and `report_data`.
/// * TD 1.5 reports yield the same fields plus `tee_tcb_svn2` and
///   `mr_service_td`.
///
/// All values are lower-case hex without separators.
pub fn extract_claims(report: &Report) -> Result<ClaimsMap> {
    match report {
        Report::TD10(report) => Ok(td10_claims(report)),
        Report::TD15(report) => Ok(td15_claims(report)),
        Report::SgxEnclave(_) => Err(QuoteVerifyError::UnsupportedReport("SgxEnclave")),
    }
}

/// Parses measurement claims directly from raw quote bytes.
///
/// Used when the collateral check itself fails: the quote is still on hand,
/// so its registers are surfaced for inspection alongside the failed
/// verdict. Returns an empty map when the quote does not parse.
pub fn best_effort_claims(raw_quote: &[u8]) -> ClaimsMap {
    match Quote::parse(raw_quote) {
        Ok(quote) => extract_claims(&quote.report).unwrap_or_default(),
        Err(err) => {
            debug!("Failed to parse quote for best-effort claims: {err}");
            ClaimsMap::new()
        }
    }
}

fn td10_claims(report: &TDReport10) -> ClaimsMap {
    let mut claims = ClaimsMap::new();
    claims.insert("mr_seam".to_string(), hex::encode(report.mr_seam));
    claims.insert("mr_td".to_string(), hex::encode(report.mr_td));
    claims.insert("rt_mr0".to_string(), hex::encode(report.rt_mr0));
    claims.insert("rt_mr1".to_string(), hex::encode(report.rt_mr1));
    claims.insert("rt_mr2".to_string(), hex::encode(report.rt_mr2));
    claims.insert("rt_mr3".to_string(), hex::encode(report.rt_mr3));
    claims.insert("tee_tcb_svn".to_string(), hex::encode(report.tee_tcb_svn));
    claims.insert("report_data".to_string(), hex::encode(report.report_data));
    claims
}

fn td15_claims(report: &TDReport15) -> ClaimsMap {
    let mut claims = td10_claims(&report.base);
    claims.insert("tee_tcb_svn2".to_string(), hex::encode(report.tee_tcb_svn2));
    claims.insert(
        "mr_service_td".to_string(),
        hex::encode(report.mr_service_td),
    );
    claims
}
