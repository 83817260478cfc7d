use serde::Serialize;

use crate::errors::{QuoteVerifyError, Result};

/// Outcome of checking the report-data binding of a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportDataBinding {
    /// The embedded signing address matched the expected one
    pub address_match: bool,

    /// The embedded nonce matched the expected one
    pub nonce_match: bool,
}

impl ReportDataBinding {
    /// Returns whether both the address and the nonce matched.
    pub fn is_valid(&self) -> bool {
        self.address_match && self.nonce_match
    }
}

/// Checks that a quote's report-data field binds a signing address and a
/// request nonce.
///
/// The 64-byte report data is expected to be laid out as the 20-byte
/// signing address zero-padded to 32 bytes, followed by the 32-byte nonce.
/// The address may carry a `0x` prefix.
///
/// # Errors
///
/// Returns `QuoteVerifyError` if any of the inputs is not valid hex or the
/// report data is not 64 bytes long.
pub fn verify_report_data_binding(
    report_data_hex: &str,
    signing_address: &str,
    nonce_hex: &str,
) -> Result<ReportDataBinding> {
    let report_data = hex::decode(report_data_hex)?;
    if report_data.len() != 64 {
        return Err(QuoteVerifyError::ReportDataLength(report_data.len()));
    }

    let address = signing_address
        .strip_prefix("0x")
        .unwrap_or(signing_address);
    let address = hex::decode(address)?;
    let address_match = address.len() <= 32 && {
        let mut expected = [0u8; 32];
        expected[..address.len()].copy_from_slice(&address);
        report_data[..32] == expected
    };

    let nonce = hex::decode(nonce_hex)?;
    let nonce_match = report_data[32..] == nonce[..];

    Ok(ReportDataBinding {
        address_match,
        nonce_match,
    })
}
