use std::future::Future;

use tracing::instrument;

use crate::{
    constants::PCCS_URL_KEY,
    errors::{QuoteVerifyError, Result},
    types::VerifiedQuote,
};

/// Verifies a raw quote against collateral from Intel's services.
///
/// The production implementation is [`DcapCollateralVerifier`]; tests
/// substitute a double returning a fixed status and report.
pub trait CollateralVerifier {
    /// Verifies `raw_quote` and returns its TCB status and parsed report.
    fn verify_quote(
        &self,
        raw_quote: &[u8],
    ) -> impl Future<Output = Result<VerifiedQuote>> + Send;
}

/// Collateral verifier backed by the `dcap-qvl` crate.
///
/// Fetches collateral from the configured PCCS endpoint and verifies the
/// quote signature chain, TCB level, and revocation status.
#[derive(Debug, Default, Clone)]
pub struct DcapCollateralVerifier {
    pccs_url: Option<String>,
}

impl DcapCollateralVerifier {
    /// Creates a verifier using `pccs_url`, falling back to the `PCCS_URL`
    /// environment variable and then to the library default endpoint.
    pub fn new(pccs_url: Option<String>) -> Self {
        Self { pccs_url }
    }

    fn pccs_url(&self) -> Option<String> {
        self.pccs_url
            .clone()
            .or_else(|| std::env::var(PCCS_URL_KEY).ok())
    }
}

impl CollateralVerifier for DcapCollateralVerifier {
    #[instrument(level = "debug", name = "dcap_verify_quote", skip_all)]
    async fn verify_quote(&self, raw_quote: &[u8]) -> Result<VerifiedQuote> {
        let pccs_url = self.pccs_url();
        let verified =
            dcap_qvl::collateral::get_collateral_and_verify(raw_quote, pccs_url.as_deref())
                .await
                .map_err(QuoteVerifyError::Collateral)?;
        Ok(VerifiedQuote {
            status: verified.status,
            advisory_ids: verified.advisory_ids,
            report: verified.report,
        })
    }
}
