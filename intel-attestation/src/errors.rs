use thiserror::Error;

pub type Result<T> = std::result::Result<T, QuoteVerifyError>;

#[derive(Debug, Error)]
pub enum QuoteVerifyError {
    #[error("Failed to decode quote hex: {0}")]
    HexDecode(#[from] hex::FromHexError),
    #[error("Quote verification failed: {0}")]
    Collateral(anyhow::Error),
    #[error("Quote verification failed with status: {0}")]
    UnacceptableStatus(String),
    #[error("Unsupported quote report variant: {0}")]
    UnsupportedReport(&'static str),
    #[error("Verified quote report yielded no measurement claims")]
    EmptyClaims,
    #[error("Invalid report_data length: {0}")]
    ReportDataLength(usize),
}
