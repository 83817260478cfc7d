use dcap_qvl::quote::{Report, TDReport10, TDReport15};

use crate::{
    claims::{best_effort_claims, extract_claims},
    collateral::CollateralVerifier,
    errors::{QuoteVerifyError, Result},
    report_data::verify_report_data_binding,
    types::VerifiedQuote,
    verify::{is_acceptable_status, verify_tdx_quote},
};

fn sample_td10() -> TDReport10 {
    TDReport10 {
        tee_tcb_svn: [0x01; 16],
        mr_seam: [0x02; 48],
        mr_signer_seam: [0x03; 48],
        seam_attributes: [0x04; 8],
        td_attributes: [0x05; 8],
        xfam: [0x06; 8],
        mr_td: [0x07; 48],
        mr_config_id: [0x08; 48],
        mr_owner: [0x09; 48],
        mr_owner_config: [0x0a; 48],
        rt_mr0: [0x0b; 48],
        rt_mr1: [0x0c; 48],
        rt_mr2: [0x0d; 48],
        rt_mr3: [0x0e; 48],
        report_data: [0x0f; 64],
    }
}

fn sample_td15() -> TDReport15 {
    TDReport15 {
        base: sample_td10(),
        tee_tcb_svn2: [0xaa; 16],
        mr_service_td: [0xbb; 48],
    }
}

/// Collateral double returning a fixed status and report.
struct StaticCollateral {
    status: &'static str,
    report: Report,
}

impl CollateralVerifier for StaticCollateral {
    async fn verify_quote(&self, _raw_quote: &[u8]) -> Result<VerifiedQuote> {
        Ok(VerifiedQuote {
            status: self.status.to_string(),
            advisory_ids: vec!["INTEL-SA-00837".to_string()],
            report: self.report.clone(),
        })
    }
}

/// Collateral double that fails the way a PCCS outage does.
struct FailingCollateral;

impl CollateralVerifier for FailingCollateral {
    async fn verify_quote(&self, _raw_quote: &[u8]) -> Result<VerifiedQuote> {
        Err(QuoteVerifyError::Collateral(anyhow::anyhow!(
            "connection refused"
        )))
    }
}

#[test]
fn td10_claims_are_the_eight_base_fields() {
    let claims = extract_claims(&Report::TD10(sample_td10())).expect("TD10 must extract");
    let keys: Vec<&str> = claims.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        [
            "mr_seam",
            "mr_td",
            "report_data",
            "rt_mr0",
            "rt_mr1",
            "rt_mr2",
            "rt_mr3",
            "tee_tcb_svn",
        ]
    );
    assert_eq!(claims["mr_td"], "07".repeat(48));
    assert_eq!(claims["tee_tcb_svn"], "01".repeat(16));
    for value in claims.values() {
        assert!(value.len() % 2 == 0);
        assert!(value.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}

#[test]
fn td15_claims_add_the_service_td_fields() {
    let claims = extract_claims(&Report::TD15(sample_td15())).expect("TD15 must extract");
    assert_eq!(claims.len(), 10);
    assert_eq!(claims["tee_tcb_svn2"], "aa".repeat(16));
    assert_eq!(claims["mr_service_td"], "bb".repeat(48));
    assert_eq!(claims["mr_td"], "07".repeat(48));
}

#[test]
fn best_effort_claims_swallows_unparseable_quotes() {
    assert!(best_effort_claims(b"definitely not a quote").is_empty());
    assert!(best_effort_claims(&[]).is_empty());
}

#[test]
fn status_whitelist_matches_policy() {
    assert!(is_acceptable_status("UpToDate"));
    assert!(is_acceptable_status("ConfigurationNeeded"));
    assert!(is_acceptable_status("SWHardeningNeeded"));
    assert!(is_acceptable_status("ConfigurationAndSWHardeningNeeded"));
    assert!(!is_acceptable_status("OutOfDate"));
    assert!(!is_acceptable_status("Revoked"));
    assert!(!is_acceptable_status(""));
}

#[tokio::test]
async fn acceptable_status_yields_claims() {
    let verifier = StaticCollateral {
        status: "UpToDate",
        report: Report::TD10(sample_td10()),
    };
    let attestation = verify_tdx_quote(&verifier, &[0u8; 16])
        .await
        .expect("UpToDate must verify");
    assert_eq!(attestation.status, "UpToDate");
    assert_eq!(attestation.claims.len(), 8);
    assert_eq!(attestation.advisory_ids, ["INTEL-SA-00837"]);
}

#[tokio::test]
async fn rejected_status_names_the_status() {
    let verifier = StaticCollateral {
        status: "Revoked",
        report: Report::TD10(sample_td10()),
    };
    let err = verify_tdx_quote(&verifier, &[0u8; 16])
        .await
        .expect_err("Revoked must fail");
    assert!(matches!(err, QuoteVerifyError::UnacceptableStatus(_)));
    assert!(err.to_string().contains("Revoked"));
}

#[tokio::test]
async fn collateral_failure_propagates() {
    let err = verify_tdx_quote(&FailingCollateral, &[0u8; 16])
        .await
        .expect_err("collateral outage must fail");
    assert!(matches!(err, QuoteVerifyError::Collateral(_)));
    assert!(err.to_string().contains("connection refused"));
}

#[test]
fn report_data_binding_accepts_matching_layout() {
    let address = [0x11u8; 20];
    let nonce = [0x22u8; 32];
    let mut report_data = [0u8; 64];
    report_data[..20].copy_from_slice(&address);
    report_data[32..].copy_from_slice(&nonce);

    let binding = verify_report_data_binding(
        &hex::encode(report_data),
        &format!("0x{}", hex::encode(address)),
        &hex::encode(nonce),
    )
    .expect("valid hex inputs");
    assert!(binding.address_match);
    assert!(binding.nonce_match);
    assert!(binding.is_valid());
}

#[test]
fn report_data_binding_rejects_wrong_nonce() {
    let mut report_data = [0u8; 64];
    report_data[..20].copy_from_slice(&[0x11; 20]);
    report_data[32..].copy_from_slice(&[0x22; 32]);

    let binding = verify_report_data_binding(
        &hex::encode(report_data),
        &hex::encode([0x11u8; 20]),
        &hex::encode([0x33u8; 32]),
    )
    .expect("valid hex inputs");
    assert!(binding.address_match);
    assert!(!binding.nonce_match);
    assert!(!binding.is_valid());
}

#[test]
fn report_data_binding_requires_64_bytes() {
    let err = verify_report_data_binding(&"00".repeat(32), "11", &"22".repeat(32))
        .expect_err("short report data must fail");
    assert!(matches!(err, QuoteVerifyError::ReportDataLength(32)));
}
