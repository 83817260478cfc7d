/// TCB statuses accepted as verification success.
///
/// Every status outside this set is treated as a rejected quote, even when
/// the collateral check itself completed without error.
pub const ACCEPTABLE_TCB_STATUSES: &[&str] = &[
    "UpToDate",
    "SWHardeningNeeded",
    "ConfigurationNeeded",
    "ConfigurationAndSWHardeningNeeded",
];

/// Environment variable key for overriding the PCCS endpoint.
///
/// This key is consulted when no PCCS URL is supplied at construction.
pub const PCCS_URL_KEY: &str = "PCCS_URL";
