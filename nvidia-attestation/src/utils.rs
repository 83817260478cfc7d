use std::sync::Mutex;

use once_cell::sync::Lazy;

use crate::constants::NV_ALLOW_HOLD_CERT_KEY;

/// Global state to control certificate hold status.
/// This is initialized as `None` and can be set at runtime.
static CERT_HOLD_STATUS: Lazy<Mutex<Option<bool>>> = Lazy::new(|| Mutex::new(None));

/// Sets whether certificates should be allowed to be held.
///
/// This function updates the global certificate hold status.
///
/// # Arguments
///
/// * `value` - A boolean indicating whether to allow certificate holding.
pub fn set_allow_hold_cert(value: bool) {
    let mut status = CERT_HOLD_STATUS.lock().unwrap();
    *status = Some(value);
}

/// Determines whether certificates should be allowed to be held.
///
/// This function first checks the global certificate hold status.
/// If not set, it falls back to checking the "NV_ALLOW_HOLD_CERT" environment variable.
///
/// # Returns
///
/// * `true` if certificates should be allowed to be held
/// * `false` otherwise
pub fn get_allow_hold_cert() -> bool {
    if let Some(value) = *CERT_HOLD_STATUS.lock().unwrap() {
        value
    } else {
        std::env::var(NV_ALLOW_HOLD_CERT_KEY).unwrap_or_default() == "true"
    }
}
