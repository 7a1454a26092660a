use crate::error::{CasError, Result};
use crate::types::CasResponse;

/// Checks that exactly one of the success group (`user_name` / `proxy_ticket`)
/// and the failure group (`failure_code` / `error`) is populated.
///
/// # Returns
/// * `Ok(())` if the response carries a single, complete outcome.
/// * `Err(CasError::InvariantViolation)` otherwise.
pub fn validate_outcome(response: &CasResponse) -> Result<()> {
    let success = response.user_name.is_some() || response.proxy_ticket.is_some();
    let failure = response.failure_code.is_some() || response.error.is_some();

    match (success, failure) {
        (true, true) => Err(CasError::invariant_violation(
            "response carries both success and failure fields",
        )),
        (false, false) => Err(CasError::invariant_violation(
            "response carries neither success nor failure fields",
        )),
        (false, true) => {
            if response.failure_code.is_none() || response.error.is_none() {
                return Err(CasError::invariant_violation(
                    "failure response must carry both a failure code and an error message",
                ));
            }
            if response.proxy_granting_ticket.is_some()
                || !response.proxies.is_empty()
                || !response.attributes.is_empty()
            {
                return Err(CasError::invariant_violation(
                    "failure response carries success metadata",
                ));
            }
            Ok(())
        }
        (true, false) => {
            if response.user_name.is_some() && response.proxy_ticket.is_some() {
                return Err(CasError::invariant_violation(
                    "response carries both a user name and a proxy ticket",
                ));
            }
            Ok(())
        }
    }
}
