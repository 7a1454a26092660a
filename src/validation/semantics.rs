// src/validation/semantics.rs

use crate::error::{CasError, Result};
use crate::types::{CasResponse, CasResponseType};

/// Validates that the populated fields of a [`CasResponse`] are ones its
/// variant can legitimately carry.
///
/// Assumes [`validate_outcome`](super::validate_outcome) already passed.
/// Checks:
/// 1. The response was classified (not `Unspecified`).
/// 2. Proxy chains only appear on `ProxyValidate` responses.
/// 3. Proxy tickets only appear on `Proxy` responses, user names never do.
/// 4. Failure codes are non-empty.
pub fn validate_response_semantics(response: &CasResponse) -> Result<()> {
    let variant = response.response_type;

    if variant == CasResponseType::Unspecified {
        return Err(CasError::invariant_violation("response type was never classified"));
    }

    if !response.proxies.is_empty() && variant != CasResponseType::ProxyValidate {
        return Err(CasError::invariant_violation(format!(
            "proxy chain is not valid on a {} response",
            variant
        )));
    }

    match variant {
        CasResponseType::Proxy => {
            if response.user_name.is_some() {
                return Err(CasError::invariant_violation("user name is not valid on a PROXY response"));
            }
            if response.proxy_granting_ticket.is_some() || !response.attributes.is_empty() {
                return Err(CasError::invariant_violation(
                    "authentication metadata is not valid on a PROXY response",
                ));
            }
        }
        _ => {
            if response.proxy_ticket.is_some() {
                return Err(CasError::invariant_violation(format!(
                    "proxy ticket is not valid on a {} response",
                    variant
                )));
            }
        }
    }

    if variant == CasResponseType::Validate
        && (response.proxy_granting_ticket.is_some() || !response.attributes.is_empty())
    {
        return Err(CasError::invariant_violation(
            "CAS 1.0 responses carry no tickets or attributes",
        ));
    }

    if let Some(code) = &response.failure_code {
        if code.trim().is_empty() {
            return Err(CasError::invariant_violation("failure code must not be empty"));
        }
    }

    Ok(())
}
