//! JSON serialization and deserialization of parsed CAS responses.
//!
//! Useful for keeping a validated response in a session store. Decoding goes
//! through [`validate_response`], so a decoded value obeys the same invariants
//! as one produced by the parser.

use crate::error::{CasError, Result};
use crate::types::{CasResponse, CasResponseType};
use crate::validation::validate_response;
use serde::Deserialize;
use std::collections::HashMap;

/// Wire shape of a [`CasResponse`], before invariant checks.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct CasResponseRecord {
    response_type: CasResponseType,
    data: String,
    #[serde(default)]
    user_name: Option<String>,
    #[serde(default)]
    proxy_granting_ticket: Option<String>,
    #[serde(default)]
    proxies: Vec<String>,
    #[serde(default)]
    proxy_ticket: Option<String>,
    #[serde(default)]
    failure_code: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    attributes: HashMap<String, String>,
}

impl TryFrom<CasResponseRecord> for CasResponse {
    type Error = CasError;

    fn try_from(record: CasResponseRecord) -> Result<Self> {
        let response = CasResponse {
            response_type: record.response_type,
            data: record.data,
            user_name: record.user_name,
            proxy_granting_ticket: record.proxy_granting_ticket,
            proxies: record.proxies,
            proxy_ticket: record.proxy_ticket,
            failure_code: record.failure_code,
            error: record.error,
            attributes: record.attributes,
        };
        validate_response(&response)?;
        Ok(response)
    }
}

/// Serializes a [`CasResponse`] into JSON bytes (`Vec<u8>`).
///
/// # Returns
/// * `Ok(Vec<u8>)` containing the JSON document.
/// * `Err(CasError::JsonError)` if encoding fails.
pub fn serialize_response(response: &CasResponse) -> Result<Vec<u8>> {
    serde_json::to_vec(response).map_err(|e| CasError::json_error("CasResponse encoding", e))
}

/// Deserializes JSON bytes (`&[u8]`) into a [`CasResponse`].
///
/// # Returns
/// * `Ok(CasResponse)` if decoding succeeds and the response invariants hold.
/// * `Err(CasError::JsonError)` if decoding fails or the decoded value breaks
///   an invariant (the invariant error is reported as the JSON error's message).
pub fn deserialize_response(buf: &[u8]) -> Result<CasResponse> {
    serde_json::from_slice(buf).map_err(|e| CasError::json_error("CasResponse decoding", e))
}
