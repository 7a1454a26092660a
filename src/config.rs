//! Parser configuration and the policies it selects.

use serde::{Deserialize, Serialize};

/// Failure code reported for a CAS 1.0 `no` answer. The legacy format carries
/// no error detail, so this is a library-defined sentinel rather than a
/// protocol code.
pub const LEGACY_FAILURE_CODE: &str = "LEGACY_VALIDATION_FAILED";

/// Failure message reported for a CAS 1.0 `no` answer.
pub const LEGACY_FAILURE_MESSAGE: &str = "CAS 1.0 validation rejected the ticket";

/// How repeated keys inside `<cas:attributes>` are folded into the attribute map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateAttributePolicy {
    /// Keep the first value seen in document order.
    FirstWins,
    /// Keep the last value seen in document order.
    #[default]
    LastWins,
}

/// Configuration for [`ResponseParser`](crate::parser::ResponseParser).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParserConfig {
    /// Failure code used for CAS 1.0 `no` responses.
    #[serde(default = "default_legacy_failure_code")]
    pub legacy_failure_code: String,
    /// Failure message used for CAS 1.0 `no` responses.
    #[serde(default = "default_legacy_failure_message")]
    pub legacy_failure_message: String,
    /// Policy for repeated attribute keys.
    #[serde(default)]
    pub duplicate_attributes: DuplicateAttributePolicy,
    /// Reject XML documents whose document element is not `<cas:serviceResponse>`.
    #[serde(default)]
    pub require_service_response: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            legacy_failure_code: default_legacy_failure_code(),
            legacy_failure_message: default_legacy_failure_message(),
            duplicate_attributes: DuplicateAttributePolicy::default(),
            require_service_response: false,
        }
    }
}

fn default_legacy_failure_code() -> String {
    LEGACY_FAILURE_CODE.to_string()
}

fn default_legacy_failure_message() -> String {
    LEGACY_FAILURE_MESSAGE.to_string()
}
