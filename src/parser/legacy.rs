//! CAS 1.0 `/validate` responses: `yes\n<user>\n` or `no\n`.

use super::BYTE_ORDER_MARK;
use crate::builders::CasResponseBuilder;
use crate::config::ParserConfig;
use crate::error::{CasError, Result};
use crate::types::{CasResponse, CasResponseType};

const MAX_ECHOED_CHARS: usize = 32;

/// Parses a CAS 1.0 plain-text body.
///
/// The first line must be exactly `yes` or `no` (a trailing carriage return is
/// tolerated). For `yes` the second line, trimmed, is the user name. For `no`
/// the configured sentinel code and message are recorded, since the legacy
/// format carries no error detail. Lines after the second are ignored.
pub(crate) fn parse_legacy(data: &str, config: &ParserConfig) -> Result<CasResponse> {
    let mut lines = data.trim_start_matches(BYTE_ORDER_MARK).lines();
    let answer = lines
        .next()
        .map(|line| line.trim_end_matches('\r'))
        .ok_or_else(|| CasError::malformed("empty CAS 1.0 response"))?;

    let builder = CasResponseBuilder::new(data).response_type(CasResponseType::Validate);

    match answer {
        "yes" => {
            let user = lines
                .next()
                .map(str::trim)
                .filter(|user| !user.is_empty())
                .ok_or_else(|| CasError::missing_element("CAS 1.0 user line"))?;
            builder.user_name(user.to_string()).build()
        }
        "no" => builder
            .failure(config.legacy_failure_code.clone(), config.legacy_failure_message.clone())
            .build(),
        other => {
            let echoed: String = other.chars().take(MAX_ECHOED_CHARS).collect();
            Err(CasError::malformed(format!(
                "expected \"yes\" or \"no\" on the first line of a CAS 1.0 response, found {:?}",
                echoed
            )))
        }
    }
}
