//! Response parsing: variant dispatch between the CAS 1.0 plain-text grammar
//! and the CAS 2.0+ XML grammar.

pub(crate) mod legacy;
pub(crate) mod xml;

use crate::config::ParserConfig;
use crate::error::{CasError, Result};
use crate::types::{CasResponse, CasResponseType};
use tracing::{debug, instrument, warn};

/// A leading UTF-8 byte order mark is skipped by both grammars.
pub(crate) const BYTE_ORDER_MARK: char = '\u{feff}';

/// Turns raw validation-endpoint bodies into [`CasResponse`] values.
///
/// The parser only holds immutable configuration, so one instance can be
/// shared between threads and reused for any number of responses.
#[derive(Clone, Debug, Default)]
pub struct ResponseParser {
    config: ParserConfig,
}

impl ResponseParser {
    /// Create a parser with default configuration.
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses `data`, the exact body returned by the endpoint that `variant` names.
    ///
    /// A server-side denial is returned as `Ok` with the failure fields set.
    ///
    /// # Errors
    /// * [`CasError::InvalidVariant`] if `variant` is `Unspecified`.
    /// * A malformed-response error ([`CasError::is_malformed`]) if the body
    ///   does not follow the grammar of `variant`.
    #[instrument(skip(self, data), fields(variant = %variant, len = data.len()))]
    pub fn parse(&self, data: &str, variant: CasResponseType) -> Result<CasResponse> {
        if variant == CasResponseType::Unspecified {
            return Err(CasError::invalid_variant(variant));
        }
        if data.trim().is_empty() {
            warn!("rejecting empty CAS response");
            return Err(CasError::malformed("response body is empty"));
        }

        let result = match variant {
            CasResponseType::Validate => legacy::parse_legacy(data, &self.config),
            CasResponseType::ServiceValidate | CasResponseType::ProxyValidate | CasResponseType::Proxy => {
                xml::parse_xml(data, variant, &self.config)
            }
            CasResponseType::Unspecified => Err(CasError::invalid_variant(variant)),
        };

        match &result {
            Ok(response) => debug!(success = response.is_success(), "parsed CAS response"),
            Err(e) if e.is_malformed() => warn!(error = %e, "rejecting malformed CAS response"),
            Err(_) => {}
        }
        result
    }

    /// Parses a raw HTTP body. Bodies that are not UTF-8 are malformed.
    ///
    /// # Errors
    /// See [`parse`](Self::parse); additionally [`CasError::Encoding`].
    pub fn parse_bytes(&self, body: &[u8], variant: CasResponseType) -> Result<CasResponse> {
        let data = std::str::from_utf8(body)?;
        self.parse(data, variant)
    }
}

/// Parses a response with the default [`ParserConfig`].
///
/// # Errors
/// See [`ResponseParser::parse`].
pub fn parse_response(data: &str, variant: CasResponseType) -> Result<CasResponse> {
    ResponseParser::new().parse(data, variant)
}
