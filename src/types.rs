//! Core data model: the response variant and the parsed CAS response.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Specifies which CAS endpoint produced a response, and therefore which
/// grammar applies to its body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CasResponseType {
    /// Not yet classified. Never accepted as parser input.
    #[default]
    Unspecified,
    /// CAS 1.0 `/validate`, plain text.
    Validate,
    /// CAS 2.0 `/serviceValidate`, XML.
    ServiceValidate,
    /// CAS 2.0+ `/proxyValidate`, XML with an optional proxy chain.
    ProxyValidate,
    /// CAS 2.0+ `/proxy`, XML carrying an issued proxy ticket.
    Proxy,
}

impl CasResponseType {
    /// Stable, upper-case name of the variant (as used in serialized form).
    pub fn as_str_name(&self) -> &'static str {
        match self {
            CasResponseType::Unspecified => "UNSPECIFIED",
            CasResponseType::Validate => "VALIDATE",
            CasResponseType::ServiceValidate => "SERVICE_VALIDATE",
            CasResponseType::ProxyValidate => "PROXY_VALIDATE",
            CasResponseType::Proxy => "PROXY",
        }
    }

    /// Whether responses of this variant are XML documents.
    pub fn is_xml(&self) -> bool {
        matches!(
            self,
            CasResponseType::ServiceValidate | CasResponseType::ProxyValidate | CasResponseType::Proxy
        )
    }

    /// Path of the CAS server endpoint that produces this variant.
    pub fn endpoint_path(&self) -> Option<&'static str> {
        match self {
            CasResponseType::Unspecified => None,
            CasResponseType::Validate => Some("/validate"),
            CasResponseType::ServiceValidate => Some("/serviceValidate"),
            CasResponseType::ProxyValidate => Some("/proxyValidate"),
            CasResponseType::Proxy => Some("/proxy"),
        }
    }
}

impl fmt::Display for CasResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str_name())
    }
}

/// A CAS validation response, as interpreted from the raw body returned by
/// one of the validation endpoints.
///
/// Values are produced by [`ResponseParser`](crate::parser::ResponseParser)
/// (or decoded by [`crate::serialization::deserialize_response`]) and are
/// read-only afterwards. Exactly one of the two field groups is populated:
///
/// * success: [`user_name`](Self::user_name) or [`proxy_ticket`](Self::proxy_ticket),
///   plus optional PGT, proxies and attributes;
/// * failure: [`failure_code`](Self::failure_code) and [`error`](Self::error).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "crate::serialization::CasResponseRecord")]
pub struct CasResponse {
    pub(crate) response_type: CasResponseType,
    pub(crate) data: String,
    pub(crate) user_name: Option<String>,
    pub(crate) proxy_granting_ticket: Option<String>,
    pub(crate) proxies: Vec<String>,
    pub(crate) proxy_ticket: Option<String>,
    pub(crate) failure_code: Option<String>,
    pub(crate) error: Option<String>,
    pub(crate) attributes: HashMap<String, String>,
}

impl CasResponse {
    /// The endpoint variant this response was parsed as.
    pub fn response_type(&self) -> CasResponseType {
        self.response_type
    }

    /// The raw response body, exactly as received.
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Authenticated user identifier (`<cas:user>`, or line two of a CAS 1.0 `yes`).
    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    /// Proxy-granting ticket IOU (`<cas:proxyGrantingTicket>`).
    pub fn proxy_granting_ticket(&self) -> Option<&str> {
        self.proxy_granting_ticket.as_deref()
    }

    /// Proxy chain in document order (`<cas:proxies>`).
    pub fn proxies(&self) -> &[String] {
        &self.proxies
    }

    /// Proxy ticket issued by a `/proxy` request (`<cas:proxyTicket>`).
    pub fn proxy_ticket(&self) -> Option<&str> {
        self.proxy_ticket.as_deref()
    }

    /// Failure code (`code` attribute of the failure element).
    pub fn failure_code(&self) -> Option<&str> {
        self.failure_code.as_deref()
    }

    /// Human-readable failure description.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Released user attributes (`<cas:attributes>`). Empty when none.
    pub fn attributes(&self) -> &HashMap<String, String> {
        &self.attributes
    }

    /// Looks up a single released attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn is_success(&self) -> bool {
        self.user_name.is_some() || self.proxy_ticket.is_some()
    }

    pub fn is_failure(&self) -> bool {
        self.failure_code.is_some()
    }
}
