//! Error types for the CAS validation library.

use crate::types::CasResponseType;
use thiserror::Error;

/// Errors that can occur while parsing, validating, or serializing CAS responses.
///
/// A CAS server *denying* a ticket is not an error: it is returned as a
/// [`CasResponse`](crate::types::CasResponse) carrying a failure code. The
/// variants below describe input that could not be interpreted at all, or
/// callers breaking the API contract.
#[derive(Error, Debug)]
pub enum CasError {
    /// The response body does not match the grammar of the declared variant.
    #[error("Malformed CAS response: {reason}")]
    MalformedResponse { reason: String },
    /// The XML reader rejected the response body.
    #[error("XML parsing error: {context} - {source}")]
    XmlError {
        context: String,
        #[source] source: quick_xml::Error,
    },
    /// A mandatory element (or attribute) of the response was absent or blank.
    #[error("Missing required element: {element}")]
    MissingElement { element: String },
    /// The outcome element is not one the declared variant can produce.
    #[error("Unexpected element <{element}> in {variant} response")]
    UnexpectedRoot { element: String, variant: CasResponseType },
    /// The response body is not valid UTF-8.
    #[error("Response body is not valid UTF-8: {source}")]
    Encoding {
        #[source] source: std::str::Utf8Error,
    },
    /// The caller passed a variant that cannot be used for this operation.
    #[error("Invalid response variant: {variant}")]
    InvalidVariant { variant: CasResponseType },
    /// A required input field was missing.
    #[error("Missing required field: {field_name}")]
    MissingField { field_name: String },
    /// A URL could not be parsed or composed.
    #[error("Invalid URL for '{field_name}': {source}")]
    InvalidUrl {
        field_name: String,
        #[source] source: url::ParseError,
    },
    /// A response broke one of its structural invariants.
    #[error("Response invariant violated: {reason}")]
    InvariantViolation { reason: String },
    /// An error occurred during a specific validation stage, wrapping the underlying error.
    #[error("Validation failed during {stage} stage: {source}")]
    ValidationError {
        stage: String,
        #[source] source: Box<CasError>,
    },
    /// Error during JSON serialization or deserialization of a response.
    #[error("JSON processing error: {context} - {source}")]
    JsonError {
        context: String,
        #[source] source: serde_json::Error,
    },
}

/// A specialized `Result` type for CAS operations, using [`CasError`](crate::error::CasError).
pub type Result<T> = std::result::Result<T, CasError>;

impl From<quick_xml::Error> for CasError {
    fn from(err: quick_xml::Error) -> Self {
        CasError::XmlError { context: "Response body".to_string(), source: err }
    }
}

impl From<quick_xml::events::attributes::AttrError> for CasError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        CasError::XmlError { context: "Element attributes".to_string(), source: err.into() }
    }
}

impl From<serde_json::Error> for CasError {
    fn from(err: serde_json::Error) -> Self {
        CasError::JsonError { context: "CasResponse conversion".to_string(), source: err }
    }
}

impl From<std::str::Utf8Error> for CasError {
    fn from(err: std::str::Utf8Error) -> Self {
        CasError::Encoding { source: err }
    }
}

const GENERIC_FAILURE_MESSAGE: &str = "Authentication failed: the CAS server response could not be verified";

impl CasError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        CasError::MalformedResponse { reason: reason.into() }
    }

    pub fn xml(context: impl Into<String>, source: quick_xml::Error) -> Self {
        CasError::XmlError { context: context.into(), source }
    }

    pub fn missing_element(element: impl Into<String>) -> Self {
        CasError::MissingElement { element: element.into() }
    }

    pub fn unexpected_root(element: impl Into<String>, variant: CasResponseType) -> Self {
        CasError::UnexpectedRoot { element: element.into(), variant }
    }

    pub fn invalid_variant(variant: CasResponseType) -> Self {
        CasError::InvalidVariant { variant }
    }

    pub fn missing_field(field_name: impl Into<String>) -> Self {
        CasError::MissingField { field_name: field_name.into() }
    }

    pub fn invalid_url(field_name: impl Into<String>, source: url::ParseError) -> Self {
        CasError::InvalidUrl { field_name: field_name.into(), source }
    }

    pub fn invariant_violation(reason: impl Into<String>) -> Self {
        CasError::InvariantViolation { reason: reason.into() }
    }

    pub fn json_error(context: impl Into<String>, source: serde_json::Error) -> Self {
        CasError::JsonError { context: context.into(), source }
    }

    /// Returns `true` when the error means the server's payload could not be
    /// interpreted, as opposed to a caller contract violation.
    pub fn is_malformed(&self) -> bool {
        match self {
            CasError::MalformedResponse { .. }
            | CasError::XmlError { .. }
            | CasError::MissingElement { .. }
            | CasError::UnexpectedRoot { .. }
            | CasError::Encoding { .. } => true,
            CasError::ValidationError { source, .. } => source.is_malformed(),
            _ => false,
        }
    }

    /// Message safe to show to an end user.
    ///
    /// Malformed responses collapse to one generic sentence so that parser
    /// details never reach the user agent.
    pub fn public_message(&self) -> String {
        if self.is_malformed() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}
