//! # CAS Validation Library
//!
//! This crate provides the data model, parser, and validation utilities for
//! the client side of a CAS (Central Authentication Service) ticket
//! validation exchange.
//!
//! A CAS client sends a ticket to `/validate`, `/serviceValidate`,
//! `/proxyValidate` (or `/proxy`) and receives a plain-text or XML body. This
//! crate turns that body into a strongly typed [`CasResponse`].
//!
//! ## Key Components:
//!
//! *   **Data Structures:** [`CasResponseType`] names the endpoint variant,
//!     [`CasResponse`] holds the parsed outcome (read-only).
//! *   **Parsing:** [`ResponseParser`] / [`parse_response`] dispatch to the
//!     CAS 1.0 plain-text grammar or the CAS 2.0/3.0 XML grammar.
//! *   **Validation:** [`validate_response`] checks the response invariants
//!     (exactly one of success or failure, fields valid for the variant).
//! *   **Outcome Mapping:** [`CasResponse::outcome`] yields an
//!     [`AuthenticationOutcome`] for the authentication layer.
//! *   **Endpoints:** [`ValidationUrlBuilder`] composes validation URLs.
//! *   **Serialization:** JSON encode/decode of parsed responses.
//! *   **Error Handling:** A dedicated [`CasError`] enum. A CAS server denying
//!     a ticket is *not* an error; it is a [`CasResponse`] with a failure code.
//!
//! ## Example Usage:
//!
//! ```rust
//! use cas_validation::{parse_response, AuthenticationOutcome, CasError, CasResponseType};
//!
//! fn main() -> Result<(), CasError> {
//!     let body = r#"<cas:serviceResponse xmlns:cas="http://www.yale.edu/tp/cas">
//!         <cas:authenticationSuccess>
//!             <cas:user>jdoe</cas:user>
//!             <cas:attributes><cas:mail>jdoe@example.org</cas:mail></cas:attributes>
//!         </cas:authenticationSuccess>
//!     </cas:serviceResponse>"#;
//!
//!     let response = parse_response(body, CasResponseType::ServiceValidate)?;
//!     assert_eq!(response.user_name(), Some("jdoe"));
//!
//!     match response.outcome() {
//!         AuthenticationOutcome::Authenticated(principal) => {
//!             assert_eq!(principal.attributes["mail"], "jdoe@example.org");
//!         }
//!         other => panic!("unexpected outcome: {:?}", other),
//!     }
//!     Ok(())
//! }
//! ```

mod builders;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod parser;
pub mod principal;
pub mod serialization;
pub mod types;
pub mod validation;

#[cfg(test)]
mod test_utils;

// --- Re-exports ---

pub use config::{DuplicateAttributePolicy, ParserConfig, LEGACY_FAILURE_CODE};
pub use endpoint::ValidationUrlBuilder;
pub use error::{CasError, Result};
pub use parser::{parse_response, ResponseParser};
pub use principal::{AuthenticationOutcome, CasPrincipal};
pub use serialization::{deserialize_response, serialize_response};
pub use types::{CasResponse, CasResponseType};
pub use validation::validate_response;
