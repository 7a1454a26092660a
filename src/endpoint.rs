//! Composition of validation-endpoint URLs for the three ticket validation
//! variants. The HTTP exchange itself belongs to the caller.

use crate::error::{CasError, Result};
use crate::types::CasResponseType;
use url::Url;

/// Path prefix CAS 3.0 servers use for attribute-releasing validation.
pub const CAS3_PATH_PREFIX: &str = "/p3";

/// A helper struct to construct validation URLs using a fluent API.
///
/// # Example
/// ```rust
/// # use cas_validation::{CasResponseType, endpoint::ValidationUrlBuilder, error::Result};
/// # fn main() -> Result<()> {
/// let url = ValidationUrlBuilder::new("https://cas.example.org/cas", CasResponseType::ServiceValidate)
///     .ticket("ST-1-abc")
///     .service("https://app.example.org/login")
///     .build()?;
/// assert_eq!(url.path(), "/cas/serviceValidate");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct ValidationUrlBuilder {
    server_url: String,
    variant: CasResponseType,
    ticket: Option<String>,
    service: Option<String>,
    pgt_url: Option<String>,
    renew: bool,
    cas3_paths: bool,
}

impl ValidationUrlBuilder {
    /// Creates a builder for the CAS server rooted at `server_url`
    /// (for example `https://cas.example.org/cas`).
    pub fn new(server_url: impl Into<String>, variant: CasResponseType) -> Self {
        Self {
            server_url: server_url.into(),
            variant,
            ticket: None,
            service: None,
            pgt_url: None,
            renew: false,
            cas3_paths: false,
        }
    }

    /// Sets the service or proxy ticket being validated.
    pub fn ticket(mut self, ticket: impl Into<String>) -> Self {
        self.ticket = Some(ticket.into());
        self
    }

    /// Sets the service identifier the ticket was issued for.
    pub fn service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    /// Sets the callback URL for proxy-granting ticket delivery.
    pub fn pgt_url(mut self, pgt_url: impl Into<String>) -> Self {
        self.pgt_url = Some(pgt_url.into());
        self
    }

    /// Requires the ticket to come from a primary credential login.
    pub fn renew(mut self, renew: bool) -> Self {
        self.renew = renew;
        self
    }

    /// Uses the CAS 3.0 `/p3/...` paths for `ServiceValidate`/`ProxyValidate`.
    pub fn cas3_paths(mut self, cas3_paths: bool) -> Self {
        self.cas3_paths = cas3_paths;
        self
    }

    /// Consumes the builder and returns the validation URL.
    ///
    /// # Errors
    /// * [`CasError::InvalidVariant`] for `Unspecified` and `Proxy`.
    /// * [`CasError::MissingField`] when the ticket or service is absent or blank.
    /// * [`CasError::InvalidUrl`] when the server or callback URL does not parse.
    pub fn build(self) -> Result<Url> {
        let endpoint = match self.variant {
            CasResponseType::Validate => "validate",
            CasResponseType::ServiceValidate => "serviceValidate",
            CasResponseType::ProxyValidate => "proxyValidate",
            CasResponseType::Unspecified | CasResponseType::Proxy => {
                return Err(CasError::invalid_variant(self.variant))
            }
        };
        let ticket = required(self.ticket.as_deref(), "ticket")?;
        let service = required(self.service.as_deref(), "service")?;
        // CAS 1.0 has no proxy support.
        let pgt_url = match (&self.pgt_url, self.variant) {
            (Some(_), CasResponseType::Validate) => return Err(CasError::invalid_variant(self.variant)),
            (Some(pgt_url), _) => Some(Url::parse(pgt_url).map_err(|e| CasError::invalid_url("pgtUrl", e))?),
            (None, _) => None,
        };

        let mut url = Url::parse(&self.server_url).map_err(|e| CasError::invalid_url("server_url", e))?;
        let mut path = url.path().trim_end_matches('/').to_string();
        if self.cas3_paths && self.variant != CasResponseType::Validate {
            path.push_str(CAS3_PATH_PREFIX);
        }
        path.push('/');
        path.push_str(endpoint);
        url.set_path(&path);

        {
            let mut query = url.query_pairs_mut();
            query.clear();
            query.append_pair("service", service);
            query.append_pair("ticket", ticket);
            if let Some(pgt_url) = &pgt_url {
                query.append_pair("pgtUrl", pgt_url.as_str());
            }
            if self.renew {
                query.append_pair("renew", "true");
            }
        }
        Ok(url)
    }
}

fn required<'a>(value: Option<&'a str>, field_name: &str) -> Result<&'a str> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| CasError::missing_field(field_name))
}
