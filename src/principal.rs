//! Mapping of a parsed [`CasResponse`] onto what an authentication layer acts on.

use crate::types::CasResponse;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// CAS 3.0 attribute carrying the instant the user authenticated.
pub const AUTHENTICATION_DATE_ATTRIBUTE: &str = "authenticationDate";

/// CAS 3.0 attribute telling whether the ticket came from a fresh login.
pub const NEW_LOGIN_ATTRIBUTE: &str = "isFromNewLogin";

/// The authenticated identity released by a successful validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CasPrincipal {
    pub user: String,
    pub attributes: HashMap<String, String>,
    pub proxy_granting_ticket: Option<String>,
    pub proxies: Vec<String>,
}

impl CasPrincipal {
    /// Parses the `authenticationDate` attribute (RFC 3339), if released.
    ///
    /// A trailing region id in brackets, as Java servers print it
    /// (`2024-03-01T10:15:30Z[UTC]`), is ignored.
    pub fn authentication_date(&self) -> Option<DateTime<Utc>> {
        self.attributes
            .get(AUTHENTICATION_DATE_ATTRIBUTE)
            .and_then(|value| value.trim().split('[').next())
            .and_then(|value| DateTime::parse_from_rfc3339(value).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Whether the ticket was issued from a fresh (non-SSO) login, if released.
    pub fn is_from_new_login(&self) -> Option<bool> {
        self.attributes
            .get(NEW_LOGIN_ATTRIBUTE)
            .and_then(|value| value.trim().parse::<bool>().ok())
    }

    /// Whether the ticket reached the service through at least one proxy.
    pub fn is_proxied(&self) -> bool {
        !self.proxies.is_empty()
    }
}

/// What a caller should do with a validation response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AuthenticationOutcome {
    /// Establish a session for the principal.
    Authenticated(CasPrincipal),
    /// A `/proxy` call succeeded and issued a proxy ticket.
    ProxyTicketIssued { proxy_ticket: String },
    /// The CAS server denied the ticket.
    Rejected { code: String, message: String },
}

impl CasResponse {
    /// Maps this response to an [`AuthenticationOutcome`].
    pub fn outcome(&self) -> AuthenticationOutcome {
        if let Some(user) = &self.user_name {
            return AuthenticationOutcome::Authenticated(CasPrincipal {
                user: user.clone(),
                attributes: self.attributes.clone(),
                proxy_granting_ticket: self.proxy_granting_ticket.clone(),
                proxies: self.proxies.clone(),
            });
        }
        if let Some(proxy_ticket) = &self.proxy_ticket {
            return AuthenticationOutcome::ProxyTicketIssued { proxy_ticket: proxy_ticket.clone() };
        }
        // Responses leaving the crate always carry one group; the failure
        // group is what remains.
        AuthenticationOutcome::Rejected {
            code: self.failure_code.clone().unwrap_or_default(),
            message: self.error.clone().unwrap_or_default(),
        }
    }
}
