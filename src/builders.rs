//! Crate-private construction of [`CasResponse`] values.

use crate::config::DuplicateAttributePolicy;
use crate::error::Result;
use crate::types::{CasResponse, CasResponseType};
use crate::validation::validate_response;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::debug;

/// A helper struct that accumulates parsed fields and produces a
/// [`CasResponse`] in one step.
///
/// This is the only place response fields are written. Single-valued tickets
/// keep their first occurrence; [`build`](Self::build) runs
/// [`validate_response`] so a value that breaks the response invariants never
/// leaves the crate.
pub(crate) struct CasResponseBuilder {
    response: CasResponse,
}

impl CasResponseBuilder {
    /// Starts a response for the given raw body. The type stays
    /// `Unspecified` until [`response_type`](Self::response_type) is called.
    pub fn new(data: &str) -> Self {
        Self {
            response: CasResponse {
                response_type: CasResponseType::Unspecified,
                data: data.to_string(),
                user_name: None,
                proxy_granting_ticket: None,
                proxies: Vec::new(),
                proxy_ticket: None,
                failure_code: None,
                error: None,
                attributes: HashMap::new(),
            },
        }
    }

    pub fn response_type(mut self, response_type: CasResponseType) -> Self {
        self.response.response_type = response_type;
        self
    }

    pub fn user_name(mut self, user_name: String) -> Self {
        self.response.user_name = Some(user_name);
        self
    }

    /// Sets the PGT IOU unless one was already recorded.
    pub fn proxy_granting_ticket(mut self, ticket: String) -> Self {
        if self.response.proxy_granting_ticket.is_some() {
            debug!("ignoring repeated proxyGrantingTicket element");
        } else {
            self.response.proxy_granting_ticket = Some(ticket);
        }
        self
    }

    /// Appends to the proxy chain, preserving call order.
    pub fn add_proxy(mut self, proxy: String) -> Self {
        self.response.proxies.push(proxy);
        self
    }

    /// Sets the proxy ticket unless one was already recorded.
    pub fn proxy_ticket(mut self, ticket: String) -> Self {
        if self.response.proxy_ticket.is_some() {
            debug!("ignoring repeated proxyTicket element");
        } else {
            self.response.proxy_ticket = Some(ticket);
        }
        self
    }

    pub fn failure(mut self, code: String, message: String) -> Self {
        self.response.failure_code = Some(code);
        self.response.error = Some(message);
        self
    }

    /// Records a released attribute, folding repeated keys per `policy`.
    pub fn attribute(mut self, name: String, value: String, policy: DuplicateAttributePolicy) -> Self {
        match self.response.attributes.entry(name) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(mut slot) => {
                debug!(attribute = %slot.key(), ?policy, "repeated attribute key");
                if policy == DuplicateAttributePolicy::LastWins {
                    slot.insert(value);
                }
            }
        }
        self
    }

    /// Consumes the builder and returns the validated [`CasResponse`].
    pub fn build(self) -> Result<CasResponse> {
        validate_response(&self.response)?;
        Ok(self.response)
    }
}
