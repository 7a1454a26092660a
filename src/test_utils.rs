#[cfg(test)]
pub mod test_utils {
    use crate::types::{CasResponse, CasResponseType};
    use std::collections::HashMap;

    // Raw constructors bypass the builder so validation tests can build broken values.
    pub fn empty_response(response_type: CasResponseType) -> CasResponse {
        CasResponse {
            response_type,
            data: String::new(),
            user_name: None,
            proxy_granting_ticket: None,
            proxies: vec![],
            proxy_ticket: None,
            failure_code: None,
            error: None,
            attributes: HashMap::new(),
        }
    }

    pub fn success_response(response_type: CasResponseType, user: &str) -> CasResponse {
        CasResponse {
            user_name: Some(user.to_string()),
            ..empty_response(response_type)
        }
    }

    pub fn failure_response(response_type: CasResponseType, code: &str, message: &str) -> CasResponse {
        CasResponse {
            failure_code: Some(code.to_string()),
            error: Some(message.to_string()),
            ..empty_response(response_type)
        }
    }

    pub fn proxy_ticket_response(ticket: &str) -> CasResponse {
        CasResponse {
            proxy_ticket: Some(ticket.to_string()),
            ..empty_response(CasResponseType::Proxy)
        }
    }

    // Wraps an outcome element in the CAS 2.0 document element.
    pub fn service_response(inner: &str) -> String {
        format!(
            "<cas:serviceResponse xmlns:cas=\"http://www.yale.edu/tp/cas\">\n{}\n</cas:serviceResponse>",
            inner
        )
    }

    pub fn authentication_success(user: &str, extra: &str) -> String {
        service_response(&format!(
            "  <cas:authenticationSuccess>\n    <cas:user>{}</cas:user>\n{}\n  </cas:authenticationSuccess>",
            user, extra
        ))
    }

    pub fn authentication_failure(code: &str, message: &str) -> String {
        service_response(&format!(
            "  <cas:authenticationFailure code=\"{}\">\n    {}\n  </cas:authenticationFailure>",
            code, message
        ))
    }
}
