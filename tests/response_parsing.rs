use cas_validation::{
    deserialize_response, parse_response, serialize_response, AuthenticationOutcome, CasError,
    CasResponse, CasResponseType, ParserConfig, ResponseParser, LEGACY_FAILURE_CODE,
};
use std::sync::Arc;
use std::thread;

const CAS3_SUCCESS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<cas:serviceResponse xmlns:cas="http://www.yale.edu/tp/cas">
    <cas:authenticationSuccess>
        <cas:user>username</cas:user>
        <cas:attributes>
            <cas:firstname>John</cas:firstname>
            <cas:lastname>Doe</cas:lastname>
            <cas:title>Mr.</cas:title>
            <cas:email>jdoe@example.org</cas:email>
            <cas:affiliation>staff</cas:affiliation>
            <cas:affiliation>faculty</cas:affiliation>
            <cas:authenticationDate>2015-11-12T09:30:10Z</cas:authenticationDate>
            <cas:isFromNewLogin>true</cas:isFromNewLogin>
        </cas:attributes>
        <cas:proxyGrantingTicket>PGTIOU-84678-8a9d</cas:proxyGrantingTicket>
    </cas:authenticationSuccess>
</cas:serviceResponse>
"#;

const PROXY_VALIDATE_SUCCESS: &str = r#"<cas:serviceResponse xmlns:cas="http://www.yale.edu/tp/cas">
    <cas:authenticationSuccess>
        <cas:user>username</cas:user>
        <cas:proxyGrantingTicket>PGTIOU-84678-8a9d</cas:proxyGrantingTicket>
        <cas:proxies>
            <cas:proxy>https://proxy3/pgtUrl</cas:proxy>
            <cas:proxy>https://proxy2/pgtUrl</cas:proxy>
            <cas:proxy>https://proxy1/pgtUrl</cas:proxy>
        </cas:proxies>
    </cas:authenticationSuccess>
</cas:serviceResponse>
"#;

const FAILURE_SCENARIO: &str = "<cas:serviceResponse><cas:authenticationFailure code=\"INVALID_TICKET\">Ticket not recognized</cas:authenticationFailure></cas:serviceResponse>";

fn assert_single_outcome(response: &CasResponse) {
    let success = response.user_name().is_some() || response.proxy_ticket().is_some();
    let failure = response.failure_code().is_some();
    assert!(success ^ failure, "response must be exactly one of success or failure: {:?}", response);
}

#[test]
fn test_cas3_service_validate_success() {
    let response = parse_response(CAS3_SUCCESS, CasResponseType::ServiceValidate).unwrap();
    assert_eq!(response.response_type(), CasResponseType::ServiceValidate);
    assert_eq!(response.user_name(), Some("username"));
    assert_eq!(response.failure_code(), None);
    assert_eq!(response.error(), None);
    assert_eq!(response.proxy_granting_ticket(), Some("PGTIOU-84678-8a9d"));
    assert_eq!(response.attribute("email"), Some("jdoe@example.org"));
    assert_eq!(response.attribute("affiliation"), Some("faculty"));
    assert_eq!(response.attributes().len(), 7);
    assert_eq!(response.data(), CAS3_SUCCESS);
    assert_single_outcome(&response);

    match response.outcome() {
        AuthenticationOutcome::Authenticated(principal) => {
            assert_eq!(principal.user, "username");
            assert_eq!(principal.is_from_new_login(), Some(true));
            let date = principal.authentication_date().expect("authenticationDate should parse");
            assert_eq!(date.to_rfc3339(), "2015-11-12T09:30:10+00:00");
        }
        other => panic!("expected authenticated outcome, got {:?}", other),
    }
}

#[test]
fn test_proxy_validate_keeps_document_order() {
    let response = parse_response(PROXY_VALIDATE_SUCCESS, CasResponseType::ProxyValidate).unwrap();
    assert_eq!(
        response.proxies(),
        ["https://proxy3/pgtUrl", "https://proxy2/pgtUrl", "https://proxy1/pgtUrl"]
    );
    assert_single_outcome(&response);
}

#[test]
fn test_failure_scenario() {
    let response = parse_response(FAILURE_SCENARIO, CasResponseType::ServiceValidate).unwrap();
    assert_eq!(response.failure_code(), Some("INVALID_TICKET"));
    assert_eq!(response.error(), Some("Ticket not recognized"));
    assert_eq!(response.user_name(), None);
    assert!(response.attributes().is_empty());
    assert_single_outcome(&response);
    assert_eq!(
        response.outcome(),
        AuthenticationOutcome::Rejected {
            code: "INVALID_TICKET".to_string(),
            message: "Ticket not recognized".to_string(),
        }
    );
}

#[test]
fn test_legacy_scenarios() {
    let response = parse_response("yes\njdoe\n", CasResponseType::Validate).unwrap();
    assert_eq!(response.user_name(), Some("jdoe"));
    assert!(response.is_success());
    assert_single_outcome(&response);

    let response = parse_response("no\n", CasResponseType::Validate).unwrap();
    assert_eq!(response.failure_code(), Some(LEGACY_FAILURE_CODE));
    assert!(response.error().is_some());
    assert_single_outcome(&response);
}

#[test]
fn test_data_is_kept_verbatim() {
    let bodies = [
        ("yes\r\n  jdoe  \r\n", CasResponseType::Validate),
        ("no\n", CasResponseType::Validate),
        (CAS3_SUCCESS, CasResponseType::ServiceValidate),
        (FAILURE_SCENARIO, CasResponseType::ProxyValidate),
    ];
    for (body, variant) in bodies {
        let response = parse_response(body, variant).unwrap();
        assert_eq!(response.data(), body);
    }
}

#[test]
fn test_byte_order_mark_accepted_by_both_grammars() {
    let response = parse_response("\u{feff}yes\njdoe\n", CasResponseType::Validate).unwrap();
    assert_eq!(response.user_name(), Some("jdoe"));

    let body = format!("\u{feff}{}", FAILURE_SCENARIO);
    let response = parse_response(&body, CasResponseType::ServiceValidate).unwrap();
    assert_eq!(response.failure_code(), Some("INVALID_TICKET"));
    assert_eq!(response.data(), body);
}

#[test]
fn test_hostile_nesting_is_rejected_not_fatal() {
    let depth = 500_000;
    let body = format!(
        "<cas:serviceResponse><cas:authenticationFailure code=\"INVALID_TICKET\">{}x{}</cas:authenticationFailure></cas:serviceResponse>",
        "<a>".repeat(depth),
        "</a>".repeat(depth)
    );
    let err = parse_response(&body, CasResponseType::ServiceValidate).unwrap_err();
    assert!(err.is_malformed());
}

#[test]
fn test_empty_input_is_malformed() {
    let result = parse_response("", CasResponseType::ServiceValidate);
    assert!(matches!(result, Err(CasError::MalformedResponse { .. })));
    let result = parse_response("", CasResponseType::Validate);
    assert!(matches!(result, Err(CasError::MalformedResponse { .. })));
}

#[test]
fn test_malformed_response_has_generic_public_message() {
    let err = parse_response("<html><body>Service Unavailable</body></html>", CasResponseType::ServiceValidate)
        .unwrap_err();
    assert!(err.is_malformed());
    assert!(!err.public_message().contains("html"));
}

#[test]
fn test_unspecified_variant_is_contract_violation() {
    let err = parse_response(CAS3_SUCCESS, CasResponseType::Unspecified).unwrap_err();
    assert!(matches!(err, CasError::InvalidVariant { .. }));
    assert!(!err.is_malformed());
}

#[test]
fn test_strict_parser_configuration() {
    let config: ParserConfig = serde_json::from_str(r#"{"require_service_response": true}"#).unwrap();
    let parser = ResponseParser::with_config(config);
    let bare = "<cas:authenticationSuccess><cas:user>jdoe</cas:user></cas:authenticationSuccess>";
    assert!(parser.parse(bare, CasResponseType::ServiceValidate).is_err());
    assert!(parser.parse(CAS3_SUCCESS, CasResponseType::ServiceValidate).is_ok());
}

#[test]
fn test_parse_is_idempotent() {
    for (body, variant) in [
        (CAS3_SUCCESS, CasResponseType::ServiceValidate),
        (PROXY_VALIDATE_SUCCESS, CasResponseType::ProxyValidate),
        (FAILURE_SCENARIO, CasResponseType::ServiceValidate),
    ] {
        assert_eq!(parse_response(body, variant).unwrap(), parse_response(body, variant).unwrap());
    }
}

#[test]
fn test_shared_parser_across_threads() {
    let parser = Arc::new(ResponseParser::new());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let parser = Arc::clone(&parser);
            thread::spawn(move || {
                let body = format!("yes\nuser{}\n", i);
                let response = parser.parse(&body, CasResponseType::Validate).unwrap();
                assert_eq!(response.user_name(), Some(format!("user{}", i).as_str()));
                response
            })
        })
        .collect();

    let responses: Vec<CasResponse> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(responses.len(), 8);
    // Parsed values are plain data and can be shared read-only.
    let shared = Arc::new(responses);
    let reader = Arc::clone(&shared);
    thread::spawn(move || assert!(reader.iter().all(CasResponse::is_success)))
        .join()
        .unwrap();
}

#[test]
fn test_json_round_trip_of_parsed_response() {
    let response = parse_response(PROXY_VALIDATE_SUCCESS, CasResponseType::ProxyValidate).unwrap();
    let decoded = deserialize_response(&serialize_response(&response).unwrap()).unwrap();
    assert_eq!(decoded, response);
}
