//! CAS 2.0/3.0 XML responses (`/serviceValidate`, `/proxyValidate`, `/proxy`).
//!
//! The body is read with `quick_xml` into a small element tree, then the
//! outcome element is interpreted according to the declared variant. Elements
//! are matched by local name within the CAS namespace: `cas:`-prefixed,
//! unprefixed and undeclared-prefix elements all count, while elements bound
//! to another namespace are never taken for CAS elements.

use super::BYTE_ORDER_MARK;
use crate::builders::CasResponseBuilder;
use crate::config::ParserConfig;
use crate::error::{CasError, Result};
use crate::types::{CasResponse, CasResponseType};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;
use tracing::debug;

pub(crate) const CAS_NAMESPACE: &str = "http://www.yale.edu/tp/cas";

/// Deepest element nesting accepted. CAS documents need five levels at most.
pub(crate) const MAX_DEPTH: usize = 32;

const SERVICE_RESPONSE: &str = "serviceResponse";
const AUTHENTICATION_SUCCESS: &str = "authenticationSuccess";
const AUTHENTICATION_FAILURE: &str = "authenticationFailure";
const PROXY_SUCCESS: &str = "proxySuccess";
const PROXY_FAILURE: &str = "proxyFailure";
const USER: &str = "user";
const PROXY_GRANTING_TICKET: &str = "proxyGrantingTicket";
const PROXY_TICKET: &str = "proxyTicket";
const PROXIES: &str = "proxies";
const PROXY: &str = "proxy";
const ATTRIBUTES: &str = "attributes";
// <cas:attribute name=".." value=".."/> as emitted by older CAS servers.
const LEGACY_ATTRIBUTE: &str = "attribute";

#[derive(Debug)]
enum Node {
    Text(String),
    Element(Element),
}

/// One element of the response document.
#[derive(Debug, Default)]
struct Element {
    /// Local name, without namespace prefix.
    name: String,
    /// False when the element is bound to a namespace other than CAS.
    cas: bool,
    attributes: Vec<(String, String)>,
    /// Own text and child elements, in document order.
    content: Vec<Node>,
}

impl Element {
    fn from_start(start: &BytesStart<'_>, cas: bool) -> Result<Self> {
        let name = std::str::from_utf8(start.local_name().as_ref())?.to_string();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            if attr.key.as_namespace_binding().is_some() {
                continue;
            }
            let key = std::str::from_utf8(attr.key.local_name().as_ref())?.to_string();
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self { name, cas, attributes, ..Self::default() })
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn children(&self) -> impl Iterator<Item = &Element> {
        self.content.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children().filter(move |child| child.cas && child.name == name)
    }

    /// Text content of the element and its descendants, trimmed at both ends.
    fn text(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text.trim().to_string()
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.content {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Element(child) => child.collect_text(out),
            }
        }
    }
}

/// Reads the whole body into an element tree and returns the document element.
fn read_document(data: &str) -> Result<Element> {
    let mut reader = NsReader::from_str(data.trim_start_matches(BYTE_ORDER_MARK));

    let mut open: Vec<Element> = Vec::new();
    let mut document: Option<Element> = None;

    loop {
        let position = reader.buffer_position();
        let (namespace, event) = reader
            .read_resolved_event()
            .map_err(|e| CasError::xml(format!("Response body at byte {}", position), e))?;
        let cas = in_cas_namespace(&namespace);

        match event {
            Event::Start(start) => {
                check_depth(&open)?;
                open.push(Element::from_start(&start, cas)?);
            }
            Event::Empty(start) => {
                check_depth(&open)?;
                let element = Element::from_start(&start, cas)?;
                attach(&mut open, &mut document, element)?;
            }
            Event::End(_) => {
                let element = open
                    .pop()
                    .ok_or_else(|| CasError::malformed("end tag without a matching start tag"))?;
                attach(&mut open, &mut document, element)?;
            }
            Event::Text(text) => append_text(&mut open, text.unescape()?.into_owned())?,
            Event::CData(cdata) => {
                let raw = cdata.into_inner();
                append_text(&mut open, std::str::from_utf8(&raw)?.to_string())?;
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype.
            _ => {}
        }
    }

    if let Some(unclosed) = open.last() {
        return Err(CasError::malformed(format!("unclosed element <{}>", unclosed.name)));
    }
    document.ok_or_else(|| CasError::malformed("response contains no XML element"))
}

fn in_cas_namespace(namespace: &ResolveResult<'_>) -> bool {
    match namespace {
        ResolveResult::Bound(Namespace(uri)) => *uri == CAS_NAMESPACE.as_bytes(),
        // No binding, or a prefix (typically `cas:`) that was never declared.
        ResolveResult::Unbound | ResolveResult::Unknown(_) => true,
    }
}

fn check_depth(open: &[Element]) -> Result<()> {
    if open.len() >= MAX_DEPTH {
        return Err(CasError::malformed(format!(
            "elements nested deeper than {} levels",
            MAX_DEPTH
        )));
    }
    Ok(())
}

fn attach(open: &mut [Element], document: &mut Option<Element>, element: Element) -> Result<()> {
    match open.last_mut() {
        Some(parent) => parent.content.push(Node::Element(element)),
        None if document.is_some() => {
            return Err(CasError::malformed("response contains more than one document element"));
        }
        None => *document = Some(element),
    }
    Ok(())
}

fn append_text(open: &mut [Element], text: String) -> Result<()> {
    match open.last_mut() {
        Some(parent) => parent.content.push(Node::Text(text)),
        None if text.trim().is_empty() => {}
        None => return Err(CasError::malformed("text found outside the document element")),
    }
    Ok(())
}

/// Finds the outcome element: the single child of `<cas:serviceResponse>`,
/// or the document element itself when the wrapper is absent and allowed.
fn locate_outcome<'a>(
    document: &'a Element,
    variant: CasResponseType,
    config: &ParserConfig,
) -> Result<&'a Element> {
    if document.cas && document.name == SERVICE_RESPONSE {
        let mut outcomes = document.children();
        let outcome = outcomes
            .next()
            .ok_or_else(|| CasError::missing_element("cas:serviceResponse outcome element"))?;
        if outcomes.next().is_some() {
            return Err(CasError::malformed(
                "<cas:serviceResponse> must contain exactly one outcome element",
            ));
        }
        Ok(outcome)
    } else if config.require_service_response {
        Err(CasError::unexpected_root(document.name.as_str(), variant))
    } else {
        Ok(document)
    }
}

/// Parses an XML response body for one of the CAS 2.0+ variants.
pub(crate) fn parse_xml(
    data: &str,
    variant: CasResponseType,
    config: &ParserConfig,
) -> Result<CasResponse> {
    let document = read_document(data)?;
    let outcome = locate_outcome(&document, variant, config)?;
    if !outcome.cas {
        return Err(CasError::unexpected_root(outcome.name.as_str(), variant));
    }
    let builder = CasResponseBuilder::new(data).response_type(variant);

    match (variant, outcome.name.as_str()) {
        (CasResponseType::ServiceValidate | CasResponseType::ProxyValidate, AUTHENTICATION_SUCCESS) => {
            read_authentication_success(builder, outcome, variant, config)
        }
        (CasResponseType::ServiceValidate | CasResponseType::ProxyValidate, AUTHENTICATION_FAILURE)
        | (CasResponseType::Proxy, PROXY_FAILURE) => read_failure(builder, outcome),
        (CasResponseType::Proxy, PROXY_SUCCESS) => read_proxy_success(builder, outcome),
        (_, other) => Err(CasError::unexpected_root(other, variant)),
    }
}

fn read_authentication_success(
    mut builder: CasResponseBuilder,
    outcome: &Element,
    variant: CasResponseType,
    config: &ParserConfig,
) -> Result<CasResponse> {
    let mut users = outcome.children_named(USER);
    let user = users
        .next()
        .map(Element::text)
        .filter(|user| !user.is_empty())
        .ok_or_else(|| CasError::missing_element("cas:user"))?;
    if users.next().is_some() {
        return Err(CasError::malformed("authentication success names more than one cas:user"));
    }
    builder = builder.user_name(user);

    for ticket in outcome.children_named(PROXY_GRANTING_TICKET) {
        let ticket = ticket.text();
        if !ticket.is_empty() {
            builder = builder.proxy_granting_ticket(ticket);
        }
    }

    for proxies in outcome.children_named(PROXIES) {
        if variant != CasResponseType::ProxyValidate {
            debug!(%variant, "ignoring proxy chain on non-proxy validation response");
            continue;
        }
        for proxy in proxies.children_named(PROXY) {
            let proxy = proxy.text();
            if !proxy.is_empty() {
                builder = builder.add_proxy(proxy);
            }
        }
    }

    for attributes in outcome.children_named(ATTRIBUTES) {
        for attribute in attributes.children() {
            if !attribute.cas {
                debug!(attribute = %attribute.name, "ignoring attribute outside the CAS namespace");
                continue;
            }
            let (name, value) = match (attribute.name.as_str(), attribute.attribute("name")) {
                (LEGACY_ATTRIBUTE, Some(name)) => (
                    name,
                    attribute
                        .attribute("value")
                        .map(str::to_string)
                        .unwrap_or_else(|| attribute.text()),
                ),
                (name, _) => (name, attribute.text()),
            };
            builder = builder.attribute(name.to_string(), value, config.duplicate_attributes);
        }
    }

    builder.build()
}

fn read_proxy_success(mut builder: CasResponseBuilder, outcome: &Element) -> Result<CasResponse> {
    let mut found = false;
    for ticket in outcome.children_named(PROXY_TICKET) {
        let ticket = ticket.text();
        if !ticket.is_empty() {
            builder = builder.proxy_ticket(ticket);
            found = true;
        }
    }
    if !found {
        return Err(CasError::missing_element("cas:proxyTicket"));
    }
    builder.build()
}

fn read_failure(builder: CasResponseBuilder, outcome: &Element) -> Result<CasResponse> {
    let code = outcome
        .attribute("code")
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .ok_or_else(|| CasError::missing_element(format!("code attribute of cas:{}", outcome.name)))?;
    builder.failure(code.to_string(), outcome.text()).build()
}
