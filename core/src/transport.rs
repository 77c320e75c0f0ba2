//! The I/O seam between `CyCaller` and the network.

use std::fmt;

use ureq::http::Uri;
use ureq::{Agent, RequestBuilder};

use crate::error::CyRestError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes one `HttpRequest` and returns whatever the server answered.
///
/// Implementations must not interpret the status code; 4xx/5xx come back as
/// `Ok` so the envelope can be decoded.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, CyRestError>;
}

/// Blocking transport backed by a `ureq` agent.
///
/// No timeout is configured: a call lasts as long as the underlying request.
/// Idle connections are not kept, so every call opens its own connection.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .max_idle_connections(0)
            .max_idle_connections_per_host(0)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, CyRestError> {
        let url = request.url.as_str();
        check_port(url)?;
        let body = request.body.as_deref().map(str::as_bytes);

        let result = match (request.method, body) {
            (HttpMethod::Get, _) => decorate(self.agent.get(url), request).call(),
            (HttpMethod::Post, Some(body)) => decorate(self.agent.post(url), request).send(body),
            (HttpMethod::Post, None) => decorate(self.agent.post(url), request).send_empty(),
            (HttpMethod::Put, Some(body)) => decorate(self.agent.put(url), request).send(body),
            (HttpMethod::Put, None) => decorate(self.agent.put(url), request).send_empty(),
        };
        let mut response = result?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let bytes = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()?;

        Ok(HttpResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}

/// Reject a URL whose authority carries a port that is not a number.
///
/// The URI parser accepts `host:not-a-port` and ureq then falls back to the
/// scheme's default port, so this has to be caught before sending.
fn check_port(url: &str) -> Result<(), ureq::Error> {
    let uri: Uri = url
        .parse()
        .map_err(|e| ureq::Error::BadUri(format!("{url}: {e}")))?;
    let Some(authority) = uri.authority() else {
        return Ok(());
    };
    let host_port = authority
        .as_str()
        .rsplit_once('@')
        .map_or(authority.as_str(), |(_, rest)| rest);
    // Only text after an IPv6 literal's closing bracket can be a port.
    let after_host = host_port.rsplit_once(']').map_or(host_port, |(_, rest)| rest);
    match after_host.rsplit_once(':') {
        Some((_, port)) if port.parse::<u16>().is_err() => {
            Err(ureq::Error::BadUri(format!("{url}: invalid port `{port}`")))
        }
        _ => Ok(()),
    }
}

/// Copy headers and query parameters onto a ureq builder.
fn decorate<B>(mut builder: RequestBuilder<B>, request: &HttpRequest) -> RequestBuilder<B> {
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    for (key, value) in &request.query {
        builder = builder.query(key, value);
    }
    builder
}
