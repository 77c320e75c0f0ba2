//! HTTP requests and responses described as plain data.
//!
//! # Design
//! `CyCaller` builds an `HttpRequest`, a `Transport` turns it into an
//! `HttpResponse`, and `CyCaller` decodes that. Keeping both sides as owned
//! data means the build and decode halves can be tested without a socket.

/// HTTP method for a request. CyREST calls only ever use these three.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
        }
    }
}

/// Headers sent on every call, regardless of verb.
pub const JSON_HEADERS: [(&str, &str); 2] = [
    ("Content-Type", "application/json"),
    ("Accept", "application/json"),
];

/// An HTTP request described as plain data.
///
/// `url` is the full target (`base_url:port` + endpoint). `query` is only
/// populated for GET, `body` only for POST/PUT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// `body` is the payload decoded as UTF-8; invalid sequences are replaced
/// with U+FFFD by the transport.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// A response with no headers, handy for transports and tests.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// First value of a header, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_ignores_case() {
        let response = HttpResponse {
            status: 200,
            headers: vec![
                ("content-type".to_string(), "application/json".to_string()),
                ("x-dup".to_string(), "first".to_string()),
                ("X-Dup".to_string(), "second".to_string()),
            ],
            body: String::new(),
        };
        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert_eq!(response.header("x-dup"), Some("first"));
        assert_eq!(response.header("accept"), None);
    }
}
