//! Location of the CyREST instance a caller talks to.

/// Base URL used when neither an argument nor `CYREST_URL` is given.
pub const DEFAULT_BASE_URL: &str = "http://localhost";

/// Port used when neither an argument nor `CYREST_PORT` is given.
pub const DEFAULT_PORT: u16 = 1234;

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "CYREST_URL";

/// Environment variable overriding the port.
pub const PORT_ENV: &str = "CYREST_PORT";

/// Host and port of a CyREST instance.
///
/// Each field is resolved independently at construction: explicit argument,
/// then environment variable, then default. Nothing is validated here; a
/// malformed value only shows up as a transport error once a request is
/// attempted. The port is kept as text for that reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CyRestInstance {
    base_url: String,
    port: String,
}

impl CyRestInstance {
    /// Resolve against the process environment.
    pub fn new(base_url: Option<&str>, port: Option<u16>) -> Self {
        Self::resolve(base_url, port, |name| std::env::var(name).ok())
    }

    /// Resolve against an arbitrary variable lookup.
    pub fn resolve<F>(base_url: Option<&str>, port: Option<u16>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = match base_url {
            Some(url) => url.to_string(),
            None => lookup(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        };
        let port = match port {
            Some(port) => port.to_string(),
            None => lookup(PORT_ENV).unwrap_or_else(|| DEFAULT_PORT.to_string()),
        };
        Self { base_url, port }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    /// `base_url:port`, the prefix every endpoint is appended to.
    pub fn address(&self) -> String {
        format!("{}:{}", self.base_url, self.port)
    }
}

impl Default for CyRestInstance {
    fn default() -> Self {
        Self::new(None, None)
    }
}
