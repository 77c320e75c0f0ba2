//! Request building, execution and envelope unwrapping for CyREST.
//!
//! # Design
//! Every public verb funnels into `execute`, which is `build_request`, then
//! one `Transport::execute`, then `parse_response`. Building and parsing are
//! public and I/O free, so the request shape and the envelope rules can be
//! checked without a server. `CyCaller` carries no mutable state between
//! calls.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::CyRestInstance;
use crate::envelope::Envelope;
use crate::error::CyRestError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, JSON_HEADERS};
use crate::transport::{Transport, UreqTransport};

/// Blocking, stateless caller for one CyREST instance.
///
/// Each call performs exactly one HTTP request and blocks until it completes.
#[derive(Debug, Clone)]
pub struct CyCaller<T = UreqTransport> {
    instance: CyRestInstance,
    transport: T,
}

impl CyCaller {
    /// Caller for the instance resolved from the environment and defaults.
    pub fn new() -> Self {
        Self::with_instance(CyRestInstance::default())
    }

    pub fn with_instance(instance: CyRestInstance) -> Self {
        Self::with_transport(instance, UreqTransport::new())
    }
}

impl Default for CyCaller {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> CyCaller<T> {
    pub fn with_transport(instance: CyRestInstance, transport: T) -> Self {
        Self {
            instance,
            transport,
        }
    }

    pub fn instance(&self) -> &CyRestInstance {
        &self.instance
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// GET `endpoint` with `params` as the query string; returns `data`.
    pub fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Value, CyRestError> {
        self.execute(HttpMethod::Get, endpoint, None, params)
    }

    /// POST `data` unmodified as the body; returns `data` of the envelope.
    pub fn post(&self, endpoint: &str, data: Option<&str>) -> Result<Value, CyRestError> {
        self.execute(HttpMethod::Post, endpoint, data, &[])
    }

    /// PUT `data` unmodified as the body; returns `data` of the envelope.
    pub fn put(&self, endpoint: &str, data: Option<&str>) -> Result<Value, CyRestError> {
        self.execute(HttpMethod::Put, endpoint, data, &[])
    }

    /// Like `get`, then deserializes `data` into `R`.
    pub fn get_as<R>(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<R, CyRestError>
    where
        R: DeserializeOwned,
    {
        from_data(self.get(endpoint, params)?)
    }

    /// POST `body` serialized as JSON, then deserializes `data` into `R`.
    pub fn post_json<B, R>(&self, endpoint: &str, body: &B) -> Result<R, CyRestError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = to_body(body)?;
        from_data(self.post(endpoint, Some(&body))?)
    }

    /// PUT `body` serialized as JSON, then deserializes `data` into `R`.
    pub fn put_json<B, R>(&self, endpoint: &str, body: &B) -> Result<R, CyRestError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = to_body(body)?;
        from_data(self.put(endpoint, Some(&body))?)
    }

    /// The request a call would send, without sending it.
    ///
    /// The URL is plain concatenation of base URL, `:`, port and `endpoint`.
    /// Query parameters are only attached to GET, the body only to POST/PUT.
    pub fn build_request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        data: Option<&str>,
        params: &[(&str, &str)],
    ) -> HttpRequest {
        let (query, body) = match method {
            HttpMethod::Get => (
                params
                    .iter()
                    .map(|(key, value)| (key.to_string(), value.to_string()))
                    .collect(),
                None,
            ),
            HttpMethod::Post | HttpMethod::Put => (Vec::new(), data.map(str::to_string)),
        };
        HttpRequest {
            method,
            url: format!("{}{endpoint}", self.instance.address()),
            headers: JSON_HEADERS
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            query,
            body,
        }
    }

    /// Unwrap the envelope of a response: `data` on success, `Api` when the
    /// envelope lists errors, `Decode` when the body is not an envelope. The
    /// status code is not consulted.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Value, CyRestError> {
        let status = response.status;
        let envelope = match Envelope::decode(&response.body) {
            Ok(envelope) => envelope,
            Err(source) => {
                return Err(CyRestError::Decode {
                    status,
                    content: response.body,
                    source,
                })
            }
        };
        envelope.into_result().map_err(|errors| {
            tracing::debug!(status, count = errors.len(), "cyrest envelope carried errors");
            CyRestError::Api { status, errors }
        })
    }

    fn execute(
        &self,
        method: HttpMethod,
        endpoint: &str,
        data: Option<&str>,
        params: &[(&str, &str)],
    ) -> Result<Value, CyRestError> {
        let request = self.build_request(method, endpoint, data, params);
        tracing::debug!(method = method.as_str(), url = %request.url, "cyrest request");
        let response = self.transport.execute(&request)?;
        tracing::debug!(
            status = response.status,
            content_type = response.header("content-type").unwrap_or(""),
            "cyrest response"
        );
        self.parse_response(response)
    }
}

fn to_body<B: Serialize + ?Sized>(body: &B) -> Result<String, CyRestError> {
    serde_json::to_string(body).map_err(|e| CyRestError::Serialization(e.to_string()))
}

pub(crate) fn from_data<R: DeserializeOwned>(data: Value) -> Result<R, CyRestError> {
    serde_json::from_value(data).map_err(|e| CyRestError::Deserialization(e.to_string()))
}
