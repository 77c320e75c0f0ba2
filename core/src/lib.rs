//! Blocking client for CyREST, the local HTTP control interface of Cytoscape.
//!
//! # Overview
//! `CyCaller` issues one GET/POST/PUT per call against a `CyRestInstance`
//! (base URL + port), sends JSON headers, and unwraps the `{data, errors}`
//! envelope every enveloped CyREST resource answers with.
//!
//! # Design
//! - `CyRestInstance` is resolved once (argument > environment > default)
//!   and never mutated afterwards.
//! - Requests and responses are plain data (`HttpRequest` / `HttpResponse`).
//!   `CyCaller::build_request` and `CyCaller::parse_response` never touch the
//!   network; only the `Transport` in between does.
//! - The envelope is decoded in exactly one place (`Envelope::decode`).
//! - DTOs for the CyNDEx-2 resource are defined independently from the
//!   mock-server crate; integration tests catch schema drift.

pub mod caller;
pub mod config;
pub mod cyndex;
pub mod envelope;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use caller::CyCaller;
pub use config::CyRestInstance;
pub use envelope::{Envelope, EnvelopeError};
pub use error::CyRestError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{
    AppInfo, BasicSaveParameters, CiError, ImportParameters, NdexBaseResponse, NetworkSummary,
    SaveParameters, SummaryResponse,
};
