//! DTOs for the CyNDEx-2 REST resource.
//!
//! # Design
//! Field names follow the app's camelCase JSON. These types mirror the
//! mock-server's schema but are defined independently; integration tests
//! catch any drift between the two crates. Optional request fields are
//! omitted from the JSON when unset.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Basic information about the CyNDEx-2 app and its REST API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppInfo {
    pub app_name: String,
    pub app_version: String,
    pub api_version: String,
    pub description: String,
}

/// SUID of the affected Cytoscape network and its NDEx UUID. The UUID is
/// empty when the network did not come from NDEx.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NdexBaseResponse {
    pub suid: u64,
    pub uuid: String,
}

/// One network (or collection root) in a summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkSummary {
    pub suid: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub props: Map<String, Value>,
}

/// A collection root together with its member networks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    #[serde(default)]
    pub current_network_suid: Option<u64>,
    pub current_root_network: NetworkSummary,
    #[serde(default)]
    pub members: Vec<NetworkSummary>,
}

/// Request payload for importing a network from NDEx.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportParameters {
    pub uuid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
}

impl ImportParameters {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            ..Self::default()
        }
    }
}

/// Credentials and target server for updating a network already on NDEx.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicSaveParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

/// Request payload for saving a network to NDEx as a new entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveParameters {
    #[serde(flatten)]
    pub basic: BasicSaveParameters,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

/// Cytoscape CI error descriptor, the usual shape of an envelope's `errors`
/// entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CiError {
    pub status: u16,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    #[serde(default)]
    pub link: Option<String>,
}
