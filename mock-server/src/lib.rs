//! In-memory stand-in for a Cytoscape instance running the CyNDEx-2 app.
//!
//! Every route answers with the CI envelope `{"data": ..., "errors": [...]}`
//! except `/plain`, which exists to produce a body that is not JSON.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, Method, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const APP_NAME: &str = "CyNDEx-2";
pub const APP_VERSION: &str = "3.5.0";
pub const API_VERSION: &str = "1";

const ERROR_TYPE_PREFIX: &str = "urn:cytoscape:ci:ndex:v1:errors";
const NO_CURRENT_NETWORK: &str =
    "Current network does not exist. Select a network or specify an SUID.";

/// A network loaded into the mock session. Each network lives in its own
/// collection whose root SUID is `suid - 1`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Network {
    pub suid: u64,
    pub root_suid: u64,
    pub name: String,
    pub uuid: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NetworkSummary {
    pub suid: u64,
    pub name: Option<String>,
    pub uuid: Option<String>,
    pub props: Map<String, Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub current_network_suid: Option<u64>,
    pub current_root_network: NetworkSummary,
    pub members: Vec<NetworkSummary>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NdexBaseResponse {
    pub suid: u64,
    pub uuid: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportParameters {
    pub uuid: Option<String>,
    pub server_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveParameters {
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

#[derive(Debug, Default)]
pub struct Session {
    pub networks: BTreeMap<u64, Network>,
    pub current: Option<u64>,
    next_suid: u64,
}

impl Session {
    fn add(&mut self, name: String, uuid: Option<String>) -> Network {
        self.next_suid += 2;
        let network = Network {
            suid: self.next_suid,
            root_suid: self.next_suid - 1,
            name,
            uuid,
        };
        self.networks.insert(network.suid, network.clone());
        self.current = Some(network.suid);
        network
    }

    /// Look up a network by its own SUID or by its collection's root SUID.
    fn find(&self, suid: u64) -> Option<&Network> {
        self.networks
            .get(&suid)
            .or_else(|| self.networks.values().find(|n| n.root_suid == suid))
    }
}

pub type Db = Arc<RwLock<Session>>;

type Reply = (StatusCode, Json<Value>);

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Session::default()));
    Router::new()
        .route("/cyndex2/v1", get(app_info))
        .route("/cyndex2/v1/networks", post(import_network))
        .route("/cyndex2/v1/networks/cx", post(import_cx))
        .route(
            "/cyndex2/v1/networks/current",
            get(current_summary).post(save_current).put(update_current),
        )
        .route(
            "/cyndex2/v1/networks/{suid}",
            get(summary).post(save_network).put(update_network),
        )
        .route("/echo", get(echo).post(echo).put(echo))
        .route("/plain", get(plain).post(plain).put(plain))
        .route("/fail", get(failing).post(failing).put(failing))
        .route("/latin1", get(latin1))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn ok(data: impl Serialize) -> Reply {
    match serde_json::to_value(data) {
        Ok(data) => (StatusCode::OK, Json(json!({ "data": data, "errors": [] }))),
        Err(e) => fail(
            StatusCode::INTERNAL_SERVER_ERROR,
            4,
            format!("Could not create wrapped CI JSON. Error: {e}"),
        ),
    }
}

/// CI error reply; `code` picks the error type suffix.
fn fail(status: StatusCode, code: u32, message: impl Into<String>) -> Reply {
    let message = message.into();
    tracing::debug!(status = status.as_u16(), %message, "replying with ci error");
    let error = json!({
        "status": status.as_u16(),
        "type": format!("{ERROR_TYPE_PREFIX}:{code}"),
        "message": message,
        "link": "file:///log",
    });
    (status, Json(json!({ "data": {}, "errors": [error] })))
}

fn summarize(network: &Network, session: &Session) -> SummaryResponse {
    let member = NetworkSummary {
        suid: network.suid,
        name: Some(network.name.clone()),
        uuid: network.uuid.clone(),
        props: Map::from_iter([("name".to_string(), json!(network.name))]),
    };
    let root = NetworkSummary {
        suid: network.root_suid,
        name: Some(network.name.clone()),
        uuid: None,
        props: Map::from_iter([("shared name".to_string(), json!(network.name))]),
    };
    SummaryResponse {
        current_network_suid: session.current,
        current_root_network: root,
        members: vec![member],
    }
}

async fn app_info() -> Reply {
    ok(json!({
        "appName": APP_NAME,
        "appVersion": APP_VERSION,
        "apiVersion": API_VERSION,
        "description": "Mock NDEx client for Cytoscape",
    }))
}

async fn import_network(State(db): State<Db>, body: String) -> Reply {
    let params: ImportParameters = match serde_json::from_str(&body) {
        Ok(params) => params,
        Err(e) => return fail(StatusCode::BAD_REQUEST, 2, format!("Invalid parameters: {e}")),
    };
    let Some(uuid) = params.uuid.filter(|u| !u.is_empty()) else {
        return fail(StatusCode::BAD_REQUEST, 2, "NDEx network UUID is required.");
    };
    let name = format!("NDEx network {uuid}");
    let network = db.write().await.add(name, Some(uuid.clone()));
    ok(NdexBaseResponse {
        suid: network.suid,
        uuid,
    })
}

async fn import_cx(State(db): State<Db>, body: String) -> Reply {
    let cx: Value = match serde_json::from_str(&body) {
        Ok(cx) => cx,
        Err(e) => return fail(StatusCode::BAD_REQUEST, 2, format!("Invalid CX: {e}")),
    };
    if !cx.is_array() {
        return fail(StatusCode::BAD_REQUEST, 2, "CX document must be an array of aspects.");
    }
    let network = db.write().await.add("CX network".to_string(), None);
    ok(NdexBaseResponse {
        suid: network.suid,
        uuid: String::new(),
    })
}

async fn current_summary(State(db): State<Db>) -> Reply {
    let session = db.read().await;
    match session.current.and_then(|suid| session.find(suid)) {
        Some(network) => ok(summarize(network, &session)),
        None => fail(StatusCode::BAD_REQUEST, 2, NO_CURRENT_NETWORK),
    }
}

async fn summary(State(db): State<Db>, Path(suid): Path<u64>) -> Reply {
    let session = db.read().await;
    match session.find(suid) {
        Some(network) => ok(summarize(network, &session)),
        None => fail(
            StatusCode::BAD_REQUEST,
            1,
            format!("Cannot find collection/network with SUID {suid}."),
        ),
    }
}

async fn save_current(State(db): State<Db>, body: String) -> Reply {
    let current = db.read().await.current;
    match current {
        Some(suid) => save(db, suid, &body).await,
        None => fail(StatusCode::BAD_REQUEST, 2, NO_CURRENT_NETWORK),
    }
}

async fn save_network(State(db): State<Db>, Path(suid): Path<u64>, body: String) -> Reply {
    save(db, suid, &body).await
}

async fn save(db: Db, suid: u64, body: &str) -> Reply {
    let params: SaveParameters = match serde_json::from_str(body) {
        Ok(params) => params,
        Err(e) => return fail(StatusCode::BAD_REQUEST, 2, format!("Invalid parameters: {e}")),
    };
    let mut session = db.write().await;
    let Some(network) = session.networks.get_mut(&suid) else {
        return fail(
            StatusCode::BAD_REQUEST,
            2,
            format!("Network/Collection with SUID {suid} does not exist."),
        );
    };
    if let Some(name) = params.metadata.get("name") {
        network.name = name.clone();
    }
    let uuid = Uuid::new_v4().to_string();
    network.uuid = Some(uuid.clone());
    ok(NdexBaseResponse { suid, uuid })
}

async fn update_current(State(db): State<Db>) -> Reply {
    let current = db.read().await.current;
    match current {
        Some(suid) => update(db, suid).await,
        None => fail(StatusCode::BAD_REQUEST, 2, NO_CURRENT_NETWORK),
    }
}

async fn update_network(State(db): State<Db>, Path(suid): Path<u64>) -> Reply {
    update(db, suid).await
}

async fn update(db: Db, suid: u64) -> Reply {
    let session = db.read().await;
    let Some(network) = session.networks.get(&suid) else {
        return fail(
            StatusCode::BAD_REQUEST,
            2,
            format!("Network/Collection with SUID {suid} does not exist."),
        );
    };
    match &network.uuid {
        Some(uuid) => ok(NdexBaseResponse {
            suid,
            uuid: uuid.clone(),
        }),
        None => fail(
            StatusCode::BAD_REQUEST,
            3,
            format!("Network with SUID {suid} has no NDEx UUID and cannot be updated."),
        ),
    }
}

/// Reflect the request back as `data`.
async fn echo(
    method: Method,
    headers: HeaderMap,
    Query(query): Query<BTreeMap<String, String>>,
    body: String,
) -> Reply {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    ok(json!({
        "method": method.as_str(),
        "query": query,
        "contentType": header("content-type"),
        "accept": header("accept"),
        "body": body,
    }))
}

async fn plain() -> (StatusCode, &'static str) {
    (StatusCode::BAD_GATEWAY, "Bad Gateway")
}

/// CI error with the status picked by `?status=` (default 500).
async fn failing(Query(query): Query<BTreeMap<String, String>>) -> Reply {
    let status = query
        .get("status")
        .and_then(|s| s.parse::<u16>().ok())
        .and_then(|s| StatusCode::from_u16(s).ok())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    fail(status, 5, "Requested failure.")
}

/// A body that is not valid UTF-8.
async fn latin1() -> (StatusCode, Vec<u8>) {
    (StatusCode::OK, b"caf\xe9".to_vec())
}
