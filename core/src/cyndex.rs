//! Typed operations for the CyNDEx-2 app's REST resource.
//!
//! These are thin wrappers over `CyCaller::get_as` / `post_json` /
//! `put_json`; the same envelope rules apply. An unknown SUID or a missing
//! current network comes back as `CyRestError::Api` with CI error entries.

use crate::caller::{from_data, CyCaller};
use crate::error::CyRestError;
use crate::transport::Transport;
use crate::types::{
    AppInfo, BasicSaveParameters, ImportParameters, NdexBaseResponse, SaveParameters,
    SummaryResponse,
};

/// Root of the CyNDEx-2 resource.
pub const CYNDEX_ROOT: &str = "/cyndex2/v1";

/// Path of a network under the CyNDEx-2 resource.
pub fn network_path(suid: u64) -> String {
    format!("{CYNDEX_ROOT}/networks/{suid}")
}

fn networks_path() -> String {
    format!("{CYNDEX_ROOT}/networks")
}

fn current_path() -> String {
    format!("{CYNDEX_ROOT}/networks/current")
}

impl<T: Transport> CyCaller<T> {
    pub fn app_info(&self) -> Result<AppInfo, CyRestError> {
        self.get_as(CYNDEX_ROOT, &[])
    }

    /// Load a network from NDEx into Cytoscape.
    pub fn import_network(
        &self,
        params: &ImportParameters,
    ) -> Result<NdexBaseResponse, CyRestError> {
        self.post_json(&networks_path(), params)
    }

    /// Load a network from a CX document. The document is sent as is.
    pub fn import_cx(&self, cx: &str) -> Result<NdexBaseResponse, CyRestError> {
        let data = self.post(&format!("{CYNDEX_ROOT}/networks/cx"), Some(cx))?;
        from_data(data)
    }

    pub fn current_network_summary(&self) -> Result<SummaryResponse, CyRestError> {
        self.get_as(&current_path(), &[])
    }

    pub fn network_summary(&self, suid: u64) -> Result<SummaryResponse, CyRestError> {
        self.get_as(&network_path(suid), &[])
    }

    /// Save the current network to NDEx as a new entry.
    pub fn save_current_network(
        &self,
        params: &SaveParameters,
    ) -> Result<NdexBaseResponse, CyRestError> {
        self.post_json(&current_path(), params)
    }

    /// Save a network to NDEx as a new entry.
    pub fn save_network(
        &self,
        suid: u64,
        params: &SaveParameters,
    ) -> Result<NdexBaseResponse, CyRestError> {
        self.post_json(&network_path(suid), params)
    }

    /// Overwrite the NDEx entry the current network was loaded from.
    pub fn update_current_network(
        &self,
        params: &BasicSaveParameters,
    ) -> Result<NdexBaseResponse, CyRestError> {
        self.put_json(&current_path(), params)
    }

    /// Overwrite the NDEx entry a network was loaded from.
    pub fn update_network(
        &self,
        suid: u64,
        params: &BasicSaveParameters,
    ) -> Result<NdexBaseResponse, CyRestError> {
        self.put_json(&network_path(suid), params)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use serde_json::{json, Value};

    use super::*;
    use crate::config::CyRestInstance;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    struct Canned {
        body: String,
        seen: RefCell<Vec<HttpRequest>>,
    }

    impl Transport for Canned {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, CyRestError> {
            self.seen.borrow_mut().push(request.clone());
            Ok(HttpResponse::new(200, self.body.clone()))
        }
    }

    fn caller(data: Value) -> CyCaller<Canned> {
        let body = json!({"data": data, "errors": []}).to_string();
        CyCaller::with_transport(
            CyRestInstance::resolve(None, None, |_| None),
            Canned {
                body,
                seen: RefCell::new(Vec::new()),
            },
        )
    }

    fn last(c: &CyCaller<Canned>) -> HttpRequest {
        c.transport().seen.borrow().last().cloned().unwrap()
    }

    #[test]
    fn app_info_reads_root() {
        let c = caller(json!({
            "appName": "CyNDEx-2",
            "appVersion": "3.5.0",
            "apiVersion": "1",
            "description": "NDEx client for Cytoscape"
        }));
        let info = c.app_info().unwrap();
        assert_eq!(info.app_name, "CyNDEx-2");
        assert_eq!(info.api_version, "1");

        let req = last(&c);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:1234/cyndex2/v1");
    }

    #[test]
    fn import_network_posts_camel_case_parameters() {
        let c = caller(json!({"suid": 52, "uuid": "abc"}));
        let params = ImportParameters {
            server_url: Some("https://www.ndexbio.org/v2".to_string()),
            access_key: Some("key".to_string()),
            ..ImportParameters::new("abc")
        };
        let res = c.import_network(&params).unwrap();
        assert_eq!(res, NdexBaseResponse { suid: 52, uuid: "abc".to_string() });

        let req = last(&c);
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:1234/cyndex2/v1/networks");
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({"uuid": "abc", "serverUrl": "https://www.ndexbio.org/v2", "accessKey": "key"})
        );
    }

    #[test]
    fn import_cx_sends_document_verbatim() {
        let c = caller(json!({"suid": 7, "uuid": ""}));
        let cx = r#"[{"numberVerification":[{"longNumber":281474976710655}]}]"#;
        let res = c.import_cx(cx).unwrap();
        assert_eq!(res.suid, 7);
        assert!(res.uuid.is_empty());
        assert_eq!(last(&c).body.as_deref(), Some(cx));
        assert_eq!(last(&c).url, "http://localhost:1234/cyndex2/v1/networks/cx");
    }

    #[test]
    fn summaries_target_current_or_suid() {
        let summary = json!({
            "currentNetworkSuid": 53,
            "currentRootNetwork": {"suid": 52, "name": "root", "props": {"shared name": "root"}},
            "members": [{"suid": 53, "name": "net", "uuid": "abc", "props": {}}]
        });
        let c = caller(summary);

        let res = c.current_network_summary().unwrap();
        assert_eq!(res.current_network_suid, Some(53));
        assert_eq!(res.current_root_network.uuid, None);
        assert_eq!(res.members[0].uuid.as_deref(), Some("abc"));
        assert_eq!(last(&c).url, "http://localhost:1234/cyndex2/v1/networks/current");

        c.network_summary(52).unwrap();
        assert_eq!(last(&c).url, "http://localhost:1234/cyndex2/v1/networks/52");
    }

    #[test]
    fn save_posts_and_update_puts() {
        let c = caller(json!({"suid": 53, "uuid": "def"}));
        let save = SaveParameters {
            basic: BasicSaveParameters {
                username: Some("user".to_string()),
                password: Some("secret".to_string()),
                is_public: Some(true),
                ..BasicSaveParameters::default()
            },
            metadata: HashMap::from([("name".to_string(), "My network".to_string())]),
        };

        c.save_network(53, &save).unwrap();
        let req = last(&c);
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:1234/cyndex2/v1/networks/53");
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({
                "username": "user",
                "password": "secret",
                "isPublic": true,
                "metadata": {"name": "My network"}
            })
        );

        c.save_current_network(&SaveParameters::default()).unwrap();
        assert_eq!(last(&c).url, "http://localhost:1234/cyndex2/v1/networks/current");
        assert_eq!(last(&c).body.as_deref(), Some("{}"));

        c.update_network(53, &save.basic).unwrap();
        assert_eq!(last(&c).method, HttpMethod::Put);
        assert_eq!(last(&c).url, "http://localhost:1234/cyndex2/v1/networks/53");

        c.update_current_network(&BasicSaveParameters::default()).unwrap();
        assert_eq!(last(&c).method, HttpMethod::Put);
        assert_eq!(last(&c).url, "http://localhost:1234/cyndex2/v1/networks/current");
    }
}
