//! `/infos` endpoints of the node.

use crate::Endpoint;
use reqwest::Method;
use serde::Deserialize;

pub mod node_info {
    use super::*;

    pub struct NodeInfo;

    impl Endpoint for NodeInfo {
        type Response = NodeInfoResponse;

        fn method(&self) -> Method {
            Method::GET
        }

        fn path(&self) -> String {
            "/infos/node".to_string()
        }
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct NodeInfoResponse {
        pub build_info: BuildInfo,
        pub upnp: bool,
        pub external_address: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BuildInfo {
        pub release_version: String,
        pub commit: String,
    }
}
