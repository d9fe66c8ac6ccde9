use super::{
    config,
    contracts::multicall_contract::{
        MulticallContract, MultipleCallContract, MultipleCallContractResult,
    },
    infos::node_info::{NodeInfo, NodeInfoResponse},
};
use crate::{Endpoint, Error, HttpApiClient, HttpApiClientConfig};
use reqwest::header::{HeaderMap, HeaderName};

pub const API_KEY_HEADER: &str = "X-API-KEY";

#[derive(Clone)]
pub struct Client {
    http_client: HttpApiClient,
}

impl Client {
    pub async fn new(config: config::Config) -> Result<Self, Error> {
        let mut default_headers = HeaderMap::new();
        if let Some(api_key) = config.api_key {
            default_headers.insert(HeaderName::from_static("x-api-key"), api_key);
        }

        let http_client_config = HttpApiClientConfig {
            http_timeout: config.http_timeout,
            default_headers,
            middlewares: config.middlewares,
        };
        let http_client = HttpApiClient::new(config.url, http_client_config)?;

        let client = Self { http_client };

        if config.probe_url {
            let info = client.node_info().await.inspect_err(|err| {
                tracing::error!(err = %err, "cannot establish a connection with the node")
            })?;
            tracing::info!(
                release_version = %info.build_info.release_version,
                "connected to the node"
            );
        }

        Ok(client)
    }

    pub async fn request<EndpointType: Endpoint>(
        &self,
        endpoint: &EndpointType,
    ) -> Result<<EndpointType as Endpoint>::Response, Error> {
        self.http_client.request(endpoint).await
    }

    pub async fn multicall_contract(
        &self,
        request: MultipleCallContract,
    ) -> Result<MultipleCallContractResult, Error> {
        self.request(&MulticallContract { request }).await
    }

    pub async fn node_info(&self) -> Result<NodeInfoResponse, Error> {
        self.request(&NodeInfo).await
    }
}
