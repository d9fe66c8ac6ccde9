use crate::Error;
use alephium_api_client::{
    node::{
        self,
        contracts::multicall_contract::{
            CallContract, MultipleCallContract, MultipleCallContractResult,
        },
    },
    RequestLogger,
};
use std::{fmt, time::Duration};
use url::Url;

/// Method indices read by [`TokenInfoClient::get_token_info`]. By convention of token contracts
/// they return the name, the symbol and the decimals. Nothing here checks that convention.
const TOKEN_INFO_METHOD_INDICES: [i32; 3] = [0, 1, 2];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Scheme {
    #[default]
    Http,
    Https,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Http => f.write_str("http"),
            Scheme::Https => f.write_str("https"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub scheme: Scheme,
    /// Endpoint with the scheme prefix removed. Empty if the endpoint had neither
    /// `http://` nor `https://` prefix.
    pub host: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    /// Check that the node answers before any multicall is sent.
    pub probe: bool,
}

impl ClientConfig {
    /// An empty `api_key` means requests are sent without the api key header.
    pub fn new(endpoint: &str, api_key: &str, timeout_secs: u64) -> Self {
        let (scheme, host) = if let Some(host) = endpoint.strip_prefix("http://") {
            (Scheme::Http, host)
        } else if let Some(host) = endpoint.strip_prefix("https://") {
            (Scheme::Https, host)
        } else {
            (Scheme::default(), "")
        };

        Self {
            scheme,
            host: host.to_string(),
            api_key: (!api_key.is_empty()).then(|| api_key.to_string()),
            timeout: Duration::from_secs(timeout_secs),
            probe: false,
        }
    }

    pub fn probe(mut self, probe: bool) -> Self {
        self.probe = probe;
        self
    }

    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&format!("{}://{}", self.scheme, self.host))
    }
}

/// The single node capability the client relies on.
#[async_trait::async_trait]
pub trait MulticallApi: Send + Sync {
    async fn multicall_contract(
        &self,
        request: MultipleCallContract,
    ) -> Result<MultipleCallContractResult, alephium_api_client::Error>;
}

#[async_trait::async_trait]
impl MulticallApi for node::Client {
    async fn multicall_contract(
        &self,
        request: MultipleCallContract,
    ) -> Result<MultipleCallContractResult, alephium_api_client::Error> {
        node::Client::multicall_contract(self, request).await
    }
}

/// Reads token metadata through node multicalls. Every call is bounded by the configured
/// timeout.
pub struct TokenInfoClient<A = node::Client> {
    api: A,
    timeout: Duration,
}

impl TokenInfoClient<node::Client> {
    pub async fn new(config: ClientConfig) -> Result<Self, Error> {
        let base_url = config
            .base_url()
            .map_err(alephium_api_client::Error::from)?;
        let node_config = node::Config::new(base_url)
            .api_key_str(config.api_key.as_deref().unwrap_or_default())?
            .http_timeout(config.timeout)
            .probe_url(config.probe)
            .with_middleware(RequestLogger::new());
        tracing::debug!(config = ?node_config, "building node client");

        let api = node::Client::new(node_config).await?;
        Ok(Self::with_api(api, config.timeout))
    }
}

impl<A: MulticallApi> TokenInfoClient<A> {
    pub fn with_api(api: A, timeout: Duration) -> Self {
        Self { api, timeout }
    }

    /// Sends the batch as a single request. Results come back in the order of `batch.calls`.
    /// Either the whole batch succeeds or an error is returned.
    pub async fn multi_call_contract(
        &self,
        batch: MultipleCallContract,
    ) -> Result<MultipleCallContractResult, Error> {
        let n_calls = batch.calls.len();
        // The request future is dropped, and the http request aborted, once the deadline passes.
        let result = tokio::time::timeout(self.timeout, self.api.multicall_contract(batch))
            .await
            .map_err(|_| Error::Timeout(self.timeout))?;

        match result {
            Ok(result) => {
                tracing::debug!(
                    n_calls,
                    n_results = result.results.len(),
                    "multicall succeeded"
                );
                Ok(result)
            }
            Err(err) if err.is_timeout() => Err(Error::Timeout(self.timeout)),
            Err(err) => {
                tracing::warn!(n_calls, err = %err, "multicall failed");
                Err(err.into())
            }
        }
    }

    pub async fn get_token_info(
        &self,
        contract_address: &str,
        group_index: i32,
    ) -> Result<MultipleCallContractResult, Error> {
        self.multi_call_contract(token_info_calls(contract_address, group_index))
            .await
    }
}

/// One call per token metadata method, all against the same contract and group.
pub fn token_info_calls(contract_address: &str, group_index: i32) -> MultipleCallContract {
    MultipleCallContract {
        calls: TOKEN_INFO_METHOD_INDICES
            .into_iter()
            .map(|method_index| CallContract::new(group_index, contract_address, method_index))
            .collect(),
    }
}
