mod endpoint;
mod middleware;

#[cfg(feature = "node")]
pub mod node;

pub use endpoint::{serialize_body, Endpoint};
pub use middleware::RequestLogger;
pub use reqwest::StatusCode;

use reqwest::{header::HeaderMap, Response};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, Middleware};
use std::{sync::Arc, time::Duration};
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid base url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("invalid header value: {0}")]
    InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),
    #[error("cannot build http client: {0}")]
    ClientInitialization(#[source] reqwest::Error),
    #[error("request failed: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("middleware error: {0:#}")]
    Middleware(anyhow::Error),
    #[error("invalid status code {status_code}: {message}")]
    InvalidStatusCode {
        status_code: StatusCode,
        message: String,
    },
    #[error("response deserialization failed: {0}")]
    Deserialization(#[from] serde_path_to_error::Error<serde_json::Error>),
}

impl From<reqwest_middleware::Error> for Error {
    fn from(value: reqwest_middleware::Error) -> Self {
        match value {
            reqwest_middleware::Error::Reqwest(err) => Error::Reqwest(err),
            reqwest_middleware::Error::Middleware(err) => Error::Middleware(err),
        }
    }
}

impl Error {
    /// Whether the request was aborted by the http client's own timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Reqwest(err) if err.is_timeout())
    }
}

#[derive(Clone)]
pub struct HttpApiClientConfig {
    /// The maximum time limit for an API request. If a request takes longer than this, it will be
    /// cancelled.
    pub http_timeout: Duration,
    /// Headers attached to every request made by the client.
    pub default_headers: HeaderMap,
    pub middlewares: Vec<Arc<dyn Middleware>>,
}

impl Default for HttpApiClientConfig {
    fn default() -> Self {
        Self {
            http_timeout: Duration::from_secs(30),
            default_headers: HeaderMap::default(),
            middlewares: vec![],
        }
    }
}

/// Http client executing [`Endpoint`] requests against a single base url.
#[derive(Clone)]
pub struct HttpApiClient {
    base_url: Url,
    http_client: ClientWithMiddleware,
}

impl HttpApiClient {
    pub fn new(base_url: Url, config: HttpApiClientConfig) -> Result<Self, Error> {
        let reqwest_client = reqwest::Client::builder()
            .default_headers(config.default_headers)
            .timeout(config.http_timeout)
            .build()
            .map_err(Error::ClientInitialization)?;

        let mut client_builder = ClientBuilder::new(reqwest_client);
        for middleware in config.middlewares {
            client_builder = client_builder.with_arc(middleware);
        }

        Ok(Self {
            base_url,
            http_client: client_builder.build(),
        })
    }

    pub async fn request<EndpointType: Endpoint>(
        &self,
        endpoint: &EndpointType,
    ) -> Result<<EndpointType as Endpoint>::Response, Error> {
        let url = endpoint.url(&self.base_url);
        tracing::debug!(method = %endpoint.method(), %url, "sending request");

        let mut request = self.http_client.request(endpoint.method(), url);
        if let Some(body) = endpoint.body() {
            request = request
                .header(
                    reqwest::header::CONTENT_TYPE,
                    endpoint.content_type().as_ref(),
                )
                .body(body);
        }

        let response = request.send().await?;
        process_response(response).await
    }
}

async fn process_response<T: for<'a> serde::Deserialize<'a>>(
    response: Response,
) -> Result<T, Error> {
    let status_code = response.status();
    if !status_code.is_success() {
        let message = response.text().await.unwrap_or_default();
        tracing::debug!(%status_code, %message, "request returned non-success status");
        return Err(Error::InvalidStatusCode {
            status_code,
            message,
        });
    }

    let raw = response.bytes().await?;
    let deserializer = &mut serde_json::Deserializer::from_slice(raw.as_ref());
    Ok(serde_path_to_error::deserialize(deserializer)?)
}
