use reqwest::header::HeaderValue;
use reqwest_middleware::Middleware;
use serde::{Deserialize, Deserializer};
use std::{fmt, fmt::Formatter, sync::Arc, time::Duration};

#[derive(Clone, Deserialize)]
pub struct Config {
    pub url: url::Url,
    /// Sent as `X-API-KEY` with every request when set.
    #[serde(default, deserialize_with = "deserialize_api_key")]
    pub api_key: Option<HeaderValue>,
    /// The maximum time limit for an API request. If a request takes longer than this, it will be
    /// cancelled. Defaults to 30 seconds.
    #[serde(default = "defaults::http_timeout")]
    pub http_timeout: Duration,
    #[serde(default)]
    pub probe_url: bool,
    #[serde(skip_deserializing)]
    pub middlewares: Vec<Arc<dyn Middleware>>,
}

fn deserialize_api_key<'de, D>(deserializer: D) -> Result<Option<HeaderValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let string = Option::<String>::deserialize(deserializer)?;
    string
        .filter(|value| !value.is_empty())
        .map(|value| api_key_header(&value))
        .transpose()
        .map_err(<D::Error as serde::de::Error>::custom)
}

/// Builds the header value for an api key. The value is marked sensitive so it never shows up
/// in debug output.
pub(crate) fn api_key_header(
    api_key: &str,
) -> Result<HeaderValue, reqwest::header::InvalidHeaderValue> {
    let mut value = HeaderValue::from_str(api_key)?;
    value.set_sensitive(true);
    Ok(value)
}

// We have to derive `Debug` manually as we need to skip middlewares field which does not implement it.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        #[derive(Debug)]
        #[allow(dead_code)]
        struct ConfigDebug<'a> {
            url: &'a url::Url,
            api_key: &'a Option<HeaderValue>,
            http_timeout: &'a Duration,
            probe_url: &'a bool,
        }
        let Config {
            url,
            api_key,
            http_timeout,
            probe_url,
            middlewares: _,
        } = self;
        fmt::Debug::fmt(
            &ConfigDebug {
                url,
                api_key,
                http_timeout,
                probe_url,
            },
            f,
        )
    }
}

impl Config {
    pub fn new(url: url::Url) -> Self {
        Self {
            url,
            api_key: None,
            http_timeout: defaults::http_timeout(),
            middlewares: vec![],
            probe_url: false,
        }
    }

    pub fn with_middleware<M: Middleware>(self, middleware: M) -> Self {
        self.with_arc_middleware(Arc::new(middleware))
    }

    pub fn with_arc_middleware<M: Middleware>(mut self, middleware: Arc<M>) -> Self {
        self.middlewares.push(middleware);
        self
    }

    pub fn probe_url(mut self, value: bool) -> Self {
        self.probe_url = value;
        self
    }

    pub fn api_key(mut self, api_key: Option<HeaderValue>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Same as [`Config::api_key`] but takes a raw string. An empty string means no key.
    pub fn api_key_str(self, api_key: &str) -> Result<Self, crate::Error> {
        if api_key.is_empty() {
            return Ok(self.api_key(None));
        }
        Ok(self.api_key(Some(api_key_header(api_key)?)))
    }

    pub fn http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }
}

mod defaults {
    use std::time::Duration;

    pub fn http_timeout() -> Duration {
        Duration::from_secs(30)
    }
}
