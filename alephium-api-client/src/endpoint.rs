use serde::{Deserialize, Serialize};
use std::{borrow::Cow, fmt::Debug};
use url::Url;

/// A node api method that can be built into an HTTP request and sent.
///
/// If the request succeeds, the call will resolve to a `Response`.
pub trait Endpoint {
    type Response: for<'a> Deserialize<'a> + Debug;

    fn method(&self) -> reqwest::Method;

    /// Path relative to the node base url, e.g. `/infos/node`
    fn path(&self) -> String;

    /// JSON encoded request body, if the method takes one.
    #[inline]
    fn body(&self) -> Option<String> {
        None
    }

    fn url(&self, base_url: &Url) -> Url {
        base_url
            .join(&self.path())
            .expect("endpoint path is a valid relative url")
    }

    fn content_type(&self) -> Cow<'static, str> {
        Cow::Borrowed("application/json")
    }
}

#[inline]
pub fn serialize_body<B: Serialize>(b: &B) -> Option<String> {
    serde_json::to_string(b).ok()
}
