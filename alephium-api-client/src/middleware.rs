use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};
use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Instant,
};

/// Logs every outgoing request with its status and latency, and counts the requests sent.
#[derive(Clone, Debug, Default)]
pub struct RequestLogger {
    requests_sent: Arc<AtomicU64>,
}

impl RequestLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests_sent(&self) -> u64 {
        self.requests_sent.load(Ordering::Relaxed)
    }
}

#[async_trait::async_trait]
impl Middleware for RequestLogger {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut http::Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let method = req.method().clone();
        let url = req.url().clone();
        let started = Instant::now();
        self.requests_sent.fetch_add(1, Ordering::Relaxed);

        let result = next.run(req, extensions).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(response) => tracing::debug!(
                %method,
                %url,
                status = %response.status(),
                elapsed_ms,
                "node responded"
            ),
            Err(err) => tracing::warn!(%method, %url, elapsed_ms, err = %err, "node request failed"),
        }
        result
    }
}
