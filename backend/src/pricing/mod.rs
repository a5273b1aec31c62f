//! The handler behind `POST /pricing`.
//!
//! The route owns no pricing logic. It hands the request to a
//! [`PricingHandler`] and returns whatever comes back, so the body bytes must
//! pass through untouched in both directions.

use std::time::Duration;

use async_trait::async_trait;
use axum::http::StatusCode;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;

use crate::error::{AppError, Result};

#[derive(Debug, Clone)]
pub struct PricingRequest {
    pub content_type: Option<String>,
    /// Raw query string, without the leading `?`.
    pub query: Option<String>,
    pub body: Bytes,
}

#[derive(Debug, Clone)]
pub struct PricingResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Bytes,
}

#[async_trait]
pub trait PricingHandler: Send + Sync {
    async fn handle(&self, req: PricingRequest) -> Result<PricingResponse>;
}

/// Forwards pricing requests to an HTTP upstream.
pub struct HttpPricingHandler {
    client: reqwest::Client,
    upstream: Option<String>,
}

impl HttpPricingHandler {
    /// With `upstream = None` every request is answered with 501.
    pub fn new(upstream: Option<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, upstream })
    }

    fn target_url(upstream: &str, query: Option<&str>) -> String {
        match query.filter(|q| !q.is_empty()) {
            Some(q) if upstream.contains('?') => format!("{upstream}&{q}"),
            Some(q) => format!("{upstream}?{q}"),
            None => upstream.to_string(),
        }
    }
}

#[async_trait]
impl PricingHandler for HttpPricingHandler {
    async fn handle(&self, req: PricingRequest) -> Result<PricingResponse> {
        let upstream = self.upstream.as_deref().ok_or(AppError::NotImplemented)?;
        let url = Self::target_url(upstream, req.query.as_deref());

        let mut builder = self.client.post(&url).body(req.body);
        if let Some(ct) = &req.content_type {
            builder = builder.header(CONTENT_TYPE, ct.as_str());
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        let status = resp.status();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = resp
            .bytes()
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        tracing::debug!(%url, %status, bytes = body.len(), "Pricing upstream responded");

        Ok(PricingResponse {
            status,
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_url_appends_query() {
        assert_eq!(
            HttpPricingHandler::target_url("http://pricing.local/update", Some("plan=pro")),
            "http://pricing.local/update?plan=pro"
        );
        assert_eq!(
            HttpPricingHandler::target_url("http://pricing.local/update?v=2", Some("plan=pro")),
            "http://pricing.local/update?v=2&plan=pro"
        );
        assert_eq!(
            HttpPricingHandler::target_url("http://pricing.local/update", Some("")),
            "http://pricing.local/update"
        );
        assert_eq!(
            HttpPricingHandler::target_url("http://pricing.local/update", None),
            "http://pricing.local/update"
        );
    }

    #[tokio::test]
    async fn unconfigured_upstream_is_not_implemented() {
        let handler = HttpPricingHandler::new(None, Duration::from_secs(1)).unwrap();
        let err = handler
            .handle(PricingRequest {
                content_type: None,
                query: None,
                body: Bytes::from_static(b"{}"),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotImplemented));
    }

    #[tokio::test]
    async fn unreachable_upstream_is_upstream_error() {
        // Grab a free port, then close it so the connect is refused.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let handler = HttpPricingHandler::new(
            Some(format!("http://{}/pricing", addr)),
            Duration::from_secs(2),
        )
        .unwrap();
        let err = handler
            .handle(PricingRequest {
                content_type: Some("application/json".into()),
                query: None,
                body: Bytes::from_static(b"{}"),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }
}
