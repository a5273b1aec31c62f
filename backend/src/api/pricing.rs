use axum::{
    extract::{RawQuery, State},
    http::{header::CONTENT_TYPE, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
};
use bytes::Bytes;

use crate::{
    error::{AppError, Result},
    pricing::PricingRequest,
    AppState,
};

/// `POST /pricing`: hands the untouched body to the configured pricing handler.
pub async fn forward(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let out = state
        .pricing
        .handle(PricingRequest {
            content_type,
            query,
            body,
        })
        .await?;

    let mut resp = (out.status, out.body).into_response();
    match out.content_type {
        Some(ct) => {
            let value = HeaderValue::from_str(&ct).map_err(|_| {
                AppError::Upstream(format!("Invalid content type from pricing handler: {ct:?}"))
            })?;
            resp.headers_mut().insert(CONTENT_TYPE, value);
        }
        None => {
            resp.headers_mut().remove(CONTENT_TYPE);
        }
    }

    Ok(resp)
}
