use axum::{
    extract::{Query, State},
    http::{
        HeaderMap, HeaderName, HeaderValue, Uri,
        header::{CACHE_CONTROL, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, warn};
use crate::card::{Card, CardError};
use crate::error::{AppError, Result};
use crate::metrics::{RATE_LIMITED, RENDER_FAILURES, RENDER_LATENCY, REQUEST_TOTAL};
use crate::models::CardQuery;
use crate::state::AppState;

// Client key from the trusted edge header
fn client_key(headers: &HeaderMap, header: &HeaderName) -> Result<String> {
    headers
        .get(header)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(AppError::MissingClientIdentity)
}

fn parse_card(uri: &Uri) -> std::result::Result<Card, CardError> {
    let Query(query) = Query::<CardQuery>::try_from_uri(uri)
        .map_err(|e| CardError::InvalidQuery(e.body_text()))?;
    Card::from_query(&query)
}

pub async fn card_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Response> {
    REQUEST_TOTAL.inc();

    let key = client_key(&headers, &state.client_ip_header).inspect_err(|_| {
        warn!(header = state.client_ip_header.as_str(), "request without client address");
    })?;

    if !state.limiter.admit(&key, Instant::now()) {
        RATE_LIMITED.inc();
        warn!(client = %key, "client exceeded rate limit");
        return Err(AppError::RateLimitExceeded);
    }

    // admitted: the quota slot stays spent even if rendering fails
    let start_time = Instant::now();

    let card = parse_card(&uri).inspect_err(|e| {
        RENDER_FAILURES.inc();
        error!(client = %key, error = %e, "failed to build card");
    })?;

    let body = card.render(&state.avatars).await;

    RENDER_LATENCY.observe(start_time.elapsed().as_secs_f64());

    let mut response = ([(CONTENT_TYPE, card.format.content_type())], body).into_response();
    if let Some(cache_control) = card.format.cache_control() {
        response
            .headers_mut()
            .insert(CACHE_CONTROL, HeaderValue::from_static(cache_control));
    }
    Ok(response)
}
