use axum::http::HeaderName;
use std::sync::Arc;
use crate::card::AvatarFetcher;
use crate::rate_limit::RateLimiter;
// app's shared state

pub struct AppState {
    pub limiter: Arc<RateLimiter>,       // shared with the sweeper task
    pub avatars: AvatarFetcher,          // svg avatar inlining
    pub client_ip_header: HeaderName,    // trusted header carrying the client address
}
