use anyhow::Context;
use axum::http::HeaderName;
use clap::Parser; // for cli
use friend_card::card::AvatarFetcher;
use friend_card::config::Args;
use friend_card::rate_limit::{RateLimiter, sweeper};
use friend_card::state::AppState;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    friend_card::telemetry::init();

    // parse cli arguments
    let args = Args::parse();

    let client_ip_header = HeaderName::try_from(args.client_ip_header.as_str())
        .with_context(|| format!("invalid client ip header {:?}", args.client_ip_header))?;

    let limiter = Arc::new(RateLimiter::new(
        args.rate_limit,
        Duration::from_secs(args.rate_window),
        args.max_records,
    ));

    // creating shared state
    let state = Arc::new(AppState {
        limiter: Arc::clone(&limiter),
        avatars: AvatarFetcher::new(
            reqwest::Client::new(),
            Duration::from_secs(args.avatar_timeout),
            usize::try_from(args.avatar_max_bytes).unwrap_or(usize::MAX),
            !args.no_inline_avatars,
        ),
        client_ip_header,
    });

    // spawn the background sweeper
    tokio::spawn(sweeper(limiter, Duration::from_secs(args.sweep_interval)));

    let app = friend_card::build_router(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(%addr, "friend card server running");
    info!(
        limit = args.rate_limit,
        window_secs = args.rate_window,
        max_records = args.max_records,
        header = %args.client_ip_header,
        "rate limiting enabled"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
