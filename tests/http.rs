use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderName, Request, StatusCode, header},
};
use friend_card::card::AvatarFetcher;
use friend_card::rate_limit::RateLimiter;
use friend_card::state::AppState;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn app(limit: u32) -> (Router, Arc<RateLimiter>) {
    let limiter = Arc::new(RateLimiter::new(limit, Duration::from_secs(3600), 10_000));
    let state = Arc::new(AppState {
        limiter: Arc::clone(&limiter),
        avatars: AvatarFetcher::disabled(),
        client_ip_header: HeaderName::from_static("cf-connecting-ip"),
    });
    (friend_card::build_router(state), limiter)
}

fn card_request(uri: &str, ip: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(ip) = ip {
        builder = builder.header("cf-connecting-ip", ip);
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_text(res: axum::response::Response) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn missing_client_address_is_bad_request() {
    let (app, limiter) = app(5);

    let res = app.oneshot(card_request("/", None)).await.unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(res).await, "无法识别客户端 IP");
    assert!(limiter.is_empty());
}

#[tokio::test]
async fn renders_html_card() {
    let (app, limiter) = app(5);

    let res = app
        .oneshot(card_request("/?name=Ferris&link=rustacean.net", Some("192.0.2.1")))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[header::CONTENT_TYPE], "text/html;charset=UTF-8");
    let body = body_text(res).await;
    assert!(body.contains("<h3>Ferris</h3>"));
    assert!(body.contains(r#"href="https://rustacean.net""#));
    assert_eq!(limiter.record("192.0.2.1").unwrap().count, 1);
}

#[tokio::test]
async fn renders_svg_card_with_placeholder_avatar() {
    let (app, _) = app(5);

    let res = app
        .oneshot(card_request("/?format=SVG&name=Ferris", Some("192.0.2.1")))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[header::CONTENT_TYPE], "image/svg+xml");
    assert_eq!(res.headers()[header::CACHE_CONTROL], "public, max-age=3600");
    let body = body_text(res).await;
    assert!(body.starts_with("<?xml"));
    assert!(body.contains("data:image/svg+xml;base64,"));
}

#[tokio::test]
async fn over_limit_is_too_many_requests() {
    let (app, _) = app(2);

    for _ in 0..2 {
        let res = app.clone().oneshot(card_request("/", Some("192.0.2.7"))).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    let res = app.clone().oneshot(card_request("/", Some("192.0.2.7"))).await.unwrap();
    assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(res.headers().get(header::RETRY_AFTER).is_none());
    assert_eq!(body_text(res).await, "请求过多，请稍后再试。");

    // another client is unaffected
    let res = app.oneshot(card_request("/", Some("192.0.2.8"))).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn render_failure_still_spends_quota() {
    let (app, limiter) = app(1);

    let res = app
        .clone()
        .oneshot(card_request("/?link=https://", Some("192.0.2.9")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(res).await, "Error processing request");
    assert_eq!(limiter.record("192.0.2.9").unwrap().count, 1);

    let res = app.oneshot(card_request("/", Some("192.0.2.9"))).await.unwrap();
    assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn health_reports_tracked_clients() {
    let (app, _) = app(5);

    app.clone().oneshot(card_request("/", Some("192.0.2.1"))).await.unwrap();
    let res = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_text(res).await).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["tracked_clients"], 1);
}

#[tokio::test]
async fn metrics_are_exposed() {
    let (app, _) = app(5);

    app.clone().oneshot(card_request("/", Some("192.0.2.1"))).await.unwrap();
    let res = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_text(res).await.contains("friendcard_requests_total"));
}
