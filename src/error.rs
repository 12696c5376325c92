use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::card::CardError;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("client address missing from request")]
    MissingClientIdentity,
    #[error("rate limit exceeded")]
    RateLimitExceeded,
    #[error("render failed: {0}")]
    Render(#[from] CardError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingClientIdentity => StatusCode::BAD_REQUEST,
            AppError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let msg = match &self {
            AppError::MissingClientIdentity => "无法识别客户端 IP",
            AppError::RateLimitExceeded => "请求过多，请稍后再试。",
            AppError::Render(_) => "Error processing request",
        };
        (self.status(), msg).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses() {
        assert_eq!(AppError::MissingClientIdentity.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::RateLimitExceeded.status(), StatusCode::TOO_MANY_REQUESTS);

        let render = AppError::from(CardError::InvalidQuery("duplicate field `name`".into()));
        assert_eq!(render.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn rate_limited_response_has_no_retry_after() {
        let res = AppError::RateLimitExceeded.into_response();
        assert!(res.headers().get("retry-after").is_none());
    }
}
