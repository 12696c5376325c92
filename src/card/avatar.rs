use base64::{Engine as _, engine::general_purpose::STANDARD};
use lazy_static::lazy_static;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

const PLACEHOLDER_SVG: &str = r##"
      <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 128 128">
        <rect width="128" height="128" fill="#e5e7eb"/>
        <text x="64" y="64" text-anchor="middle" dy=".3em" fill="#9ca3af" font-size="64">?</text>
      </svg>
    "##;

lazy_static! {
    static ref PLACEHOLDER_URI: String = data_uri("image/svg+xml", PLACEHOLDER_SVG.as_bytes());
}

#[derive(Error, Debug)]
enum FetchError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("avatar larger than {limit} bytes")]
    TooLarge { limit: usize },
}

pub fn data_uri(content_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", content_type, STANDARD.encode(bytes))
}

// Fetches avatars so svg cards stay self-contained
#[derive(Clone)]
pub struct AvatarFetcher {
    client: reqwest::Client,
    timeout: Duration,
    max_bytes: usize,
    enabled: bool,
}

impl AvatarFetcher {
    pub fn new(client: reqwest::Client, timeout: Duration, max_bytes: usize, enabled: bool) -> Self {
        Self {
            client,
            timeout,
            max_bytes,
            enabled,
        }
    }

    // Never touches the network, always inlines the placeholder
    pub fn disabled() -> Self {
        Self::new(reqwest::Client::new(), Duration::ZERO, 0, false)
    }

    /// Inlines the image at `url` as a data uri, falling back to the
    /// placeholder on any failure.
    pub async fn data_uri(&self, url: &str) -> String {
        if !self.enabled {
            return PLACEHOLDER_URI.clone();
        }

        match self.fetch(url).await {
            Ok(uri) => {
                debug!(%url, "inlined avatar");
                uri
            }
            Err(e) => {
                warn!(%url, error = %e, "avatar fetch failed, using placeholder");
                PLACEHOLDER_URI.clone()
            }
        }
    }

    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let mut res = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?;

        let content_type = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("image/png")
            .to_string();

        let too_large = FetchError::TooLarge {
            limit: self.max_bytes,
        };
        if res.content_length().is_some_and(|len| len > self.max_bytes as u64) {
            return Err(too_large);
        }

        // content-length may be absent or wrong, so cap the body as it streams
        let mut body = Vec::new();
        while let Some(chunk) = res.chunk().await? {
            if body.len() + chunk.len() > self.max_bytes {
                return Err(too_large);
            }
            body.extend_from_slice(&chunk);
        }

        Ok(data_uri(&content_type, &body))
    }
}
