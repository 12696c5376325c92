//! Friend link card rendering.
//!
//! A [`Card`] is built from the raw query string, with every value stripped of
//! markup characters and missing values replaced by the stock card. It renders
//! to either an HTML fragment or a standalone SVG document.

mod avatar;
mod html;
mod svg;

pub use avatar::AvatarFetcher;

use thiserror::Error;
use url::Url;

use crate::models::CardQuery;

pub const DEFAULT_NAME: &str = "友链卡片生成器";
pub const DEFAULT_SPECIALTY: &str = "生成一个类似我这样的卡片";
pub const DEFAULT_LINK: &str = "https://friendcard.is-an.org";
pub const DEFAULT_DOMAIN: &str = "friendcard.is-an.org";
pub const DEFAULT_AVATAR: &str = "https://friendcard.is-an.org/favicon.svg";

pub const DEFAULT_BGCOLOR: &str = "linear-gradient(135deg, #e0e7ff, #f0f4f8)";
pub const DEFAULT_TEXTCOLOR: &str = "#1f2937";
pub const DEFAULT_LINKCOLOR: &str = "#2563eb";
pub const DEFAULT_FONT: &str = "ZCOOL KuaiLe";

#[derive(Error, Debug)]
pub enum CardError {
    #[error("malformed query string: {0}")]
    InvalidQuery(String),
    #[error("invalid link {link:?}: {source}")]
    InvalidLink {
        link: String,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Html,
    Svg,
}

impl Format {
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some(f) if f.eq_ignore_ascii_case("svg") => Format::Svg,
            _ => Format::Html,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Format::Html => "text/html;charset=UTF-8",
            Format::Svg => "image/svg+xml",
        }
    }

    pub fn cache_control(&self) -> Option<&'static str> {
        match self {
            Format::Html => None,
            Format::Svg => Some("public, max-age=3600"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardStyle {
    pub bgcolor: String,
    pub textcolor: String,
    pub linkcolor: String,
    pub font: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub name: String,
    pub specialty: String,
    pub display_link: String,
    pub redirect_link: String,
    pub avatar: Option<String>,
    pub domain: String,
    pub style: CardStyle,
    pub format: Format,
}

/// Strips characters that could open a tag or close an attribute.
pub fn sanitize(input: Option<&str>) -> String {
    input
        .unwrap_or_default()
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '"' | '\'' | '`'))
        .collect()
}

fn field(input: &Option<String>, default: &str) -> String {
    let value = sanitize(input.as_deref());
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}

fn with_scheme(link: &str) -> String {
    if link.starts_with("http") {
        link.to_string()
    } else {
        format!("https://{}", link)
    }
}

fn host_of(link: &str) -> Result<String, CardError> {
    let url = Url::parse(&with_scheme(link)).map_err(|source| CardError::InvalidLink {
        link: link.to_string(),
        source,
    })?;

    // hostless urls still render, with an empty domain
    Ok(url.host_str().unwrap_or_default().to_string())
}

impl Card {
    pub fn from_query(query: &CardQuery) -> Result<Self, CardError> {
        let display_link = field(&query.link, DEFAULT_LINK);

        let redirect = sanitize(query.redirect.as_deref());
        let redirect_link = if redirect.is_empty() {
            with_scheme(&display_link)
        } else {
            redirect
        };

        let avatar = Some(sanitize(query.avatar.as_deref())).filter(|a| !a.is_empty());

        let domain = if display_link == DEFAULT_LINK {
            DEFAULT_DOMAIN.to_string()
        } else {
            host_of(&display_link)?
        };

        Ok(Self {
            name: field(&query.name, DEFAULT_NAME),
            specialty: field(&query.specialty, DEFAULT_SPECIALTY),
            display_link,
            redirect_link,
            avatar,
            domain,
            style: CardStyle {
                bgcolor: field(&query.bgcolor, DEFAULT_BGCOLOR),
                textcolor: field(&query.textcolor, DEFAULT_TEXTCOLOR),
                linkcolor: field(&query.linkcolor, DEFAULT_LINKCOLOR),
                font: field(&query.font, DEFAULT_FONT),
            },
            format: Format::from_param(query.format.as_deref()),
        })
    }

    // Explicit avatar, else the site's favicon, else our own
    pub fn avatar_url(&self) -> String {
        match &self.avatar {
            Some(avatar) => avatar.clone(),
            None if self.display_link != DEFAULT_LINK => {
                format!("https://api.faviconkit.com/{}/128", self.domain)
            }
            None => DEFAULT_AVATAR.to_string(),
        }
    }

    pub async fn render(&self, avatars: &AvatarFetcher) -> String {
        match self.format {
            Format::Html => html::render(self),
            Format::Svg => {
                let avatar = avatars.data_uri(&self.avatar_url()).await;
                svg::render(self, &avatar)
            }
        }
    }
}
