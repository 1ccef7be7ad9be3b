//! Active-site detection.
//!
//! Site-scoped clearing works on an origin (scheme, host and port). Only
//! `http` and `https` pages have one; anything else (a `chrome://` page, a
//! local file, an unparsable URL) means no site is available.

use async_trait::async_trait;
use serde::{Serialize, Serializer};
use url::Url;

/// The origin of a web page, e.g. `https://example.com`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Origin {
    url: Url,
}

impl Origin {
    /// Derive the origin of a page URL, or `None` for non-web pages
    pub fn from_page_url(page_url: &str) -> Option<Self> {
        let url = Url::parse(page_url.trim()).ok()?;
        if !matches!(url.scheme(), "http" | "https") {
            return None;
        }
        url.host_str()?;
        let origin = url.origin().ascii_serialization();
        Url::parse(&origin).ok().map(|url| Self { url })
    }

    /// `scheme://host[:port]`
    pub fn as_str(&self) -> &str {
        self.url.as_str().trim_end_matches('/')
    }

    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    /// Explicit port, `None` when the scheme default is used
    pub fn port(&self) -> Option<u16> {
        self.url.port()
    }

    /// Key Chromium uses for per-origin storage directories,
    /// e.g. `https_example.com_0` or `http_localhost_8080`
    pub fn storage_key(&self) -> String {
        format!(
            "{}_{}_{}",
            self.scheme(),
            self.host(),
            self.port().unwrap_or(0)
        )
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Origin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Something that knows which page is currently active
#[async_trait]
pub trait OriginSource: Send + Sync {
    /// Origin of the active page, or `None` if no web page is active
    async fn active_origin(&self) -> Option<Origin>;
}

/// An origin source backed by a page URL known up front
#[derive(Debug, Clone, Default)]
pub struct StaticOrigin {
    page_url: Option<String>,
}

impl StaticOrigin {
    pub fn new(page_url: Option<String>) -> Self {
        Self { page_url }
    }
}

#[async_trait]
impl OriginSource for StaticOrigin {
    async fn active_origin(&self) -> Option<Origin> {
        let page_url = self.page_url.as_deref()?;
        let origin = Origin::from_page_url(page_url);
        match &origin {
            Some(o) => tracing::debug!(origin = %o, "detected active site"),
            None => tracing::debug!(page_url, "active page has no web origin"),
        }
        origin
    }
}
