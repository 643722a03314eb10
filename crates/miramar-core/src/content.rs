use serde::{Deserialize, Serialize};

use crate::rich_text::RichText;

/// Title shown on the home hero when the CMS has none.
pub const DEFAULT_HOME_TITLE: &str = "Bienvenidos a Miramar Shop";

/// Hero copy shown when the CMS has no home description.
pub const DEFAULT_HOME_DESCRIPTION: &str = "Tu tienda TODO EN UNO. Descubre nuestras colecciones exclusivas de ropa deportiva, tecnología y mucho más.";

/// An image reference. `url` is either absolute (third-party asset host) or
/// relative to the CMS host (`/uploads/...`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl Image {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            width: None,
            height: None,
        }
    }

    /// Returns `true` if `url` already carries an `http://` or `https://` scheme.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.url.starts_with("http://") || self.url.starts_with("https://")
    }

    /// Prefixes a host-relative `url` with `host`. Absolute URLs are kept.
    #[must_use]
    pub fn qualified(mut self, host: &str) -> Self {
        if !self.is_absolute() {
            let host = host.trim_end_matches('/');
            self.url = if self.url.starts_with('/') {
                format!("{host}{}", self.url)
            } else {
                format!("{host}/{}", self.url)
            };
        }
        self
    }
}

/// A frequently-asked question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    pub id: i64,
    pub question: String,
    pub answer: RichText,
}

/// Copy and cover image for the home page.
///
/// [`HomeContent::default`] is the placeholder rendered when the CMS is
/// unreachable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HomeContent {
    pub title: Option<String>,
    pub description: Option<RichText>,
    pub cover: Option<Image>,
}

impl HomeContent {
    /// Title to render, falling back to [`DEFAULT_HOME_TITLE`].
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(DEFAULT_HOME_TITLE)
    }

    /// Description as markup, falling back to [`DEFAULT_HOME_DESCRIPTION`].
    #[must_use]
    pub fn display_description(&self) -> String {
        self.description
            .as_ref()
            .map(RichText::to_markup)
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOME_DESCRIPTION.to_string())
    }

    /// Rewrites a host-relative cover URL against `host`.
    #[must_use]
    pub fn qualified(mut self, host: &str) -> Self {
        self.cover = self.cover.map(|img| img.qualified(host));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_prefixes_relative_url() {
        let img = Image::new("/uploads/a.png").qualified("http://localhost:1337/");
        assert_eq!(img.url, "http://localhost:1337/uploads/a.png");
    }

    #[test]
    fn qualified_inserts_separator_for_bare_path() {
        let img = Image::new("uploads/a.png").qualified("http://localhost:1337");
        assert_eq!(img.url, "http://localhost:1337/uploads/a.png");
    }

    #[test]
    fn qualified_keeps_absolute_urls() {
        for url in ["http://x/y.jpg", "https://cdn.example.com/y.jpg"] {
            assert_eq!(Image::new(url).qualified("http://cms").url, url);
        }
    }

    #[test]
    fn qualified_keeps_dimensions() {
        let img = Image {
            url: "/a.png".to_string(),
            width: Some(10),
            height: Some(20),
        }
        .qualified("http://cms");
        assert_eq!(img.width, Some(10));
        assert_eq!(img.height, Some(20));
    }

    #[test]
    fn placeholder_home_uses_defaults() {
        let home = HomeContent::default();
        assert_eq!(home.display_title(), DEFAULT_HOME_TITLE);
        assert_eq!(home.display_description(), DEFAULT_HOME_DESCRIPTION);
        assert!(home.cover.is_none());
    }

    #[test]
    fn home_prefers_cms_copy() {
        let home = HomeContent {
            title: Some("Miramar".to_string()),
            description: Some(RichText::Plain("Todo en uno".to_string())),
            cover: None,
        };
        assert_eq!(home.display_title(), "Miramar");
        assert_eq!(home.display_description(), "Todo en uno");
    }

    #[test]
    fn image_serializes_without_missing_dimensions() {
        let json = serde_json::to_value(Image::new("/a.png")).unwrap();
        assert_eq!(json, serde_json::json!({ "url": "/a.png" }));
    }
}
