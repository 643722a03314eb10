/// How a page refers to a category or product: numeric CMS id or URL slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogRef {
    Id(i64),
    Slug(String),
}

impl CatalogRef {
    /// Interprets an all-digit identifier as an id and anything else as a slug.
    #[must_use]
    pub fn parse(identifier: &str) -> Self {
        let trimmed = identifier.trim();
        match trimmed.parse::<i64>() {
            Ok(id) if !trimmed.starts_with('+') => Self::Id(id),
            _ => Self::Slug(trimmed.to_string()),
        }
    }
}

impl std::fmt::Display for CatalogRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogRef::Id(id) => write!(f, "{id}"),
            CatalogRef::Slug(slug) => write!(f, "{slug}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_numeric_identifier_as_id() {
        assert_eq!(CatalogRef::parse("42"), CatalogRef::Id(42));
        assert_eq!(CatalogRef::parse(" 7 "), CatalogRef::Id(7));
    }

    #[test]
    fn parse_text_identifier_as_slug() {
        assert_eq!(
            CatalogRef::parse("ropa-deportiva"),
            CatalogRef::Slug("ropa-deportiva".to_string())
        );
        assert_eq!(CatalogRef::parse("+3"), CatalogRef::Slug("+3".to_string()));
    }

    #[test]
    fn display_round_trips_identifier() {
        assert_eq!(CatalogRef::Id(5).to_string(), "5");
        assert_eq!(CatalogRef::Slug("ropa".into()).to_string(), "ropa");
    }
}
