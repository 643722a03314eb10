use serde::{Deserialize, Serialize};

use crate::content::Image;
use crate::products::Product;

/// A product category. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// URL slug. Falls back to `categoria-{id}` when the CMS has none.
    pub slug: String,
    pub image: Option<Image>,
}

impl Category {
    /// Rewrites a host-relative image URL against `host`.
    #[must_use]
    pub fn qualified(mut self, host: &str) -> Self {
        self.image = self.image.map(|img| img.qualified(host));
        self
    }
}

/// A resolved category together with its products.
///
/// `products` may be empty: the page still renders the category shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPage {
    pub category: Category,
    pub products: Vec<Product>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_leaves_absolute_url_untouched() {
        let category = Category {
            id: 1,
            name: "Tecnología".to_string(),
            description: String::new(),
            slug: "tecnologia".to_string(),
            image: Some(Image::new("https://res.cloudinary.com/demo/tec.png")),
        }
        .qualified("http://localhost:1337");
        assert_eq!(
            category.image.map(|i| i.url).as_deref(),
            Some("https://res.cloudinary.com/demo/tec.png")
        );
    }
}
