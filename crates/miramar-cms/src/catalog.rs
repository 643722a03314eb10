//! Catalog retrieval: the operations storefront pages call.
//!
//! Every operation degrades to an empty collection or placeholder when the
//! CMS is unreachable or answers with something unusable. The one surfaced
//! failure is [`CmsError::CategoryNotFound`] from [`Catalog::category_page`].
//!
//! Image URLs on returned entities are qualified against the CMS host.

use miramar_core::{CatalogRef, Category, CategoryPage, Faq, HomeContent, Product};
use serde_json::Value;

use crate::client::CmsClient;
use crate::error::CmsError;
use crate::normalize::{
    normalize_category, normalize_embedded_product, normalize_faq, normalize_home,
    normalize_product,
};
use crate::probe::{first_non_empty, Candidate, Extract, Extracted};

/// Category reference meaning "every product".
pub const ALL_CATEGORIES: &str = "0";

/// The endpoint that answered a [`Catalog::check_collections`] probe.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionCheck {
    pub endpoint: String,
    pub body: Value,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    client: CmsClient,
}

impl Catalog {
    #[must_use]
    pub fn new(client: CmsClient) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn client(&self) -> &CmsClient {
        &self.client
    }

    /// All categories, from the first collection name that has any.
    pub async fn categories(&self) -> Vec<Category> {
        let candidates = CATEGORY_COLLECTIONS.map(Candidate::collection);
        let host = self.client.host();
        first_non_empty(&self.client, &candidates, |e| {
            normalize_category(&e.record).qualified(host)
        })
        .await
    }

    /// Products in a category, or every product when `category` is `None`
    /// or [`ALL_CATEGORIES`].
    ///
    /// A non-numeric `category` is treated as a slug and resolved first.
    pub async fn products_by_category(&self, category: Option<&str>) -> Vec<Product> {
        let reference = match category.map(str::trim) {
            None | Some(ALL_CATEGORIES | "") => return self.all_products().await,
            Some(raw) => CatalogRef::parse(raw),
        };
        let id = match &reference {
            CatalogRef::Id(id) => *id,
            CatalogRef::Slug(_) => match self.find_category(&reference).await {
                Some(category) => category.id,
                None => {
                    tracing::warn!(category = %reference, "category not found, no products");
                    return Vec::new();
                }
            },
        };
        self.products_in_category(id).await
    }

    /// Resolves a category and its products for the category detail page.
    ///
    /// # Errors
    ///
    /// Returns [`CmsError::CategoryNotFound`] when no endpoint knows the
    /// reference. A known category with no products is `Ok` with an empty
    /// product list.
    pub async fn category_page(&self, reference: &CatalogRef) -> Result<CategoryPage, CmsError> {
        let category =
            self.find_category(reference)
                .await
                .ok_or_else(|| CmsError::CategoryNotFound {
                    identifier: reference.to_string(),
                })?;
        let products = self.products_in_category(category.id).await;
        tracing::info!(
            category_id = category.id,
            products = products.len(),
            "category page resolved"
        );
        Ok(CategoryPage { category, products })
    }

    /// A single product by id or slug.
    pub async fn product(&self, reference: &CatalogRef) -> Option<Product> {
        let candidates = match reference {
            CatalogRef::Id(id) => vec![
                Candidate::new(format!("/api/products/{id}"), Extract::Single).param("populate", "*"),
                Candidate::collection("/api/products").param("filters[id][$eq]", id.to_string()),
                Candidate::collection("/api/productos").param("filters[id][$eq]", id.to_string()),
            ],
            CatalogRef::Slug(slug) => vec![
                Candidate::collection("/api/products").param("filters[slug][$eq]", slug.as_str()),
                Candidate::collection("/api/productos").param("filters[slug][$eq]", slug.as_str()),
            ],
        };
        self.products(&candidates).await.into_iter().next()
    }

    /// Products with a discount price set.
    pub async fn discounted_products(&self) -> Vec<Product> {
        let candidates = [Candidate::collection("/api/products")
            .param("filters[discountPrice][$notNull]", "true")];
        let mut products = self.products(&candidates).await;
        products.retain(Product::has_discount);
        products
    }

    /// Products for the home page strip.
    pub async fn featured_products(&self) -> Vec<Product> {
        let candidates = [
            Candidate::new("/api/productos", Extract::Collection)
                .param("populate", "imagen,categories,precios"),
            Candidate::collection("/api/products"),
        ];
        self.products(&candidates).await
    }

    /// Product search over name and description, case-insensitive.
    ///
    /// Blank queries return nothing without contacting the CMS.
    pub async fn search_products(&self, query: &str) -> Vec<Product> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let candidates = [
            Candidate::collection("/api/products")
                .param("filters[$or][0][name][$containsi]", query)
                .param("filters[$or][1][description][$containsi]", query),
            Candidate::collection("/api/productos")
                .param("filters[$or][0][nombre][$containsi]", query)
                .param("filters[$or][1][descripcion][$containsi]", query),
        ];
        self.products(&candidates).await
    }

    pub async fn faqs(&self) -> Vec<Faq> {
        let candidates = [Candidate::collection("/api/faqs")];
        first_non_empty(&self.client, &candidates, |e| normalize_faq(&e.record)).await
    }

    /// Home page copy, or [`HomeContent::default`] on any failure.
    pub async fn home_content(&self) -> HomeContent {
        let query = [("populate".to_string(), "*".to_string())];
        let body = match self.client.get_json("/api/home", &query).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "home content unavailable, using placeholder");
                return HomeContent::default();
            }
        };
        let records = Extract::Single.records(&body);
        match records.first() {
            Some(e) => normalize_home(&e.record).qualified(self.client.host()),
            None => {
                tracing::warn!("home content has no data, using placeholder");
                HomeContent::default()
            }
        }
    }

    /// Reports the first diagnostic endpoint that answers: the categories
    /// collection, then the API root.
    pub async fn check_collections(&self) -> Option<CollectionCheck> {
        let probes: [(&str, Vec<(String, String)>); 2] = [
            ("/api/categories", vec![("populate".to_string(), "*".to_string())]),
            ("/api", Vec::new()),
        ];
        for (path, query) in probes {
            match self.client.get_json(path, &query).await {
                Ok(body) => {
                    tracing::info!(endpoint = path, "CMS collection check succeeded");
                    return Some(CollectionCheck {
                        endpoint: path.to_string(),
                        body,
                    });
                }
                Err(e) => tracing::warn!(endpoint = path, error = %e, "CMS collection check failed"),
            }
        }
        None
    }

    async fn all_products(&self) -> Vec<Product> {
        let candidates = [
            Candidate::collection("/api/products"),
            Candidate::collection("/api/productos"),
        ];
        self.products(&candidates).await
    }

    async fn products_in_category(&self, id: i64) -> Vec<Product> {
        self.products(&category_product_candidates(id)).await
    }

    async fn find_category(&self, reference: &CatalogRef) -> Option<Category> {
        let candidates = category_lookup_candidates(reference);
        let host = self.client.host();
        first_non_empty(&self.client, &candidates, |e| {
            normalize_category(&e.record).qualified(host)
        })
        .await
        .into_iter()
        .next()
    }

    async fn products(&self, candidates: &[Candidate]) -> Vec<Product> {
        let host = self.client.host();
        first_non_empty(&self.client, candidates, |e| map_product(e).qualified(host)).await
    }
}

fn map_product(extracted: &Extracted<'_>) -> Product {
    match extracted.owner_category() {
        Some(owner) => normalize_embedded_product(&extracted.record, &owner),
        None => normalize_product(&extracted.record),
    }
}

/// Collection names the category listing and lookups share, in probe order.
const CATEGORY_COLLECTIONS: [&str; 3] = ["/api/categories", "/api/category", "/api/categoria"];

/// The ordered endpoints that may hold the category `reference`: every
/// collection the listing reads, by id path then id filter, or by slug filter.
pub(crate) fn category_lookup_candidates(reference: &CatalogRef) -> Vec<Candidate> {
    CATEGORY_COLLECTIONS
        .iter()
        .flat_map(|collection| match reference {
            CatalogRef::Id(id) => vec![
                Candidate::new(format!("{collection}/{id}"), Extract::Single).param("populate", "*"),
                Candidate::collection(*collection).param("filters[id][$eq]", id.to_string()),
            ],
            CatalogRef::Slug(slug) => {
                vec![Candidate::collection(*collection).param("filters[slug][$eq]", slug.as_str())]
            }
        })
        .collect()
}

/// The ordered endpoints that may list the products of category `id`.
pub(crate) fn category_product_candidates(id: i64) -> Vec<Candidate> {
    let id_text = id.to_string();
    vec![
        Candidate::collection("/api/products").param("filters[category][id][$eq]", id_text.as_str()),
        Candidate::collection("/api/products").param("filters[categories][id][$eq]", id_text.as_str()),
        Candidate::collection("/api/productos").param("filters[categorias][id][$eq]", id_text.as_str()),
        Candidate::new(format!("/api/categories/{id}"), Extract::EmbeddedProducts)
            .param("populate[products][populate]", "*"),
        Candidate::new("/api/categories", Extract::EmbeddedProductsOf(id))
            .param("populate[products][populate]", "cover")
            .param("populate", "cover"),
    ]
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
