//! Multi-endpoint resolution.
//!
//! Some queries have no single stable endpoint: the collection may be named
//! in English or Spanish, and the category relation may be `category`,
//! `categories` or only reachable by populating the category itself. A query
//! is therefore an ordered list of [`Candidate`]s, tried in order until one
//! yields at least one record.
//!
//! Every call restarts from the first candidate.

use miramar_core::Category;
use serde_json::Value;

use crate::client::CmsClient;
use crate::envelope::{relation_records, Field, Record};
use crate::normalize::normalize_category;

/// Where the records sit in a candidate's response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extract {
    /// `data` is a list of records, or the body itself is a list.
    Collection,
    /// `data` is one record.
    Single,
    /// `data` is one category; the records are its `products` relation.
    EmbeddedProducts,
    /// `data` lists categories; the records are the `products` relation of
    /// the category with this id.
    EmbeddedProductsOf(i64),
}

/// A record pulled from a response body, with the category it was embedded
/// in when the candidate reached products through a category.
#[derive(Debug, Clone, Copy)]
pub struct Extracted<'a> {
    pub record: Record<'a>,
    pub owner: Option<&'a Value>,
}

impl Extracted<'_> {
    /// The owning category, mapped.
    #[must_use]
    pub fn owner_category(&self) -> Option<Category> {
        self.owner
            .and_then(Record::classify)
            .map(|r| normalize_category(&r))
    }
}

impl Extract {
    /// Pulls records out of `body`. Returns an empty list when the expected
    /// shape is absent.
    #[must_use]
    pub fn records<'a>(&self, body: &'a Value) -> Vec<Extracted<'a>> {
        let data = body.get("data");
        match *self {
            Extract::Collection => {
                let list = match (data, body) {
                    (Some(Value::Array(items)), _) | (None, Value::Array(items)) => items,
                    _ => return Vec::new(),
                };
                list.iter()
                    .filter_map(Record::classify)
                    .map(unowned)
                    .collect()
            }
            Extract::Single => data
                .and_then(Record::classify)
                .map(unowned)
                .into_iter()
                .collect(),
            Extract::EmbeddedProducts => data.map(embedded_products).unwrap_or_default(),
            Extract::EmbeddedProductsOf(id) => data
                .and_then(Value::as_array)
                .and_then(|categories| {
                    categories
                        .iter()
                        .find(|c| Record::classify(c).and_then(|r| r.id()) == Some(id))
                })
                .map(embedded_products)
                .unwrap_or_default(),
        }
    }
}

fn unowned(record: Record<'_>) -> Extracted<'_> {
    Extracted {
        record,
        owner: None,
    }
}

fn embedded_products(category: &Value) -> Vec<Extracted<'_>> {
    let Some(record) = Record::classify(category) else {
        return Vec::new();
    };
    record
        .values(Field::Products)
        .map(relation_records)
        .find(|records| !records.is_empty())
        .unwrap_or_default()
        .into_iter()
        .map(|record| Extracted {
            record,
            owner: Some(category),
        })
        .collect()
}

/// One endpoint and query shape to try.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: String,
    pub query: Vec<(String, String)>,
    pub extract: Extract,
}

impl Candidate {
    #[must_use]
    pub fn new(path: impl Into<String>, extract: Extract) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
            extract,
        }
    }

    /// A collection endpoint with `populate=*`.
    #[must_use]
    pub fn collection(path: impl Into<String>) -> Self {
        Self::new(path, Extract::Collection).param("populate", "*")
    }

    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// Tries `candidates` in order and returns the first non-empty mapped result.
///
/// A candidate is skipped on transport failure, non-2xx status, a body that
/// is not JSON, or a body without records in the expected place. When every
/// candidate is exhausted the result is empty.
pub async fn first_non_empty<T>(
    client: &CmsClient,
    candidates: &[Candidate],
    map: impl Fn(&Extracted<'_>) -> T,
) -> Vec<T> {
    for (attempt, candidate) in candidates.iter().enumerate() {
        let body = match client.get_json(&candidate.path, &candidate.query).await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!(
                    endpoint = %candidate.path,
                    attempt = attempt + 1,
                    error = %e,
                    "candidate failed, trying next"
                );
                continue;
            }
        };

        let mapped: Vec<T> = candidate
            .extract
            .records(&body)
            .iter()
            .map(&map)
            .collect();
        if mapped.is_empty() {
            tracing::debug!(
                endpoint = %candidate.path,
                attempt = attempt + 1,
                "candidate returned no records, trying next"
            );
            continue;
        }

        tracing::debug!(
            endpoint = %candidate.path,
            attempt = attempt + 1,
            count = mapped.len(),
            "candidate resolved"
        );
        return mapped;
    }

    tracing::warn!(
        candidates = candidates.len(),
        first = candidates.first().map(|c| c.path.as_str()),
        "all candidates exhausted"
    );
    Vec::new()
}
