//! Entity mappers: raw CMS records to [`miramar_core`] view models.
//!
//! Mappers never fail. A missing field degrades to a named default, so every
//! object that reaches a mapper produces an entity.

mod category;
mod faq;
mod home;
mod product;

use miramar_core::{Block, RichText};
use serde_json::Value;

pub use category::{normalize_category, DEFAULT_CATEGORY_NAME};
pub use faq::normalize_faq;
pub use home::normalize_home;
pub use product::{normalize_product, DEFAULT_PRODUCT_NAME};
pub(crate) use product::normalize_embedded_product;

/// Reads a long-form field: a non-empty string, or a non-empty block array.
///
/// Blocks that do not match a known shape become [`Block::Unknown`] rather
/// than rejecting the whole field.
#[must_use]
pub fn parse_rich_text(value: &Value) -> Option<RichText> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(RichText::Plain(s.clone())),
        Value::Array(items) if !items.is_empty() => Some(RichText::Blocks(
            items
                .iter()
                .map(|item| serde_json::from_value(item.clone()).unwrap_or(Block::Unknown))
                .collect(),
        )),
        _ => None,
    }
}

/// Reads a short text field that some schemas store as rich text.
fn flat_text(value: &Value) -> Option<String> {
    match value {
        Value::Array(_) => parse_rich_text(value)
            .map(|text| text.to_markup())
            .filter(|s| !s.is_empty()),
        other => crate::envelope::as_text(other),
    }
}
