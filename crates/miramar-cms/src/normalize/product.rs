use std::collections::HashSet;

use miramar_core::{Category, Price, Product};
use rust_decimal::Decimal;

use crate::envelope::{Field, Record};
use crate::image::resolve_image;

use super::normalize_category;

/// Name shown for a product record that carries none.
pub const DEFAULT_PRODUCT_NAME: &str = "Producto sin nombre";

/// Maps a product record in any envelope to a [`Product`].
///
/// Prices come from the `prices` relation when it has entries; otherwise a
/// single entry is built from the product-level `price`/`discountPrice`.
#[must_use]
pub fn normalize_product(record: &Record<'_>) -> Product {
    let id = record.id().unwrap_or_default();
    Product {
        id,
        name: record
            .text(Field::Name)
            .or_else(|| record.text(Field::Title))
            .unwrap_or_else(|| DEFAULT_PRODUCT_NAME.to_string()),
        slug: record
            .text(Field::Slug)
            .unwrap_or_else(|| format!("producto-{id}")),
        description: record.find(Field::Description, super::flat_text).unwrap_or_default(),
        image: record.find(Field::Image, resolve_image),
        categories: categories(record),
        prices: prices(record),
    }
}

/// Maps a product embedded in a category's `products` relation. The owning
/// category is always attached and its image stands in for a missing one.
#[must_use]
pub(crate) fn normalize_embedded_product(record: &Record<'_>, owner: &Category) -> Product {
    let mut product = normalize_product(record);
    if product.image.is_none() {
        product.image.clone_from(&owner.image);
    }
    if !product.in_category(owner.id) {
        product.categories.push(owner.clone());
    }
    product
}

fn categories(record: &Record<'_>) -> Vec<Category> {
    let mut seen = HashSet::new();
    record
        .relation(Field::Categories)
        .iter()
        .map(normalize_category)
        .filter(|c| seen.insert(c.id))
        .collect()
}

fn prices(record: &Record<'_>) -> Vec<Price> {
    let listed: Vec<Price> = record
        .relation(Field::Prices)
        .iter()
        .enumerate()
        .map(|(index, entry)| Price {
            id: entry
                .id()
                .unwrap_or_else(|| i64::try_from(index + 1).unwrap_or(i64::MAX)),
            size: entry.text(Field::Size).unwrap_or_default(),
            price: entry.decimal(Field::Price).unwrap_or(Decimal::ZERO),
            discount_price: discount(entry),
        })
        .collect();

    if listed.is_empty() {
        vec![Price::single(
            record.decimal(Field::Price).unwrap_or(Decimal::ZERO),
            discount(record),
        )]
    } else {
        listed
    }
}

fn discount(record: &Record<'_>) -> Option<Decimal> {
    record
        .decimal(Field::DiscountPrice)
        .filter(|d| *d > Decimal::ZERO)
}
