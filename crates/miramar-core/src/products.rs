use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::categories::Category;
use crate::content::Image;

/// Size label used when the CMS record carries a single product-level price
/// instead of a price list.
pub const DEFAULT_PRICE_SIZE: &str = "Único";

/// A catalog product as shown on listing and detail pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// URL slug, e.g. `"camiseta-deportiva"`. Falls back to `producto-{id}`.
    pub slug: String,
    pub description: String,
    pub image: Option<Image>,
    /// Categories the product belongs to, unique by id.
    pub categories: Vec<Category>,
    /// At least one entry; see [`DEFAULT_PRICE_SIZE`].
    pub prices: Vec<Price>,
}

impl Product {
    /// Returns the first price entry, which listing cards display.
    #[must_use]
    pub fn primary_price(&self) -> Option<&Price> {
        self.prices.first()
    }

    /// Returns `true` if any price entry carries a usable discount.
    #[must_use]
    pub fn has_discount(&self) -> bool {
        self.prices.iter().any(Price::has_discount)
    }

    /// Returns `true` if the product is linked to the category with `category_id`.
    #[must_use]
    pub fn in_category(&self, category_id: i64) -> bool {
        self.categories.iter().any(|c| c.id == category_id)
    }

    /// Rewrites host-relative image URLs (product and categories) against `host`.
    #[must_use]
    pub fn qualified(mut self, host: &str) -> Self {
        self.image = self.image.map(|img| img.qualified(host));
        self.categories = self
            .categories
            .into_iter()
            .map(|c| c.qualified(host))
            .collect();
        self
    }
}

/// One purchasable size of a [`Product`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub id: i64,
    /// Size label, e.g. `"M"` or `"500 ml"`.
    pub size: String,
    pub price: Decimal,
    /// Sale price. `None` when the item is not on sale.
    pub discount_price: Option<Decimal>,
}

impl Price {
    /// Builds the single fallback entry used when a product has no price list.
    #[must_use]
    pub fn single(price: Decimal, discount_price: Option<Decimal>) -> Self {
        Self {
            id: 1,
            size: DEFAULT_PRICE_SIZE.to_string(),
            price,
            discount_price,
        }
    }

    /// Discount in whole percent, `round((price - discount) / price * 100)`.
    ///
    /// Returns `0` when there is no discount price, when `price` is not
    /// positive, when the discount price is not below the list price, or
    /// when the arithmetic would overflow.
    #[must_use]
    pub fn discount_percentage(&self) -> u32 {
        let Some(discount) = self.discount_price else {
            return 0;
        };
        if self.price <= Decimal::ZERO || discount >= self.price {
            return 0;
        }
        let Some(pct) = self
            .price
            .checked_sub(discount)
            .and_then(|saved| saved.checked_div(self.price))
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        else {
            return 0;
        };
        let pct = pct.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        if pct <= Decimal::ZERO {
            0
        } else {
            pct.to_u32().unwrap_or(0)
        }
    }

    /// Returns `true` when a discount badge should be shown.
    #[must_use]
    pub fn has_discount(&self) -> bool {
        self.discount_percentage() > 0
    }

    /// The amount the customer pays: the discount price when a discount is
    /// signalled, otherwise the list price.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        match self.discount_price {
            Some(discount) if self.has_discount() => discount,
            _ => self.price,
        }
    }
}
