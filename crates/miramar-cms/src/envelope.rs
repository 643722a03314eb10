//! Record envelope shapes and field lookup.
//!
//! The CMS has returned records in two envelopes over its lifetime and field
//! names in both English and Spanish:
//!
//! ```json
//! { "id": 3, "name": "Ropa", "slug": "ropa" }                     // flat
//! { "id": 3, "attributes": { "nombre": "Ropa", "slug": "ropa" } } // nested
//! ```
//!
//! Every record is classified once into a [`Record`] and every field is read
//! through a [`Field`], whose alias list is the fixed priority chain for that
//! field. For each alias the record itself is checked before `attributes`.
//!
//! Relations (a product's categories, prices, a category's products) arrive
//! as a bare array, a single object, or wrapped in `{ "data": ... }`; see
//! [`Record::relation`].

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Map, Value};

/// A logical field and its known spellings, in lookup priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Title,
    Description,
    Slug,
    Image,
    Categories,
    Products,
    Prices,
    Size,
    Price,
    DiscountPrice,
    Question,
    Answer,
}

impl Field {
    #[must_use]
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Field::Name => &["name", "nombre"],
            Field::Title => &["title", "Title", "titulo"],
            Field::Description => &["description", "Description", "descripcion"],
            Field::Slug => &["slug"],
            Field::Image => &["image", "Image", "imagen", "Imagen", "cover"],
            Field::Categories => &["categories", "categorias", "category", "categoria"],
            Field::Products => &["products", "productos"],
            Field::Prices => &["prices", "precios"],
            Field::Size => &["size", "tamano"],
            Field::Price => &["price", "precio"],
            Field::DiscountPrice => &["discountPrice", "descuento"],
            Field::Question => &["question", "pregunta"],
            Field::Answer => &["answer", "respuesta"],
        }
    }
}

/// A raw CMS record in one of its known envelopes.
#[derive(Debug, Clone, Copy)]
pub enum Record<'a> {
    /// Fields sit directly on the record.
    Flat(&'a Map<String, Value>),
    /// Fields sit under `attributes`; `id` stays on the outer object.
    Nested {
        outer: &'a Map<String, Value>,
        attributes: &'a Map<String, Value>,
    },
}

impl<'a> Record<'a> {
    /// Classifies a JSON value. Returns `None` for anything but an object.
    #[must_use]
    pub fn classify(value: &'a Value) -> Option<Self> {
        let outer = value.as_object()?;
        match outer.get("attributes") {
            Some(Value::Object(attributes)) => Some(Record::Nested { outer, attributes }),
            _ => Some(Record::Flat(outer)),
        }
    }

    /// The record id, read from the outer object first.
    #[must_use]
    pub fn id(&self) -> Option<i64> {
        let from = |map: &Map<String, Value>| map.get("id").and_then(as_id);
        match self {
            Record::Flat(fields) => from(fields),
            Record::Nested { outer, attributes } => from(outer).or_else(|| from(attributes)),
        }
    }

    /// All non-null values for `field`, in priority order.
    pub fn values(self, field: Field) -> impl Iterator<Item = &'a Value> {
        field
            .aliases()
            .iter()
            .flat_map(move |alias| {
                let (first, second) = match self {
                    Record::Flat(fields) => (fields.get(*alias), None),
                    Record::Nested { outer, attributes } => {
                        (outer.get(*alias), attributes.get(*alias))
                    }
                };
                first.into_iter().chain(second)
            })
            .filter(|v| !v.is_null())
    }

    /// The first value for `field` that `extract` accepts.
    pub fn find<T>(&self, field: Field, extract: impl Fn(&'a Value) -> Option<T>) -> Option<T> {
        self.values(field).find_map(extract)
    }

    /// The first non-blank text value for `field`.
    #[must_use]
    pub fn text(&self, field: Field) -> Option<String> {
        self.find(field, as_text)
    }

    /// The first numeric value for `field`, accepting numeric strings.
    #[must_use]
    pub fn decimal(&self, field: Field) -> Option<Decimal> {
        self.find(field, as_decimal)
    }

    /// Records related through `field`, from the first alias that yields any.
    #[must_use]
    pub fn relation(&self, field: Field) -> Vec<Record<'a>> {
        self.values(field)
            .map(relation_records)
            .find(|records| !records.is_empty())
            .unwrap_or_default()
    }
}

/// Unwraps a relation value into its records.
///
/// Accepts `[...]`, `{...}`, `{ "data": [...] }`, `{ "data": {...} }` and
/// `{ "data": null }`.
#[must_use]
pub fn relation_records(value: &Value) -> Vec<Record<'_>> {
    match value {
        Value::Array(items) => items.iter().filter_map(Record::classify).collect(),
        Value::Object(map) => match map.get("data") {
            Some(data) => relation_records(data),
            None => Record::classify(value).into_iter().collect(),
        },
        _ => Vec::new(),
    }
}

/// Reads an id from a number or a numeric string.
#[must_use]
pub fn as_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Reads a non-blank string. Numbers are rendered as text.
#[must_use]
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Reads a decimal from a JSON number or numeric string.
#[must_use]
pub fn as_decimal(value: &Value) -> Option<Decimal> {
    let raw = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .ok()
}
