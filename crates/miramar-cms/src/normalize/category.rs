use miramar_core::Category;

use crate::envelope::{Field, Record};
use crate::image::resolve_image;

/// Name shown for a category record that carries none.
pub const DEFAULT_CATEGORY_NAME: &str = "Categoría";

/// Maps a category record in any envelope to a [`Category`].
#[must_use]
pub fn normalize_category(record: &Record<'_>) -> Category {
    let id = record.id().unwrap_or_default();
    Category {
        id,
        name: record
            .text(Field::Name)
            .unwrap_or_else(|| DEFAULT_CATEGORY_NAME.to_string()),
        description: record.find(Field::Description, super::flat_text).unwrap_or_default(),
        slug: record
            .text(Field::Slug)
            .unwrap_or_else(|| format!("categoria-{id}")),
        image: record.find(Field::Image, resolve_image),
    }
}
