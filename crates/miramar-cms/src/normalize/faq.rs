use miramar_core::Faq;

use crate::envelope::{Field, Record};

use super::parse_rich_text;

/// Maps a FAQ record to a [`Faq`]. The answer may be a plain string or a
/// block array.
#[must_use]
pub fn normalize_faq(record: &Record<'_>) -> Faq {
    Faq {
        id: record.id().unwrap_or_default(),
        question: record.text(Field::Question).unwrap_or_default(),
        answer: record
            .find(Field::Answer, parse_rich_text)
            .unwrap_or_default(),
    }
}
