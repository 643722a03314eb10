use miramar_core::HomeContent;

use crate::envelope::{Field, Record};
use crate::image::resolve_image;

use super::parse_rich_text;

/// Maps the home single-type record. Absent fields stay `None` so callers
/// can fall back to the placeholder copy.
#[must_use]
pub fn normalize_home(record: &Record<'_>) -> HomeContent {
    HomeContent {
        title: record.text(Field::Title),
        description: record.find(Field::Description, parse_rich_text),
        cover: record.find(Field::Image, resolve_image),
    }
}

#[cfg(test)]
mod tests {
    use miramar_core::content::{DEFAULT_HOME_DESCRIPTION, DEFAULT_HOME_TITLE};
    use serde_json::json;

    use super::*;

    #[test]
    fn nested_home_with_capitalised_fields() {
        let value = json!({ "id": 1, "attributes": {
            "Title": "Miramar",
            "Description": [{ "type": "paragraph", "children": [{ "text": "Todo en uno", "italic": true }] }],
            "Image": { "data": { "attributes": { "url": "/uploads/hero.jpg", "width": 1920, "height": 600 } } }
        }});
        let home = normalize_home(&Record::classify(&value).unwrap());
        assert_eq!(home.display_title(), "Miramar");
        assert_eq!(home.display_description(), "<em>Todo en uno</em>");
        let cover = home.cover.unwrap();
        assert_eq!(cover.url, "/uploads/hero.jpg");
        assert_eq!(cover.width, Some(1920));
    }

    #[test]
    fn flat_home_with_cover_field() {
        let value = json!({ "id": 1, "titulo": "Bienvenidos", "cover": "https://cdn.example.com/c.jpg" });
        let home = normalize_home(&Record::classify(&value).unwrap());
        assert_eq!(home.title.as_deref(), Some("Bienvenidos"));
        assert_eq!(home.cover.map(|c| c.url).as_deref(), Some("https://cdn.example.com/c.jpg"));
    }

    #[test]
    fn empty_home_renders_placeholder_copy() {
        let home = normalize_home(&Record::classify(&json!({ "id": 1 })).unwrap());
        assert_eq!(home, HomeContent::default());
        assert_eq!(home.display_title(), DEFAULT_HOME_TITLE);
        assert_eq!(home.display_description(), DEFAULT_HOME_DESCRIPTION);
    }
}
