//! Image reference resolution.

use miramar_core::Image;
use serde_json::Value;

/// Resolves an image reference in any known shape, first match wins:
///
/// 1. a plain string is the URL,
/// 2. `{ "data": { "attributes": { "url", "width", "height" } } }` (relational media),
/// 3. `{ "url", "width", "height" }` (flat media).
///
/// Returns `None` for `null`, empty strings, and anything else. URLs are
/// returned as stored; see [`Image::qualified`] for host prefixing.
#[must_use]
pub fn resolve_image(value: &Value) -> Option<Image> {
    match value {
        Value::String(url) if !url.trim().is_empty() => Some(Image::new(url.clone())),
        Value::Object(_) => {
            let relational = value.get("data").and_then(|d| d.get("attributes"));
            relational
                .and_then(flat_media)
                .or_else(|| flat_media(value))
        }
        _ => None,
    }
}

fn flat_media(value: &Value) -> Option<Image> {
    let url = value.get("url")?.as_str().filter(|u| !u.trim().is_empty())?;
    Some(Image {
        url: url.to_string(),
        width: dimension(value.get("width")),
        height: dimension(value.get("height")),
    })
}

fn dimension(value: Option<&Value>) -> Option<u32> {
    value
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn null_resolves_to_none() {
        assert_eq!(resolve_image(&Value::Null), None);
    }

    #[test]
    fn bare_string_is_returned_unchanged() {
        assert_eq!(
            resolve_image(&json!("http://x/y.jpg")),
            Some(Image::new("http://x/y.jpg"))
        );
    }

    #[test]
    fn empty_string_resolves_to_none() {
        assert_eq!(resolve_image(&json!("")), None);
    }

    #[test]
    fn relational_shape_keeps_dimensions() {
        let value = json!({ "data": { "attributes": { "url": "/up/a.png", "width": 10, "height": 20 } } });
        assert_eq!(
            resolve_image(&value),
            Some(Image {
                url: "/up/a.png".to_string(),
                width: Some(10),
                height: Some(20),
            })
        );
    }

    #[test]
    fn flat_shape_is_resolved() {
        let value = json!({ "id": 3, "url": "/uploads/b.jpg", "width": 800 });
        assert_eq!(
            resolve_image(&value),
            Some(Image {
                url: "/uploads/b.jpg".to_string(),
                width: Some(800),
                height: None,
            })
        );
    }

    #[test]
    fn relational_wins_over_flat() {
        let value = json!({
            "url": "/flat.png",
            "data": { "attributes": { "url": "/relational.png" } }
        });
        assert_eq!(resolve_image(&value).map(|i| i.url).as_deref(), Some("/relational.png"));
    }

    #[test]
    fn empty_relation_resolves_to_none() {
        assert_eq!(resolve_image(&json!({ "data": null })), None);
        assert_eq!(resolve_image(&json!({ "formats": {} })), None);
    }

    #[test]
    fn non_numeric_dimensions_are_dropped() {
        let value = json!({ "url": "/a.png", "width": "wide", "height": -1 });
        let image = resolve_image(&value).unwrap();
        assert_eq!(image.width, None);
        assert_eq!(image.height, None);
    }
}
