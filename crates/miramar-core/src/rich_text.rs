//! Rich-text content from the CMS blocks editor and its flattening to markup.
//!
//! The CMS stores long-form fields (FAQ answers, the home description) either
//! as a plain string or as an ordered list of blocks:
//!
//! ```json
//! [
//!   { "type": "paragraph", "children": [{ "type": "text", "text": "Hi", "bold": true }] },
//!   { "type": "list", "format": "unordered",
//!     "children": [{ "type": "list-item", "children": [{ "text": "one" }] }] }
//! ]
//! ```
//!
//! Only paragraphs and lists are rendered. Headings, quotes, images and any
//! other block type flatten to nothing.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

/// A long-form text field: plain string or editor blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RichText {
    Plain(String),
    Blocks(Vec<Block>),
}

impl Default for RichText {
    fn default() -> Self {
        Self::Plain(String::new())
    }
}

/// A top-level editor block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Block {
    Paragraph {
        #[serde(default)]
        children: Vec<Inline>,
    },
    List {
        #[serde(default)]
        format: ListFormat,
        #[serde(default)]
        children: Vec<ListItem>,
    },
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListFormat {
    Ordered,
    #[default]
    Unordered,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    #[serde(default)]
    pub children: Vec<Inline>,
}

/// A formatted text run, or a link wrapping its own runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inline {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub underline: bool,
    /// Target of a `link` node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Inline>,
}

impl Inline {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    fn to_markup(&self) -> String {
        if !self.children.is_empty() {
            let inner = render_runs(&self.children);
            return match &self.url {
                Some(url) => format!("<a href=\"{}\">{inner}</a>", escape(url)),
                None => inner,
            };
        }

        let mut out = escape(&self.text);
        if self.bold {
            out = format!("<strong>{out}</strong>");
        }
        if self.italic {
            out = format!("<em>{out}</em>");
        }
        if self.underline {
            out = format!("<u>{out}</u>");
        }
        out
    }
}

impl Block {
    /// Renders one block. Unknown blocks render as an empty string.
    #[must_use]
    pub fn to_markup(&self) -> String {
        match self {
            Block::Paragraph { children } => render_runs(children),
            Block::List { format, children } => {
                let tag = match format {
                    ListFormat::Ordered => "ol",
                    ListFormat::Unordered => "ul",
                };
                let items: String = children
                    .iter()
                    .map(|item| format!("<li>{}</li>", render_runs(&item.children)))
                    .collect();
                format!("<{tag}>{items}</{tag}>")
            }
            Block::Unknown => String::new(),
        }
    }
}

impl RichText {
    /// Flattens the content to a markup string.
    ///
    /// Plain strings are returned unchanged. Blocks are rendered, empty
    /// outputs dropped, and the rest joined with a single space.
    #[must_use]
    pub fn to_markup(&self) -> String {
        match self {
            RichText::Plain(text) => text.clone(),
            RichText::Blocks(blocks) => blocks
                .iter()
                .map(Block::to_markup)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// Flattens the content to text with all markup removed.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        strip_markup(&self.to_markup())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_markup().trim().is_empty()
    }
}

fn render_runs(runs: &[Inline]) -> String {
    runs.iter().map(Inline::to_markup).collect()
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Removes tags from rendered markup and decodes the entities [`RichText`]
/// produces, for terminal or plain-text display.
#[must_use]
pub fn strip_markup(markup: &str) -> String {
    let with_breaks = markup.replace("</li><li>", "</li> <li>");
    TAG_RE
        .replace_all(&with_breaks, "")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks(json: &str) -> RichText {
        serde_json::from_str(json).expect("valid rich text fixture")
    }

    #[test]
    fn plain_string_is_returned_unchanged() {
        let text = RichText::Plain("Envíos a <b>todo</b> el país".to_string());
        assert_eq!(text.to_markup(), "Envíos a <b>todo</b> el país");
    }

    #[test]
    fn bold_run_is_wrapped_in_strong() {
        let text = blocks(r#"[{"type":"paragraph","children":[{"text":"Hi","bold":true}]}]"#);
        assert_eq!(text.to_markup(), "<strong>Hi</strong>");
    }

    #[test]
    fn combined_formatting_nests_bold_inside_italic_inside_underline() {
        let text = blocks(
            r#"[{"type":"paragraph","children":[{"text":"x","bold":true,"italic":true,"underline":true}]}]"#,
        );
        assert_eq!(text.to_markup(), "<u><em><strong>x</strong></em></u>");
    }

    #[test]
    fn paragraph_runs_are_concatenated() {
        let text = blocks(
            r#"[{"type":"paragraph","children":[{"type":"text","text":"Pago "},{"type":"text","text":"seguro","italic":true}]}]"#,
        );
        assert_eq!(text.to_markup(), "Pago <em>seguro</em>");
    }

    #[test]
    fn lists_render_items() {
        let text = blocks(
            r#"[
                {"type":"list","format":"ordered","children":[
                    {"type":"list-item","children":[{"text":"uno"}]},
                    {"type":"list-item","children":[{"text":"dos"}]}
                ]},
                {"type":"list","format":"unordered","children":[
                    {"type":"list-item","children":[{"text":"tres"}]}
                ]}
            ]"#,
        );
        assert_eq!(
            text.to_markup(),
            "<ol><li>uno</li><li>dos</li></ol> <ul><li>tres</li></ul>"
        );
    }

    #[test]
    fn unknown_and_empty_blocks_are_dropped_before_joining() {
        let text = blocks(
            r#"[
                {"type":"heading","level":2,"children":[{"text":"Título"}]},
                {"type":"paragraph","children":[{"text":"a"}]},
                {"type":"paragraph","children":[]},
                {"type":"paragraph","children":[{"text":"b"}]}
            ]"#,
        );
        assert_eq!(text.to_markup(), "a b");
    }

    #[test]
    fn links_wrap_their_children() {
        let text = blocks(
            r#"[{"type":"paragraph","children":[
                {"type":"text","text":"Escríbenos por "},
                {"type":"link","url":"https://wa.me/1","children":[{"type":"text","text":"WhatsApp"}]}
            ]}]"#,
        );
        assert_eq!(
            text.to_markup(),
            "Escríbenos por <a href=\"https://wa.me/1\">WhatsApp</a>"
        );
    }

    #[test]
    fn block_text_is_escaped() {
        let text = blocks(r#"[{"type":"paragraph","children":[{"text":"a < b & c"}]}]"#);
        assert_eq!(text.to_markup(), "a &lt; b &amp; c");
    }

    #[test]
    fn plain_text_strips_markup_and_decodes_entities() {
        let text = blocks(
            r#"[{"type":"paragraph","children":[{"text":"a & b","bold":true}]},
                {"type":"list","format":"unordered","children":[
                    {"children":[{"text":"x"}]},{"children":[{"text":"y"}]}
                ]}]"#,
        );
        assert_eq!(text.to_plain_text(), "a & b x y");
    }

    #[test]
    fn empty_blocks_are_empty() {
        assert!(blocks("[]").is_empty());
        assert!(RichText::default().is_empty());
        assert!(!RichText::Plain("hola".into()).is_empty());
    }
}
