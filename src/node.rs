use crate::block::{Span, SpanKind};
use crate::error::ConvertError;

/// Alt text substituted for images whose Markdown alt text is empty.
const DEFAULT_ALT: &str = "Image without description";

/// A node in the output HTML tree.
///
/// Leaves hold terminal text content and never have children; parents hold
/// an ordered child sequence and never hold text of their own. Both shapes
/// carry optional attributes, serialized in insertion order. The variant
/// constructors make the required fields (leaf value, parent tag and
/// children) impossible to omit, so serialization itself cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    Leaf {
        tag: Option<String>,
        value: String,
        attrs: Option<Vec<(String, String)>>,
    },
    Parent {
        tag: String,
        children: Vec<HtmlNode>,
        attrs: Option<Vec<(String, String)>>,
    },
}

impl HtmlNode {
    pub fn leaf(tag: Option<&str>, value: impl Into<String>) -> Self {
        HtmlNode::Leaf {
            tag: tag.map(str::to_string),
            value: value.into(),
            attrs: None,
        }
    }

    pub fn leaf_with_attrs(
        tag: &str,
        value: impl Into<String>,
        attrs: Vec<(String, String)>,
    ) -> Self {
        HtmlNode::Leaf {
            tag: Some(tag.to_string()),
            value: value.into(),
            attrs: Some(attrs),
        }
    }

    pub fn parent(tag: impl Into<String>, children: Vec<HtmlNode>) -> Self {
        HtmlNode::Parent {
            tag: tag.into(),
            children,
            attrs: None,
        }
    }

    /// Serialize the tree to HTML text, depth-first.
    ///
    /// A tagless leaf renders as its bare value, which is how plain inline
    /// text ends up unwrapped inside its enclosing element. A parent with an
    /// empty child sequence renders as an empty element.
    pub fn to_html(&self) -> String {
        match self {
            HtmlNode::Leaf { tag, value, attrs } => match tag {
                None => value.clone(),
                Some(tag) => format!("<{tag}{}>{value}</{tag}>", attrs_to_html(attrs)),
            },
            HtmlNode::Parent {
                tag,
                children,
                attrs,
            } => {
                let mut out = format!("<{tag}{}>", attrs_to_html(attrs));
                for child in children {
                    out.push_str(&child.to_html());
                }
                out.push_str(&format!("</{tag}>"));
                out
            }
        }
    }
}

/// Serialize attributes as ` key="value"` pairs in insertion order, with a
/// leading space before each pair. Values are emitted verbatim; a `"` inside
/// an attribute value is not escaped (known limitation).
fn attrs_to_html(attrs: &Option<Vec<(String, String)>>) -> String {
    match attrs {
        None => String::new(),
        Some(attrs) => attrs
            .iter()
            .map(|(key, value)| format!(" {key}=\"{value}\""))
            .collect(),
    }
}

/// Convert an inline span to its HTML leaf node.
pub fn span_to_node(span: &Span) -> Result<HtmlNode, ConvertError> {
    let missing_url = || ConvertError::MissingUrl {
        kind: span.kind,
        text: span.text.clone(),
    };

    match span.kind {
        SpanKind::Plain => Ok(HtmlNode::leaf(None, &span.text)),
        SpanKind::Bold => Ok(HtmlNode::leaf(Some("b"), &span.text)),
        SpanKind::Italic => Ok(HtmlNode::leaf(Some("i"), &span.text)),
        SpanKind::Code => Ok(HtmlNode::leaf(Some("code"), &span.text)),
        SpanKind::Link => {
            let url = span.url.as_deref().ok_or_else(missing_url)?;
            Ok(HtmlNode::leaf_with_attrs(
                "a",
                &span.text,
                vec![("href".to_string(), url.to_string())],
            ))
        }
        SpanKind::Image => {
            let url = span.url.as_deref().ok_or_else(missing_url)?;
            let alt = if span.text.is_empty() {
                DEFAULT_ALT
            } else {
                &span.text
            };
            Ok(HtmlNode::leaf_with_attrs(
                "img",
                "",
                vec![
                    ("src".to_string(), url.to_string()),
                    ("alt".to_string(), alt.to_string()),
                ],
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagless_leaf_is_bare_value() {
        let node = HtmlNode::leaf(None, "just text");
        assert_eq!(node.to_html(), "just text");
    }

    #[test]
    fn leaf_with_tag() {
        let node = HtmlNode::leaf(Some("p"), "Hello, world!");
        assert_eq!(node.to_html(), "<p>Hello, world!</p>");
    }

    #[test]
    fn leaf_with_attrs() {
        let node = HtmlNode::leaf_with_attrs(
            "a",
            "Click",
            vec![("href".to_string(), "https://x".to_string())],
        );
        assert_eq!(node.to_html(), "<a href=\"https://x\">Click</a>");
    }

    #[test]
    fn attrs_keep_insertion_order() {
        let node = HtmlNode::leaf_with_attrs(
            "img",
            "",
            vec![
                ("src".to_string(), "/a.png".to_string()),
                ("alt".to_string(), "a picture".to_string()),
            ],
        );
        assert_eq!(node.to_html(), "<img src=\"/a.png\" alt=\"a picture\"></img>");
    }

    #[test]
    fn parent_with_children() {
        let node = HtmlNode::parent(
            "p",
            vec![
                HtmlNode::leaf(Some("b"), "Bold text"),
                HtmlNode::leaf(None, "Normal text"),
                HtmlNode::leaf(Some("i"), "italic text"),
            ],
        );
        assert_eq!(
            node.to_html(),
            "<p><b>Bold text</b>Normal text<i>italic text</i></p>"
        );
    }

    #[test]
    fn nested_parents() {
        let inner = HtmlNode::parent("span", vec![HtmlNode::leaf(Some("b"), "grandchild")]);
        let outer = HtmlNode::parent("div", vec![inner]);
        assert_eq!(outer.to_html(), "<div><span><b>grandchild</b></span></div>");
    }

    #[test]
    fn parent_with_empty_children_is_empty_element() {
        let node = HtmlNode::parent("div", vec![]);
        assert_eq!(node.to_html(), "<div></div>");
    }

    #[test]
    fn span_conversions() {
        let cases = [
            (Span::plain("hi"), "hi"),
            (Span::new("hi", SpanKind::Bold), "<b>hi</b>"),
            (Span::new("hi", SpanKind::Italic), "<i>hi</i>"),
            (Span::new("x = 1", SpanKind::Code), "<code>x = 1</code>"),
            (
                Span::with_url("boot", SpanKind::Link, "https://boot.dev"),
                "<a href=\"https://boot.dev\">boot</a>",
            ),
            (
                Span::with_url("a cat", SpanKind::Image, "/cat.png"),
                "<img src=\"/cat.png\" alt=\"a cat\"></img>",
            ),
        ];
        for (span, html) in cases {
            assert_eq!(span_to_node(&span).unwrap().to_html(), html);
        }
    }

    #[test]
    fn image_without_alt_gets_default() {
        let span = Span::with_url("", SpanKind::Image, "/cat.png");
        assert_eq!(
            span_to_node(&span).unwrap().to_html(),
            format!("<img src=\"/cat.png\" alt=\"{DEFAULT_ALT}\"></img>")
        );
    }

    #[test]
    fn link_without_url_fails() {
        let span = Span::new("dangling", SpanKind::Link);
        assert_eq!(
            span_to_node(&span),
            Err(ConvertError::MissingUrl {
                kind: SpanKind::Link,
                text: "dangling".to_string()
            })
        );
    }

    #[test]
    fn image_without_url_fails() {
        let span = Span::new("dangling", SpanKind::Image);
        assert!(span_to_node(&span).is_err());
    }
}
