mod block;
mod config;
mod error;
mod inline;
mod node;
mod parser;
mod site;

pub use block::{BlockKind, Span, SpanKind};
pub use config::{Config, PathsConfig, SiteConfig};
pub use error::ConvertError;
pub use node::HtmlNode;
pub use site::{build, extract_title, generate_page};

/// Tokenize inline Markdown markup into an ordered sequence of spans.
pub fn tokenize(text: &str) -> Vec<Span> {
    inline::tokenize(text)
}

/// Convert a Markdown document into an HTML node tree rooted at a `div`.
pub fn markdown_to_node(markdown: &str) -> Result<HtmlNode, ConvertError> {
    parser::markdown_to_node(markdown)
}

/// Convert a Markdown document straight to HTML text.
pub fn markdown_to_html(markdown: &str) -> Result<String, ConvertError> {
    Ok(parser::markdown_to_node(markdown)?.to_html())
}
