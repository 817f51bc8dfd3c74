use crate::block::{BlockKind, Span};
use crate::error::ConvertError;
use crate::inline::tokenize;
use crate::node::{HtmlNode, span_to_node};

const FENCE: &str = "```";

/// Split a document into normalized blocks on blank-line boundaries.
///
/// Interior lines are trimmed individually before the block itself is
/// trimmed, so indented source text segments the same as flush-left text.
/// Blocks that normalize to nothing are dropped.
pub fn segment(document: &str) -> Vec<String> {
    document
        .split("\n\n")
        .map(|chunk| {
            chunk
                .lines()
                .map(str::trim)
                .collect::<Vec<_>>()
                .join("\n")
                .trim()
                .to_string()
        })
        .filter(|block| !block.is_empty())
        .collect()
}

/// Classify a block from its first line's prefix; first match wins.
///
/// Only the first line is inspected here. Per-line validation of quote and
/// list prefixes happens during compilation, where a mismatch is an error.
pub fn classify(block: &str) -> BlockKind {
    if heading_level(block).is_some() {
        BlockKind::Heading
    } else if block.len() >= 2 * FENCE.len()
        && block.starts_with(FENCE)
        && block.ends_with(FENCE)
    {
        BlockKind::Code
    } else if block.starts_with("> ") {
        BlockKind::Quote
    } else if block.starts_with("- ") {
        BlockKind::UnorderedList
    } else if is_ordered_item(block) {
        BlockKind::OrderedList
    } else {
        BlockKind::Paragraph
    }
}

/// 1-6 leading `#` characters followed by a space.
fn heading_level(block: &str) -> Option<usize> {
    let level = block.bytes().take_while(|&b| b == b'#').count();
    ((1..=6).contains(&level) && block.as_bytes().get(level) == Some(&b' ')).then_some(level)
}

/// A decimal integer followed by `". "`.
fn is_ordered_item(block: &str) -> bool {
    let digits = block.bytes().take_while(u8::is_ascii_digit).count();
    digits > 0 && block[digits..].starts_with(". ")
}

/// Compile a classified block into its HTML subtree.
pub fn compile(block: &str, kind: BlockKind) -> Result<HtmlNode, ConvertError> {
    match kind {
        BlockKind::Paragraph => compile_paragraph(block),
        BlockKind::Heading => compile_heading(block),
        BlockKind::Code => compile_code(block),
        BlockKind::Quote => compile_quote(block),
        BlockKind::UnorderedList => Ok(HtmlNode::parent("ul", compile_items(block, 2)?)),
        BlockKind::OrderedList => Ok(HtmlNode::parent("ol", compile_items(block, 3)?)),
    }
}

/// Convert a full Markdown document into an HTML node tree rooted at a
/// single `div`. The first block that fails to compile aborts the whole
/// conversion.
pub fn markdown_to_node(document: &str) -> Result<HtmlNode, ConvertError> {
    let mut children = Vec::new();
    for block in segment(document) {
        children.push(compile(&block, classify(&block))?);
    }
    Ok(HtmlNode::parent("div", children))
}

fn malformed(kind: BlockKind, block: &str) -> ConvertError {
    ConvertError::MalformedBlock {
        kind,
        block: block.to_string(),
    }
}

fn inline_children(text: &str) -> Result<Vec<HtmlNode>, ConvertError> {
    tokenize(text).iter().map(span_to_node).collect()
}

fn compile_paragraph(block: &str) -> Result<HtmlNode, ConvertError> {
    let text = block.lines().collect::<Vec<_>>().join(" ");
    Ok(HtmlNode::parent("p", inline_children(&text)?))
}

fn compile_heading(block: &str) -> Result<HtmlNode, ConvertError> {
    let level = block.bytes().take_while(|&b| b == b'#').count();
    let text = block
        .get(level + 1..)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| malformed(BlockKind::Heading, block))?;
    Ok(HtmlNode::parent(format!("h{level}"), inline_children(text)?))
}

fn compile_code(block: &str) -> Result<HtmlNode, ConvertError> {
    let content = block
        .strip_prefix(FENCE)
        .and_then(|rest| rest.strip_suffix(FENCE))
        .ok_or_else(|| malformed(BlockKind::Code, block))?;
    let content = content.strip_prefix('\n').unwrap_or(content);
    // Code content bypasses inline markup entirely: one plain span.
    let code = HtmlNode::parent("code", vec![span_to_node(&Span::plain(content))?]);
    Ok(HtmlNode::parent("pre", vec![code]))
}

fn compile_quote(block: &str) -> Result<HtmlNode, ConvertError> {
    let mut lines = Vec::new();
    for line in block.lines() {
        let stripped = line
            .strip_prefix('>')
            .ok_or_else(|| malformed(BlockKind::Quote, block))?;
        lines.push(stripped.trim_start());
    }
    Ok(HtmlNode::parent("blockquote", inline_children(&lines.join(" "))?))
}

/// Compile list lines into `li` nodes, stripping a fixed-width item prefix
/// from each line without per-line validation.
fn compile_items(block: &str, prefix_len: usize) -> Result<Vec<HtmlNode>, ConvertError> {
    block
        .lines()
        .map(|line| {
            let text = line.get(prefix_len..).unwrap_or("");
            Ok(HtmlNode::parent("li", inline_children(text)?))
        })
        .collect()
}
