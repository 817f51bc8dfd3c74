use std::sync::LazyLock;

use regex::Regex;

use crate::block::{Span, SpanKind};

static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\[\]]*)\]\(([^()]*)\)").expect("image pattern compiles"));
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[\]]*)\]\(([^()]*)\)").expect("link pattern compiles"));

/// Tokenize inline Markdown markup into an ordered sequence of spans.
///
/// The passes run in a fixed order (bold, italic, code, image, link) and
/// each pass only re-scans the plain spans the previous pass left behind,
/// so text already typed by an earlier pass is never split again. Nesting
/// is not supported.
pub fn tokenize(text: &str) -> Vec<Span> {
    if text.is_empty() {
        return Vec::new();
    }
    let spans = vec![Span::plain(text)];
    let spans = split_delimiter(spans, "**", SpanKind::Bold);
    let spans = split_delimiter(spans, "_", SpanKind::Italic);
    let spans = split_delimiter(spans, "`", SpanKind::Code);
    let spans = split_images(spans);
    split_links(spans)
}

/// Split plain spans on a paired delimiter, turning the text strictly
/// between each matched pair into a span of `kind`.
///
/// An unmatched opening delimiter is not an error: the remainder of the
/// text from the opener onward stays plain, delimiter characters included.
/// An empty delimited run (`****`) still yields an empty typed span.
pub fn split_delimiter(spans: Vec<Span>, delimiter: &str, kind: SpanKind) -> Vec<Span> {
    let mut result = Vec::new();
    for span in spans {
        if span.kind != SpanKind::Plain {
            result.push(span);
            continue;
        }
        let mut text = span.text.as_str();
        while let Some(start) = text.find(delimiter) {
            let after = &text[start + delimiter.len()..];
            let Some(end) = after.find(delimiter) else {
                break;
            };
            if start > 0 {
                result.push(Span::plain(&text[..start]));
            }
            result.push(Span::new(&after[..end], kind));
            text = &after[end + delimiter.len()..];
        }
        if !text.is_empty() {
            match text.find(delimiter) {
                // Unmatched opener: split off any leading text, keep the
                // rest verbatim.
                Some(start) if start > 0 => {
                    result.push(Span::plain(&text[..start]));
                    result.push(Span::plain(&text[start..]));
                }
                _ => result.push(Span::plain(text)),
            }
        }
    }
    result
}

/// Extract `![alt](url)` image syntax from plain spans.
pub fn split_images(spans: Vec<Span>) -> Vec<Span> {
    split_pattern(spans, &IMAGE_RE, SpanKind::Image)
}

/// Extract `[text](url)` link syntax from plain spans. An occurrence
/// preceded by `!` is image syntax and is left alone.
pub fn split_links(spans: Vec<Span>) -> Vec<Span> {
    split_pattern(spans, &LINK_RE, SpanKind::Link)
}

fn split_pattern(spans: Vec<Span>, pattern: &Regex, kind: SpanKind) -> Vec<Span> {
    let mut result = Vec::new();
    for span in spans {
        if span.kind != SpanKind::Plain {
            result.push(span);
            continue;
        }
        let text = span.text.as_str();
        let mut pieces = Vec::new();
        let mut last = 0;
        for caps in pattern.captures_iter(text) {
            let m = caps.get(0).expect("whole-pattern group");
            if kind == SpanKind::Link && text[..m.start()].ends_with('!') {
                continue;
            }
            if m.start() > last {
                pieces.push(Span::plain(&text[last..m.start()]));
            }
            pieces.push(Span::with_url(&caps[1], kind, &caps[2]));
            last = m.end();
        }
        if pieces.is_empty() {
            // No match anywhere, including malformed bracket syntax: the
            // span passes through untouched.
            result.push(span);
        } else {
            if last < text.len() {
                pieces.push(Span::plain(&text[last..]));
            }
            result.append(&mut pieces);
        }
    }
    result
}
