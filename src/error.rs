use thiserror::Error;

use crate::block::{BlockKind, SpanKind};

/// Failures raised while converting a Markdown document.
///
/// Conversion is all-or-nothing: the first malformed block aborts the whole
/// document. Unmatched delimiters and broken link/image brackets are not
/// errors; the tokenizer degrades them to plain text instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// A block whose content does not match the shape its classified kind
    /// requires, e.g. a code block without a closing fence or a quote line
    /// without a `>` prefix.
    #[error("malformed {kind:?} block: {block:?}")]
    MalformedBlock { kind: BlockKind, block: String },

    /// A link or image span reached node conversion without a url.
    #[error("{kind:?} span {text:?} has no url")]
    MissingUrl { kind: SpanKind, text: String },
}
