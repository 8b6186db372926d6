//! Markup parsing for embedded message payloads.
//!
//! Message payloads are small XML documents. The decoder consumes them
//! through two views:
//!
//! - [`Node`] - a key/value tree, where attributes are stored under `@name`
//!   keys, element text under `#text`, and repeated children as a
//!   [`Node::Sequence`]
//! - [`Document`] - a flat, document-ordered list of elements for
//!   attribute lookups on the first element with a given tag
//!
//! Both are produced by a [`MarkupParser`]. [`XmlParser`] is the default
//! implementation.
//!
//! # Example
//!
//! ```rust
//! use wxdecode::markup::{MarkupParser, XmlParser};
//!
//! let parser = XmlParser::new();
//! let tree = parser.parse_tree("<msg><appmsg><title>Hi</title></appmsg></msg>")?;
//! assert_eq!(tree.path(&["msg", "appmsg", "title"]).and_then(|n| n.as_str()), Some("Hi"));
//!
//! let doc = parser.parse_document(r#"<msg><img md5="abc"/></msg>"#)?;
//! assert_eq!(doc.select("img").and_then(|img| img.attr("md5")), Some("abc"));
//! # Ok::<(), wxdecode::markup::MarkupError>(())
//! ```

mod tree;
mod xml;

pub use tree::{ATTR_PREFIX, Node, TEXT_KEY};
pub use xml::{DEFAULT_MAX_DEPTH, Document, Element, XmlParser};

use thiserror::Error;

/// Reasons a payload could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MarkupError {
    /// The tokenizer rejected the input.
    #[error("malformed markup at byte {position}: {message}")]
    Syntax {
        /// Byte offset reported by the tokenizer
        position: u64,
        /// Tokenizer error message
        message: String,
    },

    /// The input ended with unclosed elements.
    #[error("unclosed element <{0}> at end of input")]
    Unclosed(String),

    /// A closing tag appeared without a matching opening tag.
    #[error("unexpected closing tag </{0}>")]
    UnexpectedClose(String),

    /// The input contains no elements.
    #[error("no root element")]
    NoRoot,

    /// Elements are nested deeper than the parser accepts.
    #[error("elements nested deeper than {limit} levels")]
    TooDeep {
        /// Deepest nesting accepted
        limit: usize,
    },
}

/// Turns payload text into the two views the enrichers read.
///
/// Implementations must be pure: the same input always yields the same
/// output, and no state is retained between calls.
pub trait MarkupParser: Send + Sync {
    /// Parses markup into a navigable key/value tree.
    ///
    /// Text with no markup at all parses to [`Node::Text`].
    fn parse_tree(&self, text: &str) -> Result<Node, MarkupError>;

    /// Parses markup into a queryable element list.
    ///
    /// Fails with [`MarkupError::NoRoot`] when the text contains no element.
    fn parse_document(&self, text: &str) -> Result<Document, MarkupError>;
}
