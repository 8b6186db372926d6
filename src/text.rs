//! Text normalization over parsed markup trees.
//!
//! The same logical field can come out of the tree parser as a plain
//! string, a sequence of fragments, or a keyed node carrying attributes next
//! to its `#text`. [`normalize`] flattens all of these into one string.

use crate::markup::{Node, TEXT_KEY};

/// Flattens a tree value into plain text.
///
/// - absent → `""`
/// - text → unchanged
/// - sequence → items normalized and concatenated in order
/// - keyed node → its `#text` entry if present, otherwise all entries
///   normalized and concatenated in document order
///
/// # Example
///
/// ```rust
/// use wxdecode::markup::Node;
/// use wxdecode::text::normalize;
///
/// let value = Node::Sequence(vec![
///     Node::Text("a".into()),
///     Node::Element(vec![
///         ("@lang".into(), Node::Text("en".into())),
///         ("#text".into(), Node::Text("b".into())),
///     ]),
///     Node::Text("c".into()),
/// ]);
/// assert_eq!(normalize(Some(&value)), "abc");
/// assert_eq!(normalize(None), "");
/// ```
pub fn normalize(value: Option<&Node>) -> String {
    let mut out = String::new();
    if let Some(node) = value {
        append(node, &mut out);
    }
    out
}

/// Normalizes the entry `key` of `node`.
pub fn field(node: &Node, key: &str) -> String {
    normalize(node.get(key))
}

/// Normalizes the entry `key` of `node`, keeping absence distinct from empty.
pub fn optional_field(node: &Node, key: &str) -> Option<String> {
    node.get(key).map(|value| normalize(Some(value)))
}

// Explicit stack so deeply nested payloads can't overflow the call stack.
fn append(root: &Node, out: &mut String) {
    let mut pending = vec![root];
    while let Some(node) = pending.pop() {
        match node {
            Node::Text(s) => out.push_str(s),
            Node::Sequence(items) => pending.extend(items.iter().rev()),
            Node::Element(entries) => match node.get(TEXT_KEY) {
                Some(text) => pending.push(text),
                None => pending.extend(entries.iter().rev().map(|(_, v)| v)),
            },
        }
    }
}
