//! Key/value tree produced from markup.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// Key used for element text when the element also has attributes or children.
pub const TEXT_KEY: &str = "#text";

/// Prefix of attribute keys.
pub const ATTR_PREFIX: char = '@';

/// A parsed markup value.
///
/// Elements that carry only text collapse to [`Node::Text`]. Elements with
/// attributes or children become [`Node::Element`], whose entries keep
/// document order. A tag that repeats under the same parent is stored once,
/// as a [`Node::Sequence`] of its occurrences.
///
/// Serializes to the equivalent JSON shape: strings, objects and arrays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A text leaf.
    Text(String),
    /// A keyed node: attributes (`@name`), children, and optional `#text`.
    Element(Vec<(String, Node)>),
    /// Repeated siblings sharing one tag.
    Sequence(Vec<Node>),
}

impl Node {
    /// Looks up a direct entry of a keyed node.
    ///
    /// Returns `None` for text leaves and sequences.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Element(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            Node::Text(_) | Node::Sequence(_) => None,
        }
    }

    /// Follows a chain of keys from this node.
    ///
    /// ```rust
    /// use wxdecode::markup::Node;
    ///
    /// let tree = Node::Element(vec![(
    ///     "msg".into(),
    ///     Node::Element(vec![("title".into(), Node::Text("hi".into()))]),
    /// )]);
    /// assert_eq!(tree.path(&["msg", "title"]), Some(&Node::Text("hi".into())));
    /// assert_eq!(tree.path(&["msg", "missing"]), None);
    /// ```
    pub fn path(&self, keys: &[&str]) -> Option<&Node> {
        keys.iter().try_fold(self, |node, key| node.get(key))
    }

    /// Returns the string of a text leaf.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Text(s) => Some(s),
            Node::Element(_) | Node::Sequence(_) => None,
        }
    }

    /// Returns the value of attribute `name` on a keyed node.
    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            Node::Element(entries) => entries
                .iter()
                .find(|(k, _)| k.strip_prefix(ATTR_PREFIX) == Some(name))
                .and_then(|(_, v)| v.as_str()),
            Node::Text(_) | Node::Sequence(_) => None,
        }
    }

    /// Returns `true` for a text leaf with no characters.
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Node::Text(s) if s.is_empty())
    }

    /// Inserts a child under `key`, turning a repeated key into a sequence.
    pub(crate) fn push_child(entries: &mut Vec<(String, Node)>, key: String, child: Node) {
        match entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, Node::Sequence(items))) => items.push(child),
            Some((_, existing)) => {
                let first = std::mem::replace(existing, Node::Sequence(Vec::with_capacity(2)));
                if let Node::Sequence(items) = existing {
                    items.push(first);
                    items.push(child);
                }
            }
            None => entries.push((key, child)),
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Text(s) => serializer.serialize_str(s),
            Node::Element(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Node::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Node {
        Node::Text(s.to_string())
    }

    #[test]
    fn test_get_on_element() {
        let node = Node::Element(vec![("a".into(), text("1")), ("b".into(), text("2"))]);
        assert_eq!(node.get("b"), Some(&text("2")));
        assert_eq!(node.get("c"), None);
    }

    #[test]
    fn test_get_on_leaf_and_sequence() {
        assert_eq!(text("x").get("a"), None);
        assert_eq!(Node::Sequence(vec![text("x")]).get("a"), None);
    }

    #[test]
    fn test_attr_lookup() {
        let node = Node::Element(vec![
            ("@appid".into(), text("wx123")),
            ("appid".into(), text("child")),
        ]);
        assert_eq!(node.attr("appid"), Some("wx123"));
        assert_eq!(node.attr("missing"), None);
    }

    #[test]
    fn test_push_child_builds_sequence() {
        let mut entries = Vec::new();
        Node::push_child(&mut entries, "item".into(), text("1"));
        Node::push_child(&mut entries, "item".into(), text("2"));
        Node::push_child(&mut entries, "item".into(), text("3"));
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].1,
            Node::Sequence(vec![text("1"), text("2"), text("3")])
        );
    }

    #[test]
    fn test_serialize_shape() {
        let node = Node::Element(vec![
            ("@id".into(), text("7")),
            ("item".into(), Node::Sequence(vec![text("a"), text("b")])),
        ]);
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json, serde_json::json!({"@id": "7", "item": ["a", "b"]}));
    }

    #[test]
    fn test_is_empty_text() {
        assert!(text("").is_empty_text());
        assert!(!text(" ").is_empty_text());
        assert!(!Node::Element(vec![]).is_empty_text());
    }
}
