//! Memoized payload parsing and application-message lookup.
//!
//! A record has two payload slots. Each slot is parsed at most once per
//! decode; the result (tree or failure) is remembered so every enricher that
//! needs it reads the same parse.

use tracing::warn;

use crate::markup::{MarkupParser, Node};

/// Path of the application-message node inside a payload tree.
pub const APP_NODE_PATH: [&str; 2] = ["msg", "appmsg"];

/// Identifies a payload slot in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadSlot {
    Primary,
    Compressed,
}

impl PayloadSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadSlot::Primary => "message_content",
            PayloadSlot::Compressed => "compress_content",
        }
    }
}

#[derive(Debug)]
enum SlotState {
    Pending,
    Parsed(Node),
    Failed,
}

#[derive(Debug)]
struct Slot<'a> {
    kind: PayloadSlot,
    source: Option<&'a str>,
    state: SlotState,
}

impl<'a> Slot<'a> {
    fn new(kind: PayloadSlot, source: Option<&'a str>) -> Self {
        Self {
            kind,
            source: source.filter(|s| !s.is_empty()),
            state: SlotState::Pending,
        }
    }

    /// Returns the tree, parsing the source on first access.
    fn load(&mut self, parser: &dyn MarkupParser) -> Option<&Node> {
        if let SlotState::Pending = self.state {
            self.state = match self.source {
                None => SlotState::Failed,
                Some(text) => match parser.parse_tree(text) {
                    Ok(tree) => SlotState::Parsed(tree),
                    Err(error) => {
                        warn!(
                            slot = self.kind.as_str(),
                            %error,
                            "payload is not well-formed markup"
                        );
                        SlotState::Failed
                    }
                },
            };
        }
        self.tree()
    }

    fn tree(&self) -> Option<&Node> {
        match &self.state {
            SlotState::Parsed(tree) => Some(tree),
            SlotState::Pending | SlotState::Failed => None,
        }
    }

    fn into_tree(self) -> Option<Node> {
        match self.state {
            SlotState::Parsed(tree) => Some(tree),
            SlotState::Pending | SlotState::Failed => None,
        }
    }
}

/// Per-record cache of parsed payloads.
pub struct PayloadCache<'a> {
    parser: &'a dyn MarkupParser,
    primary: Slot<'a>,
    compressed: Slot<'a>,
}

impl<'a> PayloadCache<'a> {
    /// Creates a cache over the two payload texts. Empty texts count as absent.
    pub fn new(
        parser: &'a dyn MarkupParser,
        primary: Option<&'a str>,
        compressed: Option<&'a str>,
    ) -> Self {
        Self {
            parser,
            primary: Slot::new(PayloadSlot::Primary, primary),
            compressed: Slot::new(PayloadSlot::Compressed, compressed),
        }
    }

    /// Returns the primary tree, parsing it on first access.
    pub fn primary(&mut self) -> Option<&Node> {
        self.primary.load(self.parser)
    }

    /// Returns the fallback tree, parsing it on first access.
    pub fn compressed(&mut self) -> Option<&Node> {
        self.compressed.load(self.parser)
    }

    /// Parses both slots if not already done.
    pub fn load_all(&mut self) {
        self.primary.load(self.parser);
        self.compressed.load(self.parser);
    }

    /// Finds the `msg/appmsg` node, preferring the primary payload.
    ///
    /// Each slot is tried in turn, reusing a cached parse when one exists;
    /// the fallback slot is only parsed when the primary one has no node.
    /// Returns `None` if neither payload parses or neither holds the node.
    pub fn resolve_app_node(&mut self) -> Option<&Node> {
        self.resolve().map(|app| app.node)
    }

    /// Like [`resolve_app_node`](Self::resolve_app_node), keeping the primary
    /// tree at hand for lookups outside the node.
    pub fn resolve(&mut self) -> Option<AppMessage<'_>> {
        let parser = self.parser;
        if self.primary.load(parser).and_then(app_node).is_none() {
            self.compressed.load(parser);
        }
        let primary = self.primary.tree();
        let node = primary
            .and_then(app_node)
            .or_else(|| self.compressed.tree().and_then(app_node))?;
        Some(AppMessage { node, primary })
    }

    /// Consumes the cache, returning `(primary, compressed)` trees.
    pub fn into_trees(self) -> (Option<Node>, Option<Node>) {
        (self.primary.into_tree(), self.compressed.into_tree())
    }
}

/// A resolved application-message node.
#[derive(Debug, Clone, Copy)]
pub struct AppMessage<'t> {
    /// The `msg/appmsg` node.
    pub node: &'t Node,
    primary: Option<&'t Node>,
}

impl<'t> AppMessage<'t> {
    /// Looks up a direct entry of the node.
    pub fn get(&self, key: &str) -> Option<&'t Node> {
        self.node.get(key)
    }

    /// Returns `appinfo` from the node, else from `msg` of the primary tree.
    pub fn app_info(&self) -> Option<&'t Node> {
        self.node
            .get("appinfo")
            .or_else(|| self.primary?.path(&["msg", "appinfo"]))
    }
}

fn app_node(tree: &Node) -> Option<&Node> {
    tree.path(&APP_NODE_PATH)
}
