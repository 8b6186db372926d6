//! XML implementation of [`MarkupParser`] built on `quick-xml`.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::tree::{Node, TEXT_KEY};
use super::{MarkupError, MarkupParser};

/// Element nesting accepted by [`XmlParser::new`].
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Default [`MarkupParser`] for message payloads.
///
/// Whitespace-only text between elements is dropped and surrounding
/// whitespace of text content is trimmed. Input that does not start with
/// `<` is treated as plain text rather than markup. Documents nested deeper
/// than the depth limit are rejected with [`MarkupError::TooDeep`].
#[derive(Debug, Clone, Copy)]
pub struct XmlParser {
    max_depth: usize,
}

impl XmlParser {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the deepest element nesting accepted.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for XmlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupParser for XmlParser {
    fn parse_tree(&self, text: &str) -> Result<Node, MarkupError> {
        if !looks_like_markup(text) {
            return Ok(Node::Text(text.to_string()));
        }
        let mut builder = TreeBuilder::default();
        walk(text, self.max_depth, &mut builder)?;
        Ok(builder.root.finish())
    }

    fn parse_document(&self, text: &str) -> Result<Document, MarkupError> {
        if !looks_like_markup(text) {
            return Err(MarkupError::NoRoot);
        }
        let mut document = Document::default();
        walk(text, self.max_depth, &mut document)?;
        if document.elements.is_empty() {
            return Err(MarkupError::NoRoot);
        }
        Ok(document)
    }
}

fn looks_like_markup(text: &str) -> bool {
    text.trim_start().starts_with('<')
}

/// Receives the element structure of a markup document.
trait Visitor {
    fn open(&mut self, name: String, attributes: Vec<(String, String)>);
    fn text(&mut self, text: &str);
    fn close(&mut self);
}

/// Drives `visitor` over `text`, rejecting unbalanced or overly deep input.
fn walk(text: &str, max_depth: usize, visitor: &mut impl Visitor) -> Result<(), MarkupError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut open: Vec<String> = Vec::new();
    loop {
        let event = reader
            .read_event()
            .map_err(|e| syntax_error(&reader, &e))?;
        match event {
            Event::Start(start) => {
                check_depth(open.len(), max_depth)?;
                let (name, attributes) = read_element(&reader, &start)?;
                open.push(name.clone());
                visitor.open(name, attributes);
            }
            Event::Empty(start) => {
                check_depth(open.len(), max_depth)?;
                let (name, attributes) = read_element(&reader, &start)?;
                visitor.open(name, attributes);
                visitor.close();
            }
            Event::End(end) => {
                if open.pop().is_none() {
                    return Err(MarkupError::UnexpectedClose(
                        String::from_utf8_lossy(end.name().as_ref()).into_owned(),
                    ));
                }
                visitor.close();
            }
            Event::Text(content) => {
                let unescaped = content
                    .unescape()
                    .map_err(|e| syntax_error(&reader, &e))?;
                visitor.text(&unescaped);
            }
            Event::CData(content) => visitor.text(&String::from_utf8_lossy(&content)),
            Event::Eof => break,
            _ => {}
        }
    }

    match open.pop() {
        Some(name) => Err(MarkupError::Unclosed(name)),
        None => Ok(()),
    }
}

/// Fails when an element opened under `open` ancestors exceeds `max_depth`.
fn check_depth(open: usize, max_depth: usize) -> Result<(), MarkupError> {
    if open >= max_depth {
        return Err(MarkupError::TooDeep { limit: max_depth });
    }
    Ok(())
}

fn read_element(
    reader: &Reader<&[u8]>,
    start: &BytesStart<'_>,
) -> Result<(String, Vec<(String, String)>), MarkupError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| syntax_error(reader, &e))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| syntax_error(reader, &e))?;
        attributes.push((key, value.into_owned()));
    }
    Ok((name, attributes))
}

fn syntax_error(reader: &Reader<&[u8]>, err: &dyn std::fmt::Display) -> MarkupError {
    MarkupError::Syntax {
        position: reader.buffer_position() as u64,
        message: err.to_string(),
    }
}

// ============================================================================
// Tree view
// ============================================================================

#[derive(Default)]
struct Frame {
    name: String,
    entries: Vec<(String, Node)>,
    text: String,
}

impl Frame {
    fn finish(self) -> Node {
        let Frame {
            mut entries, text, ..
        } = self;
        if entries.is_empty() {
            return Node::Text(text);
        }
        if !text.is_empty() {
            entries.push((TEXT_KEY.to_string(), Node::Text(text)));
        }
        Node::Element(entries)
    }
}

#[derive(Default)]
struct TreeBuilder {
    root: Frame,
    stack: Vec<Frame>,
}

impl TreeBuilder {
    fn current(&mut self) -> &mut Frame {
        self.stack.last_mut().unwrap_or(&mut self.root)
    }
}

impl Visitor for TreeBuilder {
    fn open(&mut self, name: String, attributes: Vec<(String, String)>) {
        let entries = attributes
            .into_iter()
            .map(|(k, v)| (format!("@{k}"), Node::Text(v)))
            .collect();
        self.stack.push(Frame {
            name,
            entries,
            text: String::new(),
        });
    }

    fn text(&mut self, text: &str) {
        self.current().text.push_str(text);
    }

    fn close(&mut self) {
        if let Some(mut frame) = self.stack.pop() {
            let name = std::mem::take(&mut frame.name);
            let node = frame.finish();
            Node::push_child(&mut self.current().entries, name, node);
        }
    }
}

// ============================================================================
// Document view
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
struct ElementData {
    name: String,
    attributes: Vec<(String, String)>,
}

/// Elements of a markup document in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    elements: Vec<ElementData>,
}

impl Document {
    /// Returns the first element named `tag`, searching in document order.
    pub fn select(&self, tag: &str) -> Option<Element<'_>> {
        self.elements().find(|e| e.name() == tag)
    }

    /// Iterates over all elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = Element<'_>> {
        self.elements.iter().map(|data| Element { data })
    }

    /// Number of elements in the document.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl Visitor for Document {
    fn open(&mut self, name: String, attributes: Vec<(String, String)>) {
        self.elements.push(ElementData { name, attributes });
    }

    fn text(&mut self, _text: &str) {}

    fn close(&mut self) {}
}

/// A borrowed element of a [`Document`].
#[derive(Debug, Clone, Copy)]
pub struct Element<'a> {
    data: &'a ElementData,
}

impl<'a> Element<'a> {
    pub fn name(&self) -> &'a str {
        &self.data.name
    }

    /// Returns the value of attribute `name`, if present.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.data
            .attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.data
            .attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
