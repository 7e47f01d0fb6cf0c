//! Generic XML tree built from the `quick-xml` event stream.
//!
//! Element names are kept qualified (`w:p`, not `p`). Repeated sibling
//! elements are collected under one [`Field`], which stays a single node
//! until a second sibling of the same name shows up.

use docx_core::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::BTreeMap;

/// Options for building the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Trim leading and trailing whitespace from element text.
    pub trim_values: bool,
    /// Drop attributes instead of storing them on the node.
    pub ignore_attributes: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            trim_values: true,
            ignore_attributes: true,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trim_values(mut self, trim: bool) -> Self {
        self.trim_values = trim;
        self
    }

    /// Keep element attributes on the parsed nodes.
    pub fn with_attributes(mut self, keep: bool) -> Self {
        self.ignore_attributes = !keep;
        self
    }
}

/// One element of the tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    /// Concatenated character data and CDATA directly inside the element.
    pub text: String,
    /// Attributes by qualified name; empty when attributes are ignored.
    pub attributes: BTreeMap<String, String>,
    /// Child elements grouped by qualified name.
    pub children: BTreeMap<String, Field>,
}

/// The children of one name: one node, or several in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Single(XmlNode),
    Many(Vec<XmlNode>),
}

impl Field {
    /// View the field as an ordered sequence regardless of cardinality.
    pub fn as_slice(&self) -> &[XmlNode] {
        match self {
            Field::Single(node) => std::slice::from_ref(node),
            Field::Many(nodes) => nodes,
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl XmlNode {
    /// The field holding children named `name`, if any.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.children.get(name)
    }

    /// Children named `name`; empty when there are none.
    pub fn children(&self, name: &str) -> &[XmlNode] {
        self.field(name).map(Field::as_slice).unwrap_or_default()
    }

    /// First child named `name`.
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children(name).first()
    }

    /// Follow the first child of each name in turn.
    pub fn path(&self, names: &[&str]) -> Option<&XmlNode> {
        names.iter().try_fold(self, |node, name| node.child(name))
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    fn add_child(&mut self, name: String, child: XmlNode) {
        let field = match self.children.remove(&name) {
            None => Field::Single(child),
            Some(Field::Single(first)) => Field::Many(vec![first, child]),
            Some(Field::Many(mut nodes)) => {
                nodes.push(child);
                Field::Many(nodes)
            }
        };
        self.children.insert(name, field);
    }

    fn finish(&mut self, options: &ParseOptions) {
        if options.trim_values {
            let trimmed = self.text.trim();
            if trimmed.len() != self.text.len() {
                self.text = trimmed.to_string();
            }
        }
    }
}

/// Parse an XML document into a tree.
///
/// The returned node is a synthetic root whose children are the
/// document's top-level elements.
pub fn parse(xml: &str, options: &ParseOptions) -> Result<XmlNode> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<(String, XmlNode)> = vec![(String::new(), XmlNode::default())];

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let node = open_element(e, options)?;
                stack.push((qualified_name(e), node));
            }
            Ok(Event::Empty(ref e)) => {
                let mut node = open_element(e, options)?;
                node.finish(options);
                if let Some((_, parent)) = stack.last_mut() {
                    parent.add_child(qualified_name(e), node);
                }
            }
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().map_err(xml_error)?;
                if let Some((_, node)) = stack.last_mut() {
                    node.text.push_str(&text);
                }
            }
            Ok(Event::CData(e)) => {
                let raw = e.into_inner();
                if let Some((_, node)) = stack.last_mut() {
                    node.text.push_str(&String::from_utf8_lossy(&raw));
                }
            }
            Ok(Event::End(_)) => {
                if stack.len() < 2 {
                    return Err(Error::XmlError(format!(
                        "Unexpected closing tag at position {}",
                        reader.buffer_position()
                    )));
                }
                if let Some((name, mut node)) = stack.pop() {
                    node.finish(options);
                    if let Some((_, parent)) = stack.last_mut() {
                        parent.add_child(name, node);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(e)),
            // Declarations, comments, processing instructions and doctypes carry no content.
            _ => {}
        }
    }

    if stack.len() > 1 {
        let unclosed = stack.last().map(|(name, _)| name.as_str()).unwrap_or_default();
        return Err(Error::XmlError(format!(
            "Unexpected end of document: unclosed element <{}>",
            unclosed
        )));
    }

    let mut root = stack.pop().map(|(_, node)| node).unwrap_or_default();
    root.text.clear();
    Ok(root)
}

fn open_element(e: &BytesStart<'_>, options: &ParseOptions) -> Result<XmlNode> {
    let mut node = XmlNode::default();
    if options.ignore_attributes {
        return Ok(node);
    }

    for attr in e.attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(xml_error)?.into_owned();
        node.attributes.insert(key, value);
    }
    Ok(node)
}

fn qualified_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

fn xml_error(e: quick_xml::Error) -> Error {
    Error::XmlError(e.to_string())
}
