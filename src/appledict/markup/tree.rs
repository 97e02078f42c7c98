//! Arena-backed markup tree built from entry fragments.
//!
//! Fragments are XHTML-like: `<d:entry d:title="..."><span class="hg">...`.
//! The tree keeps explicit parent links so grammar code can ask about
//! context without re-walking ancestor chains.

use std::borrow::Cow;
use std::fmt;

use log::trace;
use quick_xml::escape::{resolve_html5_entity, resolve_predefined_entity, unescape_with};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::appledict::types::error::{AppleDictError, Result};

use super::query::{Depth, Query};

/// Index of a node inside its [`MarkupTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeKind {
    Document,
    Element {
        name: String,
        attrs: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An immutable tree of tagged nodes. Node 0 is always the document root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupTree {
    nodes: Vec<NodeData>,
}

impl MarkupTree {
    /// Parses a markup string into a tree.
    ///
    /// Parsing is lenient about end tags: a mismatched end tag closes up to the
    /// nearest open element of the same name, and elements still open at EOF
    /// are closed implicitly. Plain text without any tags is accepted.
    pub fn parse(source: &str) -> Result<Self> {
        let mut reader = Reader::from_str(source);
        reader.config_mut().check_end_names = false;

        let mut tree = MarkupTree {
            nodes: vec![NodeData {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
        };
        let mut open: Vec<NodeId> = vec![NodeId(0)];

        loop {
            let parent = *open.last().unwrap_or(&NodeId(0));
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    let id = tree.push_element(parent, &e)?;
                    open.push(id);
                }
                Ok(Event::Empty(e)) => {
                    tree.push_element(parent, &e)?;
                }
                Ok(Event::End(e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    match open.iter().rposition(|id| tree.element_name(*id) == Some(name.as_str())) {
                        Some(pos) if pos > 0 => open.truncate(pos),
                        _ => trace!("Ignoring stray end tag </{}>", name),
                    }
                }
                Ok(Event::Text(e)) => {
                    let raw = std::str::from_utf8(&e)
                        .map_err(|err| AppleDictError::MalformedMarkup(err.to_string()))?;
                    tree.push_text(parent, &unescape_text(raw));
                }
                Ok(Event::CData(e)) => {
                    let raw = std::str::from_utf8(&e)
                        .map_err(|err| AppleDictError::MalformedMarkup(err.to_string()))?;
                    tree.push_text(parent, raw);
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(AppleDictError::MalformedMarkup(format!(
                        "at byte {}: {}",
                        reader.buffer_position(),
                        e
                    )));
                }
            }
        }

        Ok(tree)
    }

    /// The document root. Its children are the top-level nodes of the markup.
    pub fn root(&self) -> Node<'_> {
        Node { tree: self, id: NodeId(0) }
    }

    /// Plain text of the whole document: tags stripped, entities resolved.
    pub fn plain_text(&self) -> String {
        self.root().text()
    }

    /// Total number of nodes, including the document root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    fn push_element(&mut self, parent: NodeId, start: &BytesStart) -> Result<NodeId> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attrs = Vec::new();
        for attr in start.html_attributes().with_checks(false) {
            let attr = attr.map_err(|e| {
                AppleDictError::MalformedMarkup(format!("bad attribute in <{}>: {}", name, e))
            })?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let raw = String::from_utf8_lossy(&attr.value);
            attrs.push((key, unescape_text(&raw).into_owned()));
        }
        Ok(self.push_node(parent, NodeKind::Element { name, attrs }))
    }

    fn push_text(&mut self, parent: NodeId, text: &str) {
        if text.is_empty() {
            return;
        }
        // Adjacent runs (e.g. text followed by CDATA) collapse into one node.
        if let Some(&last) = self.nodes[parent.0].children.last()
            && let NodeKind::Text(existing) = &mut self.nodes[last.0].kind
        {
            existing.push_str(text);
            return;
        }
        self.push_node(parent, NodeKind::Text(text.to_string()));
    }

    fn push_node(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    fn element_name(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].kind {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// A borrowed handle to one node of a [`MarkupTree`].
#[derive(Clone, Copy)]
pub struct Node<'a> {
    tree: &'a MarkupTree,
    id: NodeId,
}

impl<'a> Node<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    fn data(&self) -> &'a NodeData {
        &self.tree.nodes[self.id.0]
    }

    fn at(&self, id: NodeId) -> Node<'a> {
        Node { tree: self.tree, id }
    }

    /// Qualified tag name (`span`, `d:entry`), or `None` for text and the document root.
    pub fn tag(&self) -> Option<&'a str> {
        self.tree.element_name(self.id)
    }

    pub fn is_element(&self) -> bool {
        matches!(self.data().kind, NodeKind::Element { .. })
    }

    pub fn is_text(&self) -> bool {
        matches!(self.data().kind, NodeKind::Text(_))
    }

    /// Looks up an attribute by its qualified name (`class`, `d:pr`).
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        match &self.data().kind {
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }

    /// Whitespace-separated entries of the `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        self.attr("class").unwrap_or("").split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    pub fn parent(&self) -> Option<Node<'a>> {
        self.data().parent.map(|id| self.at(id))
    }

    /// Ordered direct children, text runs included.
    pub fn children(&self) -> impl Iterator<Item = Node<'a>> + use<'a> {
        let tree = self.tree;
        self.data().children.iter().map(move |&id| Node { tree, id })
    }

    /// Recursive concatenation of every text run below this node, untrimmed.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match &self.data().kind {
            NodeKind::Text(t) => out.push_str(t),
            _ => {
                for child in self.children() {
                    child.collect_text(out);
                }
            }
        }
    }

    pub fn trimmed_text(&self) -> String {
        self.text().trim().to_string()
    }

    /// `true` when the node's text is empty after trimming.
    pub fn is_blank(&self) -> bool {
        self.text().trim().is_empty()
    }

    /// Text runs that are direct children of this node, in order.
    pub fn direct_text_runs(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        let tree = self.tree;
        self.data().children.iter().filter_map(move |&id| match &tree.nodes[id.0].kind {
            NodeKind::Text(t) => Some(t.as_str()),
            _ => None,
        })
    }

    /// All nodes matching `query`, in document order. The node itself is never included.
    pub fn find_all(&self, query: &Query) -> Vec<Node<'a>> {
        let mut found = Vec::new();
        match query.depth {
            Depth::Direct => found.extend(self.children().filter(|c| query.matches(c))),
            Depth::Subtree => self.walk(query, &mut found),
        }
        found
    }

    fn walk(&self, query: &Query, found: &mut Vec<Node<'a>>) {
        for child in self.children() {
            if let Some(barrier) = query.barrier
                && child.has_class(barrier)
            {
                continue;
            }
            if query.matches(&child) {
                found.push(child);
            }
            child.walk(query, found);
        }
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.data().kind {
            NodeKind::Document => write!(f, "#document"),
            NodeKind::Text(t) => write!(f, "{:?}", t),
            NodeKind::Element { name, .. } => match self.attr("class") {
                Some(class) => write!(f, "<{} class=\"{}\">", name, class),
                None => write!(f, "<{}>", name),
            },
        }
    }
}

/// Resolves XML and HTML5 named entities, plus numeric references.
///
/// References are resolved one at a time: an unknown entity is kept verbatim
/// and the rest of the run is still resolved.
fn unescape_text(raw: &str) -> Cow<'_, str> {
    if !raw.contains('&') {
        return Cow::Borrowed(raw);
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match tail[1..].find(|c: char| c == ';' || c == '&' || c.is_whitespace()) {
            Some(end) if tail[1 + end..].starts_with(';') => {
                let reference = &tail[..end + 2];
                match unescape_with(reference, resolve_entity) {
                    Ok(resolved) => out.push_str(&resolved),
                    Err(_) => out.push_str(reference),
                }
                rest = &tail[end + 2..];
            }
            // A bare ampersand.
            _ => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn resolve_entity(entity: &str) -> Option<&'static str> {
    resolve_predefined_entity(entity).or_else(|| resolve_html5_entity(entity))
}
