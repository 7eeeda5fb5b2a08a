//! The materialized tree: owned nodes, independent of the source buffer.

use std::ops::Index;

use crate::build;
use crate::error::Result;
use crate::raw::Raw;

/// Tree node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Declaration,
    ProcessingInstruction,
    Dtd,
    Comment,
    CData,
    Element,
    Text,
}

/// Ordered attribute map.
///
/// Kept as a flat vector of pairs: attribute counts are small in practice
/// and first-insertion order is the emission order on write. Inserting an
/// existing key replaces its value in place, so duplicates collapse to
/// last-wins without disturbing the original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attrs {
    pairs: Vec<(String, String)>,
}

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value.into(),
            None => self.pairs.push((key, value.into())),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let at = self.pairs.iter().position(|(k, _)| k == key)?;
        Some(self.pairs.remove(at).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attrs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attrs::new();
        for (k, v) in iter {
            attrs.insert(k, v);
        }
        attrs
    }
}

impl IntoIterator for Attrs {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

/// An owned tree node.
///
/// The populated fields follow the kind: elements carry a tag, attributes
/// and children; text-like kinds carry a value; the declaration carries
/// attributes only. Equality is structural.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) tag: Option<String>,
    pub(crate) attributes: Option<Attrs>,
    pub(crate) value: Option<String>,
    pub(crate) children: Option<Vec<Node>>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            tag: None,
            attributes: None,
            value: None,
            children: None,
        }
    }

    /// The synthetic root holding the prolog and the root element.
    pub fn document() -> Self {
        let mut n = Self::new(NodeKind::Document);
        n.children = Some(Vec::new());
        n
    }

    pub fn element(tag: impl Into<String>) -> Self {
        let mut n = Self::new(NodeKind::Element);
        n.tag = Some(tag.into());
        n.attributes = Some(Attrs::new());
        n.children = Some(Vec::new());
        n
    }

    pub fn text(value: impl Into<String>) -> Self {
        let mut n = Self::new(NodeKind::Text);
        n.value = Some(value.into());
        n
    }

    pub fn comment(value: impl Into<String>) -> Self {
        let mut n = Self::new(NodeKind::Comment);
        n.value = Some(value.into());
        n
    }

    pub fn cdata(value: impl Into<String>) -> Self {
        let mut n = Self::new(NodeKind::CData);
        n.value = Some(value.into());
        n
    }

    /// A processing instruction `<?target …?>`.
    pub fn pi(target: impl Into<String>) -> Self {
        let mut n = Self::new(NodeKind::ProcessingInstruction);
        n.tag = Some(target.into());
        n.attributes = Some(Attrs::new());
        n
    }

    /// An `<?xml …?>` declaration.
    pub fn declaration() -> Self {
        let mut n = Self::new(NodeKind::Declaration);
        n.attributes = Some(Attrs::new());
        n
    }

    /// A `<!DOCTYPE …>` with the raw payload after the keyword.
    pub fn dtd(value: impl Into<String>) -> Self {
        let mut n = Self::new(NodeKind::Dtd);
        n.value = Some(value.into());
        n
    }

    /// Materialize a tree from raw bytes.
    pub fn parse(bytes: &[u8]) -> Result<Node> {
        build::build(Raw::document(bytes))
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn attributes(&self) -> Option<&Attrs> {
        self.attributes.as_ref()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Child nodes; empty for kinds that cannot hold children.
    pub fn children(&self) -> &[Node] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn children_mut(&mut self) -> &mut Vec<Node> {
        self.children.get_or_insert_with(Vec::new)
    }

    pub fn push_child(&mut self, child: Node) {
        self.children_mut().push(child);
    }

    /// Attribute value by key.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.as_ref()?.get(key)
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes
            .get_or_insert_with(Attrs::new)
            .insert(key, value);
    }

    pub fn remove_attribute(&mut self, key: &str) -> Option<String> {
        self.attributes.as_mut()?.remove(key)
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
    }
}

impl Index<usize> for Node {
    type Output = Node;

    fn index(&self, i: usize) -> &Node {
        &self.children()[i]
    }
}
