//! Serialization of a [`Node`] tree back to XML text.

use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::escape::escape;
use crate::node::{Attrs, Node, NodeKind};

const INDENT: &str = "    ";

/// Render `node` into `sink` as UTF-8 text.
///
/// Serialization itself cannot fail; only the sink can.
pub fn write_node(node: &Node, sink: &mut impl Write) -> io::Result<()> {
    let mut out = String::new();
    render(node, 0, &mut out);
    sink.write_all(out.as_bytes())
}

/// Render `node` into the file at `path`.
pub fn write_file(node: &Node, path: impl AsRef<Path>) -> io::Result<()> {
    let mut file = File::create(path)?;
    write_node(node, &mut file)
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        render(self, 0, &mut out);
        f.write_str(&out)
    }
}

fn render(node: &Node, depth: usize, out: &mut String) {
    match node.kind() {
        NodeKind::Document => {
            for (i, child) in node.children().iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                render(child, 0, out);
            }
        }
        NodeKind::Dtd => {
            out.push_str("<!DOCTYPE ");
            out.push_str(node.value().unwrap_or_default());
            out.push('>');
        }
        NodeKind::Declaration => {
            out.push_str("<?xml");
            render_attrs(node.attributes(), out);
            out.push_str("?>");
        }
        NodeKind::ProcessingInstruction => {
            out.push_str("<?");
            out.push_str(node.tag().unwrap_or_default());
            render_attrs(node.attributes(), out);
            out.push_str("?>");
        }
        NodeKind::Comment => {
            out.push_str("<!-- ");
            out.push_str(node.value().unwrap_or_default());
            out.push_str(" -->");
        }
        NodeKind::CData => {
            out.push_str("<![CDATA[");
            out.push_str(node.value().unwrap_or_default());
            out.push_str("]]>");
        }
        NodeKind::Text => {
            out.push_str(&escape(node.value().unwrap_or_default()));
        }
        NodeKind::Element => render_element(node, depth, out),
    }
}

fn render_element(node: &Node, depth: usize, out: &mut String) {
    let tag = node.tag().unwrap_or_default();
    out.push('<');
    out.push_str(tag);
    render_attrs(node.attributes(), out);

    let children = node.children();
    if children.is_empty() {
        out.push_str("/>");
    } else if inline(children) {
        out.push('>');
        render(&children[0], depth, out);
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    } else {
        out.push('>');
        for child in children {
            out.push('\n');
            indent(depth + 1, out);
            render(child, depth + 1, out);
        }
        out.push('\n');
        indent(depth, out);
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }
}

/// A single text child without a newline stays on the open tag's line.
fn inline(children: &[Node]) -> bool {
    children.len() == 1
        && children[0].kind() == NodeKind::Text
        && !children[0].value().unwrap_or_default().contains('\n')
}

fn render_attrs(attrs: Option<&Attrs>, out: &mut String) {
    let Some(attrs) = attrs else { return };
    for (key, value) in attrs.iter() {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape(value));
        out.push('"');
    }
}

fn indent(depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}
