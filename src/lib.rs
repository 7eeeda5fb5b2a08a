//! Zero-copy, streaming XML reading and writing over a flat byte buffer.
//!
//! The core is a tokenizer that classifies the lexical chunk at a byte
//! position and steps forward or backward without allocating: a [`Raw`] is
//! four words of kind/depth/offset plus a borrow of the input. On top of it
//! sit a lazy cursor (tag, attributes, value, children and parent are
//! derived on demand by re-scanning) and an owned [`Node`] tree built by a
//! forward walk, which serializes back with [`write_node`].
//!
//! # Example
//! ```
//! let doc = xmlite::parse_node(b"<greeting lang=\"en\">hello &amp; welcome</greeting>")?;
//! let root = &doc[0];
//! assert_eq!(root.tag(), Some("greeting"));
//! assert_eq!(root.attribute("lang"), Some("en"));
//! assert_eq!(root[0].value(), Some("hello & welcome"));
//! # Ok::<(), xmlite::Error>(())
//! ```
//!
//! Walking the raw layer allocates nothing until a string is extracted:
//! ```
//! use xmlite::RawKind;
//!
//! let doc = xmlite::parse_raw(b"<a><b/></a>");
//! for raw in doc.tokens() {
//!     let raw = raw?;
//!     if raw.kind() == RawKind::ElementOpen {
//!         println!("{} at depth {}", raw.tag().unwrap_or("?"), raw.depth());
//!     }
//! }
//! # Ok::<(), xmlite::Error>(())
//! ```

mod build;
mod cursor;
mod error;
mod escape;
mod node;
mod raw;
mod scan;
mod source;
mod write;

pub use error::{Error, ErrorKind, Result};
pub use escape::{escape, unescape};
pub use node::{Attrs, Node, NodeKind};
pub use raw::{Raw, RawKind, Tokens};
pub use source::Source;
pub use write::{write_file, write_node};

use std::path::Path;

/// Tokenize `bytes`, returning the synthetic `Document` chunk to step from.
pub fn parse_raw(bytes: &[u8]) -> Raw<'_> {
    Raw::document(bytes)
}

/// Materialize the document tree from `bytes`.
pub fn parse_node(bytes: &[u8]) -> Result<Node> {
    Node::parse(bytes)
}

/// Memory-map the file at `path` and materialize its tree.
pub fn read_node(path: impl AsRef<Path>) -> Result<Node> {
    let source = Source::from_file(path)?;
    Node::parse(source.as_bytes())
}
