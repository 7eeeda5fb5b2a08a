//! Tree construction: a forward walk of the token stream driven by an
//! explicit frame stack, applying the `xml:space` whitespace policy.

use std::borrow::Cow;

use crate::error::{Error, ErrorKind, Result};
use crate::escape::decode;
use crate::node::{Attrs, Node};
use crate::raw::{Raw, RawKind};
use crate::scan;

/// Whitespace handling mode, inherited down the element stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpaceMode {
    Default,
    Preserve,
}

struct Frame {
    node: Node,
    mode: SpaceMode,
}

/// Build an owned tree from the chunk stream starting at `doc`.
pub(crate) fn build(doc: Raw<'_>) -> Result<Node> {
    let data = doc.data;
    let mut document = Node::document();
    // Open elements only; the document sits below the stack, so a close
    // with nothing to pop is an orphan rather than an invariant break.
    let mut stack: Vec<Frame> = Vec::new();
    let mut seen_root = false;
    // Byte after the previous chunk; the gap up to the next chunk is
    // significant text under `xml:space="preserve"`.
    let mut last_end = doc.end();

    let mut cur = doc;
    while let Some(raw) = cur.next()? {
        let mode = stack.last().map_or(SpaceMode::Default, |f| f.mode);
        let in_element = !stack.is_empty();
        let mut chunk_end = raw.end();

        // The tokenizer skips insignificant whitespace, so whole-whitespace
        // gaps produce no Text chunk. Under preserve they are text.
        if mode == SpaceMode::Preserve && raw.kind() != RawKind::Text && raw.pos() > last_end {
            let gap = decode(&data[last_end..raw.pos()], true).into_owned();
            top(&mut stack, &mut document).push_child(Node::text(gap));
        }

        match raw.kind() {
            RawKind::ElementOpen | RawKind::ElementSelfClosed => {
                if !in_element {
                    seen_root = true;
                }
                let attrs = raw.attributes()?.unwrap_or_default();
                let child_mode = space_mode(&attrs, mode);
                let mut node = Node::element(raw.tag().unwrap_or_default());
                node.attributes = Some(attrs);
                if raw.kind() == RawKind::ElementOpen {
                    stack.push(Frame {
                        node,
                        mode: child_mode,
                    });
                } else {
                    top(&mut stack, &mut document).push_child(node);
                }
            }
            RawKind::ElementClose => {
                let Some(frame) = stack.pop() else {
                    return Err(Error::new(ErrorKind::OrphanClose, raw.pos()));
                };
                let expected = frame.node.tag().unwrap_or_default();
                let got = raw.tag().unwrap_or_default();
                if expected != got {
                    return Err(Error::new(
                        ErrorKind::UnbalancedTag {
                            expected: expected.to_string(),
                            got: got.to_string(),
                        },
                        raw.pos(),
                    ));
                }
                top(&mut stack, &mut document).push_child(frame.node);
            }
            RawKind::Text => {
                // Character data outside the root element is dropped.
                if in_element {
                    let node = match mode {
                        // The tokenizer already trimmed both ends; interior
                        // whitespace is intact.
                        SpaceMode::Default => Node::text(chunk_value(&raw)),
                        // Recover the exact byte gap, leading/trailing
                        // whitespace included.
                        SpaceMode::Preserve => {
                            let end = scan::find_byte(data, b'<', raw.end()).unwrap_or(data.len());
                            chunk_end = end;
                            Node::text(decode(&data[last_end..end], true).into_owned())
                        }
                    };
                    top(&mut stack, &mut document).push_child(node);
                }
            }
            RawKind::Comment => {
                // The writer pads comments as `<!-- … -->`; trimming here
                // keeps write-then-parse a fixpoint.
                let value = chunk_value(&raw);
                top(&mut stack, &mut document).push_child(Node::comment(value.trim()));
            }
            RawKind::CData => {
                top(&mut stack, &mut document).push_child(Node::cdata(chunk_value(&raw)));
            }
            RawKind::ProcessingInstruction => {
                let mut node = Node::pi(raw.tag().unwrap_or_default());
                node.attributes = Some(raw.attributes()?.unwrap_or_default());
                top(&mut stack, &mut document).push_child(node);
            }
            RawKind::Declaration => {
                if in_element || seen_root {
                    return Err(Error::new(ErrorKind::MalformedToken, raw.pos()));
                }
                let mut node = Node::declaration();
                node.attributes = Some(raw.attributes()?.unwrap_or_default());
                document.push_child(node);
            }
            RawKind::Dtd => {
                if in_element || seen_root {
                    return Err(Error::new(ErrorKind::MalformedToken, raw.pos()));
                }
                document.push_child(Node::dtd(chunk_value(&raw)));
            }
            RawKind::Document => unreachable!("next never yields the synthetic root"),
        }

        last_end = chunk_end;
        cur = raw;
    }

    if let Some(open) = stack.pop() {
        return Err(Error::new(
            ErrorKind::UnbalancedTag {
                expected: open.node.tag().unwrap_or_default().to_string(),
                got: String::new(),
            },
            data.len(),
        ));
    }
    Ok(document)
}

/// The node new children attach to: the innermost open element, or the
/// document itself outside the root.
fn top<'a>(stack: &'a mut [Frame], document: &'a mut Node) -> &'a mut Node {
    match stack.last_mut() {
        Some(frame) => &mut frame.node,
        None => document,
    }
}

/// The mode an element passes to itself and its descendants.
fn space_mode(attrs: &Attrs, inherited: SpaceMode) -> SpaceMode {
    match attrs.get("xml:space") {
        Some("preserve") => SpaceMode::Preserve,
        Some("default") => SpaceMode::Default,
        _ => inherited,
    }
}

fn chunk_value(raw: &Raw<'_>) -> String {
    raw.value().map(Cow::into_owned).unwrap_or_default()
}
