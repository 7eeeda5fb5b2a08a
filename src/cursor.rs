//! Lazy observers on a [`Raw`] chunk: tag, attributes, value, children and
//! parent are derived on demand by bounded re-scans of the source bytes.

use std::borrow::Cow;

use crate::error::{Error, ErrorKind, Result};
use crate::escape::decode;
use crate::node::Attrs;
use crate::raw::{Raw, RawKind};
use crate::scan;

impl<'a> Raw<'a> {
    /// The element or processing-instruction name; `None` for chunks that
    /// carry no tag.
    pub fn tag(&self) -> Option<&'a str> {
        let (skip, bytes) = (self.tag_skip()?, self.as_bytes());
        let end = scan::name_end(bytes, skip);
        // SAFETY contract of name_str: the span is all name bytes.
        (end > skip).then(|| scan::name_str(&bytes[skip..end]))
    }

    /// Bytes to skip before the name: `<`, `</` or `<?`.
    fn tag_skip(&self) -> Option<usize> {
        match self.kind() {
            RawKind::ElementOpen | RawKind::ElementSelfClosed => Some(1),
            RawKind::ElementClose | RawKind::ProcessingInstruction => Some(2),
            _ => None,
        }
    }

    /// The `name = "value"` pairs of an open/self-closed tag, a processing
    /// instruction or the declaration. Values are unescaped on read.
    pub fn attributes(&self) -> Result<Option<Attrs>> {
        let skip = match self.kind() {
            RawKind::ElementOpen | RawKind::ElementSelfClosed => 1,
            RawKind::ProcessingInstruction | RawKind::Declaration => 2,
            _ => return Ok(None),
        };
        let trim = match self.kind() {
            RawKind::ElementOpen => 1,
            _ => 2,
        };

        let bytes = self.as_bytes();
        let from = scan::name_end(bytes, skip);
        let inner = &bytes[from..bytes.len() - trim];
        let base = self.pos() + from;

        let mut attrs = Attrs::new();
        let mut i = 0;
        loop {
            i = scan::skip_space(inner, i);
            if i >= inner.len() {
                break;
            }
            let end = scan::name_end(inner, i);
            if end == i {
                return Err(Error::new(ErrorKind::BadAttribute, base + i));
            }
            let name = scan::name_str(&inner[i..end]);

            i = scan::skip_space(inner, end);
            if inner.get(i) != Some(&b'=') {
                return Err(Error::new(ErrorKind::BadAttribute, base + i));
            }
            i = scan::skip_space(inner, i + 1);
            let quote = match inner.get(i).copied() {
                Some(q @ (b'"' | b'\'')) => q,
                _ => return Err(Error::new(ErrorKind::BadAttribute, base + i)),
            };
            let close = scan::find_byte(inner, quote, i + 1)
                .ok_or_else(|| Error::new(ErrorKind::BadAttribute, base + i))?;
            attrs.insert(name, decode(&inner[i + 1..close], true));
            i = close + 1;
        }
        Ok(Some(attrs))
    }

    /// The chunk payload: unescaped character data for `Text`, the inner
    /// literal for `CData`, `Comment` and `Dtd`; `None` otherwise.
    pub fn value(&self) -> Option<Cow<'a, str>> {
        let bytes = self.as_bytes();
        match self.kind() {
            RawKind::Text => Some(decode(bytes, true)),
            RawKind::CData => Some(decode(&bytes[9..bytes.len() - 3], false)),
            RawKind::Comment => Some(decode(&bytes[4..bytes.len() - 3], false)),
            RawKind::Dtd => {
                // Everything between `<!DOCTYPE` and the final `>`,
                // bracketed internal subset included.
                let from = scan::skip_space(bytes, 9).min(bytes.len() - 1);
                Some(decode(&bytes[from..bytes.len() - 1], false))
            }
            _ => None,
        }
    }

    /// Direct children of an open element or the document: every non-close
    /// chunk exactly one level below, collected until depth falls back.
    pub fn children(&self) -> Result<Vec<Raw<'a>>> {
        let target = match self.kind() {
            RawKind::Document => 1,
            RawKind::ElementOpen => self.depth() + 1,
            _ => return Ok(Vec::new()),
        };

        let mut out = Vec::new();
        let mut cur = *self;
        while let Some(r) = cur.next()? {
            if r.depth() < target {
                break;
            }
            if r.depth() == target && r.kind() != RawKind::ElementClose {
                out.push(r);
            }
            cur = r;
        }
        Ok(out)
    }

    /// The enclosing chunk, found by walking backward until the depth
    /// drops below this chunk's.
    pub fn parent(&self) -> Result<Option<Raw<'a>>> {
        let mut cur = *self;
        while let Some(p) = cur.prev()? {
            if p.depth() < self.depth()
                && matches!(p.kind(), RawKind::ElementOpen | RawKind::Document)
            {
                return Ok(Some(p));
            }
            cur = p;
        }
        Ok(None)
    }
}
