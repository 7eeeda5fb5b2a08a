//! The five predefined XML entities.

use std::borrow::Cow;

use memchr::memchr;

const ENTITIES: [(&str, char); 5] = [
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
    ("&apos;", '\''),
];

#[inline]
fn needs_escape(b: u8) -> bool {
    matches!(b, b'&' | b'<' | b'>' | b'"' | b'\'')
}

/// Replace `& < > " '` with their entity references.
///
/// Borrows the input unchanged when nothing needs replacing. Note that
/// escaping is not idempotent: an `&` inside an already-escaped string is
/// escaped again.
pub fn escape(s: &str) -> Cow<'_, str> {
    let Some(first) = s.bytes().position(needs_escape) else {
        return Cow::Borrowed(s);
    };

    let mut out = String::with_capacity(s.len() + 8);
    out.push_str(&s[..first]);
    for c in s[first..].chars() {
        match ENTITIES.iter().find(|(_, plain)| *plain == c) {
            Some((entity, _)) => out.push_str(entity),
            None => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Decode a payload span, optionally expanding entity references.
///
/// Payloads may hold any bytes; invalid UTF-8 is replaced rather than
/// refused.
pub(crate) fn decode(bytes: &[u8], expand: bool) -> Cow<'_, str> {
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(s) if expand => unescape(s),
        Cow::Borrowed(s) => Cow::Borrowed(s),
        Cow::Owned(s) if expand => Cow::Owned(unescape(&s).into_owned()),
        Cow::Owned(s) => Cow::Owned(s),
    }
}

/// Expand the five predefined entity references.
///
/// The exact inverse of [`escape`]; any other `&…` run is passed through
/// verbatim.
pub fn unescape(s: &str) -> Cow<'_, str> {
    if memchr(b'&', s.as_bytes()).is_none() {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        match ENTITIES.iter().find(|(entity, _)| rest.starts_with(entity)) {
            Some((entity, plain)) => {
                out.push(*plain);
                rest = &rest[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}
