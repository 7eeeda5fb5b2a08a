use xmlite::{ErrorKind, Raw, RawKind};

const BOOKS: &str = r#"<?xml version="1.0"?>
<catalog>
    <book id="bk101">
        <author>Gambardella, Matthew</author>
        <title>XML Developer's Guide</title>
    </book>
</catalog>"#;

fn walk(data: &[u8]) -> Vec<Raw<'_>> {
    xmlite::parse_raw(data)
        .tokens()
        .collect::<Result<_, _>>()
        .expect("well-formed input")
}

#[test]
fn declaration_chunk() {
    let data = br#"<?xml version="1.0" key="value"?>"#;
    let raws = walk(data);
    assert_eq!(raws.len(), 1);
    let decl = raws[0];
    assert_eq!(decl.kind(), RawKind::Declaration);
    assert_eq!(decl.depth(), 1);
    assert_eq!(decl.tag(), None);
    assert_eq!(decl.value(), None);
    let attrs = decl.attributes().unwrap().unwrap();
    assert_eq!(attrs.get("version"), Some("1.0"));
    assert_eq!(attrs.get("key"), Some("value"));
    assert_eq!(attrs.len(), 2);
}

#[test]
fn self_closed_chunk() {
    let data = br#"<tag _id="1" x="abc" />"#;
    let raws = walk(data);
    assert_eq!(raws.len(), 1);
    let tag = raws[0];
    assert_eq!(tag.kind(), RawKind::ElementSelfClosed);
    assert_eq!(tag.depth(), 1);
    assert_eq!(tag.tag(), Some("tag"));
    assert_eq!(tag.value(), None);
    let attrs = tag.attributes().unwrap().unwrap();
    assert_eq!(attrs.get("_id"), Some("1"));
    assert_eq!(attrs.get("x"), Some("abc"));
}

#[test]
fn cdata_chunk() {
    let raws = walk(b"<![CDATA[cdata test]]>");
    assert_eq!(raws[0].kind(), RawKind::CData);
    assert_eq!(raws[0].value().unwrap(), "cdata test");
}

#[test]
fn books_forward_walk() {
    let raws = walk(BOOKS.as_bytes());

    let expected: [(RawKind, &str); 5] = [
        (RawKind::Declaration, r#"<?xml version="1.0"?>"#),
        (RawKind::ElementOpen, "<catalog>"),
        (RawKind::ElementOpen, r#"<book id="bk101">"#),
        (RawKind::ElementOpen, "<author>"),
        (RawKind::Text, "Gambardella, Matthew"),
    ];
    for (raw, (kind, text)) in raws.iter().zip(expected) {
        assert_eq!(raw.kind(), kind);
        assert_eq!(raw.as_bytes(), text.as_bytes());
    }

    let last = raws.last().unwrap();
    assert_eq!(last.kind(), RawKind::ElementClose);
    assert_eq!(last.as_bytes(), b"</catalog>");
}

#[test]
fn depth_accounting_on_close() {
    let doc = xmlite::parse_raw(b"<a><b/></a>");
    let mut depths = vec![doc.depth()];
    for raw in doc.tokens() {
        depths.push(raw.unwrap().depth());
    }
    assert_eq!(depths, [0, 1, 2, 1]);
}

#[test]
fn depth_returns_to_zero_at_end() {
    let raws = walk(BOOKS.as_bytes());
    // The last chunk closes the root: one level above the document.
    assert_eq!(raws.last().unwrap().depth(), 1);
    for raw in &raws {
        assert!(raw.depth() >= 1);
    }
}

#[test]
fn open_and_close_pair_at_same_depth() {
    let raws = walk(BOOKS.as_bytes());
    for raw in &raws {
        if raw.kind() != RawKind::ElementOpen {
            continue;
        }
        let tag = raw.tag().unwrap();
        let close = raws
            .iter()
            .find(|r| {
                r.kind() == RawKind::ElementClose && r.pos() > raw.pos() && r.tag() == Some(tag)
            })
            .expect("matching close");
        assert_eq!(close.depth(), raw.depth(), "pair for <{tag}>");
    }
}

#[test]
fn prev_inverts_next() {
    let doc = xmlite::parse_raw(BOOKS.as_bytes());
    let mut forward = vec![doc];
    forward.extend(walk(BOOKS.as_bytes()));

    // Walk backward from the last chunk; we must retrace exactly.
    let mut cur = *forward.last().unwrap();
    for expected in forward.iter().rev().skip(1) {
        let back = cur.prev().unwrap().expect("chunk before");
        assert_eq!(back, *expected);
        cur = back;
    }
    assert!(cur.prev().unwrap().is_none());
}

#[test]
fn next_inverts_prev() {
    let raws = walk(BOOKS.as_bytes());
    for raw in &raws {
        let before = raw.prev().unwrap().unwrap();
        assert_eq!(before.next().unwrap().unwrap(), *raw);
    }
}

#[test]
fn doctype_spans_internal_subset() {
    let data = br#"<!DOCTYPE note [ <!ENTITY nbsp "&#xA0;"> ]><note/>"#;
    let raws = walk(data);
    assert_eq!(raws[0].kind(), RawKind::Dtd);
    let value = raws[0].value().unwrap();
    assert!(value.contains("<!ENTITY nbsp \"&#xA0;\">"), "{value}");
    assert!(value.ends_with(']'), "{value}");
    assert_eq!(raws[1].kind(), RawKind::ElementSelfClosed);
    assert_eq!(raws[1].tag(), Some("note"));
}

#[test]
fn comment_and_pi_chunks() {
    let raws = walk(b"<!-- note --><?style href=\"a.css\"?><r/>");
    assert_eq!(raws[0].kind(), RawKind::Comment);
    assert_eq!(raws[0].value().unwrap(), " note ");
    assert_eq!(raws[1].kind(), RawKind::ProcessingInstruction);
    assert_eq!(raws[1].tag(), Some("style"));
    assert_eq!(
        raws[1].attributes().unwrap().unwrap().get("href"),
        Some("a.css")
    );
    assert_eq!(raws[2].kind(), RawKind::ElementSelfClosed);
}

#[test]
fn text_is_trimmed_and_unescaped() {
    let raws = walk(b"<p>  a &lt;b&gt; &amp; c  </p>");
    assert_eq!(raws[1].kind(), RawKind::Text);
    assert_eq!(raws[1].as_bytes(), b"a &lt;b&gt; &amp; c");
    assert_eq!(raws[1].value().unwrap(), "a <b> & c");
}

#[test]
fn unterminated_comment_is_fatal() {
    let err = xmlite::parse_raw(b"<r><!-- never closed")
        .next()
        .unwrap()
        .unwrap()
        .next()
        .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::MalformedToken));
    assert_eq!(err.pos(), 3);
}

#[test]
fn unknown_markup_is_fatal() {
    let err = xmlite::parse_raw(b"<!x>").next().unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::UnknownMarkup));
    assert_eq!(err.pos(), 0);
}

#[test]
fn unterminated_tag_is_fatal() {
    let err = xmlite::parse_raw(b"<tag attr=\"v\"").next().unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::MalformedToken));
}

#[test]
fn text_at_end_of_input_is_allowed() {
    let raws = walk(b"<a/>trailing");
    assert_eq!(raws[1].kind(), RawKind::Text);
    assert_eq!(raws[1].value().unwrap(), "trailing");
}
