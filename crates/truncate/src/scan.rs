//! Tag scanning.
//!
//! A small state machine over a byte cursor recognising the inline tag
//! grammar:
//!
//! ```text
//! tag   := '<' ['/'] name WS* attr* '>'
//! attr  := name WS* '=' WS* '"' [^"]* '"' WS*
//! name  := [A-Za-z0-9_]+
//! ```
//!
//! Plain text between tags is skipped with `memchr` to the next `<`. Every
//! structural byte is ASCII and can't appear inside a multi-byte UTF-8
//! sequence, so every position the machine stops at is a char boundary.
//!
//! Comments, self-closing slashes, unquoted attribute values and entities are
//! not recognised. A `<` that doesn't start a valid tag is plain text.

use std::ops::Range;

use memchr::memchr;

/// Whether a tag opens or closes an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// `<name ...>`
    Open,
    /// `</name ...>`
    Close,
}

/// A tag found by [`next_tag`], borrowed from the scanned input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tag<'a> {
    /// Number of plain characters (Unicode scalar values) preceding the tag.
    pub offset: usize,
    /// Byte position of the opening `<`.
    pub start: usize,
    /// The tag exactly as written, `<` through `>`.
    pub raw: &'a str,
    /// Element name, without `<`, `/` or attributes.
    pub name: &'a str,
    pub kind: TagKind,
}
impl Tag<'_> {
    /// Byte position one past the closing `>`.
    #[inline]
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.raw.len()
    }

    #[inline]
    #[must_use]
    pub fn is_closing(&self) -> bool {
        self.kind == TagKind::Close
    }
}

/// Finds the first tag in `input`.
///
/// Returns `None` when the rest of the input is plain text.
///
/// # Examples
///
/// ```rust
/// use marktrim_truncate::{TagKind, next_tag};
/// let tag = next_tag(r#"Hi <a href="/x">there</a>"#).unwrap();
/// assert_eq!(tag.offset, 3);
/// assert_eq!(tag.name, "a");
/// assert_eq!(tag.raw, r#"<a href="/x">"#);
/// assert_eq!(tag.kind, TagKind::Open);
/// assert!(next_tag("1 < 2 > 0").is_none());
/// ```
pub fn next_tag(input: &str) -> Option<Tag<'_>> {
    let (start, found) = find(input.as_bytes(), NameRule::Word)?;
    Some(Tag {
        offset: input[..start].chars().count(),
        start,
        raw: &input[start..found.end],
        name: &input[found.name],
        kind: found.kind,
    })
}

/// How the element name after `<` is matched.
#[derive(Clone, Copy, Debug)]
pub(crate) enum NameRule {
    /// Any run of word characters, with an optional leading `/`.
    Word,
    /// Exactly these bytes, opening tags only. Attributes may follow the
    /// literal without whitespace, as in `<imgsrc="a">`.
    Literal(&'static [u8]),
}

/// The extent of one tag match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Span {
    /// One past the closing `>`.
    pub end: usize,
    pub name: Range<usize>,
    pub kind: TagKind,
}

/// Returns the byte position of the first `<` in `bytes` that starts a tag
/// matching `rule`, with the extent of that tag.
pub(crate) fn find(bytes: &[u8], rule: NameRule) -> Option<(usize, Span)> {
    let mut from = 0;
    while let Some(found) = memchr(b'<', &bytes[from..]) {
        let start = from + found;
        if let Some(span) = match_at(bytes, start, rule) {
            return Some((start, span));
        }
        from = start + 1;
    }
    None
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    TagName,
    /// Between attributes: expecting whitespace, another attribute, or `>`.
    TagEnd,
    AttributeName,
    AttributeValue,
}

/// Runs the tag grammar from the `<` at `start`.
fn match_at(bytes: &[u8], start: usize, rule: NameRule) -> Option<Span> {
    debug_assert_eq!(bytes.get(start), Some(&b'<'));
    let mut pos = start + 1;
    let mut kind = TagKind::Open;
    if matches!(rule, NameRule::Word) && bytes.get(pos) == Some(&b'/') {
        kind = TagKind::Close;
        pos += 1;
    }
    let mut name = pos..pos;
    let mut state = State::TagName;
    loop {
        state = match state {
            State::TagName => {
                match rule {
                    NameRule::Word => pos = skip_while(bytes, pos, is_word),
                    NameRule::Literal(literal) if bytes[pos..].starts_with(literal) => pos += literal.len(),
                    NameRule::Literal(_) => return None,
                }
                if pos == name.start {
                    return None;
                }
                name.end = pos;
                State::TagEnd
            },
            State::TagEnd => {
                pos = skip_while(bytes, pos, is_space);
                match *bytes.get(pos)? {
                    b'>' => return Some(Span { end: pos + 1, name, kind }),
                    b if is_word(b) => State::AttributeName,
                    _ => return None,
                }
            },
            State::AttributeName => {
                pos = skip_while(bytes, pos, is_word);
                pos = skip_while(bytes, pos, is_space);
                if *bytes.get(pos)? != b'=' {
                    return None;
                }
                pos = skip_while(bytes, pos + 1, is_space);
                if *bytes.get(pos)? != b'"' {
                    return None;
                }
                pos += 1;
                State::AttributeValue
            },
            State::AttributeValue => {
                pos += memchr(b'"', &bytes[pos..])? + 1;
                State::TagEnd
            },
        }
    }
}

#[inline]
fn skip_while(bytes: &[u8], from: usize, predicate: impl Fn(u8) -> bool) -> usize {
    bytes[from..].iter().position(|&b| !predicate(b)).map_or(bytes.len(), |n| from + n)
}

#[inline]
fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

#[inline]
fn is_space(b: u8) -> bool {
    // ASCII whitespace plus vertical tab.
    b.is_ascii_whitespace() || b == 0x0B
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use rstest::rstest;

    #[rstest]
    #[case("<p>", "p", TagKind::Open)]
    #[case("</p>", "p", TagKind::Close)]
    #[case("<h1 >", "h1", TagKind::Open)]
    #[case(r#"<a href="/x">"#, "a", TagKind::Open)]
    #[case(r#"<a href = "/x"   title="y">"#, "a", TagKind::Open)]
    #[case(r#"<a x="1"y="2">"#, "a", TagKind::Open)]
    #[case("<a\n\thref=\"/x\"\n>", "a", TagKind::Open)]
    #[case(r#"<span data_x="a > b">"#, "span", TagKind::Open)]
    #[case(r#"</div class="x">"#, "div", TagKind::Close)]
    #[case(r#"<img src="ünïcödé.jpg">"#, "img", TagKind::Open)]
    fn test_whole_tag(#[case] input: &str, #[case] name: &str, #[case] kind: TagKind) {
        let tag = next_tag(input).unwrap();
        assert_eq!(tag.offset, 0);
        assert_eq!(tag.start, 0);
        assert_eq!(tag.raw, input);
        assert_eq!(tag.end(), input.len());
        assert_eq!(tag.name, name);
        assert_eq!(tag.kind, kind);
        assert_eq!(tag.is_closing(), kind == TagKind::Close);
    }

    #[rstest]
    #[case("")]
    #[case("plain text")]
    #[case("1 < 2")]
    #[case("<>")]
    #[case("</>")]
    #[case("< p>")]
    #[case("<p")]
    #[case("<br/>")]
    #[case("<!-- comment -->")]
    #[case("<a href=x>")]
    #[case("<a href='x'>")]
    #[case(r#"<a href="x>"#)]
    #[case("<a disabled>")]
    #[case("<a b = >")]
    fn test_no_tag(#[case] input: &str) {
        assert_eq!(next_tag(input), None);
    }

    #[test]
    fn offset_counts_characters_not_bytes() {
        let tag = next_tag("héllo wörld<b>").unwrap();
        assert_eq!(tag.offset, 11);
        assert_eq!(tag.start, "héllo wörld".len());
        assert_eq!(tag.name, "b");
    }

    #[test]
    fn skips_invalid_candidates() {
        let input = "a < b <c d> <em>x";
        let tag = next_tag(input).unwrap();
        assert_eq!(tag.raw, "<em>");
        assert_eq!(tag.offset, 12);
        assert_eq!(&input[tag.end()..], "x");
    }

    #[test]
    fn literal_rule_only_matches_literal_name() {
        let bytes = br#"<image><img2><imgsrc="a.png">"#;
        let (start, span) = find(bytes, NameRule::Literal(b"img")).unwrap();
        assert_eq!(start, 13);
        assert_eq!(span.end, bytes.len());
        assert_eq!(span.kind, TagKind::Open);
        assert_eq!(find(b"</img>", NameRule::Literal(b"img")), None);
    }

    /// The scanner agrees with a backtracking regex for the same grammar,
    /// except on names that run straight into `=`.
    #[rstest]
    #[case("Hello world")]
    #[case("<p>Hello <b>world</b></p>")]
    #[case(r#"x <a href = "1"  title="t">y</a> z"#)]
    #[case("<<p>> < / p> </p >")]
    #[case(r#"<div class="a"id="b"><span>ü</span></div>"#)]
    #[case("<a href=x><b>ok</b>")]
    #[case("<1><_>< a><a_b c_d=\"\">")]
    #[case("<p\n>multi\nline</p\t>")]
    fn test_matches_regex_pattern(#[case] input: &str) {
        // ASCII-only `\w` and `\s`, like the scanner.
        let pattern = Regex::new(r#"</?(?-u:\w)+(?-u:\s)*((?-u:\w)+(?-u:\s)*=(?-u:\s)*"[^"]*"(?-u:\s)*)*>"#).unwrap();
        let mut rest = input;
        loop {
            let expected = pattern.find(rest);
            let actual = next_tag(rest);
            match (expected, actual) {
                (None, None) => break,
                (Some(m), Some(tag)) => {
                    assert_eq!(tag.start, m.start(), "in {rest:?}");
                    assert_eq!(tag.raw, m.as_str(), "in {rest:?}");
                    rest = &rest[tag.end()..];
                },
                (expected, actual) => panic!("regex {expected:?} vs scanner {actual:?} in {rest:?}"),
            }
        }
    }
}
