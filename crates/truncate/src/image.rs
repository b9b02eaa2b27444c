//! Image element removal.

use std::borrow::Cow;
use std::ops::Range;

use crate::scan::{self, NameRule};

/// Byte range of the first `<img ...>` element in `html`.
pub(crate) fn find_first_image(html: &str) -> Option<Range<usize>> {
    scan::find(html.as_bytes(), NameRule::Literal(b"img")).map(|(start, span)| start..span.end)
}

/// Removes the first `<img ...>` element from `html`.
///
/// Later image elements are left alone. The name is matched case-sensitively,
/// and attributes follow the same double-quoted grammar as every other tag.
///
/// # Examples
///
/// ```rust
/// use marktrim_truncate::strip_first_image;
/// assert_eq!(strip_first_image(r#"a<img src="1.png">b<img src="2.png">"#), r#"ab<img src="2.png">"#);
/// assert_eq!(strip_first_image("<p>no images</p>"), "<p>no images</p>");
/// ```
pub fn strip_first_image(html: &str) -> Cow<'_, str> {
    match find_first_image(html) {
        Some(range) => {
            let mut stripped = String::with_capacity(html.len() - range.len());
            stripped.push_str(&html[..range.start]);
            stripped.push_str(&html[range.end..]);
            Cow::Owned(stripped)
        },
        None => Cow::Borrowed(html),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(r#"<img src="x.jpg">Hello"#, "Hello")]
    #[case("<img>", "")]
    #[case(r#"a <img  alt = "b" src="c">d"#, "a d")]
    #[case(r#"<imgsrc="x">y"#, "y")]
    #[case("<p><img></p><img>", "<p></p><img>")]
    #[case("x<image>y<img>z", "x<image>yz")]
    fn test_strip(#[case] html: &str, #[case] expected: &str) {
        assert_eq!(strip_first_image(html), expected);
    }

    #[rstest]
    #[case("")]
    #[case("<p>text</p>")]
    #[case("<IMG src=\"x\">")]
    #[case("</img>")]
    #[case("<img/>")]
    #[case("<img src=x>")]
    #[case("<img2>")]
    fn test_untouched(#[case] html: &str) {
        assert!(matches!(strip_first_image(html), Cow::Borrowed(s) if s == html));
    }
}
