//! The truncation loop.

use std::convert::Infallible;

use tracing::instrument;

use crate::error::Result;
use crate::image::find_first_image;
use crate::options::Options;
use crate::scan::{Tag, TagKind, next_tag};
use crate::stack::TagStack;

/// Truncates `input` to at most `max_length` visible characters, closing any
/// element left open at the cut.
///
/// Tags are copied verbatim and never count against the budget. The ellipsis
/// (if enabled) is appended before the closing tags, whether or not anything
/// was cut. Unless [`Options::keep_image_tag`] is set, the first `<img>`
/// element of the result is removed.
///
/// Malformed markup is never rejected: a closing tag closes whatever element
/// was opened last, regardless of its name. See [`truncate_strict`] for a
/// validating variant.
///
/// # Examples
///
/// ```rust
/// use marktrim_truncate::{Options, truncate};
/// let options = Options::default();
/// assert_eq!(truncate("Hello world", 5, &options), "Hello...");
/// assert_eq!(truncate("<p>Hello world</p>", 5, &options), "<p>Hello...</p>");
/// assert_eq!(truncate("<b><i>Hi</i></b>", 1, &options), "<b><i>H...</i></b>");
/// assert_eq!(truncate("Short", 100, &options.without_ellipsis()), "Short");
/// ```
#[instrument(level = "debug", skip(input, options), fields(input_len = input.len()))]
pub fn truncate(input: &str, max_length: usize, options: &Options) -> String {
    let Ok(output) = self::run(input, max_length, options, |stack, _| {
        stack.close_lenient();
        Ok::<_, Infallible>(())
    });
    output
}

/// Same as [`truncate`], but every closing tag before the cut must match the
/// innermost open element.
///
/// # Errors
///
/// - [`UnexpectedClose`](crate::error::ErrorKind::UnexpectedClose) if a
///   closing tag appears while nothing is open.
/// - [`MismatchedClose`](crate::error::ErrorKind::MismatchedClose) if a
///   closing tag names a different element than the innermost open one.
///
/// Markup after the cut is never inspected.
///
/// # Examples
///
/// ```rust
/// use marktrim_truncate::{Options, truncate_strict};
/// let options = Options::default();
/// assert_eq!(truncate_strict("<b>bold</b> text", 6, &options).unwrap(), "<b>bold</b> t...");
/// assert!(truncate_strict("<b><i>x</b></i>", 10, &options).is_err());
/// ```
#[instrument(level = "debug", skip(input, options), fields(input_len = input.len()))]
pub fn truncate_strict(input: &str, max_length: usize, options: &Options) -> Result<String> {
    self::run(input, max_length, options, |stack, tag| match stack.close_strict(tag.name) {
        Ok(_) => Ok(()),
        Err(err) => {
            tracing::warn!(tag = tag.raw, open = stack.len(), "closing tag does not match open elements");
            Err(err)
        },
    })
}

/// Drives the scanner over `input`, calling `close` for every closing tag
/// that fits inside the budget.
fn run<'a, E>(
    input: &'a str,
    max_length: usize,
    options: &Options,
    mut close: impl FnMut(&mut TagStack<'a>, &Tag<'a>) -> std::result::Result<(), E>,
) -> std::result::Result<String, E> {
    let mut output = String::with_capacity(input.len());
    let mut stack = TagStack::new();
    // Visible characters copied so far, never more than `max_length`.
    let mut consumed = 0;
    let mut rest = input;
    loop {
        let Some(tag) = next_tag(rest) else {
            output.push_str(take_chars(rest, max_length - consumed));
            tracing::trace!(consumed, "no more tags");
            break;
        };
        if consumed + tag.offset > max_length {
            output.push_str(take_chars(&rest[..tag.start], max_length - consumed));
            tracing::trace!(consumed, tag = tag.raw, "budget exhausted before tag");
            break;
        }
        consumed += tag.offset;
        output.push_str(&rest[..tag.end()]);
        match tag.kind {
            TagKind::Open => stack.push(tag.name),
            TagKind::Close => close(&mut stack, &tag)?,
        }
        rest = &rest[tag.end()..];
    }
    if let Some(ellipsis) = options.ellipsis() {
        output.push_str(ellipsis);
    }
    if !stack.is_empty() {
        tracing::debug!(open = stack.len(), "closing open elements");
    }
    stack.drain_closers(&mut output, options.image_matching());
    if !options.keeps_image_tag()
        && let Some(image) = find_first_image(&output)
    {
        output.replace_range(image, "");
    }
    Ok(output)
}

/// The longest prefix of `text` holding at most `count` characters.
fn take_chars(text: &str, count: usize) -> &str {
    match text.char_indices().nth(count) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
