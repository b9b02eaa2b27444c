//! Open-element bookkeeping.

use crate::error::{ErrorKind, Result};
use crate::options::ImageMatch;

/// Names of the currently open elements, innermost last.
///
/// Names are borrowed from the input being truncated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagStack<'a> {
    names: Vec<&'a str>,
}
impl<'a> TagStack<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &'a str) {
        self.names.push(name);
    }

    /// Closes the innermost open element without checking its name.
    ///
    /// Mismatched markup leaves the stack out of step with the real nesting;
    /// the closers emitted later reflect the stack, not the document.
    pub fn close_lenient(&mut self) -> Option<&'a str> {
        self.names.pop()
    }

    /// Closes the innermost open element, which must be named `name`.
    ///
    /// The stack is left untouched on error.
    pub fn close_strict(&mut self, name: &str) -> Result<&'a str> {
        match self.names.pop() {
            None => exn::bail!(ErrorKind::UnexpectedClose(name.to_string())),
            Some(open) if open != name => {
                self.names.push(open);
                exn::bail!(ErrorKind::MismatchedClose { expected: open.to_string(), found: name.to_string() })
            },
            Some(open) => Ok(open),
        }
    }

    /// Empties the stack, writing a closing tag for every open element to
    /// `out`, innermost first. Image elements are dropped without a closer.
    ///
    /// Returns how many closers were written.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use marktrim_truncate::{ImageMatch, TagStack};
    /// let mut stack = TagStack::new();
    /// stack.push("p");
    /// stack.push("img");
    /// stack.push("b");
    /// let mut out = String::new();
    /// assert_eq!(stack.drain_closers(&mut out, ImageMatch::Exact), 2);
    /// assert_eq!(out, "</b></p>");
    /// assert!(stack.is_empty());
    /// ```
    pub fn drain_closers(&mut self, out: &mut String, images: ImageMatch) -> usize {
        let mut written = 0;
        while let Some(name) = self.names.pop() {
            if images.is_image(name) {
                continue;
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
            written += 1;
        }
        written
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Open element names, outermost first.
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.names.iter().copied()
    }
}
