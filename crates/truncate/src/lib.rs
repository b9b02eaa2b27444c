//! Truncation of inline markup to a visible-character budget.
//!
//! [`truncate`] cuts a string such as `<p>Hello <b>world</b></p>` after a
//! number of *visible* characters, counting only text outside of tags, then:
//!
//! - closes every element still open at the cut,
//! - appends an ellipsis marker (`...` by default), and
//! - removes the first `<img>` element unless asked to keep it.
//!
//! Markup isn't validated: unbalanced input produces best-effort output.
//! [`truncate_strict`] is the validating counterpart and fails on closing tags
//! that don't match the innermost open element.
//!
//! Lengths are counted in Unicode scalar values, not graphemes.

pub mod error;
mod image;
mod options;
mod scan;
mod stack;
mod truncate;

pub use crate::image::strip_first_image;
pub use crate::options::{DEFAULT_ELLIPSIS, ImageMatch, Options};
pub use crate::scan::{Tag, TagKind, next_tag};
pub use crate::stack::TagStack;
pub use crate::truncate::{truncate, truncate_strict};
