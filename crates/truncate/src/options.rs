use std::fmt::{Display, Formatter, Result as FmtResult};

/// Marker appended to truncated output unless configured otherwise.
pub const DEFAULT_ELLIPSIS: &str = "...";

/// Which open elements count as image elements when closers are emitted.
///
/// Image elements never get a synthetic closing tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "lowercase"))]
pub enum ImageMatch {
    /// Only an element named exactly `img`.
    #[default]
    Exact,
    /// Any element whose name contains `img`, such as `bigimgwrapper`.
    /// Reproduces output from older releases byte-for-byte.
    Contains,
}
impl ImageMatch {
    #[must_use]
    pub fn is_image(&self, name: &str) -> bool {
        match self {
            ImageMatch::Exact => name == "img",
            ImageMatch::Contains => name.contains("img"),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageMatch::Exact => "exact",
            ImageMatch::Contains => "contains",
        }
    }
}

impl Display for ImageMatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// Options for [`truncate`](crate::truncate) and
/// [`truncate_strict`](crate::truncate_strict).
///
/// # Examples
///
/// ```rust
/// use marktrim_truncate::{ImageMatch, Options};
/// let options = Options::new()
///     .with_ellipsis("…")
///     .keep_image_tag(true)
///     .image_match(ImageMatch::Contains);
/// assert_eq!(options.ellipsis(), Some("…"));
/// assert!(options.keeps_image_tag());
/// assert_eq!(Options::new().without_ellipsis().ellipsis(), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    ellipsis: Option<String>,
    keep_image_tag: bool,
    image_match: ImageMatch,
}
impl Default for Options {
    fn default() -> Self {
        Self {
            ellipsis: Some(DEFAULT_ELLIPSIS.to_string()),
            keep_image_tag: false,
            image_match: ImageMatch::default(),
        }
    }
}
impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the marker appended to the output. An empty marker disables it.
    pub fn with_ellipsis(mut self, ellipsis: impl Into<String>) -> Self {
        self.ellipsis = Some(ellipsis.into());
        self
    }

    pub fn without_ellipsis(mut self) -> Self {
        self.ellipsis = None;
        self
    }

    /// Keep the first `<img>` element in the output instead of removing it.
    pub fn keep_image_tag(mut self, keep: bool) -> Self {
        self.keep_image_tag = keep;
        self
    }

    pub fn image_match(mut self, image_match: ImageMatch) -> Self {
        self.image_match = image_match;
        self
    }

    /// The marker to append, if enabled and non-empty.
    #[must_use]
    pub fn ellipsis(&self) -> Option<&str> {
        self.ellipsis.as_deref().filter(|e| !e.is_empty())
    }

    #[must_use]
    pub fn keeps_image_tag(&self) -> bool {
        self.keep_image_tag
    }

    #[must_use]
    pub fn image_matching(&self) -> ImageMatch {
        self.image_match
    }
}
