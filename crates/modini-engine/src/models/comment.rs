/// Characters that start a comment line or an inline comment.
pub const COMMENT_PREFIXES: [char; 2] = [';', '#'];

/// Prefix added to comment text that doesn't carry one of its own.
pub const DEFAULT_COMMENT_PREFIX: &str = "; ";

/// A full-line comment.
///
/// The stored text is trimmed and always starts with `;` or `#`. The blank flags only
/// influence layout on write: they ask the serializer for an empty line before or after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    text: String,
    leading_blank: bool,
    trailing_blank: bool,
}

impl Comment {
    pub fn new(text: impl AsRef<str>) -> Self {
        Self {
            text: normalize_comment(text.as_ref()),
            leading_blank: false,
            trailing_blank: false,
        }
    }

    pub fn with_leading_blank(mut self, leading_blank: bool) -> Self {
        self.leading_blank = leading_blank;
        self
    }

    pub fn with_trailing_blank(mut self, trailing_blank: bool) -> Self {
        self.trailing_blank = trailing_blank;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn leading_blank(&self) -> bool {
        self.leading_blank
    }

    pub fn trailing_blank(&self) -> bool {
        self.trailing_blank
    }
}

/// Trims `text` and makes sure it starts with a comment prefix.
pub(crate) fn normalize_comment(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.starts_with(COMMENT_PREFIXES) {
        trimmed.to_string()
    } else {
        format!("{DEFAULT_COMMENT_PREFIX}{trimmed}")
    }
}
