use super::comment::normalize_comment;

/// Prefix written in front of an option that has been commented out.
pub const COMMENTED_OUT_PREFIX: &str = "; ";

/// A `key = value` line inside a section, or a bare positional value when `key` is `None`.
///
/// `display_name` is the name used to look the option up. It defaults to the key and only
/// differs for repeated keys kept under a disambiguated name, so the option still writes
/// out as `key = value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniOption {
    key: Option<String>,
    value: String,
    display_name: Option<String>,
    inline_comment: Option<String>,
    commented_out: bool,
}

impl IniOption {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: value.into(),
            display_name: None,
            inline_comment: None,
            commented_out: false,
        }
    }

    /// A value without a key, written back exactly as stored.
    pub fn anonymous(value: impl Into<String>) -> Self {
        Self {
            key: None,
            value: value.into(),
            display_name: None,
            inline_comment: None,
            commented_out: false,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Attaches a trailing comment. A missing `;`/`#` prefix is added.
    pub fn with_inline_comment(mut self, comment: Option<&str>) -> Self {
        self.inline_comment = comment
            .filter(|c| !c.trim().is_empty())
            .map(normalize_comment);
        self
    }

    pub fn with_commented_out(mut self, commented_out: bool) -> Self {
        self.commented_out = commented_out;
        self
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// The lookup name: the display name if one was assigned, otherwise the key.
    pub fn name(&self) -> Option<&str> {
        self.display_name.as_deref().or(self.key.as_deref())
    }

    pub fn inline_comment(&self) -> Option<&str> {
        self.inline_comment.as_deref()
    }

    pub fn is_anonymous(&self) -> bool {
        self.key.is_none()
    }

    pub fn is_commented_out(&self) -> bool {
        self.commented_out
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn set_inline_comment(&mut self, comment: Option<&str>) {
        self.inline_comment = comment
            .filter(|c| !c.trim().is_empty())
            .map(normalize_comment);
    }

    pub fn comment_out(&mut self) {
        self.commented_out = true;
    }

    pub fn uncomment(&mut self) {
        self.commented_out = false;
    }

    /// Renders the option as a single line, without the trailing newline.
    pub fn to_line(&self) -> String {
        let mut line = String::new();
        if self.commented_out {
            line.push_str(COMMENTED_OUT_PREFIX);
        }

        match &self.key {
            Some(key) => {
                line.push_str(key);
                line.push_str(" = ");
                line.push_str(&self.value);
            }
            None => line.push_str(&self.value),
        }

        if let Some(comment) = &self.inline_comment {
            line.push(' ');
            line.push_str(comment);
        }

        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_key_value() {
        assert_eq!(IniOption::new("hash", "abc123").to_line(), "hash = abc123");
    }

    #[test]
    fn renders_inline_comment() {
        let option = IniOption::new("hash", "abc123").with_inline_comment(Some(";body"));
        assert_eq!(option.to_line(), "hash = abc123 ;body");

        let option = IniOption::new("hash", "abc123").with_inline_comment(Some("body"));
        assert_eq!(option.to_line(), "hash = abc123 ; body");
    }

    #[test]
    fn empty_inline_comment_is_dropped() {
        let option = IniOption::new("k", "v").with_inline_comment(Some("  "));
        assert_eq!(option.inline_comment(), None);
    }

    #[test]
    fn renders_anonymous_verbatim() {
        let option = IniOption::anonymous("    run = CommandListBody");
        assert!(option.is_anonymous());
        assert_eq!(option.name(), None);
        assert_eq!(option.to_line(), "    run = CommandListBody");
    }

    #[test]
    fn commented_out_keeps_content() {
        let mut option = IniOption::new("match_priority", "0");
        option.comment_out();
        assert_eq!(option.to_line(), "; match_priority = 0");

        option.uncomment();
        assert_eq!(option.to_line(), "match_priority = 0");
    }

    #[test]
    fn display_name_overrides_lookup_but_not_output() {
        let option = IniOption::new("foo", "2").with_display_name("foo#2");
        assert_eq!(option.name(), Some("foo#2"));
        assert_eq!(option.key(), Some("foo"));
        assert_eq!(option.to_line(), "foo = 2");
    }
}
