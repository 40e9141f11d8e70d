use std::borrow::Cow;

/// A reference to a single input line with its 1-based line number.
#[derive(Debug, Clone, Copy)]
pub struct LineRef<'a> {
    /// Position of the line in the input, starting at 1.
    pub number: usize,
    /// The line text without its line terminator.
    pub text: &'a str,
}

/// Rewrites `\r\n` and lone `\r` terminators as `\n`.
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Strips any trailing line terminator a caller left on a line.
pub fn strip_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}
