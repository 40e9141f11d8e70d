use std::sync::LazyLock;

use regex::Regex;

use crate::error::ParseError;
use crate::models::comment::COMMENT_PREFIXES;

use super::lines::LineRef;

static SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(?P<section>.+?)\]$").expect("section grammar is valid"));

static OPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<key>[^=]+?)\s*=\s*(?P<value>[^;#=]+?)\s*(?P<comment>[;#].*)?$")
        .expect("option grammar is valid")
});

/// Classification of a single line, made without reference to surrounding lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// Empty or whitespace only.
    Blank,
    /// Full-line comment, trimmed, prefix included.
    Comment(String),
    /// `[name]`
    SectionHeader(String),
    /// `key = value` with an optional trailing `;`/`#` comment.
    Option {
        key: String,
        value: String,
        inline_comment: Option<String>,
    },
    /// Anything else, kept verbatim.
    Unparsable(String),
}

/// Classifies individual lines of an override ini file.
pub struct IniLineClassifier;

impl IniLineClassifier {
    /// Classifies a line into a [`LineClass`].
    ///
    /// Comments are recognised before anything else. A line that satisfies the option
    /// grammar while also looking like a section header is rejected with
    /// [`ParseError::AmbiguousLine`].
    pub fn classify(&self, lr: &LineRef) -> Result<LineClass, ParseError> {
        let trimmed = lr.text.trim();

        if trimmed.is_empty() {
            return Ok(LineClass::Blank);
        }

        if trimmed.starts_with(COMMENT_PREFIXES) {
            return Ok(LineClass::Comment(trimmed.to_string()));
        }

        let header = section_name(trimmed);
        let option = parse_option(lr.text);

        match (header, option) {
            (Some(_), Some(_)) => Err(ambiguous(lr)),
            (None, Some(option)) if section_name(&option.0).is_some() => Err(ambiguous(lr)),
            (Some(name), None) => Ok(LineClass::SectionHeader(name.to_string())),
            (None, Some((key, value, inline_comment))) => Ok(LineClass::Option {
                key,
                value,
                inline_comment,
            }),
            (None, None) => Ok(LineClass::Unparsable(lr.text.to_string())),
        }
    }
}

fn ambiguous(lr: &LineRef) -> ParseError {
    ParseError::AmbiguousLine {
        line_number: lr.number,
        line: lr.text.to_string(),
    }
}

fn section_name(trimmed: &str) -> Option<&str> {
    SECTION_RE
        .captures(trimmed)
        .and_then(|caps| caps.name("section"))
        .map(|m| m.as_str())
}

/// Matches the option grammar, returning `(key, value, inline_comment)`.
fn parse_option(line: &str) -> Option<(String, String, Option<String>)> {
    if starts_with_whitespace(line) || starts_with_script_keyword(line) {
        return None;
    }

    let caps = OPTION_RE.captures(line)?;
    let key = caps.name("key")?.as_str().trim();
    let value = caps.name("value")?.as_str().trim();
    if key.is_empty() || value.is_empty() {
        return None;
    }

    let inline_comment = caps.name("comment").map(|m| m.as_str().trim().to_string());
    Some((key.to_string(), value.to_string(), inline_comment))
}

fn starts_with_whitespace(line: &str) -> bool {
    line.starts_with(char::is_whitespace)
}

/// Conditional lines of the command mini-language must never be read as options.
fn starts_with_script_keyword(line: &str) -> bool {
    let head: String = line.chars().take(8).collect::<String>().to_lowercase();
    if head.starts_with("endif") || head.starts_with("else if") {
        return true;
    }
    head.strip_prefix("if")
        .is_some_and(|rest| rest.starts_with(char::is_whitespace))
}
