use crate::document::{Document, DocumentItem};
use crate::models::{Comment, Group, IniOption, Section, SectionEntry, SectionMode};
use crate::parsing::{IniLineClassifier, LineClass, LineRef};

/// Collects the lines of one output block, collapsing blank lines.
#[derive(Default)]
struct BlockWriter {
    lines: Vec<String>,
}

impl BlockWriter {
    fn line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// No blank at the start of a block, and never two in a row.
    fn blank(&mut self) {
        if self.lines.last().is_some_and(|last| !last.is_empty()) {
            self.lines.push(String::new());
        }
    }

    fn comment(&mut self, comment: &Comment) {
        if comment.leading_blank() {
            self.blank();
        }
        self.line(comment.text());
        if comment.trailing_blank() {
            self.blank();
        }
    }

    fn finish(mut self) -> Option<String> {
        while self.lines.last().is_some_and(String::is_empty) {
            self.lines.pop();
        }
        (!self.lines.is_empty()).then(|| self.lines.join("\n"))
    }
}

impl Document {
    /// Renders the document back to text.
    ///
    /// Raw lines are written exactly as they were read unless `include_raw_sections_normally`
    /// is set. In that case sections in raw mode are written as if they had been parsed
    /// normally, so their text changes: raw lines that read as options get `key = value`
    /// spacing and comments lose their indentation. Other lines, such as command bodies and
    /// blank separators, are still written verbatim. The sections themselves stay in raw
    /// mode, so a later `serialize(false)` reproduces the stored lines again.
    pub fn serialize(&self, include_raw_sections_normally: bool) -> String {
        let headerless = self.options.allow_headerless_section;
        let mut blocks = Vec::new();
        let mut comments = BlockWriter::default();

        for item in &self.items {
            if let DocumentItem::Comment(comment) = item {
                comments.comment(comment);
                continue;
            }

            blocks.extend(std::mem::take(&mut comments).finish());
            let block = match item {
                DocumentItem::Section(section) => {
                    render_section(section, include_raw_sections_normally, headerless)
                }
                DocumentItem::Group(group) => render_group(group, include_raw_sections_normally),
                DocumentItem::Comment(_) => None,
            };
            blocks.extend(block);
        }
        blocks.extend(comments.finish());

        if blocks.is_empty() {
            return String::new();
        }
        let mut out = blocks.join("\n\n");
        out.push('\n');
        out
    }
}

fn render_group(group: &Group, include_raw: bool) -> Option<String> {
    let mut parts = Vec::new();
    if !group.suppress_header() {
        parts.push(group.header().text().to_string());
    }
    parts.extend(
        group
            .sections()
            .iter()
            .filter_map(|section| render_section(section, include_raw, false)),
    );
    (!parts.is_empty()).then(|| parts.join("\n\n"))
}

/// `omit_hidden_header` only affects the document's hidden section.
fn render_section(section: &Section, include_raw: bool, omit_hidden_header: bool) -> Option<String> {
    let mut out = BlockWriter::default();
    if !(section.is_hidden() && omit_hidden_header) {
        out.line(format!("[{}]", section.name()));
    }

    let normalize_from = match section.mode() {
        SectionMode::Raw { since } if include_raw => Some(since),
        _ => None,
    };

    for (index, entry) in section.entries().iter().enumerate() {
        match entry {
            SectionEntry::Option(option) => out.line(option.to_line()),
            SectionEntry::Comment(comment) => out.comment(comment),
            SectionEntry::Raw(line) => match normalize_from {
                Some(since) if index >= since => out.line(normalize_raw_line(line)),
                _ => out.line(line.as_str()),
            },
        }
    }

    out.finish()
}

fn normalize_raw_line(line: &str) -> String {
    let lr = LineRef {
        number: 0,
        text: line,
    };
    match IniLineClassifier.classify(&lr) {
        Ok(LineClass::Option {
            key,
            value,
            inline_comment,
        }) => IniOption::new(key, value)
            .with_inline_comment(inline_comment.as_deref())
            .to_line(),
        Ok(LineClass::Comment(text)) => text,
        _ => line.to_string(),
    }
}
