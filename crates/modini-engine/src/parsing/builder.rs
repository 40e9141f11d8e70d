use crate::document::{Document, DocumentItem, SectionSlot};
use crate::error::ParseError;
use crate::models::{Comment, IniOption, Section};

use super::{
    classify::{IniLineClassifier, LineClass},
    lines::LineRef,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Before the first header.
    NoOpenSection,
    InSection(usize),
    /// Lines are stored verbatim until the next header.
    InRawSection(usize),
    /// Inside a repeated header; everything up to the next header is dropped.
    Discarding,
}

/// Feeds classified lines into a [`Document`].
///
/// Sections opened here are always top-level items, so the state tracks plain item
/// indices.
pub struct DocumentBuilder<'d> {
    doc: &'d mut Document,
    classifier: IniLineClassifier,
    state: ParseState,
    after_blank: bool,
}

impl<'d> DocumentBuilder<'d> {
    pub fn new(doc: &'d mut Document) -> Self {
        Self {
            doc,
            classifier: IniLineClassifier,
            state: ParseState::NoOpenSection,
            after_blank: false,
        }
    }

    pub fn push(&mut self, lr: &LineRef) -> Result<(), ParseError> {
        match self.classifier.classify(lr)? {
            LineClass::Blank => {
                self.after_blank = true;
                return Ok(());
            }
            LineClass::Comment(text) => self.push_comment(lr, &text),
            LineClass::SectionHeader(name) => self.open_section(lr, name),
            LineClass::Option {
                key,
                value,
                inline_comment,
            } => self.push_option(lr, &key, &value, inline_comment.as_deref())?,
            LineClass::Unparsable(text) => self.push_unparsable(lr, text)?,
        }

        self.after_blank = false;
        Ok(())
    }

    pub fn finish(self) {
        if self.state == ParseState::Discarding {
            log::debug!("Input ended inside a discarded duplicate section");
        }
    }

    fn push_comment(&mut self, lr: &LineRef, text: &str) {
        match self.state {
            ParseState::NoOpenSection | ParseState::Discarding => self.push_document_comment(text),
            ParseState::InSection(index) => {
                let comment = Comment::new(text).with_leading_blank(self.after_blank);
                self.section(index).add_comment(comment);
            }
            ParseState::InRawSection(index) => {
                let after_blank = self.after_blank;
                let section = self.section(index);
                if after_blank {
                    section.push_raw("");
                }
                section.push_raw(lr.text);
            }
        }
    }

    /// Comments outside any section, including those under a discarded duplicate header,
    /// belong to the document.
    fn push_document_comment(&mut self, text: &str) {
        // A blank line only separates document comments from each other.
        let follows_comment = matches!(self.doc.items.last(), Some(DocumentItem::Comment(_)));
        let comment = Comment::new(text).with_leading_blank(self.after_blank && follows_comment);
        self.doc.items.push(DocumentItem::Comment(comment));
    }

    fn open_section(&mut self, lr: &LineRef, name: String) {
        if self.doc.has_section(&name) {
            log::warn!(
                "Line {}: section [{name}] already exists, ignoring until the next header",
                lr.number
            );
            self.state = ParseState::Discarding;
            return;
        }

        let section = Section::new(name);
        let raw = section.is_raw();
        self.doc.items.push(DocumentItem::Section(section));
        let index = self.doc.items.len() - 1;

        self.state = if raw {
            ParseState::InRawSection(index)
        } else {
            ParseState::InSection(index)
        };
    }

    fn push_option(
        &mut self,
        lr: &LineRef,
        key: &str,
        value: &str,
        inline_comment: Option<&str>,
    ) -> Result<(), ParseError> {
        let index = match self.state {
            ParseState::InSection(index) => index,
            ParseState::InRawSection(index) => {
                self.section(index).push_raw(lr.text);
                return Ok(());
            }
            ParseState::Discarding => return Ok(()),
            ParseState::NoOpenSection => self.hidden_section(lr)?,
        };

        let restrict = self.doc.options.restrict_duplicates;
        let option = IniOption::new(key, value).with_inline_comment(inline_comment);
        let section = self.section(index);

        let same_value = section.get_option(key).ok().map(|existing| existing.value() == value);
        match same_value {
            None => section.push_option(option),
            Some(_) if restrict => {
                log::debug!("Line {}: dropping repeated option {key:?}", lr.number);
            }
            Some(true) => {
                log::debug!("Line {}: dropping identical repeat of {key:?}", lr.number);
            }
            Some(false) => {
                let name = section.next_display_name(key);
                log::debug!("Line {}: keeping repeated option {key:?} as {name:?}", lr.number);
                section.push_option(option.with_display_name(name));
            }
        }
        Ok(())
    }

    /// The first unparsable line of a normal section switches it to raw mode. The hidden
    /// section just keeps the line and stays structured.
    fn push_unparsable(&mut self, lr: &LineRef, text: String) -> Result<(), ParseError> {
        match self.state {
            ParseState::InSection(index) => {
                log::debug!("Line {}: switching section to raw mode", lr.number);
                let section = self.section(index);
                section.mark_raw();
                section.push_raw(text);
                self.state = ParseState::InRawSection(index);
            }
            ParseState::InRawSection(index) => self.section(index).push_raw(text),
            ParseState::Discarding => {}
            ParseState::NoOpenSection => {
                let index = self.hidden_section(lr)?;
                self.section(index).push_raw(text);
            }
        }
        Ok(())
    }

    fn hidden_section(&mut self, lr: &LineRef) -> Result<usize, ParseError> {
        if let Some(index) = self.doc.hidden_index() {
            return Ok(index);
        }

        if !self.doc.options.allow_headerless_section {
            return Err(ParseError::OptionOutsideSection {
                line_number: lr.number,
                line: lr.text.to_string(),
            });
        }

        self.doc.add_hidden_section(None)?;
        self.doc
            .hidden_index()
            .ok_or_else(|| ParseError::OptionOutsideSection {
                line_number: lr.number,
                line: lr.text.to_string(),
            })
    }

    fn section(&mut self, index: usize) -> &mut Section {
        self.doc.section_at_mut(SectionSlot::TopLevel(index))
    }
}
