use serde::Serialize;

use crate::error::NotFoundError;

use super::{comment::Comment, entry::SectionEntry, option::IniOption};

/// Name given to the section that holds options found before any header.
pub const DEFAULT_HIDDEN_NAME: &str = "HiddenProperties";

/// Sections whose name contains this (case-insensitively) are kept verbatim from the start.
const RAW_NAME_MARKER: &str = "command";

/// How a section's lines are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionMode {
    /// Lines are parsed into options and comments.
    Structured,
    /// Entries from index `since` onwards were captured verbatim and are never re-parsed
    /// until the mode is reset.
    Raw { since: usize },
}

/// Known header families of override files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SectionKind {
    TextureOverride,
    ShaderOverride,
    Resource,
    Constants,
    Present,
    CommandList,
    CustomShader,
    Other,
}

const KIND_PREFIXES: [(&str, SectionKind); 7] = [
    ("TextureOverride", SectionKind::TextureOverride),
    ("ShaderOverride", SectionKind::ShaderOverride),
    ("Resource", SectionKind::Resource),
    ("Constants", SectionKind::Constants),
    ("Present", SectionKind::Present),
    ("CommandList", SectionKind::CommandList),
    ("CustomShader", SectionKind::CustomShader),
];

impl SectionKind {
    /// Splits a header name into its family and the remaining suffix.
    ///
    /// `TextureOverrideBody` gives `(TextureOverride, Some("Body"))`; unknown names give
    /// `(Other, None)`.
    pub fn classify(name: &str) -> (SectionKind, Option<&str>) {
        for (prefix, kind) in KIND_PREFIXES {
            if let Some(head) = name.get(..prefix.len())
                && head.eq_ignore_ascii_case(prefix)
            {
                let suffix = &name[prefix.len()..];
                return (kind, (!suffix.is_empty()).then_some(suffix));
            }
        }
        (SectionKind::Other, None)
    }
}

/// A `[name]` block and everything up to the next header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    mode: SectionMode,
    hidden: bool,
    entries: Vec<SectionEntry>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let mode = if name.to_lowercase().contains(RAW_NAME_MARKER) {
            SectionMode::Raw { since: 0 }
        } else {
            SectionMode::Structured
        };

        Self {
            name,
            mode,
            hidden: false,
            entries: Vec::new(),
        }
    }

    /// The headerless section. Only the document creates these, so it can enforce there is
    /// at most one.
    pub(crate) fn new_hidden(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mode: SectionMode::Structured,
            hidden: true,
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> SectionMode {
        self.mode
    }

    pub fn is_raw(&self) -> bool {
        matches!(self.mode, SectionMode::Raw { .. })
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn kind(&self) -> (SectionKind, Option<&str>) {
        SectionKind::classify(&self.name)
    }

    /// Stops parsing: everything added from now on is kept verbatim.
    pub fn mark_raw(&mut self) {
        if !self.is_raw() {
            self.mode = SectionMode::Raw {
                since: self.entries.len(),
            };
        }
    }

    /// Back to structured parsing. Entries already captured stay as they are.
    pub fn reset_mode(&mut self) {
        self.mode = SectionMode::Structured;
    }

    pub fn entries(&self) -> &[SectionEntry] {
        &self.entries
    }

    /// Keyed options in insertion order, anonymous values excluded.
    pub fn options(&self) -> impl Iterator<Item = &IniOption> {
        self.entries
            .iter()
            .filter_map(SectionEntry::as_option)
            .filter(|option| !option.is_anonymous())
    }

    pub fn option_names(&self) -> Vec<&str> {
        self.entries.iter().filter_map(SectionEntry::name).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn has_option(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn get_option(&self, name: &str) -> Result<&IniOption, NotFoundError> {
        self.position(name)
            .and_then(|index| self.entries[index].as_option())
            .ok_or_else(|| NotFoundError::option(&self.name, name))
    }

    pub fn get_option_mut(&mut self, name: &str) -> Result<&mut IniOption, NotFoundError> {
        match self.position(name) {
            Some(index) => self.entries[index]
                .as_option_mut()
                .ok_or_else(|| NotFoundError::option(&self.name, name)),
            None => Err(NotFoundError::option(&self.name, name)),
        }
    }

    /// Value of the option looked up by name.
    pub fn get(&self, name: &str) -> Result<&str, NotFoundError> {
        self.get_option(name).map(IniOption::value)
    }

    /// Adds an option, replacing in place any option with the same lookup name.
    pub fn add_option(&mut self, option: IniOption) {
        let existing = option.name().and_then(|name| self.position(name));
        match existing {
            Some(index) => self.entries[index] = SectionEntry::Option(option),
            None => self.entries.push(SectionEntry::Option(option)),
        }
    }

    /// Appends without looking for an existing option of the same name.
    pub(crate) fn push_option(&mut self, option: IniOption) {
        self.entries.push(SectionEntry::Option(option));
    }

    pub fn add_comment(&mut self, comment: Comment) {
        self.entries.push(SectionEntry::Comment(comment));
    }

    pub fn push_raw(&mut self, line: impl Into<String>) {
        self.entries.push(SectionEntry::Raw(line.into()));
    }

    pub fn remove_option(&mut self, name: &str) -> Result<IniOption, NotFoundError> {
        let index = self
            .position(name)
            .ok_or_else(|| NotFoundError::option(&self.name, name))?;

        if let SectionMode::Raw { since } = &mut self.mode
            && index < *since
        {
            *since -= 1;
        }

        match self.entries.remove(index) {
            SectionEntry::Option(option) => Ok(option),
            _ => Err(NotFoundError::option(&self.name, name)),
        }
    }

    /// Lookup name for another occurrence of `key`: `key#2`, `key#3`, ...
    pub(crate) fn next_display_name(&self, key: &str) -> String {
        let mut n = 2;
        loop {
            let candidate = format!("{key}#{n}");
            if !self.has_option(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.name() == Some(name))
    }
}
