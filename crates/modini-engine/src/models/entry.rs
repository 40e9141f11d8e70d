use super::{comment::Comment, option::IniOption};

/// One positional slot inside a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionEntry {
    Option(IniOption),
    Comment(Comment),
    /// A line kept byte-for-byte, e.g. the body of a command list.
    Raw(String),
}

impl SectionEntry {
    pub fn as_option(&self) -> Option<&IniOption> {
        match self {
            SectionEntry::Option(option) => Some(option),
            _ => None,
        }
    }

    pub fn as_option_mut(&mut self) -> Option<&mut IniOption> {
        match self {
            SectionEntry::Option(option) => Some(option),
            _ => None,
        }
    }

    pub fn as_comment(&self) -> Option<&Comment> {
        match self {
            SectionEntry::Comment(comment) => Some(comment),
            _ => None,
        }
    }

    /// Lookup name of the entry, if it can be addressed by one.
    pub fn name(&self) -> Option<&str> {
        self.as_option().and_then(IniOption::name)
    }
}

impl From<IniOption> for SectionEntry {
    fn from(option: IniOption) -> Self {
        SectionEntry::Option(option)
    }
}

impl From<Comment> for SectionEntry {
    fn from(comment: Comment) -> Self {
        SectionEntry::Comment(comment)
    }
}
