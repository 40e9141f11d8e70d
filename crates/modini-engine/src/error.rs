use thiserror::Error;

/// Structural violation found while reading a document. Any of these aborts the whole read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Line {line_number} is both a section header and an option: {line:?}")]
    AmbiguousLine { line_number: usize, line: String },

    #[error("Line {line_number} appears outside of any section header: {line:?}")]
    OptionOutsideSection { line_number: usize, line: String },

    #[error(transparent)]
    Policy(#[from] PolicyError),
}

/// A lookup or removal named something the document doesn't have.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFoundError {
    #[error("Section {0:?} does not exist")]
    Section(String),

    #[error("Option {option:?} does not exist in section {section:?}")]
    Option { section: String, option: String },
}

/// Document-wide invariants around hidden sections and name uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("Cannot create hidden section {0:?} because a hidden section already exists")]
    MultipleHiddenSections(String),

    #[error("Cannot create hidden section {0:?} because headerless sections are not allowed")]
    HiddenSectionNotAllowed(String),

    #[error("Name {0:?} is already used by another section or group")]
    NameCollision(String),
}

impl NotFoundError {
    pub(crate) fn option(section: &str, option: &str) -> Self {
        Self::Option {
            section: section.to_string(),
            option: option.to_string(),
        }
    }
}
