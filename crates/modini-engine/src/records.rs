use serde::Serialize;

use crate::document::Document;
use crate::models::{Section, SectionKind};

/// Flat, serializable view of a section: its name, header family and keyed options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionRecord {
    pub section: String,
    pub kind: SectionKind,
    pub suffix: Option<String>,
    pub options: Vec<OptionRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionRecord {
    pub key: String,
    pub value: String,
}

impl From<&Section> for SectionRecord {
    fn from(section: &Section) -> Self {
        let (kind, suffix) = section.kind();
        let options = section
            .options()
            .filter_map(|option| {
                option.key().map(|key| OptionRecord {
                    key: key.to_string(),
                    value: option.value().to_string(),
                })
            })
            .collect();

        Self {
            section: section.name().to_string(),
            kind,
            suffix: suffix.map(str::to_string),
            options,
        }
    }
}

impl Document {
    /// One record per section in document order, groups flattened. Comments and raw lines
    /// are left out.
    pub fn records(&self) -> Vec<SectionRecord> {
        self.sections().map(SectionRecord::from).collect()
    }
}
