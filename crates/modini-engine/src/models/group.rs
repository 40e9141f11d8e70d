use crate::error::NotFoundError;

use super::{comment::Comment, section::Section};

/// Related sections written together under a shared comment header.
///
/// Groups only affect layout; their sections are still addressed by name through the
/// document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    label: String,
    header: Comment,
    suppress_header: bool,
    sections: Vec<Section>,
}

impl Group {
    pub fn new(label: impl Into<String>, suppress_header: bool) -> Self {
        let label = label.into();
        let header = Comment::new(&label);
        Self {
            label,
            header,
            suppress_header,
            sections: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn header(&self) -> &Comment {
        &self.header
    }

    pub fn suppress_header(&self) -> bool {
        self.suppress_header
    }

    pub fn set_suppress_header(&mut self, suppress_header: bool) {
        self.suppress_header = suppress_header;
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section_names(&self) -> Vec<&str> {
        self.sections.iter().map(Section::name).collect()
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Returns the section with this name, creating it at the end if needed. Callers go
    /// through [`crate::Document::add_section_to_group`], which checks the name against
    /// the whole document.
    pub(crate) fn add_section(&mut self, name: &str) -> &mut Section {
        let index = match self.position(name) {
            Some(index) => index,
            None => {
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        };
        &mut self.sections[index]
    }

    pub fn get_section(&self, name: &str) -> Result<&Section, NotFoundError> {
        self.sections
            .iter()
            .find(|section| section.name() == name)
            .ok_or_else(|| NotFoundError::Section(name.to_string()))
    }

    pub fn get_section_mut(&mut self, name: &str) -> Result<&mut Section, NotFoundError> {
        self.sections
            .iter_mut()
            .find(|section| section.name() == name)
            .ok_or_else(|| NotFoundError::Section(name.to_string()))
    }

    pub fn remove_section(&mut self, name: &str) -> Result<Section, NotFoundError> {
        let index = self
            .position(name)
            .ok_or_else(|| NotFoundError::Section(name.to_string()))?;
        Ok(self.sections.remove(index))
    }

    pub(crate) fn section_at_mut(&mut self, index: usize) -> &mut Section {
        &mut self.sections[index]
    }

    pub fn remove_empty_sections(&mut self) {
        self.sections.retain(|section| !section.is_empty());
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.sections.iter().position(|section| section.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_is_rendered_as_comment() {
        let group = Group::new("Body parts", false);
        assert_eq!(group.label(), "Body parts");
        assert_eq!(group.header().text(), "; Body parts");
    }

    #[test]
    fn add_section_is_get_or_create() {
        let mut group = Group::new("Body", false);
        group.add_section("TextureOverrideBody");
        group.add_section("TextureOverrideBody");
        group.add_section("ResourceBody");

        assert_eq!(
            group.section_names(),
            vec!["TextureOverrideBody", "ResourceBody"]
        );
    }

    #[test]
    fn remove_missing_section_errors() {
        let mut group = Group::new("Body", true);
        assert_eq!(
            group.remove_section("Nope"),
            Err(NotFoundError::Section("Nope".to_string()))
        );
    }

    #[test]
    fn remove_empty_sections_keeps_filled_ones() {
        let mut group = Group::new("Body", false);
        group.add_section("Empty");
        group
            .add_section("Filled")
            .add_comment(Comment::new("keep me"));

        group.remove_empty_sections();
        assert_eq!(group.section_names(), vec!["Filled"]);
    }
}
