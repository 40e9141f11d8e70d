use crate::error::{NotFoundError, ParseError, PolicyError};
use crate::models::{Comment, DEFAULT_HIDDEN_NAME, Group, IniOption, Section};
use crate::options::ParserOptions;
use crate::parsing::{
    builder::DocumentBuilder,
    lines::{LineRef, normalize_line_endings, strip_line_ending},
};

/// A top-level slot of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentItem {
    Section(Section),
    Group(Group),
    Comment(Comment),
}

/// Where a named section lives: directly in the document or inside a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SectionSlot {
    TopLevel(usize),
    InGroup(usize, usize),
}

/// An override ini file: sections, groups and free comments in file order.
///
/// The document exclusively owns everything in it. Parsing and serialization are
/// synchronous passes over in-memory text; reading and writing files is left to the
/// caller (see [`crate::io`]).
///
/// ```rust
/// use modini_engine::{Document, ParserOptions};
///
/// let mut doc = Document::parse(
///     "[TextureOverrideBody]\nhash = d0c2d4d5\n",
///     ParserOptions::default(),
/// ).unwrap();
///
/// doc.add_option("TextureOverrideBody", "match_priority", "0", None).unwrap();
/// assert_eq!(
///     doc.serialize(false),
///     "[TextureOverrideBody]\nhash = d0c2d4d5\nmatch_priority = 0\n"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub(crate) items: Vec<DocumentItem>,
    pub(crate) options: ParserOptions,
}

impl Document {
    pub fn new(options: ParserOptions) -> Self {
        Self {
            items: Vec::new(),
            options,
        }
    }

    /// Creates a document from the full text of a file.
    pub fn parse(text: &str, options: ParserOptions) -> Result<Self, ParseError> {
        let mut document = Self::new(options);
        document.read_str(text)?;
        Ok(document)
    }

    pub fn options(&self) -> ParserOptions {
        self.options
    }

    pub fn items(&self) -> &[DocumentItem] {
        &self.items
    }

    /// Feeds lines into the document.
    ///
    /// Lines may still carry their terminators. On a fatal error the document is left
    /// exactly as it was before the call.
    pub fn read<I, S>(&mut self, lines: I) -> Result<(), ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let backup = self.items.clone();
        let result = self.read_lines(lines);
        if result.is_err() {
            self.items = backup;
        }
        result
    }

    /// Like [`Document::read`], for a whole text with any mix of line endings.
    pub fn read_str(&mut self, text: &str) -> Result<(), ParseError> {
        let text = normalize_line_endings(text);
        self.read(text.lines())
    }

    fn read_lines<I, S>(&mut self, lines: I) -> Result<(), ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = DocumentBuilder::new(self);
        for (index, line) in lines.into_iter().enumerate() {
            let lr = LineRef {
                number: index + 1,
                text: strip_line_ending(line.as_ref()),
            };
            builder.push(&lr)?;
        }
        builder.finish();
        Ok(())
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.locate(name).is_some()
    }

    /// `false` when either the section or the option is missing.
    pub fn has_option(&self, section: &str, option: &str) -> bool {
        self.get_section(section)
            .is_ok_and(|section| section.has_option(option))
    }

    pub fn get_section(&self, name: &str) -> Result<&Section, NotFoundError> {
        self.locate(name)
            .map(|slot| self.section_at(slot))
            .ok_or_else(|| NotFoundError::Section(name.to_string()))
    }

    pub fn get_section_mut(&mut self, name: &str) -> Result<&mut Section, NotFoundError> {
        match self.locate(name) {
            Some(slot) => Ok(self.section_at_mut(slot)),
            None => Err(NotFoundError::Section(name.to_string())),
        }
    }

    pub fn get_option(&self, section: &str, option: &str) -> Result<&IniOption, NotFoundError> {
        self.get_section(section)?.get_option(option)
    }

    /// Value of `option` in `section`.
    pub fn get(&self, section: &str, option: &str) -> Result<&str, NotFoundError> {
        self.get_section(section)?.get(option)
    }

    /// Returns the section with this name, appending a new one if there is none.
    pub fn add_section(&mut self, name: &str) -> &mut Section {
        let slot = match self.locate(name) {
            Some(slot) => slot,
            None => {
                self.items.push(DocumentItem::Section(Section::new(name)));
                SectionSlot::TopLevel(self.items.len() - 1)
            }
        };
        self.section_at_mut(slot)
    }

    /// Appends a prepared section. Unlike [`Document::add_section`] an existing name is an
    /// error rather than a lookup.
    pub fn insert_section(&mut self, section: Section) -> Result<&mut Section, PolicyError> {
        if self.name_in_use(section.name()) {
            return Err(PolicyError::NameCollision(section.name().to_string()));
        }
        self.items.push(DocumentItem::Section(section));
        let slot = SectionSlot::TopLevel(self.items.len() - 1);
        Ok(self.section_at_mut(slot))
    }

    pub fn remove_section(&mut self, name: &str) -> Result<Section, NotFoundError> {
        match self.locate(name) {
            Some(SectionSlot::TopLevel(index)) => match self.items.remove(index) {
                DocumentItem::Section(section) => Ok(section),
                _ => Err(NotFoundError::Section(name.to_string())),
            },
            Some(SectionSlot::InGroup(group, _)) => match &mut self.items[group] {
                DocumentItem::Group(group) => group.remove_section(name),
                _ => Err(NotFoundError::Section(name.to_string())),
            },
            None => Err(NotFoundError::Section(name.to_string())),
        }
    }

    /// Sets `key = value` in `section`, replacing an option of the same name in place.
    pub fn add_option(
        &mut self,
        section: &str,
        key: &str,
        value: &str,
        comment: Option<&str>,
    ) -> Result<(), NotFoundError> {
        let option = IniOption::new(key, value).with_inline_comment(comment);
        self.get_section_mut(section)?.add_option(option);
        Ok(())
    }

    pub fn remove_option(&mut self, section: &str, option: &str) -> Result<IniOption, NotFoundError> {
        self.get_section_mut(section)?.remove_option(option)
    }

    /// Adds a comment at the end of the document, or at the end of `section`.
    pub fn add_comment(
        &mut self,
        text: &str,
        section: Option<&str>,
        leading_blank: bool,
        trailing_blank: bool,
    ) -> Result<(), NotFoundError> {
        let comment = Comment::new(text)
            .with_leading_blank(leading_blank)
            .with_trailing_blank(trailing_blank);

        match section {
            Some(name) => self.get_section_mut(name)?.add_comment(comment),
            None => self.items.push(DocumentItem::Comment(comment)),
        }
        Ok(())
    }

    /// Creates the single headerless section, named [`DEFAULT_HIDDEN_NAME`] unless a name
    /// is given.
    /// Creates the headerless section. It is placed ahead of every section and group,
    /// after any leading comments, since its options only read back while no header has
    /// been seen.
    pub fn add_hidden_section(&mut self, name: Option<&str>) -> Result<&mut Section, PolicyError> {
        let name = name.unwrap_or(DEFAULT_HIDDEN_NAME);

        if self.hidden_index().is_some() {
            return Err(PolicyError::MultipleHiddenSections(name.to_string()));
        }
        if !self.options.allow_headerless_section {
            return Err(PolicyError::HiddenSectionNotAllowed(name.to_string()));
        }
        if self.name_in_use(name) {
            return Err(PolicyError::NameCollision(name.to_string()));
        }

        log::debug!("Creating hidden section {name:?}");
        let index = self.first_section_item();
        self.items
            .insert(index, DocumentItem::Section(Section::new_hidden(name)));
        Ok(self.section_at_mut(SectionSlot::TopLevel(index)))
    }

    pub fn hidden_section(&self) -> Option<&Section> {
        self.hidden_index().map(|index| self.section_at(SectionSlot::TopLevel(index)))
    }

    /// Returns the group with this label, creating it if needed.
    pub fn add_group(&mut self, label: &str, suppress_header: bool) -> Result<&mut Group, PolicyError> {
        if self.has_section(label) {
            return Err(PolicyError::NameCollision(label.to_string()));
        }

        let index = match self.group_index(label) {
            Some(index) => index,
            None => {
                self.items
                    .push(DocumentItem::Group(Group::new(label, suppress_header)));
                self.items.len() - 1
            }
        };

        match &mut self.items[index] {
            DocumentItem::Group(group) => Ok(group),
            _ => unreachable!("group index always points at a group"),
        }
    }

    /// Returns the section `name` inside the group `label`, creating the group and the
    /// section as needed. A name already taken by another section or group is rejected.
    pub fn add_section_to_group(
        &mut self,
        label: &str,
        name: &str,
    ) -> Result<&mut Section, PolicyError> {
        let in_group = self
            .get_group(label)
            .is_ok_and(|group| group.has_section(name));
        if !in_group && (self.name_in_use(name) || name == label) {
            return Err(PolicyError::NameCollision(name.to_string()));
        }

        Ok(self.add_group(label, false)?.add_section(name))
    }

    pub fn get_group(&self, label: &str) -> Result<&Group, NotFoundError> {
        self.items
            .iter()
            .find_map(|item| match item {
                DocumentItem::Group(group) if group.label() == label => Some(group),
                _ => None,
            })
            .ok_or_else(|| NotFoundError::Section(label.to_string()))
    }

    pub fn get_group_mut(&mut self, label: &str) -> Result<&mut Group, NotFoundError> {
        self.items
            .iter_mut()
            .find_map(|item| match item {
                DocumentItem::Group(group) if group.label() == label => Some(group),
                _ => None,
            })
            .ok_or_else(|| NotFoundError::Section(label.to_string()))
    }

    pub fn remove_group(&mut self, label: &str) -> Result<Group, NotFoundError> {
        match self.group_index(label) {
            Some(index) => match self.items.remove(index) {
                DocumentItem::Group(group) => Ok(group),
                _ => Err(NotFoundError::Section(label.to_string())),
            },
            None => Err(NotFoundError::Section(label.to_string())),
        }
    }

    pub fn group_labels(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter_map(|item| match item {
                DocumentItem::Group(group) => Some(group.label()),
                _ => None,
            })
            .collect()
    }

    /// All sections in document order, descending into groups.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.items.iter().flat_map(|item| {
            let sections: &[Section] = match item {
                DocumentItem::Section(section) => std::slice::from_ref(section),
                DocumentItem::Group(group) => group.sections(),
                DocumentItem::Comment(_) => &[],
            };
            sections.iter()
        })
    }

    pub fn section_names(&self) -> Vec<&str> {
        self.sections().map(Section::name).collect()
    }

    /// Drops sections without entries, including those inside groups. Comments and groups
    /// themselves are kept.
    pub fn remove_empty_sections(&mut self) {
        self.items.retain_mut(|item| match item {
            DocumentItem::Section(section) => !section.is_empty(),
            DocumentItem::Group(group) => {
                group.remove_empty_sections();
                true
            }
            DocumentItem::Comment(_) => true,
        });
    }

    pub(crate) fn locate(&self, name: &str) -> Option<SectionSlot> {
        self.items
            .iter()
            .enumerate()
            .find_map(|(index, item)| match item {
                DocumentItem::Section(section) if section.name() == name => {
                    Some(SectionSlot::TopLevel(index))
                }
                DocumentItem::Group(group) => group
                    .sections()
                    .iter()
                    .position(|section| section.name() == name)
                    .map(|inner| SectionSlot::InGroup(index, inner)),
                _ => None,
            })
    }

    pub(crate) fn section_at(&self, slot: SectionSlot) -> &Section {
        match (slot, &self.items[slot_item(slot)]) {
            (SectionSlot::TopLevel(_), DocumentItem::Section(section)) => section,
            (SectionSlot::InGroup(_, inner), DocumentItem::Group(group)) => &group.sections()[inner],
            _ => unreachable!("section slot points at a section"),
        }
    }

    pub(crate) fn section_at_mut(&mut self, slot: SectionSlot) -> &mut Section {
        match (slot, &mut self.items[slot_item(slot)]) {
            (SectionSlot::TopLevel(_), DocumentItem::Section(section)) => section,
            (SectionSlot::InGroup(_, inner), DocumentItem::Group(group)) => {
                group.section_at_mut(inner)
            }
            _ => unreachable!("section slot points at a section"),
        }
    }

    pub(crate) fn hidden_index(&self) -> Option<usize> {
        self.items.iter().position(|item| {
            matches!(item, DocumentItem::Section(section) if section.is_hidden())
        })
    }

    fn first_section_item(&self) -> usize {
        self.items
            .iter()
            .position(|item| !matches!(item, DocumentItem::Comment(_)))
            .unwrap_or(self.items.len())
    }

    fn group_index(&self, label: &str) -> Option<usize> {
        self.items.iter().position(|item| {
            matches!(item, DocumentItem::Group(group) if group.label() == label)
        })
    }

    fn name_in_use(&self, name: &str) -> bool {
        self.has_section(name) || self.group_index(name).is_some()
    }
}

fn slot_item(slot: SectionSlot) -> usize {
    match slot {
        SectionSlot::TopLevel(index) | SectionSlot::InGroup(index, _) => index,
    }
}
