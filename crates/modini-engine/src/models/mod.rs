pub mod comment;
pub mod entry;
pub mod group;
pub mod option;
pub mod section;

pub use comment::Comment;
pub use entry::SectionEntry;
pub use group::Group;
pub use option::IniOption;
pub use section::{DEFAULT_HIDDEN_NAME, Section, SectionKind, SectionMode};
