pub mod document;
pub mod error;
pub mod io;
pub mod models;
pub mod options;
pub mod parsing;
pub mod records;
mod serialize;

// Re-export key types for easier usage
pub use document::{Document, DocumentItem};
pub use error::{NotFoundError, ParseError, PolicyError};
pub use io::*;
pub use models::*;
pub use options::ParserOptions;
pub use records::{OptionRecord, SectionRecord};
