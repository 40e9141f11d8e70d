use crate::document::Document;
use crate::error::ParseError;
use crate::options::ParserOptions;
use std::fs;
use std::path::{Path, PathBuf};

const BOM: char = '\u{feff}';

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

/// Reads a file as text, dropping a leading UTF-8 byte order mark if present.
///
/// Override files are often saved by Windows editors that add one.
pub fn read_to_string_without_bom(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    Ok(match content.strip_prefix(BOM) {
        Some(stripped) => stripped.to_string(),
        None => content,
    })
}

/// Read and parse an ini file
pub fn read_document(path: &Path, options: ParserOptions) -> Result<Document, IoError> {
    let content = read_to_string_without_bom(path)?;
    Document::parse(&content, options).map_err(|source| IoError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize a document to `path`, creating parent directories as needed
pub fn write_document(path: &Path, document: &Document, include_raw: bool) -> Result<(), IoError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, document.serialize(include_raw))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_fixture(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_read_strips_bom() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, "mod.ini", b"\xEF\xBB\xBF[Constants]\r\nx = 1\r\n");

        let doc = read_document(&path, ParserOptions::default()).unwrap();

        assert_eq!(doc.section_names(), vec!["Constants"]);
        assert_eq!(doc.serialize(false), "[Constants]\nx = 1\n");
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.ini");

        let result = read_document(&path, ParserOptions::default());

        assert!(matches!(result, Err(IoError::NotFound(p)) if p == path));
    }

    #[test]
    fn test_parse_error_names_file() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, "broken.ini", b"orphan = 1\n");

        let err = read_document(&path, ParserOptions::default()).unwrap_err();

        match err {
            IoError::Parse { path: p, source } => {
                assert_eq!(p, path);
                assert_eq!(
                    source,
                    ParseError::OptionOutsideSection {
                        line_number: 1,
                        line: "orphan = 1".to_string(),
                    }
                );
            }
            other => panic!("Expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Mods").join("Body").join("mod.ini");
        let mut doc = Document::default();
        doc.add_section("Present");

        write_document(&path, &doc, false).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[Present]\n");
    }
}
