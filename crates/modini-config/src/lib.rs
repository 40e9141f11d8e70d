use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid mod folder pattern {pattern}: {source}")]
    InvalidModFolder {
        pattern: String,
        source: glob::PatternError,
    },
}

/// Parser flags applied to every file the tools open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSettings {
    pub restrict_duplicates: bool,
    pub allow_headerless_section: bool,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            restrict_duplicates: true,
            allow_headerless_section: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub mod_folder: PathBuf,
    /// Files whose path below the mod folder contains any of these are left alone.
    #[serde(default = "default_skip_patterns")]
    pub skip_patterns: Vec<String>,
    #[serde(default)]
    pub parser: ParserSettings,
}

fn default_skip_patterns() -> Vec<String> {
    vec!["DISABLED".to_string(), "merged".to_string()]
}

impl Config {
    pub fn new(mod_folder: impl Into<PathBuf>) -> Self {
        Self {
            mod_folder: mod_folder.into(),
            parser: ParserSettings::default(),
            skip_patterns: default_skip_patterns(),
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded mod folder
        config.mod_folder = Self::expand_path(&config.mod_folder).unwrap_or(config.mod_folder);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/modini");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Whether `path` matches one of the skip patterns. Only the part below the mod
    /// folder is considered.
    pub fn is_skipped(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.mod_folder).unwrap_or(path);
        let relative = relative.to_string_lossy();
        self.skip_patterns
            .iter()
            .any(|pattern| relative.contains(pattern.as_str()))
    }

    /// Every `.ini` file below the mod folder that is not skipped, sorted.
    pub fn ini_files(&self) -> Result<Vec<PathBuf>, ConfigError> {
        ini_files_in(&self.mod_folder, |path| self.is_skipped(path))
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

/// Recursively lists `.ini` files below `root` (extension matched case-insensitively),
/// leaving out those for which `skip` returns true.
pub fn ini_files_in(
    root: &Path,
    skip: impl Fn(&Path) -> bool,
) -> Result<Vec<PathBuf>, ConfigError> {
    let escaped = glob::Pattern::escape(&root.to_string_lossy());
    let pattern = format!("{escaped}/**/*.ini");
    let options = glob::MatchOptions {
        case_sensitive: false,
        ..Default::default()
    };

    let entries = glob::glob_with(&pattern, options).map_err(|source| {
        ConfigError::InvalidModFolder {
            pattern: pattern.clone(),
            source,
        }
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .filter(|path| path.is_file() && !skip(path))
        .collect();
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "[Constants]\n").unwrap();
    }

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        // Should not contain tilde anymore
        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/modini/config.toml"));
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: Config = toml::from_str(r#"mod_folder = "/games/Mods""#).unwrap();

        assert_eq!(config.parser, ParserSettings::default());
        assert_eq!(config.skip_patterns, vec!["DISABLED", "merged"]);
    }

    #[test]
    fn test_partial_parser_section() {
        let config: Config = toml::from_str(
            r#"
mod_folder = "/games/Mods"
skip_patterns = []

[parser]
allow_headerless_section = true
"#,
        )
        .unwrap();

        assert!(config.parser.restrict_duplicates);
        assert!(config.parser.allow_headerless_section);
        assert!(config.skip_patterns.is_empty());
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("MODINI_TEST_MODS", "/test/env/mods");
        }

        let path = PathBuf::from("$MODINI_TEST_MODS/Characters");
        let expanded = Config::expand_path(&path).unwrap();
        assert_eq!(expanded, PathBuf::from("/test/env/mods/Characters"));

        unsafe {
            env::remove_var("MODINI_TEST_MODS");
        }
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = Config::expand_path(Path::new("~/Mods")).unwrap();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().ends_with("Mods"));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        fs::write(&config_file, "mod_folder = ").unwrap();

        let result = Config::load_from_path(&config_file);

        assert!(matches!(result, Err(ConfigError::ConfigParseError { .. })));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let mut test_config = Config::new("/tmp/test-mods");
        test_config.parser.restrict_duplicates = false;

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_ini_files_skips_patterns() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "Body/body.ini");
        touch(temp_dir.path(), "Hair/HAIR.INI");
        touch(temp_dir.path(), "DISABLED_Old/old.ini");
        touch(temp_dir.path(), "Body/merged.ini");
        touch(temp_dir.path(), "Body/readme.txt");

        let config = Config::new(temp_dir.path());
        let files = config.ini_files().unwrap();

        let names: Vec<_> = files
            .iter()
            .map(|f| f.strip_prefix(temp_dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![PathBuf::from("Body/body.ini"), PathBuf::from("Hair/HAIR.INI")]
        );
    }

    #[test]
    fn test_skip_only_looks_below_mod_folder() {
        let config = Config::new("/games/merged/Mods");
        assert!(!config.is_skipped(Path::new("/games/merged/Mods/Body/body.ini")));
        assert!(config.is_skipped(Path::new("/games/merged/Mods/DISABLED/body.ini")));
    }
}
