use anyhow::Result;
use modini_config::{Config, ParserSettings, ini_files_in};
use modini_engine::{Document, ParserOptions, io};
use relative_path::RelativePathBuf;
use std::{
    env,
    path::{Path, PathBuf},
    process,
};

const USAGE: &[&str] = &[
    "check [PATH]                       parse every .ini file and report errors",
    "fmt FILE [--write] [--include-raw] print (or rewrite) the normalized file",
    "dump FILE                          print section summaries as JSON",
];

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Check { path: Option<PathBuf> },
    Fmt { file: PathBuf, write: bool, include_raw: bool },
    Dump { file: PathBuf },
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    command: Command,
    allow_headerless: bool,
    permissive: bool,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut positional = Vec::new();
    let mut write = false;
    let mut include_raw = false;
    let mut allow_headerless = false;
    let mut permissive = false;

    for arg in args {
        match arg.as_str() {
            "--write" => write = true,
            "--include-raw" => include_raw = true,
            "--allow-headerless" => allow_headerless = true,
            "--permissive" => permissive = true,
            flag if flag.starts_with("--") => return Err(format!("Unknown option '{flag}'")),
            _ => positional.push(arg.as_str()),
        }
    }

    let command = match positional.as_slice() {
        ["check"] => Command::Check { path: None },
        ["check", path] => Command::Check {
            path: Some(PathBuf::from(path)),
        },
        ["fmt", file] => Command::Fmt {
            file: PathBuf::from(file),
            write,
            include_raw,
        },
        ["dump", file] => Command::Dump {
            file: PathBuf::from(file),
        },
        [] => return Err("No command given".to_string()),
        [command, ..] => return Err(format!("Unexpected arguments for '{command}'")),
    };

    if (write || include_raw) && !matches!(command, Command::Fmt { .. }) {
        return Err("--write and --include-raw only apply to fmt".to_string());
    }

    Ok(Args {
        command,
        allow_headerless,
        permissive,
    })
}

fn parser_options(settings: ParserSettings, args: &Args) -> ParserOptions {
    ParserOptions::default()
        .restrict_duplicates(settings.restrict_duplicates && !args.permissive)
        .allow_headerless_section(settings.allow_headerless_section || args.allow_headerless)
}

fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .ok()
        .and_then(|relative| RelativePathBuf::from_path(relative).ok())
        .map(|relative| relative.to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Returns the number of files that failed to parse.
fn check(files: &[PathBuf], root: &Path, options: ParserOptions) -> usize {
    let mut failures = 0;
    for file in files {
        let name = display_path(file, root);
        log::info!("Checking {name}");
        match io::read_document(file, options) {
            Ok(doc) => {
                let raw = doc.sections().filter(|s| s.is_raw()).count();
                log::debug!("{name}: {} sections, {raw} kept verbatim", doc.sections().count());
            }
            Err(e) => {
                log::error!("{name}: {e}");
                failures += 1;
            }
        }
    }
    failures
}

fn run(args: Args, config: Option<Config>) -> Result<i32> {
    let settings = config.as_ref().map(|c| c.parser).unwrap_or_default();
    let options = parser_options(settings, &args);

    match args.command {
        Command::Check { path } => {
            let (root, files) = match (path, &config) {
                (Some(path), _) if !path.exists() => {
                    eprintln!("Error: Path '{}' does not exist", path.display());
                    return Ok(1);
                }
                (Some(path), _) if path.is_file() => {
                    let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
                    (root, vec![path])
                }
                (Some(path), config) => {
                    let mut scan = Config::new(&path);
                    if let Some(config) = config {
                        scan.skip_patterns = config.skip_patterns.clone();
                    }
                    let files = ini_files_in(&path, |f| scan.is_skipped(f))?;
                    (path, files)
                }
                (None, Some(config)) if !config.mod_folder.is_dir() => {
                    eprintln!(
                        "Error: Mod folder '{}' from the config file does not exist",
                        config.mod_folder.display()
                    );
                    return Ok(1);
                }
                (None, Some(config)) => (config.mod_folder.clone(), config.ini_files()?),
                (None, None) => {
                    eprintln!("Error: No path provided and no config file found");
                    eprintln!("Or create a config file at {}", Config::config_path().display());
                    return Ok(1);
                }
            };

            let failures = check(&files, &root, options);
            println!("Checked {} files, {failures} failed", files.len());
            Ok(if failures > 0 { 1 } else { 0 })
        }
        Command::Fmt {
            file,
            write,
            include_raw,
        } => {
            let doc = io::read_document(&file, options)?;
            if write {
                io::write_document(&file, &doc, include_raw)?;
                log::info!("Rewrote {}", file.display());
            } else {
                print!("{}", doc.serialize(include_raw));
            }
            Ok(0)
        }
        Command::Dump { file } => {
            let doc: Document = io::read_document(&file, options)?;
            println!("{}", serde_json::to_string_pretty(&doc.records())?);
            Ok(0)
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("modini-cli");

    let parsed = match parse_args(args.get(1..).unwrap_or_default()) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Usage: {program} <command> [--allow-headerless] [--permissive]");
            for line in USAGE {
                eprintln!("  {line}");
            }
            process::exit(1);
        }
    };

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    let code = run(parsed, config)?;
    if code != 0 {
        process::exit(code);
    }
    Ok(())
}
