use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::cli::Cli;

pub const DEFAULT_DB_NAME: &str = "line_history.db";
pub const DEFAULT_EXTENSIONS: &[&str] = &["py", "c", "h", "cpp", "hpp"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("could not locate the running executable: {0}")]
    CurrentExe(#[source] io::Error),

    #[error("{} is not a directory", .0.display())]
    MissingRoot(PathBuf),
}

/// Optional settings from `config.toml`. Every key may be left out.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub extensions: Option<Vec<String>>,
    pub recursive: Option<bool>,
    pub db_name: Option<String>,
}

impl FileConfig {
    /// Parse the file at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(FileConfig::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `config.toml` in the platform config dir, e.g. ~/.config/linetally
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "linetally")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

pub struct Config {
    pub root: PathBuf,
    pub db_path: PathBuf,
    /// Allowed file suffixes, without the leading dot
    pub extensions: Vec<String>,
    pub recursive: bool,
    /// Relative name never counted, normally the tool itself
    pub excluded: Option<String>,
    pub show_ui: bool,
    pub verbose: bool,
}

impl Config {
    /// Defaults for scanning `root`: built-in extensions, single level,
    /// database next to the scanned files.
    pub fn for_root(root: PathBuf) -> Self {
        Config {
            db_path: root.join(DEFAULT_DB_NAME),
            root,
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            recursive: false,
            excluded: None,
            show_ui: true,
            verbose: false,
        }
    }

    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let file = match FileConfig::default_path() {
            Some(path) => FileConfig::load(&path)?,
            None => FileConfig::default(),
        };

        let exe = std::env::current_exe().map_err(ConfigError::CurrentExe)?;
        let exe_dir = exe.parent().map(Path::to_path_buf).unwrap_or_default();
        let exe_name = exe.file_name().and_then(|n| n.to_str()).map(str::to_string);

        let root = cli.root.clone().unwrap_or(exe_dir);
        if !root.is_dir() {
            return Err(ConfigError::MissingRoot(root));
        }
        let mut config = Config::for_root(root).with_file(file);

        if let Some(db) = &cli.db {
            config.db_path = db.clone();
        }
        config.excluded = exe_name;
        config.show_ui = !cli.no_ui;
        config.verbose = cli.verbose;

        Ok(config)
    }

    /// Overlay the keys present in `file`
    pub fn with_file(mut self, file: FileConfig) -> Self {
        if let Some(extensions) = file.extensions {
            self.extensions = extensions
                .into_iter()
                .map(|e| e.trim_start_matches('.').to_string())
                .filter(|e| !e.is_empty())
                .collect();
        }
        if let Some(recursive) = file.recursive {
            self.recursive = recursive;
        }
        if let Some(db_name) = file.db_name {
            self.db_path = self.root.join(db_name);
        }
        self
    }

    pub fn accepts_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|allowed| allowed == ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn defaults_keep_db_beside_scanned_files() {
        let config = Config::for_root(PathBuf::from("/work"));
        assert_eq!(config.db_path, PathBuf::from("/work/line_history.db"));
        assert!(!config.recursive);
        assert!(config.accepts_extension(Path::new("a.cpp")));
        assert!(!config.accepts_extension(Path::new("a.rs")));
        assert!(!config.accepts_extension(Path::new("Makefile")));
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let file = FileConfig::load(&dir.path().join("config.toml")).unwrap();
        assert!(file.extensions.is_none());
        assert!(file.recursive.is_none());
    }

    #[test]
    fn file_overrides_extensions_and_db_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "extensions = [\".rs\", \"toml\"]\nrecursive = true\ndb_name = \"history.sqlite\"\n",
        )
        .unwrap();

        let file = FileConfig::load(&path).unwrap();
        let config = Config::for_root(PathBuf::from("/work")).with_file(file);

        assert_eq!(config.extensions, vec!["rs", "toml"]);
        assert!(config.recursive);
        assert_eq!(config.db_path, PathBuf::from("/work/history.sqlite"));
        assert!(config.accepts_extension(Path::new("lib.rs")));
        assert!(!config.accepts_extension(Path::new("main.c")));
    }

    #[test]
    fn bare_invocation_scans_executable_dir_and_skips_itself() {
        let config = Config::from_cli(&Cli::parse_from(["linetally"])).unwrap();
        let exe = std::env::current_exe().unwrap();

        assert_eq!(Some(config.root.as_path()), exe.parent());
        assert_eq!(
            config.excluded.as_deref(),
            exe.file_name().and_then(|n| n.to_str())
        );
        assert!(config.show_ui);
    }

    #[test]
    fn missing_root_is_rejected_before_anything_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let typo = dir.path().join("srcc");
        let cli = Cli::parse_from(["linetally", "--root", typo.to_str().unwrap()]);

        match Config::from_cli(&cli) {
            Err(ConfigError::MissingRoot(path)) => assert_eq!(path, typo),
            Err(e) => panic!("expected MissingRoot, got {e}"),
            Ok(_) => panic!("expected MissingRoot, got a config"),
        }
        assert!(!typo.exists());
    }

    #[test]
    fn unknown_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "colour = \"red\"\n").unwrap();

        assert!(matches!(FileConfig::load(&path), Err(ConfigError::Parse { .. })));
    }
}
