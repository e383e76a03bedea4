//! Configuration for the board.
//!
//! Layered with the following priority (highest first):
//! 1. CLI arguments (and the environment variables clap maps onto them)
//! 2. TOML config file (`~/.config/taskboard/config.toml`)
//! 3. Compiled defaults
//!
//! A missing default config file is not an error. An explicit `--config`
//! path that cannot be read is.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::column::ColumnTitles;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

/// Which palette the UI draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    ui: UiFileConfig,
    columns: ColumnsFileConfig,
}

/// `[ui]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UiFileConfig {
    theme: Option<ThemeName>,
    poll_timeout_ms: Option<u64>,
    max_title_len: Option<usize>,
}

/// `[columns]` section: display titles.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ColumnsFileConfig {
    todo: Option<String>,
    progress: Option<String>,
    done: Option<String>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    pub theme: ThemeName,
    /// How long the event loop waits for input before redrawing.
    pub poll_timeout: Duration,
    /// Longest title the task form accepts, in characters.
    pub max_title_len: usize,
    pub column_titles: ColumnTitles,
    /// Print the final board as JSON after the terminal is restored.
    pub print_board: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            theme: ThemeName::Light,
            poll_timeout: Duration::from_millis(100),
            max_title_len: 120,
            column_titles: ColumnTitles::default(),
            print_board: false,
        }
    }
}

impl BoardConfig {
    /// Load configuration by merging CLI args with the TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config file exists but cannot be read
    /// or parsed, or if an explicit `--config` path does not exist.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, &file))
    }

    /// Configuration from CLI arguments and defaults alone, used when the
    /// config file cannot be loaded.
    pub fn from_cli(cli: &CliArgs) -> Self {
        Self::resolve(cli, &ConfigFile::default())
    }

    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Self {
        let defaults = Self::default();
        let titles = defaults.column_titles;

        Self {
            theme: cli.theme.or(file.ui.theme).unwrap_or(defaults.theme),
            poll_timeout: file
                .ui
                .poll_timeout_ms
                .map_or(defaults.poll_timeout, Duration::from_millis),
            max_title_len: file.ui.max_title_len.unwrap_or(defaults.max_title_len),
            column_titles: ColumnTitles {
                todo: file.columns.todo.clone().unwrap_or(titles.todo),
                progress: file.columns.progress.clone().unwrap_or(titles.progress),
                done: file.columns.done.clone().unwrap_or(titles.done),
            },
            print_board: cli.print_board,
        }
    }
}

#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Terminal kanban board")]
pub struct CliArgs {
    /// Path to config file (default: `~/.config/taskboard/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Color theme.
    #[arg(long, value_enum, env = "TASKBOARD_THEME")]
    pub theme: Option<ThemeName>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "TASKBOARD_LOG")]
    pub log_level: String,

    /// Path to log file (default: `$TMPDIR/taskboard.log`).
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Print the board as JSON on exit.
    #[arg(long)]
    pub print_board: bool,
}

fn load_config_file(explicit_path: Option<&Path>) -> Result<ConfigFile, ConfigError> {
    let path = match explicit_path {
        Some(p) => {
            let contents = std::fs::read_to_string(p).map_err(|source| ConfigError::ReadFile {
                path: p.to_path_buf(),
                source,
            })?;
            return Ok(toml::from_str(&contents)?);
        }
        None => {
            let Some(config_dir) = dirs::config_dir() else {
                return Ok(ConfigFile::default());
            };
            config_dir.join("taskboard").join("config.toml")
        }
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(source) => Err(ConfigError::ReadFile { path, source }),
    }
}
