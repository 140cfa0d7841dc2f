// Configuration loading and parsing (board.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::board::PagingConfig;
use crate::effects::EffectSettings;
use crate::seeding::SeedingStrategy;

/// Name of the config file under `config/` (and `defaults/`).
pub const CONFIG_FILE: &str = "board.toml";

/// Upper bound on simultaneously active matches.
pub const MAX_ACTIVE_MATCHES: usize = 10;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// board.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub effects: EffectsConfig,
    #[serde(default)]
    pub seeding: SeedingConfig,
    #[serde(default)]
    pub data: DataPaths,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Matches played at the same time (one per table).
    pub active_matches: usize,
    pub on_deck_matches: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            active_matches: 1,
            on_deck_matches: 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct EffectsConfig {
    pub table_spin_enabled: bool,
    pub table_spin_interval_secs: u64,
    pub on_deck_jiggle_enabled: bool,
    pub on_deck_jiggle_interval_secs: u64,
    pub pulse_duration_secs: u64,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        EffectsConfig {
            table_spin_enabled: true,
            table_spin_interval_secs: 480,
            on_deck_jiggle_enabled: true,
            on_deck_jiggle_interval_secs: 420,
            pulse_duration_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct SeedingConfig {
    pub strategy: SeedingStrategy,
}

/// Data files, relative to the working directory.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct DataPaths {
    pub schedule: Option<PathBuf>,
    pub teams: Option<PathBuf>,
    pub rankings: Option<PathBuf>,
}

impl Config {
    pub fn paging(&self) -> PagingConfig {
        PagingConfig {
            active_count: self.display.active_matches,
            on_deck_count: self.display.on_deck_matches,
        }
    }

    pub fn effect_settings(&self) -> EffectSettings {
        let fx = &self.effects;
        EffectSettings {
            table_spin_interval: Duration::from_secs(fx.table_spin_interval_secs),
            table_spin_enabled: fx.table_spin_enabled,
            on_deck_jiggle_interval: Duration::from_secs(fx.on_deck_jiggle_interval_secs),
            on_deck_jiggle_enabled: fx.on_deck_jiggle_enabled,
            pulse_duration: Duration::from_secs(fx.pulse_duration_secs),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load `config/board.toml` under `base_dir` and validate it.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let config = parse_config(&text, &path)?;
    validate(&config)?;
    Ok(config)
}

fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Copy any file in `defaults/` that is missing from `config/`.
///
/// Existing files are never overwritten and `*.example` files are skipped.
/// Returns the paths that were created.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    let mut copied = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }

        let target = config_dir.join(file_name);
        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Load config relative to the current working directory, seeding
/// `config/` from `defaults/` first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    let active = config.display.active_matches;
    if !(1..=MAX_ACTIVE_MATCHES).contains(&active) {
        return Err(ConfigError::ValidationError {
            field: "display.active_matches".into(),
            message: format!("must be between 1 and {MAX_ACTIVE_MATCHES}, got {active}"),
        });
    }

    let fx = &config.effects;
    let intervals: &[(&str, bool, u64)] = &[
        (
            "effects.table_spin_interval_secs",
            fx.table_spin_enabled,
            fx.table_spin_interval_secs,
        ),
        (
            "effects.on_deck_jiggle_interval_secs",
            fx.on_deck_jiggle_enabled,
            fx.on_deck_jiggle_interval_secs,
        ),
    ];
    for (name, enabled, secs) in intervals {
        if *enabled && *secs == 0 {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must be > 0 while the effect is enabled".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Repo root holding `defaults/`, whether tests run from the crate or
    /// the workspace root.
    fn project_root() -> PathBuf {
        let cwd = std::env::current_dir().unwrap();
        if cwd.join("defaults").exists() {
            cwd
        } else if cwd.join("../../defaults").exists() {
            cwd.join("../..")
        } else {
            panic!("Cannot locate defaults/ directory from CWD {:?}", cwd);
        }
    }

    fn write_config(name: &str, body: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("config").join(CONFIG_FILE), body).unwrap();
        tmp
    }

    #[test]
    fn default_file_parses_to_defaults() {
        let root = project_root();
        let text = fs::read_to_string(root.join("defaults").join(CONFIG_FILE)).unwrap();
        let config = parse_config(&text, Path::new("board.toml")).unwrap();
        validate(&config).unwrap();
        assert_eq!(config.display, DisplayConfig::default());
        assert_eq!(config.effects, EffectsConfig::default());
        assert_eq!(config.seeding.strategy, SeedingStrategy::Computed);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config = parse_config("", Path::new("board.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.paging(), PagingConfig::default());
        assert_eq!(config.effect_settings(), EffectSettings::default());
    }

    #[test]
    fn load_full_config() {
        let tmp = write_config(
            "config_test_full",
            r#"
[display]
active_matches = 3
on_deck_matches = 2

[effects]
table_spin_enabled = false
table_spin_interval_secs = 0
pulse_duration_secs = 10

[seeding]
strategy = "fixed_table"

[data]
schedule = "data/matches.csv"
teams = "data/teams.csv"
"#,
        );
        let config = load_config_from(&tmp).expect("should load");
        assert_eq!(config.paging().active_count, 3);
        assert_eq!(config.paging().on_deck_count, 2);
        assert_eq!(config.seeding.strategy, SeedingStrategy::FixedTable);
        assert_eq!(config.data.schedule, Some(PathBuf::from("data/matches.csv")));
        assert_eq!(config.data.rankings, None);

        let fx = config.effect_settings();
        assert!(!fx.table_spin_enabled);
        assert_eq!(fx.pulse_duration, Duration::from_secs(10));
        assert_eq!(fx.on_deck_jiggle_interval, Duration::from_secs(420));

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_active_matches_out_of_range() {
        for bad in [0, 11] {
            let tmp = write_config(
                &format!("config_test_active_{bad}"),
                &format!("[display]\nactive_matches = {bad}\n"),
            );
            let err = load_config_from(&tmp).unwrap_err();
            match &err {
                ConfigError::ValidationError { field, .. } => {
                    assert_eq!(field, "display.active_matches");
                }
                other => panic!("expected ValidationError, got: {other}"),
            }
            let _ = fs::remove_dir_all(&tmp);
        }
    }

    #[test]
    fn rejects_zero_interval_for_enabled_effect() {
        let tmp = write_config(
            "config_test_zero_interval",
            "[effects]\non_deck_jiggle_interval_secs = 0\n",
        );
        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "effects.on_deck_jiggle_interval_secs");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_unknown_strategy() {
        let tmp = write_config("config_test_bad_strategy", "[seeding]\nstrategy = \"random\"\n");
        let err = load_config_from(&tmp).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }), "{err}");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found_for_missing_board_toml() {
        let tmp = std::env::temp_dir().join("config_test_missing_board");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::FileNotFound { path } => assert!(path.ends_with(CONFIG_FILE)),
            other => panic!("expected FileNotFound, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = write_config("config_test_invalid_toml", "this is not valid [[[ toml");
        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ParseError { path, .. } => assert!(path.ends_with(CONFIG_FILE)),
            other => panic!("expected ParseError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_copies_missing_files() {
        let tmp = std::env::temp_dir().join("config_test_ensure_copies");
        let _ = fs::remove_dir_all(&tmp);
        let defaults_dir = tmp.join("defaults");
        fs::create_dir_all(&defaults_dir).unwrap();

        let root = project_root();
        fs::copy(
            root.join("defaults").join(CONFIG_FILE),
            defaults_dir.join(CONFIG_FILE),
        )
        .unwrap();
        fs::write(defaults_dir.join("board.toml.example"), "# sample\n").unwrap();

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert_eq!(copied.len(), 1);
        assert!(tmp.join("config").join(CONFIG_FILE).exists());
        assert!(!tmp.join("config/board.toml.example").exists());

        load_config_from(&tmp).expect("copied defaults should load");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_skips_existing() {
        let tmp = std::env::temp_dir().join("config_test_ensure_skips");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("defaults").join(CONFIG_FILE), "[display]\n").unwrap();
        fs::write(tmp.join("config").join(CONFIG_FILE), "# custom\n").unwrap();

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert!(copied.is_empty());
        let content = fs::read_to_string(tmp.join("config").join(CONFIG_FILE)).unwrap();
        assert_eq!(content, "# custom\n");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_errors_when_both_dirs_missing() {
        let tmp = std::env::temp_dir().join("config_test_both_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let err = ensure_config_files(&tmp).unwrap_err();
        match &err {
            ConfigError::DefaultsCopyError { message } => {
                assert!(message.contains("neither defaults/ nor config/"));
            }
            other => panic!("expected DefaultsCopyError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }
}
