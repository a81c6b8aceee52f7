use clap::{CommandFactory, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Chart view names accepted by `chart` (CLI and shell).
pub const CHART_VIEWS: [&str; 6] = ["all", "angles", "movements", "sessions", "timeline", "times"];

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Convert range-of-motion session logs to CSV and derive chart series
#[derive(Parser, Debug, Clone)]
#[command(
    name = "motion-log",
    about = "Convert range-of-motion session logs to CSV and derive chart series",
    version
)]
pub struct Settings {
    /// Action to run (defaults to the interactive shell)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format for chart views
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Decimal places for printed measurements (0-6)
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(0..=6))]
    pub decimals: u32,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

/// Actions available from the command line.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Convert session JSON files (or directories of them) into CSV tables
    Convert {
        /// JSON files or directories to convert
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Print every chart view for the last converted table
        #[arg(long)]
        chart: bool,
    },

    /// Derive chart series from an existing CSV table
    Chart {
        /// Table produced by `convert`
        table: PathBuf,

        /// Which view to print
        #[arg(long, default_value = "all", value_parser = CHART_VIEWS)]
        view: String,
    },

    /// Read commands from standard input
    Shell,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.motion-log/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u32>,
}

impl LastUsedParams {
    /// Return the default path to the persisted config file.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(".motion-log").join("last_used.json")
    }

    /// Load persisted params from an explicit path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Atomically write params to an explicit path.
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &std::path::Path) -> Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit CLI
    /// value was provided, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Full implementation. Accepts args and an explicit config path so that
    /// tests can redirect to a temporary directory.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &std::path::Path,
    ) -> Self {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                tracing::warn!("could not clear {}: {}", config_path.display(), e);
            }
            return Self::apply_debug(settings);
        }

        let last = LastUsedParams::load_from(config_path);

        // CLI always wins over persisted values.
        if !is_arg_explicitly_set(&matches, "format") {
            if let Some(v) = last.format.filter(|f| f == "text" || f == "json") {
                settings.format = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "decimals") {
            if let Some(v) = last.decimals.filter(|d| *d <= 6) {
                settings.decimals = v;
            }
        }

        settings = Self::apply_debug(settings);

        let params = LastUsedParams::from(&settings);
        if let Err(e) = params.save_to(config_path) {
            tracing::debug!("could not persist {}: {}", config_path.display(), e);
        }

        settings
    }

    /// `--debug` overrides the log level.
    fn apply_debug(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// `true` when chart views should be emitted as JSON.
    pub fn json_output(&self) -> bool {
        self.format == "json"
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            format: Some(s.format.clone()),
            decimals: Some(s.decimals),
        }
    }
}

/// Returns `true` when `name` was supplied explicitly on the command line
/// (not via default value or environment variable).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tmp_config_path(tmp: &TempDir) -> PathBuf {
        LastUsedParams::config_path_in(tmp.path())
    }

    #[test]
    fn test_last_used_params_save_load() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);
        let params = LastUsedParams {
            format: Some("json".to_string()),
            decimals: Some(3),
        };
        params.save_to(&path).expect("save");

        assert_eq!(LastUsedParams::load_from(&path), params);
    }

    #[test]
    fn test_last_used_params_default_when_missing() {
        let tmp = TempDir::new().expect("tempdir");
        let loaded = LastUsedParams::load_from(&tmp_config_path(&tmp));
        assert_eq!(loaded, LastUsedParams::default());
    }

    #[test]
    fn test_last_used_params_default_when_corrupt() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(LastUsedParams::load_from(&path), LastUsedParams::default());
    }

    #[test]
    fn test_last_used_params_clear() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);
        LastUsedParams::default().save_to(&path).expect("save");
        assert!(path.exists());

        LastUsedParams::clear_at(&path).expect("clear");
        assert!(!path.exists());
    }

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::parse_from(["motion-log"]);

        assert!(settings.command.is_none());
        assert_eq!(settings.format, "text");
        assert_eq!(settings.decimals, 1);
        assert_eq!(settings.log_level, "INFO");
        assert!(settings.log_file.is_none());
        assert!(!settings.debug);
        assert!(!settings.clear);
        assert!(!settings.json_output());
    }

    #[test]
    fn test_settings_convert_subcommand() {
        let settings =
            Settings::parse_from(["motion-log", "convert", "a.json", "sessions/", "--chart"]);
        assert_eq!(
            settings.command,
            Some(Command::Convert {
                inputs: vec![PathBuf::from("a.json"), PathBuf::from("sessions/")],
                chart: true,
            })
        );
    }

    #[test]
    fn test_settings_chart_subcommand_view() {
        let settings = Settings::parse_from([
            "motion-log",
            "--format",
            "json",
            "chart",
            "a.csv",
            "--view",
            "timeline",
        ]);
        assert!(settings.json_output());
        assert_eq!(
            settings.command,
            Some(Command::Chart {
                table: PathBuf::from("a.csv"),
                view: "timeline".to_string(),
            })
        );
    }

    #[test]
    fn test_settings_rejects_unknown_view() {
        let result = Settings::try_parse_from(["motion-log", "chart", "a.csv", "--view", "pie"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_decimals_range() {
        assert!(Settings::try_parse_from(["motion-log", "--decimals", "7"]).is_err());
        let s = Settings::parse_from(["motion-log", "--decimals", "0"]);
        assert_eq!(s.decimals, 0);
    }

    #[test]
    fn test_load_with_last_used_merges_persisted_format() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);
        LastUsedParams {
            format: Some("json".to_string()),
            decimals: Some(2),
        }
        .save_to(&config_path)
        .expect("save");

        let settings = Settings::load_with_last_used_impl(vec!["motion-log".into()], &config_path);
        assert_eq!(settings.format, "json");
        assert_eq!(settings.decimals, 2);
    }

    #[test]
    fn test_load_with_last_used_cli_overrides_persisted() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);
        LastUsedParams {
            format: Some("json".to_string()),
            decimals: None,
        }
        .save_to(&config_path)
        .expect("save");

        let settings = Settings::load_with_last_used_impl(
            vec!["motion-log".into(), "--format".into(), "text".into()],
            &config_path,
        );
        assert_eq!(settings.format, "text");
    }

    #[test]
    fn test_load_with_last_used_ignores_invalid_persisted_format() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);
        LastUsedParams {
            format: Some("xml".to_string()),
            decimals: Some(40),
        }
        .save_to(&config_path)
        .expect("save");

        let settings = Settings::load_with_last_used_impl(vec!["motion-log".into()], &config_path);
        assert_eq!(settings.format, "text");
        assert_eq!(settings.decimals, 1);
    }

    #[test]
    fn test_load_with_last_used_clear_removes_file() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);
        LastUsedParams::default().save_to(&config_path).expect("save");

        Settings::load_with_last_used_impl(
            vec!["motion-log".into(), "--clear".into()],
            &config_path,
        );

        assert!(!config_path.exists(), "file must be gone after --clear");
    }

    #[test]
    fn test_load_with_last_used_debug_overrides_log_level() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);

        let settings = Settings::load_with_last_used_impl(
            vec!["motion-log".into(), "--debug".into()],
            &config_path,
        );
        assert_eq!(settings.log_level, "DEBUG");
    }

    #[test]
    fn test_load_with_last_used_persists_after_run() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);

        Settings::load_with_last_used_impl(
            vec!["motion-log".into(), "--decimals".into(), "4".into()],
            &config_path,
        );

        let loaded = LastUsedParams::load_from(&config_path);
        assert_eq!(loaded.decimals, Some(4));
        assert_eq!(loaded.format, Some("text".to_string()));
    }
}
