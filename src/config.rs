//! Configuration Module
//! Command-line arguments layered over an optional JSON config file.

use crate::gui::DisplayMode;
use crate::report::DEFAULT_HEAD_ROWS;
use crate::stats::DEFAULT_TOP_YEARS;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CHART_OUTPUT: &str = "top_sales_by_year.png";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("No input CSV given (pass a path or set `input` in the config file)")]
    MissingInput,
    #[error("Invalid setting: {0}")]
    Invalid(String),
}

/// Command-line arguments
#[derive(Parser, Debug, Default)]
#[command(version, about = "Video game sales analysis")]
pub struct Args {
    /// Sales CSV to analyse
    pub input: Option<PathBuf>,

    /// JSON config file
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Where to write the chart PNG
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// How to show the chart once saved
    #[arg(long = "display", value_enum)]
    pub display: Option<DisplayMode>,

    /// Number of years in the sales chart
    #[arg(long = "top-years")]
    pub top_years: Option<usize>,

    /// Rows printed per aggregate table
    #[arg(long = "head-rows")]
    pub head_rows: Option<usize>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long = "log-level")]
    pub log_level: Option<String>,
}

/// Complete analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub input: Option<PathBuf>,
    pub chart_output: PathBuf,
    pub display: DisplayMode,
    pub top_years: usize,
    pub head_rows: usize,
    pub log_level: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input: None,
            chart_output: PathBuf::from(DEFAULT_CHART_OUTPUT),
            display: DisplayMode::default(),
            top_years: DEFAULT_TOP_YEARS,
            head_rows: DEFAULT_HEAD_ROWS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Read a JSON config file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve the configuration: defaults, then the config file, then CLI flags.
    pub fn resolve(args: &Args) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_args(args);
        config.validate()?;
        Ok(config)
    }

    fn apply_args(&mut self, args: &Args) {
        if let Some(input) = &args.input {
            self.input = Some(input.clone());
        }
        if let Some(output) = &args.output {
            self.chart_output = output.clone();
        }
        if let Some(display) = args.display {
            self.display = display;
        }
        if let Some(top_years) = args.top_years {
            self.top_years = top_years;
        }
        if let Some(head_rows) = args.head_rows {
            self.head_rows = head_rows;
        }
        if let Some(level) = &args.log_level {
            self.log_level = level.clone();
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.input.is_none() {
            return Err(ConfigError::MissingInput);
        }
        if self.top_years == 0 {
            return Err(ConfigError::Invalid("top_years must be at least 1".into()));
        }
        if self.head_rows == 0 {
            return Err(ConfigError::Invalid("head_rows must be at least 1".into()));
        }
        Ok(())
    }

    /// Input path; only valid after `resolve`.
    pub fn input_path(&self) -> Result<&Path, ConfigError> {
        self.input.as_deref().ok_or(ConfigError::MissingInput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(dir: &tempfile::TempDir, json: &str) -> PathBuf {
        let path = dir.path().join("config.json");
        let mut file = std::fs::File::create(&path).expect("create config");
        file.write_all(json.as_bytes()).expect("write config");
        path
    }

    #[test]
    fn cli_path_with_defaults() {
        let args = Args::parse_from(["vgsales_report", "data/video_games_sales.csv"]);
        let config = AnalysisConfig::resolve(&args).expect("resolve");

        assert_eq!(
            config.input_path().expect("input"),
            Path::new("data/video_games_sales.csv")
        );
        assert_eq!(config.chart_output, PathBuf::from(DEFAULT_CHART_OUTPUT));
        assert_eq!(config.display, DisplayMode::None);
        assert_eq!(config.top_years, 10);
        assert_eq!(config.head_rows, 5);
    }

    #[test]
    fn cli_flags_override_config_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_config(
            &dir,
            r#"{"input": "from_file.csv", "top_years": 3, "display": "open"}"#,
        );
        let args = Args::parse_from([
            "vgsales_report",
            "--config",
            path.to_str().expect("utf8 path"),
            "--top-years",
            "7",
            "--display",
            "window",
        ]);

        let config = AnalysisConfig::resolve(&args).expect("resolve");
        assert_eq!(config.input, Some(PathBuf::from("from_file.csv")));
        assert_eq!(config.top_years, 7);
        assert_eq!(config.display, DisplayMode::Window);
        assert_eq!(config.head_rows, DEFAULT_HEAD_ROWS);
    }

    #[test]
    fn missing_input_is_rejected() {
        let args = Args::parse_from(["vgsales_report"]);
        assert!(matches!(
            AnalysisConfig::resolve(&args),
            Err(ConfigError::MissingInput)
        ));
    }

    #[test]
    fn zero_top_years_is_rejected() {
        let args = Args::parse_from(["vgsales_report", "in.csv", "--top-years", "0"]);
        assert!(matches!(
            AnalysisConfig::resolve(&args),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn malformed_config_reports_parse_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_config(&dir, "{ not json");
        assert!(matches!(
            AnalysisConfig::from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
