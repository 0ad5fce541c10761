use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AnalyzerError, Result};
use crate::output::OutputFormat;

/// Configuration for the SSH log analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input source configuration
    pub input: InputConfig,
    /// Report content configuration
    pub report: ReportConfig,
    /// Output configuration
    pub output: OutputConfig,
}

/// Input source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Path to the authentication log
    pub log_file: PathBuf,
}

/// Report content configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Maximum entries listed in each ranked section
    pub top_n: usize,
    /// Failures from one IP at or above which it is flagged as brute-force
    pub brute_force_threshold: u64,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "text" or "json"
    pub format: String,
    /// Where the report is saved
    pub file_path: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            log_file: PathBuf::from("/var/log/auth.log"),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            top_n: 10,
            brute_force_threshold: 10,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            format: "text".to_string(),
            file_path: PathBuf::from("output/ssh_report.txt"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input: InputConfig::default(),
            report: ReportConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Reject settings that would produce a meaningless report
    pub fn validate(&self) -> Result<()> {
        if self.report.top_n == 0 {
            return Err(AnalyzerError::InvalidConfig(
                "report.top_n must be at least 1".to_string(),
            ));
        }
        if self.report.brute_force_threshold == 0 {
            return Err(AnalyzerError::InvalidConfig(
                "report.brute_force_threshold must be at least 1".to_string(),
            ));
        }
        self.output.format.parse::<OutputFormat>()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_match_fixed_report() {
        let config = Config::default();
        assert_eq!(config.report.top_n, 10);
        assert_eq!(config.report.brute_force_threshold, 10);
        assert_eq!(config.input.log_file, PathBuf::from("/var/log/auth.log"));
        assert_eq!(config.output.file_path, PathBuf::from("output/ssh_report.txt"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.report.brute_force_threshold = 25;
        config.output.format = "json".to_string();
        config.to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[report]\ntop_n = 3\n").unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.report.top_n, 3);
        assert_eq!(loaded.report.brute_force_threshold, 10);
        assert_eq!(loaded.output.format, "text");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = Config::default();
        config.report.top_n = 0;
        assert!(matches!(config.validate(), Err(AnalyzerError::InvalidConfig(_))));

        let mut config = Config::default();
        config.output.format = "xml".to_string();
        assert!(matches!(config.validate(), Err(AnalyzerError::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[report\n").unwrap();

        assert!(matches!(Config::from_file(&path), Err(AnalyzerError::ConfigParse(_))));
    }
}
