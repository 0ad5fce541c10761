pub mod report;

pub use report::{render, render_json, Report, ReportOptions};

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{AnalyzerError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(AnalyzerError::InvalidConfig(format!(
                "unknown output format '{}' (expected text or json)",
                other
            ))),
        }
    }
}

/// Persists a rendered report to disk
pub struct ReportWriter {
    path: PathBuf,
}

impl ReportWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ReportWriter { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the report, creating parent directories as needed.
    /// An existing file is replaced.
    pub fn write(&self, contents: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, contents)?;
        log::info!("Report written to {:?}", self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output").join("nested").join("ssh_report.txt");

        let writer = ReportWriter::new(&path);
        writer.write("report body\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "report body\n");
        assert_eq!(writer.path(), path.as_path());
    }

    #[test]
    fn test_write_replaces_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ssh_report.txt");
        fs::write(&path, "old contents that are longer").unwrap();

        ReportWriter::new(&path).write("new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }
}
