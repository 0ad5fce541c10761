pub mod config;
pub mod detection;
pub mod error;
pub mod input;
pub mod models;
pub mod output;

// Re-export commonly used types
pub use config::Config;
pub use detection::{
    detect_brute_force, extract, extract_file, extract_parallel, extract_reader,
};
pub use error::{AnalyzerError, Result};
pub use models::{AuthEvent, AuthStats, BruteForceCandidate, FrequencyTable};
pub use output::{render, render_json, OutputFormat, Report, ReportOptions, ReportWriter};
