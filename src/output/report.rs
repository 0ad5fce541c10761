//! Renders extraction results as the plain-text summary report

use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

use crate::config::ReportConfig;
use crate::detection::brute_force::{detect_brute_force, DEFAULT_THRESHOLD};
use crate::error::Result;
use crate::models::{AuthStats, BruteForceCandidate};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const RULE_WIDTH: usize = 50;
const KEY_WIDTH: usize = 15;

/// Knobs for report content; defaults give the fixed ten-entry report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub top_n: usize,
    pub brute_force_threshold: u64,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            top_n: 10,
            brute_force_threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl From<&ReportConfig> for ReportOptions {
    fn from(config: &ReportConfig) -> Self {
        ReportOptions {
            top_n: config.top_n,
            brute_force_threshold: config.brute_force_threshold,
        }
    }
}

/// A fully rendered report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    lines: Vec<String>,
}

impl Report {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Lines joined with `\n`
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

fn entry_line(key: &str, count: u64, noun: &str) -> String {
    format!("  {:>width$}  ->  {} {}", key, count, noun, width = KEY_WIDTH)
}

fn push_section(
    lines: &mut Vec<String>,
    header: &str,
    entries: &[(&str, u64)],
    noun: &str,
    placeholder: &str,
) {
    lines.push(header.to_string());
    if entries.is_empty() {
        lines.push(format!("  {}", placeholder));
    } else {
        lines.extend(entries.iter().map(|&(key, count)| entry_line(key, count, noun)));
    }
    lines.push(String::new());
}

/// Render the summary report. Output depends only on the arguments.
pub fn render(stats: &AuthStats, generated_at: NaiveDateTime, options: &ReportOptions) -> Report {
    let mut lines = vec![
        format!(
            "SSH Log Analysis Report - {}",
            generated_at.format(TIMESTAMP_FORMAT)
        ),
        "=".repeat(RULE_WIDTH),
        String::new(),
    ];

    push_section(
        &mut lines,
        "Top failed attempts by IP:",
        &stats.failed_by_ip.top(options.top_n),
        "failed attempts",
        "(no failed attempts found)",
    );
    push_section(
        &mut lines,
        "Top failed attempts by username:",
        &stats.failed_by_user.top(options.top_n),
        "failed attempts",
        "(no failed attempts found)",
    );
    push_section(
        &mut lines,
        "Successful logins by username:",
        &stats.success_by_user.top(options.top_n),
        "successful logins",
        "(no successful logins found)",
    );

    let candidates = detect_brute_force(&stats.failed_by_ip, options.brute_force_threshold);
    let candidate_entries: Vec<(&str, u64)> = candidates
        .iter()
        .map(|c| (c.ip.as_str(), c.failures))
        .collect();
    push_section(
        &mut lines,
        &format!(
            "Potential brute-force sources (>= {} failures from same IP):",
            options.brute_force_threshold
        ),
        &candidate_entries,
        "failures",
        "(none detected)",
    );

    Report { lines }
}

#[derive(Debug, Serialize)]
struct RankedEntry<'a> {
    name: &'a str,
    count: u64,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    lines_read: u64,
    total_failures: u64,
    total_successes: u64,
    top_failed_by_ip: Vec<RankedEntry<'a>>,
    top_failed_by_user: Vec<RankedEntry<'a>>,
    top_success_by_user: Vec<RankedEntry<'a>>,
    brute_force_threshold: u64,
    brute_force_candidates: Vec<BruteForceCandidate>,
}

fn ranked_entries(entries: Vec<(&str, u64)>) -> Vec<RankedEntry<'_>> {
    entries
        .into_iter()
        .map(|(name, count)| RankedEntry { name, count })
        .collect()
}

/// Render the same sections as a pretty-printed JSON document
pub fn render_json(
    stats: &AuthStats,
    generated_at: NaiveDateTime,
    options: &ReportOptions,
) -> Result<String> {
    let report = JsonReport {
        generated_at: generated_at.format(TIMESTAMP_FORMAT).to_string(),
        lines_read: stats.lines_read,
        total_failures: stats.total_failures(),
        total_successes: stats.total_successes(),
        top_failed_by_ip: ranked_entries(stats.failed_by_ip.top(options.top_n)),
        top_failed_by_user: ranked_entries(stats.failed_by_user.top(options.top_n)),
        top_success_by_user: ranked_entries(stats.success_by_user.top(options.top_n)),
        brute_force_threshold: options.brute_force_threshold,
        brute_force_candidates: detect_brute_force(
            &stats.failed_by_ip,
            options.brute_force_threshold,
        ),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
