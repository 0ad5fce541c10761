use std::path::PathBuf;
use structopt::StructOpt;

use sshreport::config::Config;
use sshreport::detection::{detect_brute_force, extract_file};
use sshreport::output::{render, render_json, OutputFormat, ReportOptions, ReportWriter};

/// SSH authentication log analyzer
#[derive(StructOpt, Debug)]
#[structopt(name = "ssh-report", about = "Analyze SSH log files for failed/successful logins.")]
pub enum Cli {
    /// Analyze a log file and write the summary report
    Analyze {
        /// Path to SSH log file [default: /var/log/auth.log]
        #[structopt(short, long)]
        log_file: Option<PathBuf>,
        /// Path to output report file [default: output/ssh_report.txt]
        #[structopt(short, long)]
        output: Option<PathBuf>,
        /// Configuration file; command-line options take precedence
        #[structopt(short, long)]
        config: Option<PathBuf>,
        /// Report format: text or json [default: text]
        #[structopt(short, long)]
        format: Option<String>,
        /// Entries listed per ranked section [default: 10]
        #[structopt(long)]
        top_n: Option<usize>,
        /// Failures from one IP that flag it as a brute-force source [default: 10]
        #[structopt(long)]
        threshold: Option<u64>,
    },
    /// Generate a default configuration file
    Config {
        /// Output path for the configuration file
        #[structopt(short, long, default_value = "config.toml")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::from_args() {
        Cli::Analyze {
            log_file,
            output,
            config,
            format,
            top_n,
            threshold,
        } => {
            let mut config = match config {
                Some(path) => Config::from_file(&path)?,
                None => Config::default(),
            };
            if let Some(log_file) = log_file {
                config.input.log_file = log_file;
            }
            if let Some(output) = output {
                config.output.file_path = output;
            }
            if let Some(format) = format {
                config.output.format = format;
            }
            if let Some(top_n) = top_n {
                config.report.top_n = top_n;
            }
            if let Some(threshold) = threshold {
                config.report.brute_force_threshold = threshold;
            }
            config.validate()?;

            analyze(&config)?;
        }
        Cli::Config { output } => {
            let config = Config::default();
            config.to_file(&output)?;
            println!("Default configuration written to: {:?}", output);
        }
    }

    Ok(())
}

fn analyze(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let log_path = &config.input.log_file;
    if !log_path.exists() {
        eprintln!("Log file not found: {}", log_path.display());
        std::process::exit(1);
    }

    let stats = extract_file(log_path)?;
    log::info!(
        "Analyzed {} line(s): {} failed attempt(s), {} successful login(s)",
        stats.lines_read,
        stats.total_failures(),
        stats.total_successes()
    );

    let options = ReportOptions::from(&config.report);
    let candidates = detect_brute_force(&stats.failed_by_ip, options.brute_force_threshold);
    if !candidates.is_empty() {
        log::warn!(
            "{} potential brute-force source(s) with >= {} failures",
            candidates.len(),
            options.brute_force_threshold
        );
    }

    let generated_at = chrono::Local::now().naive_local();
    let report = match config.output.format.parse::<OutputFormat>()? {
        OutputFormat::Text => render(&stats, generated_at, &options).to_text(),
        OutputFormat::Json => render_json(&stats, generated_at, &options)?,
    };

    println!("{}", report);

    let writer = ReportWriter::new(&config.output.file_path);
    writer.write(&report)?;
    println!("\n[+] Report saved to {}", writer.path().display());

    Ok(())
}
