//! Folds log lines into failure/success frequency tables

use std::io::BufRead;
use std::path::Path;
use std::thread;

use crate::error::Result;
use crate::input::{parse_line, LogReader};
use crate::models::AuthStats;

/// Extract failed and accepted login counts from an in-memory sequence of lines
pub fn extract<I, S>(lines: I) -> AuthStats
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut stats = AuthStats::new();
    for line in lines {
        stats.lines_read += 1;
        if let Some(event) = parse_line(line.as_ref()) {
            stats.record(&event);
        }
    }
    stats
}

/// Extract from a byte stream, decoding each line lossily
pub fn extract_reader<R: BufRead>(reader: R) -> Result<AuthStats> {
    extract_log(LogReader::new(reader))
}

/// Open `path` and extract from its contents
pub fn extract_file(path: &Path) -> Result<AuthStats> {
    extract_log(LogReader::open(path)?)
}

fn extract_log<R: BufRead>(mut reader: LogReader<R>) -> Result<AuthStats> {
    let mut stats = AuthStats::new();

    while let Some(line) = reader.next_line()? {
        stats.lines_read += 1;
        if let Some(event) = parse_line(&line) {
            stats.record(&event);
        }
    }

    log::debug!(
        "Extracted {} event(s) from {} line(s)",
        stats.lines_matched,
        stats.lines_read
    );
    Ok(stats)
}

/// Split `lines` into chunks, extract each on its own thread and sum the
/// partial tables. Produces the same tables as [`extract`].
pub fn extract_parallel<S>(lines: &[S], workers: usize) -> AuthStats
where
    S: AsRef<str> + Sync,
{
    let workers = workers.max(1);
    if workers == 1 || lines.len() < 2 {
        return extract(lines);
    }

    let chunk_size = lines.len().div_ceil(workers);

    thread::scope(|scope| {
        let handles: Vec<_> = lines
            .chunks(chunk_size)
            .map(|chunk| scope.spawn(move || extract(chunk)))
            .collect();

        let mut stats = AuthStats::new();
        for handle in handles {
            match handle.join() {
                Ok(partial) => stats.merge(&partial),
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        stats
    })
}
