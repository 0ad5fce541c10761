use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{AnalyzerError, Result};

/// Reads a log source line by line.
///
/// Invalid UTF-8 inside a line is replaced with U+FFFD rather than
/// failing the pass.
pub struct LogReader<R> {
    reader: R,
    buf: Vec<u8>,
}

impl LogReader<BufReader<File>> {
    /// Open a log file for reading
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| AnalyzerError::InputUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Reading log file: {:?}", path);
        Ok(LogReader::new(BufReader::new(file)))
    }
}

impl<R: BufRead> LogReader<R> {
    pub fn new(reader: R) -> Self {
        LogReader {
            reader,
            buf: Vec::new(),
        }
    }

    /// Read the next line without its terminator, `None` at EOF
    pub fn next_line(&mut self) -> Result<Option<String>> {
        self.buf.clear();
        let bytes_read = self.reader.read_until(b'\n', &mut self.buf)?;
        if bytes_read == 0 {
            return Ok(None);
        }

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }

        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}

impl<R: BufRead> Iterator for LogReader<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}
