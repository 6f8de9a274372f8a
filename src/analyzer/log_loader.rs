//! File I/O for experiment log files.
//!
//! A log file is read to completion and its handle released before the
//! caller moves on to the next file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Buffer size for reading log files (8KB).
const BUFFER_SIZE: usize = 8 * 1024;

/// Reader over a single experiment log.
pub struct LogLoader {
    path: PathBuf,
    reader: BufReader<File>,
}

impl LogLoader {
    /// Open a log file for reading.
    ///
    /// # Returns
    ///
    /// `Ok(LogLoader)` if the file opens successfully, `Err` otherwise
    /// (`ErrorKind::NotFound` for a missing path).
    pub fn open(path: impl AsRef<Path>) -> Result<Self, std::io::Error> {
        let path = path.as_ref();
        let file = File::open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            reader: BufReader::with_capacity(BUFFER_SIZE, file),
        })
    }

    /// Read every line of the file, consuming the loader.
    ///
    /// Line terminators (`\n` or `\r\n`) are stripped. A trailing newline at
    /// the end of the file does not produce an extra empty line, but blank
    /// lines in the middle of the file are kept.
    pub fn read_lines(self) -> Result<Vec<String>, std::io::Error> {
        let lines = self.reader.lines().collect::<Result<Vec<_>, _>>()?;
        log::debug!("Read {} lines from {}", lines.len(), self.path.display());
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_all_lines_without_trailing_empty_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "0 0 1.0\r\n0 0 0.5\n").unwrap();

        let lines = LogLoader::open(file.path()).unwrap().read_lines().unwrap();
        assert_eq!(lines, vec!["0 0 1.0", "0 0 0.5"]);
    }

    #[test]
    fn keeps_blank_lines_in_the_middle() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "0 0 1.0\n\n0 0 0.5").unwrap();

        let lines = LogLoader::open(file.path()).unwrap().read_lines().unwrap();
        assert_eq!(lines, vec!["0 0 1.0", "", "0 0 0.5"]);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = LogLoader::open(dir.path().join("missing.log")).err().unwrap();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
