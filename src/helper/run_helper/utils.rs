use std::fs::{File, OpenOptions};
use std::io::BufWriter;
use std::io::{Result as IoResult, Write};
use std::path::Path;

use chrono::Local;

pub fn log_line<W: Write>(writer: &mut W, message: &str) -> IoResult<()> {
    let now = Local::now().format("%Y-%m-%d %H:%M:%S");
    writeln!(writer, "[{}] {}", now, message)?;
    writer.flush()?;
    Ok(())
}

/// Opens the run log for appending so successive polls share one file.
pub fn open_log(path: &Path) -> IoResult<BufWriter<File>> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_line() {
        let mut buf: Vec<u8> = Vec::new();
        log_line(&mut buf, "Summarized 3 samples").unwrap();
        let line = String::from_utf8(buf).unwrap();
        assert!(line.starts_with('['));
        assert!(line.ends_with("] Summarized 3 samples\n"));
    }

    #[test]
    fn test_open_log_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runwatch.log");
        for message in ["first", "second"] {
            let mut writer = open_log(&path).unwrap();
            log_line(&mut writer, message).unwrap();
        }
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }
}
