//! Tracing setup: a size-rotated log file plus a quiet stderr console.
//!
//! The file receives everything at the chosen level; the console only shows
//! WARN and above so normal runs print just the order report.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use bft_config::LogConfig;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

// ---------------------------------------------------------------------------
// RotatingFileWriter
// ---------------------------------------------------------------------------

/// Appends to `path`; when the next write would push the file past
/// `max_bytes`, shifts `path.1 .. path.{n-1}` up by one, moves `path` to
/// `path.1` and starts a fresh file. At most `max_backups` old files are kept.
#[derive(Debug)]
pub struct RotatingFileWriter {
    path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    file: File,
    written: u64,
}

impl RotatingFileWriter {
    pub fn open(path: impl Into<PathBuf>, max_bytes: u64, max_backups: usize) -> io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = open_append(&path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            path,
            max_bytes,
            max_backups,
            file,
            written,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn backup_path(&self, n: usize) -> PathBuf {
        let mut s: OsString = self.path.as_os_str().to_owned();
        s.push(format!(".{n}"));
        PathBuf::from(s)
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        if self.max_backups == 0 {
            self.file = OpenOptions::new().write(true).truncate(true).open(&self.path)?;
            self.written = 0;
            return Ok(());
        }

        let oldest = self.backup_path(self.max_backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for n in (1..self.max_backups).rev() {
            let from = self.backup_path(n);
            if from.exists() {
                fs::rename(&from, self.backup_path(n + 1))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))?;

        self.file = open_append(&self.path)?;
        self.written = 0;
        Ok(())
    }
}

impl Write for RotatingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        // Whole record or nothing, so one event never straddles two files.
        self.file.write_all(buf)?;
        self.written += buf.len() as u64;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

// ---------------------------------------------------------------------------
// Subscriber
// ---------------------------------------------------------------------------

/// Install the global subscriber. Call once, before anything logs.
pub fn init(cfg: &LogConfig) -> Result<()> {
    let path = cfg.file_path();
    let writer = RotatingFileWriter::open(&path, cfg.max_bytes, cfg.max_backups)
        .with_context(|| format!("open log file {}", path.display()))?;

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(writer))
        .with_filter(EnvFilter::new(cfg.level.as_filter_directive()));

    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(io::stderr)
        .with_filter(LevelFilter::WARN);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .context("install tracing subscriber")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap_or_default()
    }

    #[test]
    fn appends_below_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("bot.log");

        let mut w = RotatingFileWriter::open(&path, 1024, 3).unwrap();
        w.write_all(b"first\n").unwrap();
        w.write_all(b"second\n").unwrap();
        w.flush().unwrap();

        assert_eq!(read(&path), "first\nsecond\n");
        assert!(!w.backup_path(1).exists());
    }

    #[test]
    fn rotates_and_keeps_at_most_three_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bot.log");
        let mut w = RotatingFileWriter::open(&path, 10, 3).unwrap();

        for i in 0..6 {
            // 8 bytes each: every write after the first rotates.
            w.write_all(format!("line-{i:02}\n").as_bytes()).unwrap();
        }
        w.flush().unwrap();

        assert_eq!(read(&path), "line-05\n");
        assert_eq!(read(&w.backup_path(1)), "line-04\n");
        assert_eq!(read(&w.backup_path(2)), "line-03\n");
        assert_eq!(read(&w.backup_path(3)), "line-02\n");
        assert!(!w.backup_path(4).exists());
    }

    #[test]
    fn reopening_counts_existing_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bot.log");
        fs::write(&path, "123456789\n").unwrap();

        let mut w = RotatingFileWriter::open(&path, 12, 1).unwrap();
        w.write_all(b"abc\n").unwrap();
        w.flush().unwrap();

        assert_eq!(read(&path), "abc\n");
        assert_eq!(read(&w.backup_path(1)), "123456789\n");
    }
}
