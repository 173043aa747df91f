//! Rotating file sink
//!
//! An append-only destination with size-based rotation. The active file lives
//! at the configured base path; rotated generations carry an ascending
//! numeric suffix, index 1 being the most recent. The sink is owned and
//! driven exclusively by the dispatcher thread, so it needs no internal
//! locking.

use crate::core::error::{PipelineError, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct RotatingFileSink {
    base_path: PathBuf,
    max_bytes: u64,
    /// Total files retained: active + (max_backups - 1) numbered backups.
    max_backups: usize,
    writer: Option<BufWriter<File>>,
    current_size: u64,
}

impl RotatingFileSink {
    /// Open the sink, creating parent directories and appending to any
    /// existing active file.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file cannot
    /// be opened — initialization fails fast on an unwritable location.
    pub fn open(path: impl AsRef<Path>, max_bytes: u64, max_backups: usize) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();

        if let Some(parent) = base_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    PipelineError::sink(
                        base_path.display().to_string(),
                        format!("Failed to create directory '{}': {}", parent.display(), e),
                    )
                })?;
            }
        }

        let file = open_append(&base_path)?;
        let current_size = file
            .metadata()
            .map_err(|e| {
                PipelineError::sink(
                    base_path.display().to_string(),
                    format!("Cannot access file metadata: {}", e),
                )
            })?
            .len();

        Ok(Self {
            base_path,
            max_bytes,
            max_backups,
            writer: Some(BufWriter::new(file)),
            current_size,
        })
    }

    /// Append one formatted line, rotating first when the write would push
    /// the active file past the size threshold.
    ///
    /// # Errors
    ///
    /// Rotation and write failures propagate to the caller (the dispatcher),
    /// which drops the record; the sink reopens the active file best-effort
    /// so subsequent records still persist.
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        let bytes = line.len() as u64 + 1;
        if self.current_size + bytes > self.max_bytes {
            if let Err(error) = self.rotate() {
                self.reopen_after_failure();
                return Err(error);
            }
        }

        let writer = self.writer.as_mut().ok_or_else(|| {
            PipelineError::sink(self.base_path.display().to_string(), "writer not open")
        })?;
        writer
            .write_all(line.as_bytes())
            .and_then(|()| writer.write_all(b"\n"))
            .map_err(|e| {
                PipelineError::sink(
                    self.base_path.display().to_string(),
                    format!("Failed to write record: {}", e),
                )
            })?;
        self.current_size += bytes;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        if let Some(writer) = self.writer.as_mut() {
            writer.flush().map_err(|e| {
                PipelineError::sink(
                    self.base_path.display().to_string(),
                    format!("Failed to flush: {}", e),
                )
            })?;
        }
        Ok(())
    }

    /// Shift backups up one index, evict the oldest, move the active file to
    /// index 1, and start a fresh active file. With a single retained file
    /// there are no backup slots, so the active file is truncated in place.
    fn rotate(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| {
                PipelineError::rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to flush before rotation: {}", e),
                )
            })?;
        }

        if self.max_backups <= 1 {
            let file = File::create(&self.base_path).map_err(|e| {
                PipelineError::rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to truncate active file: {}", e),
                )
            })?;
            self.writer = Some(BufWriter::new(file));
            self.current_size = 0;
            return Ok(());
        }

        // Shift k -> k+1 descending so no rename lands on a live backup.
        for index in (1..self.max_backups).rev() {
            let from = self.backup_path(index);
            let to = self.backup_path(index + 1);
            if from.exists() {
                if fs::rename(&from, &to).is_err() {
                    // Some platforms refuse to replace an existing target.
                    let _ = fs::remove_file(&to);
                    fs::rename(&from, &to).map_err(|e| {
                        PipelineError::rotation(
                            from.display().to_string(),
                            format!("Failed to shift backup: {}", e),
                        )
                    })?;
                }
            }
        }

        // Evict the generation past the retention cap.
        let oldest = self.backup_path(self.max_backups);
        if oldest.exists() {
            let _ = fs::remove_file(&oldest);
        }

        if self.base_path.exists() {
            fs::rename(&self.base_path, &self.backup_path(1)).map_err(|e| {
                PipelineError::rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to rotate active file: {}", e),
                )
            })?;
        }

        let file = open_append(&self.base_path)?;
        self.writer = Some(BufWriter::new(file));
        self.current_size = 0;
        Ok(())
    }

    /// Recovery after a failed rotation: reopen the active file so the next
    /// records are not lost along with the one being dropped.
    fn reopen_after_failure(&mut self) {
        if self.writer.is_none() {
            if let Ok(file) = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.base_path)
            {
                self.current_size = file.metadata().map(|m| m.len()).unwrap_or(0);
                self.writer = Some(BufWriter::new(file));
            }
        }
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut path = self.base_path.clone();
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("app.log");
        path.set_file_name(format!("{}.{}", filename, index));
        path
    }

    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.base_path
    }
}

fn open_append(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            PipelineError::sink(
                path.display().to_string(),
                format!("Failed to open: {}", e),
            )
        })
}

impl Drop for RotatingFileSink {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_fresh_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fresh.log");
        let sink = RotatingFileSink::open(&path, 1024, 3).unwrap();
        assert_eq!(sink.current_size(), 0);
        assert_eq!(sink.path(), path);
    }

    #[test]
    fn test_open_appends_to_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("existing.log");
        fs::write(&path, "previous content\n").unwrap();
        let sink = RotatingFileSink::open(&path, 1024, 3).unwrap();
        assert_eq!(sink.current_size(), 17);
    }

    #[test]
    fn test_open_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/deeper/app.log");
        assert!(RotatingFileSink::open(&path, 1024, 3).is_ok());
        assert!(path.parent().unwrap().exists());
    }

    #[test]
    fn test_write_tracks_size() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("size.log");
        let mut sink = RotatingFileSink::open(&path, 1024, 3).unwrap();
        sink.write_line("ten chars!").unwrap();
        assert_eq!(sink.current_size(), 11);
    }

    #[test]
    fn test_rotation_before_threshold_crossing_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("r.log");
        let mut sink = RotatingFileSink::open(&path, 20, 3).unwrap();

        sink.write_line("aaaaaaaaaa").unwrap(); // 11 bytes, fits
        sink.write_line("bbbbbbbbbb").unwrap(); // would make 22 > 20: rotate first
        sink.flush().unwrap();

        let backup = dir.path().join("r.log.1");
        assert_eq!(fs::read_to_string(&backup).unwrap(), "aaaaaaaaaa\n");
        assert_eq!(fs::read_to_string(&path).unwrap(), "bbbbbbbbbb\n");
        assert_eq!(sink.current_size(), 11);
    }

    #[test]
    fn test_backup_eviction_past_retention_cap() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("evict.log");
        // 3 total files: active + .1 + .2
        let mut sink = RotatingFileSink::open(&path, 8, 3).unwrap();

        for i in 0..6 {
            sink.write_line(&format!("line {:02}", i)).unwrap(); // 8 bytes: one line per file
        }
        sink.flush().unwrap();

        assert!(path.exists());
        assert!(dir.path().join("evict.log.1").exists());
        assert!(dir.path().join("evict.log.2").exists());
        assert!(!dir.path().join("evict.log.3").exists());

        // Most recent generation sits at index 1.
        assert_eq!(
            fs::read_to_string(dir.path().join("evict.log.1")).unwrap(),
            "line 04\n"
        );
    }

    #[test]
    fn test_single_retained_file_truncates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("solo.log");
        let mut sink = RotatingFileSink::open(&path, 16, 1).unwrap();

        sink.write_line("first line").unwrap();
        sink.write_line("second line").unwrap(); // 11 + 12 > 16: truncate
        sink.flush().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second line\n");
        assert!(!dir.path().join("solo.log.1").exists());
    }

    #[test]
    fn test_oversize_line_still_written() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("big.log");
        let mut sink = RotatingFileSink::open(&path, 8, 2).unwrap();

        let long = "x".repeat(50);
        sink.write_line(&long).unwrap();
        sink.flush().unwrap();
        assert_eq!(sink.current_size(), 51);
        assert!(fs::read_to_string(&path).unwrap().contains(&long));
    }
}
