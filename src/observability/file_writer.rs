//! Append-only line writer with size-based rotation.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, SystemTime};

/// Size at which the trace file is rotated (10 MB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Rotated files kept next to the live one.
const MAX_BACKUP_FILES: usize = 3;

/// Writes newline-terminated records to a file, rotating it when it grows
/// past [`MAX_FILE_SIZE_BYTES`].
///
/// The file is opened lazily on the first write. A rotated file is renamed
/// to `<name>.json.<unix-seconds>` and only the newest
/// [`MAX_BACKUP_FILES`] backups survive.
pub struct FileWriter {
    file_path: PathBuf,
    writer: Mutex<Option<File>>,
}

impl FileWriter {
    pub const fn new(file_path: PathBuf) -> Self {
        Self {
            file_path,
            writer: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline and flushes.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if rotation, opening or writing fails, or if the
    /// lock was poisoned.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut guard = self
            .writer
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Mutex poisoned: {e}")))?;

        self.rotate_if_needed(&mut guard, MAX_FILE_SIZE_BYTES)?;

        if guard.is_none() {
            *guard = Some(OpenOptions::new().create(true).append(true).open(&self.file_path)?);
        }
        let file = guard
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No file available"))?;

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn rotate_if_needed(&self, writer: &mut Option<File>, limit: u64) -> io::Result<()> {
        let Ok(metadata) = fs::metadata(&self.file_path) else {
            return Ok(());
        };
        if metadata.len() <= limit {
            return Ok(());
        }

        *writer = None;
        let stamp = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_secs();
        fs::rename(&self.file_path, self.file_path.with_extension(format!("json.{stamp}")))?;
        self.prune_backups()
    }

    /// Deletes all but the newest backups. Individual removal failures are ignored.
    fn prune_backups(&self) -> io::Result<()> {
        let parent = self
            .file_path
            .parent()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No parent directory"))?;
        let stem = self
            .file_path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "Invalid file name"))?;

        let mut backups: Vec<PathBuf> = fs::read_dir(parent)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| is_backup_of(path, stem))
            .collect();

        backups.sort_by_key(|path| std::cmp::Reverse(fs::metadata(path).and_then(|m| m.modified()).ok()));

        for old in backups.iter().skip(MAX_BACKUP_FILES) {
            let _ = fs::remove_file(old);
        }
        Ok(())
    }
}

fn is_backup_of(path: &Path, stem: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(stem) && name.contains(".json."))
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookshelf-otlp.json");
        let writer = FileWriter::new(path.clone());

        writer.write_line("{\"a\":1}").unwrap();
        writer.write_line("{\"b\":2}").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn test_rotation_moves_oversized_file_aside() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookshelf-otlp.json");
        fs::write(&path, "0123456789").unwrap();

        let writer = FileWriter::new(path.clone());
        let mut handle = None;
        writer.rotate_if_needed(&mut handle, 4).unwrap();

        assert!(!path.exists());
        let backups: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| is_backup_of(&e.path(), "bookshelf-otlp"))
            .collect();
        assert_eq!(backups.len(), 1);
    }

    #[test]
    fn test_prune_keeps_newest_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookshelf-otlp.json");
        for stamp in 1..=5 {
            fs::write(dir.path().join(format!("bookshelf-otlp.json.{stamp}")), "x").unwrap();
        }

        FileWriter::new(path).prune_backups().unwrap();

        let remaining = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(remaining, MAX_BACKUP_FILES);
    }
}
