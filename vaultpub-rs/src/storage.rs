//! Storage & presentation: where export lists go and how the user hears
//! about it.

use crate::error::{PublishError, Result};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Mutex;

/// Abstract interface for writing export lists and talking to the user.
///
/// Writes may be issued from several threads at once, each to a different
/// destination.
pub trait Storage: Sync {
    /// Replace the content at `destination` (vault-relative).
    fn write(&self, destination: &str, content: &str) -> Result<()>;

    /// Show a short acknowledgment to the user.
    fn notify_user(&self, message: &str);

    /// Called after a successful write. Defaults to doing nothing.
    fn after_write(&self, _destination: &str) -> Result<()> {
        Ok(())
    }
}

/// Writes lists into the vault directory.
#[derive(Debug)]
pub struct FsStorage {
    root: PathBuf,
    create_dirs: bool,
    open_command: Option<String>,
    quiet: bool,
}

impl FsStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            create_dirs: true,
            open_command: None,
            quiet: false,
        }
    }

    /// Create missing parent folders before writing.
    pub fn create_dirs(mut self, create_dirs: bool) -> Self {
        self.create_dirs = create_dirs;
        self
    }

    /// Open each written file with `command` after writing.
    pub fn open_with(mut self, command: Option<String>) -> Self {
        self.open_command = command;
        self
    }

    /// Suppress user notifications.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    fn full_path(&self, destination: &str) -> PathBuf {
        self.root.join(destination)
    }
}

fn write_failed(destination: &str, e: impl std::fmt::Display) -> PublishError {
    PublishError::WriteFailed {
        destination: destination.to_string(),
        message: e.to_string(),
    }
}

impl Storage for FsStorage {
    fn write(&self, destination: &str, content: &str) -> Result<()> {
        let target = self.full_path(destination);
        let parent = target
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root.clone());

        if self.create_dirs {
            fs::create_dir_all(&parent).map_err(|e| write_failed(destination, e))?;
        }

        // Write beside the target, then rename over it, so a failed write
        // never leaves a truncated list behind.
        let file_name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let tmp = parent.join(format!(".{}.{}.tmp", file_name, std::process::id()));

        fs::write(&tmp, content).map_err(|e| write_failed(destination, e))?;
        if let Err(e) = fs::rename(&tmp, &target) {
            let _ = fs::remove_file(&tmp);
            return Err(write_failed(destination, e));
        }
        Ok(())
    }

    fn notify_user(&self, message: &str) {
        if !self.quiet {
            eprintln!("{}", message);
        }
    }

    /// Open the written file with the configured command, if any.
    fn after_write(&self, destination: &str) -> Result<()> {
        let Some(ref command) = self.open_command else {
            return Ok(());
        };

        Command::new(command)
            .arg(self.full_path(destination))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| PublishError::Other(format!("Failed to run {}: {}", command, e)))?;
        Ok(())
    }
}

/// In-memory storage for tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    files: Mutex<BTreeMap<String, String>>,
    failing: HashSet<String>,
    notifications: Mutex<Vec<String>>,
    after_writes: Mutex<Vec<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every write to `destination` fail.
    pub fn fail_on(mut self, destination: impl Into<String>) -> Self {
        self.failing.insert(destination.into());
        self
    }

    /// Content stored at `destination`.
    pub fn read(&self, destination: &str) -> Option<String> {
        self.lock_files().get(destination).cloned()
    }

    /// Destinations written so far, sorted.
    pub fn destinations(&self) -> Vec<String> {
        self.lock_files().keys().cloned().collect()
    }

    pub fn notifications(&self) -> Vec<String> {
        self.notifications.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Destinations passed to `after_write`, in call order.
    pub fn after_writes(&self) -> Vec<String> {
        self.after_writes.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn lock_files(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.files.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Storage for MemoryStorage {
    fn write(&self, destination: &str, content: &str) -> Result<()> {
        if self.failing.contains(destination) {
            return Err(write_failed(destination, "simulated write failure"));
        }
        self.lock_files()
            .insert(destination.to_string(), content.to_string());
        Ok(())
    }

    fn notify_user(&self, message: &str) {
        self.notifications
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.to_string());
    }

    fn after_write(&self, destination: &str) -> Result<()> {
        self.after_writes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(destination.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fs_write_creates_dirs_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let storage = FsStorage::new(dir.path());

        storage.write("utils/publish/list.txt", "first\nlonger").unwrap();
        storage.write("utils/publish/list.txt", "second").unwrap();

        let content = fs::read_to_string(dir.path().join("utils/publish/list.txt")).unwrap();
        assert_eq!(content, "second");

        let leftovers: Vec<_> = fs::read_dir(dir.path().join("utils/publish"))
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_fs_write_missing_parent_fails_without_create_dirs() {
        let dir = TempDir::new().unwrap();
        let storage = FsStorage::new(dir.path()).create_dirs(false);

        let result = storage.write("utils/publish/list.txt", "x");
        match result {
            Err(PublishError::WriteFailed { destination, .. }) => {
                assert_eq!(destination, "utils/publish/list.txt")
            }
            other => panic!("expected WriteFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_fs_after_write_without_command_is_noop() {
        let dir = TempDir::new().unwrap();
        let storage = FsStorage::new(dir.path());
        assert!(storage.after_write("anything.txt").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_fs_after_write_runs_open_command_each_time() {
        let dir = TempDir::new().unwrap();
        let storage = FsStorage::new(dir.path()).open_with(Some("true".to_string()));
        storage.write("list.txt", "x").unwrap();

        assert!(storage.after_write("list.txt").is_ok());
        assert!(storage.after_write("list.txt").is_ok());
    }

    #[test]
    fn test_fs_after_write_unknown_command_fails() {
        let dir = TempDir::new().unwrap();
        let storage =
            FsStorage::new(dir.path()).open_with(Some("vaultpub-no-such-opener".to_string()));
        match storage.after_write("list.txt") {
            Err(PublishError::Other(message)) => assert!(message.contains("vaultpub-no-such-opener")),
            other => panic!("expected Other, got {:?}", other),
        }
    }

    #[test]
    fn test_memory_storage_failure() {
        let storage = MemoryStorage::new().fail_on("bad.txt");
        assert!(storage.write("good.txt", "ok").is_ok());
        assert!(storage.write("bad.txt", "nope").is_err());
        assert_eq!(storage.destinations(), vec!["good.txt"]);
        assert_eq!(storage.read("good.txt").as_deref(), Some("ok"));
    }
}
