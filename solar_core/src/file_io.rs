//! # File I/O Module
//!
//! Persistence for the device list and settings, with:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **File locking**: Serialize concurrent writers to the same store
//! - **Version validation**: Ensure schema compatibility
//!
//! ## Layout
//!
//! The store lives in a data directory (`APP_DATA_DIR`, or `./data` when
//! unset) as a single `app.json`. The lock file is `app.json.lock` and
//! holds metadata about who holds the lock.
//!
//! ## Example
//!
//! ```rust,no_run
//! use solar_core::file_io::DataStore;
//! use solar_core::devices::{Device, DeviceList};
//!
//! let store = DataStore::from_env()?;
//! let mut devices = store.load_devices()?;
//! devices.add(Device::new("Fridge", 120.0, 8.0, 1)?);
//! store.save_devices(&devices)?;
//! # Ok::<(), solar_core::errors::CalcError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::devices::DeviceList;
use crate::document::{StoreDocument, SCHEMA_VERSION};
use crate::errors::{CalcError, CalcResult};
use crate::settings::Settings;

/// Environment variable naming the data directory
pub const DATA_DIR_ENV: &str = "APP_DATA_DIR";

/// Data directory used when [`DATA_DIR_ENV`] is unset
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Store file name inside the data directory
pub const STORE_FILE_NAME: &str = "app.json";

/// Lock file metadata stored in .lock files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    /// User identifier
    pub user_id: String,
    /// Machine name where lock was acquired
    pub machine: String,
    /// Process ID that holds the lock
    pub pid: u32,
    /// When the lock was acquired
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    /// Create new lock info for the current process
    pub fn new(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }
}

/// Get the hostname of the current machine
fn hostname() -> Option<String> {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOSTNAME")
            .ok()
            .or_else(|| std::env::var("HOST").ok())
    }
}

/// Current user name for lock metadata
fn current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "solar".to_string())
}

/// File lock guard that releases the lock when dropped.
///
/// Uses both:
/// 1. OS-level file locking (via fs2) for process safety
/// 2. .lock file with metadata for user visibility
///
/// The lock file is never deleted. Release empties it and drops the OS
/// lock, so every process always locks the same inode.
pub struct FileLock {
    /// Path to the locked store file
    store_path: PathBuf,
    /// The underlying file handle (keeps OS lock)
    lock_file: File,
    /// Lock metadata
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire an exclusive lock on a store file.
    ///
    /// # Returns
    ///
    /// * `Ok(FileLock)` - Lock acquired successfully
    /// * `Err(CalcError::FileLocked)` - Another process holds the lock
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> CalcResult<Self> {
        let lock_path = lock_path_for(path);
        let info = LockInfo::new(user_id);

        if lock_path.exists() {
            if let Ok(existing) = read_lock_info(&lock_path) {
                if !is_lock_stale(&existing) {
                    return Err(CalcError::file_locked(
                        path.display().to_string(),
                        format!("{} ({})", existing.user_id, existing.machine),
                        existing.locked_at.to_rfc3339(),
                    ));
                }
                warn!(
                    path = %lock_path.display(),
                    holder = %existing.user_id,
                    pid = existing.pid,
                    "taking over stale lock"
                );
            }
        }

        let mut lock_file = OpenOptions::new()
            .write(true)
            .read(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| {
                CalcError::file_error("create lock", lock_path.display().to_string(), e.to_string())
            })?;

        // Non-blocking; a concurrent holder makes this fail immediately
        lock_file.try_lock_exclusive().map_err(|_| {
            CalcError::file_locked(
                path.display().to_string(),
                "another process".to_string(),
                "unknown".to_string(),
            )
        })?;

        let lock_json = serde_json::to_string_pretty(&info).map_err(CalcError::serialization)?;

        // Only the holder may overwrite the metadata
        lock_file.set_len(0).map_err(|e| {
            CalcError::file_error("truncate lock", lock_path.display().to_string(), e.to_string())
        })?;
        lock_file.write_all(lock_json.as_bytes()).map_err(|e| {
            CalcError::file_error("write lock", lock_path.display().to_string(), e.to_string())
        })?;

        lock_file.sync_all().map_err(|e| {
            CalcError::file_error("sync lock", lock_path.display().to_string(), e.to_string())
        })?;

        debug!(path = %path.display(), "lock acquired");

        Ok(FileLock {
            store_path: path.to_path_buf(),
            lock_file,
            info,
        })
    }

    /// Check if a file is locked without acquiring the lock.
    ///
    /// Returns `Some(LockInfo)` if locked, `None` if available.
    pub fn check(path: &Path) -> Option<LockInfo> {
        let lock_path = lock_path_for(path);
        if lock_path.exists() {
            if let Ok(info) = read_lock_info(&lock_path) {
                if !is_lock_stale(&info) {
                    return Some(info);
                }
            }
        }
        None
    }

    /// Get the path to the locked store file
    pub fn store_path(&self) -> &Path {
        &self.store_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Empty metadata marks the lock free; unlock before the handle closes
        let _ = self.lock_file.set_len(0);
        let _ = FileExt::unlock(&self.lock_file);
    }
}

/// Get the lock file path for a store file
fn lock_path_for(store_path: &Path) -> PathBuf {
    let mut lock_path = store_path.to_path_buf();
    let extension = lock_path
        .extension()
        .map(|e| format!("{}.lock", e.to_string_lossy()))
        .unwrap_or_else(|| "lock".to_string());
    lock_path.set_extension(extension);
    lock_path
}

/// Read lock info from a lock file
fn read_lock_info(lock_path: &Path) -> CalcResult<LockInfo> {
    let contents = read_to_string(lock_path, "read lock")?;
    serde_json::from_str(&contents).map_err(CalcError::serialization)
}

/// Check if a lock is stale (the process that created it is no longer running)
fn is_lock_stale(info: &LockInfo) -> bool {
    if let Some(our_machine) = hostname() {
        if info.machine == our_machine {
            #[cfg(windows)]
            {
                use std::process::Command;
                let output = Command::new("tasklist")
                    .args(["/FI", &format!("PID eq {}", info.pid), "/NH"])
                    .output();
                if let Ok(output) = output {
                    let stdout = String::from_utf8_lossy(&output.stdout);
                    if stdout.contains("No tasks") || !stdout.contains(&info.pid.to_string()) {
                        return true;
                    }
                }
            }
            #[cfg(unix)]
            {
                if fs::metadata(format!("/proc/{}", info.pid)).is_err() {
                    return true;
                }
            }
        }
    }

    // Anything older than a day is abandoned
    let age = Utc::now() - info.locked_at;
    age.num_hours() > 24
}

fn read_to_string(path: &Path, operation: &str) -> CalcResult<String> {
    let mut file = File::open(path)
        .map_err(|e| CalcError::file_error(operation, path.display().to_string(), e.to_string()))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| CalcError::file_error(operation, path.display().to_string(), e.to_string()))?;
    Ok(contents)
}

/// Save a store document with atomic write semantics.
///
/// The save process:
/// 1. Serialize document to JSON
/// 2. Write to a temporary file (.tmp)
/// 3. Sync to disk (fsync)
/// 4. Rename .tmp over the target (atomic on most filesystems)
pub fn save_document(document: &StoreDocument, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(document).map_err(CalcError::serialization)?;

    let tmp_path = path.with_extension("json.tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Load a store document.
///
/// # Returns
///
/// * `Ok(StoreDocument)` - Successfully loaded, all devices valid
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
/// * `Err(CalcError::InvalidInput)` - A stored device fails validation
pub fn load_document(path: &Path) -> CalcResult<StoreDocument> {
    let contents = read_to_string(path, "read")?;

    let document: StoreDocument = serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;

    validate_version(&document.meta.version)?;
    document.devices.validate()?;

    Ok(document)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version.split('.').filter_map(|p| p.parse().ok()).collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION.split('.').filter_map(|p| p.parse().ok()).collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // 0.x: a newer minor may carry breaking changes
    if current_parts[0] == 0
        && file_parts.len() > 1
        && current_parts.len() > 1
        && file_parts[1] > current_parts[1]
    {
        return Err(mismatch());
    }

    Ok(())
}

/// Keyed document store holding the `devices` and `settings` records.
///
/// Every save locks the store, re-reads the current document, replaces one
/// record and writes the document back atomically.
#[derive(Debug, Clone)]
pub struct DataStore {
    dir: PathBuf,
    user_id: String,
}

impl DataStore {
    /// Open (and create if needed) a store in `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> CalcResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            CalcError::file_error("create data dir", dir.display().to_string(), e.to_string())
        })?;
        Ok(DataStore {
            dir,
            user_id: current_user(),
        })
    }

    /// Open the store named by `APP_DATA_DIR`, or `./data`.
    pub fn from_env() -> CalcResult<Self> {
        let dir = std::env::var_os(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        Self::open(dir)
    }

    /// Data directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path to the store file
    pub fn path(&self) -> PathBuf {
        self.dir.join(STORE_FILE_NAME)
    }

    /// Load the whole document. A missing file yields an empty document.
    pub fn load(&self) -> CalcResult<StoreDocument> {
        let path = self.path();
        if !path.exists() {
            debug!(path = %path.display(), "no store file yet, using empty document");
            return Ok(StoreDocument::new());
        }
        load_document(&path)
    }

    /// Load the `devices` record
    pub fn load_devices(&self) -> CalcResult<DeviceList> {
        Ok(self.load()?.devices)
    }

    /// Load the `settings` record
    pub fn load_settings(&self) -> CalcResult<Settings> {
        Ok(self.load()?.settings)
    }

    /// Replace the `devices` record
    pub fn save_devices(&self, devices: &DeviceList) -> CalcResult<()> {
        devices.validate()?;
        self.update(|doc| doc.replace_devices(devices.clone()))?;
        info!(count = devices.len(), "devices saved");
        Ok(())
    }

    /// Replace the `settings` record
    pub fn save_settings(&self, settings: &Settings) -> CalcResult<()> {
        settings.validate()?;
        self.update(|doc| doc.replace_settings(settings.clone()))?;
        info!("settings saved");
        Ok(())
    }

    fn update(&self, apply: impl FnOnce(&mut StoreDocument)) -> CalcResult<()> {
        let path = self.path();
        let _lock = FileLock::acquire(&path, self.user_id.clone())?;
        let mut document = self.load()?;
        apply(&mut document);
        save_document(&document, &path)
    }
}
