// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Local JSON store with per-user collection files.
//!
//! Each user owns a directory holding one JSON file per collection:
//! `<root>/<user_id>/manual_workouts.json` and so on. Files are rewritten
//! whole on every mutation via a temp-file rename, so readers never see a
//! partial write. Without a data directory the store keeps everything in
//! memory; tests and ephemeral deployments run in that mode.
//!
//! User ids are validated at the session boundary before they reach the
//! store, so they are always safe path components here.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, SystemTime};

use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::broadcast;

use crate::error::{AppError, Result};
use crate::models::{Timestamped, UserProfile};
use crate::store::collections;

/// Capacity of the change-event channel. Slow subscribers miss events
/// rather than blocking writers.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Emitted after every successful write to a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEvent {
    pub user_id: String,
    pub collection: String,
}

enum Backend {
    Disk { root: PathBuf },
    Memory(DashMap<(String, String), String>),
}

/// Collection store for all user data.
pub struct ActivityStore {
    backend: Backend,
    events: broadcast::Sender<StoreEvent>,
    /// Serializes read-modify-write cycles. Plain reads stay lock-free;
    /// atomic renames keep them consistent.
    write_lock: Mutex<()>,
}

impl ActivityStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open_disk(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|e| {
            AppError::Store(format!(
                "Failed to create data directory {}: {}",
                root.display(),
                e
            ))
        })?;
        tracing::info!(root = %root.display(), "Opened local store");

        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Ok(Self {
            backend: Backend::Disk { root },
            events,
            write_lock: Mutex::new(()),
        })
    }

    /// Open a store that lives only in memory.
    pub fn open_memory() -> Self {
        tracing::info!("Opened in-memory store");
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            backend: Backend::Memory(DashMap::new()),
            events,
            write_lock: Mutex::new(()),
        }
    }

    /// Subscribe to change events for all users and collections.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Whether records survive a restart (disk backend).
    pub fn is_persistent(&self) -> bool {
        matches!(self.backend, Backend::Disk { .. })
    }

    // ─── Record Collections ──────────────────────────────────────

    /// Read a record collection, oldest first.
    ///
    /// Missing and malformed files both come back as an empty list; a
    /// corrupt file is logged, never turned into a request error.
    pub fn read_records<T>(&self, user_id: &str, collection: &str) -> Vec<T>
    where
        T: DeserializeOwned + Timestamped,
    {
        let Some(raw) = self.read_raw(user_id, collection) else {
            return Vec::new();
        };
        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(mut records) => {
                records.sort_by_key(|r| r.timestamp_millis());
                records
            }
            Err(error) => {
                tracing::warn!(
                    user = user_id,
                    collection,
                    %error,
                    "Discarding malformed collection file"
                );
                Vec::new()
            }
        }
    }

    /// Replace a record collection.
    pub fn write_records<T>(&self, user_id: &str, collection: &str, records: &[T]) -> Result<()>
    where
        T: Serialize,
    {
        let raw = serde_json::to_string_pretty(records)
            .map_err(|e| AppError::Store(format!("Failed to encode {}: {}", collection, e)))?;
        self.write_raw(user_id, collection, &raw)
    }

    /// Append one record under the write lock.
    pub fn append_record<T>(&self, user_id: &str, collection: &str, record: T) -> Result<()>
    where
        T: Serialize + DeserializeOwned + Timestamped,
    {
        let _guard = self.lock_writes();
        let mut records: Vec<T> = self.read_records(user_id, collection);
        records.push(record);
        records.sort_by_key(|r| r.timestamp_millis());
        self.write_records(user_id, collection, &records)
    }

    /// Remove the records matching the predicate. Returns whether any did.
    pub fn remove_records<T>(
        &self,
        user_id: &str,
        collection: &str,
        matches: impl Fn(&T) -> bool,
    ) -> Result<bool>
    where
        T: Serialize + DeserializeOwned + Timestamped,
    {
        let _guard = self.lock_writes();
        let mut records: Vec<T> = self.read_records(user_id, collection);
        let before = records.len();
        records.retain(|r| !matches(r));
        if records.len() == before {
            return Ok(false);
        }
        self.write_records(user_id, collection, &records)?;
        Ok(true)
    }

    // ─── Profile ─────────────────────────────────────────────────

    /// Read a user's profile, if one has been stored.
    pub fn read_profile(&self, user_id: &str) -> Option<UserProfile> {
        let raw = self.read_raw(user_id, collections::PROFILE)?;
        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(error) => {
                tracing::warn!(user = user_id, %error, "Discarding malformed profile file");
                None
            }
        }
    }

    /// Create or replace a user's profile.
    pub fn write_profile(&self, profile: &UserProfile) -> Result<()> {
        let raw = serde_json::to_string_pretty(profile)
            .map_err(|e| AppError::Store(format!("Failed to encode profile: {}", e)))?;
        self.write_raw(&profile.id, collections::PROFILE, &raw)
    }

    /// Read-modify-write a profile under the write lock.
    ///
    /// Returns `None` when the user has no stored profile.
    pub fn update_profile(
        &self,
        user_id: &str,
        update: impl FnOnce(&mut UserProfile),
    ) -> Result<Option<UserProfile>> {
        let _guard = self.lock_writes();
        let Some(mut profile) = self.read_profile(user_id) else {
            return Ok(None);
        };
        update(&mut profile);
        self.write_profile(&profile)?;
        Ok(Some(profile))
    }

    // ─── Backend ─────────────────────────────────────────────────

    fn read_raw(&self, user_id: &str, collection: &str) -> Option<String> {
        match &self.backend {
            Backend::Disk { root } => {
                let path = collection_path(root, user_id, collection);
                match std::fs::read_to_string(&path) {
                    Ok(raw) => Some(raw),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to read collection file");
                        None
                    }
                }
            }
            Backend::Memory(map) => map
                .get(&(user_id.to_string(), collection.to_string()))
                .map(|entry| entry.clone()),
        }
    }

    fn write_raw(&self, user_id: &str, collection: &str, raw: &str) -> Result<()> {
        match &self.backend {
            Backend::Disk { root } => {
                let dir = root.join(user_id);
                std::fs::create_dir_all(&dir).map_err(|e| {
                    AppError::Store(format!("Failed to create {}: {}", dir.display(), e))
                })?;
                let path = dir.join(format!("{}.json", collection));
                let tmp = dir.join(format!("{}.json.tmp", collection));
                std::fs::write(&tmp, raw).map_err(|e| {
                    AppError::Store(format!("Failed to write {}: {}", tmp.display(), e))
                })?;
                std::fs::rename(&tmp, &path).map_err(|e| {
                    AppError::Store(format!("Failed to replace {}: {}", path.display(), e))
                })?;
            }
            Backend::Memory(map) => {
                map.insert(
                    (user_id.to_string(), collection.to_string()),
                    raw.to_string(),
                );
            }
        }
        let _ = self.events.send(StoreEvent {
            user_id: user_id.to_string(),
            collection: collection.to_string(),
        });
        Ok(())
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        // Writes are atomic renames, so a lock poisoned by a panicking
        // writer still guards a consistent store.
        match self.write_lock.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

fn collection_path(root: &Path, user_id: &str, collection: &str) -> PathBuf {
    root.join(user_id).join(format!("{}.json", collection))
}

// ─── Change Poller ───────────────────────────────────────────────

struct ScanEntry {
    path: PathBuf,
    user_id: String,
    collection: String,
    modified: SystemTime,
}

/// Watch the data directory for files modified outside this process and
/// publish a [`StoreEvent`] for each change.
///
/// In-process writers publish their own events immediately; the poller
/// may repeat one of those a tick later, and subscribers treat every
/// event as a refresh hint. Returns `None` for in-memory stores.
pub fn spawn_mtime_poller(
    store: Arc<ActivityStore>,
    interval: Duration,
) -> Option<tokio::task::JoinHandle<()>> {
    let root = match &store.backend {
        Backend::Disk { root } => root.clone(),
        Backend::Memory(_) => return None,
    };
    tracing::info!(interval_secs = interval.as_secs(), "Starting store change poller");

    Some(tokio::spawn(async move {
        let mut seen: HashMap<PathBuf, SystemTime> = HashMap::new();
        let mut first_scan = true;
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            for entry in scan_collections(&root) {
                let previous = seen.insert(entry.path, entry.modified);
                let changed = previous.map_or(!first_scan, |prev| prev != entry.modified);
                if changed {
                    let _ = store.events.send(StoreEvent {
                        user_id: entry.user_id,
                        collection: entry.collection,
                    });
                }
            }
            first_scan = false;
        }
    }))
}

fn scan_collections(root: &Path) -> Vec<ScanEntry> {
    let mut entries = Vec::new();
    let Ok(users) = std::fs::read_dir(root) else {
        return entries;
    };
    for user_entry in users.flatten() {
        let user_dir = user_entry.path();
        if !user_dir.is_dir() {
            continue;
        }
        let user_id = user_entry.file_name().to_string_lossy().into_owned();
        let Ok(files) = std::fs::read_dir(&user_dir) else {
            continue;
        };
        for file in files.flatten() {
            let path = file.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            // Skips in-flight .json.tmp files
            let Some(collection) = name.strip_suffix(".json") else {
                continue;
            };
            let Some(modified) = file.metadata().ok().and_then(|m| m.modified().ok()) else {
                continue;
            };
            entries.push(ScanEntry {
                path: path.clone(),
                user_id: user_id.clone(),
                collection: collection.to_string(),
                modified,
            });
        }
    }
    entries
}
