// SPDX-License-Identifier: GPL-3.0-or-later
use crate::repositories::ResolutionCache;
use anyhow::{Context, Result};
use songlink_domain::ResolvedLink;
use std::collections::BTreeMap;
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

type Entries = BTreeMap<String, ResolvedLink>;

/// Cache backed by a single JSON object file.
///
/// The file is read once on open. Every `put` rewrites the whole file through
/// a temp file in the same directory, so readers never observe a partial
/// write. Concurrent processes race last-write-wins.
#[derive(Debug)]
pub struct JsonFileCache {
    path: PathBuf,
    entries: Mutex<Entries>,
}

impl JsonFileCache {
    /// Open the cache at `path`. Missing or unreadable files start empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match load_entries(&path) {
            Ok(entries) => {
                debug!(target: "cache", path = %path.display(), entries = entries.len(), "cache loaded");
                entries
            }
            Err(e) => {
                warn!(target: "cache", path = %path.display(), error = %e, "cache unreadable, starting empty");
                Entries::new()
            }
        };

        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Entries> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ResolutionCache for JsonFileCache {
    fn get(&self, fingerprint: &str) -> Option<ResolvedLink> {
        self.lock().get(fingerprint).cloned()
    }

    fn put(&self, fingerprint: &str, link: &ResolvedLink) {
        let mut entries = self.lock();
        entries.insert(fingerprint.to_string(), link.clone());

        match write_entries(&self.path, &entries) {
            Ok(()) => debug!(target: "cache", path = %self.path.display(), "cache saved"),
            Err(e) => {
                warn!(target: "cache", path = %self.path.display(), error = %e, "failed to save cache")
            }
        }
    }
}

fn load_entries(path: &Path) -> Result<Entries> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
        Err(e) => return Err(e).with_context(|| format!("read {}", path.display())),
    };

    serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))
}

fn write_entries(path: &Path, entries: &Entries) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).with_context(|| format!("create dir {}", parent.display()))?;

    let temp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("tempfile in {}", parent.display()))?;
    {
        let mut writer = BufWriter::new(temp.as_file());
        serde_json::to_writer_pretty(&mut writer, entries).context("serialize cache")?;
        writer.flush().context("flush cache")?;
    }

    temp.persist(path)
        .with_context(|| format!("persist {}", path.display()))?;
    Ok(())
}
