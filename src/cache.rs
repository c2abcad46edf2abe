//! On-disk cache of scan reports, keyed by barcode.
//!
//! The file is a JSON object `barcode -> { report, updated_at }` where
//! `updated_at` is seconds since the Unix epoch. An entry is served only while
//! `now - updated_at <= ttl`; older entries behave as if absent and are
//! dropped from the file on the next write.
//!
//! A missing or corrupt file is an empty cache. Write failures are logged and
//! never fail the scan that produced the report.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::ScanReport;

/// Storage consulted before and written after classification.
pub trait ResultCache {
    /// Stored report for `barcode`, unless absent or expired.
    fn get(&self, barcode: &str) -> Option<ScanReport>;
    /// Insert or replace the report for `barcode`.
    fn put(&self, barcode: &str, report: &ScanReport);
}

/// Cache used with `--no-cache` or when caching is disabled in config.
pub struct NoCache;

impl ResultCache for NoCache {
    fn get(&self, _barcode: &str) -> Option<ScanReport> {
        None
    }

    fn put(&self, _barcode: &str, _report: &ScanReport) {}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    report: ScanReport,
    updated_at: u64,
}

pub struct FileCache {
    path: PathBuf,
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

fn now_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

impl FileCache {
    /// Open the cache at `path`, loading any existing entries.
    pub fn open(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        let path = path.into();
        let entries = if path.exists() {
            match load_entries(&path) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("failed to load scan cache (starting empty): {e:#}");
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };
        debug!(path = %path.display(), entries = entries.len(), "opened scan cache");
        Self {
            path,
            ttl,
            entries: Mutex::new(entries),
        }
    }

    fn get_at(&self, barcode: &str, now: u64) -> Option<ScanReport> {
        let entries = self.entries.lock().ok()?;
        let entry = entries.get(barcode)?;
        let age = now.saturating_sub(entry.updated_at);
        if age > self.ttl.as_secs() {
            debug!(barcode, age, "cache entry expired");
            return None;
        }
        Some(entry.report.clone())
    }

    fn put_at(&self, barcode: &str, report: &ScanReport, now: u64) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("scan cache lock poisoned"))?;
        let ttl = self.ttl.as_secs();
        let before = entries.len();
        entries.retain(|_, entry| now.saturating_sub(entry.updated_at) <= ttl);
        if entries.len() < before {
            debug!(pruned = before - entries.len(), "dropped expired cache entries");
        }
        entries.insert(
            barcode.to_string(),
            CacheEntry {
                report: report.clone(),
                updated_at: now,
            },
        );
        write_entries(&self.path, &entries)
    }
}

impl ResultCache for FileCache {
    fn get(&self, barcode: &str) -> Option<ScanReport> {
        self.get_at(barcode, now_ts())
    }

    fn put(&self, barcode: &str, report: &ScanReport) {
        if let Err(e) = self.put_at(barcode, report, now_ts()) {
            warn!(barcode, "failed to write scan cache: {e:#}");
        }
    }
}

fn load_entries(path: &Path) -> Result<HashMap<String, CacheEntry>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read scan cache: {}", path.display()))?;
    serde_json::from_str(&content).context("failed to parse scan cache JSON")
}

fn write_entries(path: &Path, entries: &HashMap<String, CacheEntry>) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    let json = serde_json::to_string(entries).context("failed to serialize scan cache")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write scan cache: {}", path.display()))
}
