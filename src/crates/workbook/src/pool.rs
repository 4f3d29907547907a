//! Optional cross-request document cache.
//!
//! By default every session reopens its document from disk. For workloads
//! where reopen cost dominates, [`DocumentPool`] keeps loaded books alive
//! between requests with an explicit lifecycle: writes are flushed through to
//! disk immediately, idle entries are evicted by [`DocumentPool::evict_idle`]
//! (driven from a periodic task by the embedder), and
//! [`DocumentPool::shutdown`] flushes and drops everything.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::book::Book;
use crate::error::{Result, WorkbookError};
use crate::xlsx;

struct PoolEntry {
    book: Book,
    last_used: Instant,
}

/// A keep-alive cache of open documents, keyed by path.
pub struct DocumentPool {
    idle_timeout: Duration,
    entries: Mutex<HashMap<PathBuf, PoolEntry>>,
}

impl DocumentPool {
    /// Create a pool whose entries expire after `idle_timeout` without use.
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            idle_timeout,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Run `op` against the (possibly cached) document at `path`.
    ///
    /// Same contract as [`crate::session::with_document`]: the document must
    /// exist on first open, a failed `op` flushes nothing, and mutations are
    /// written through to disk before returning. Holding the pool lock for
    /// the duration of `op` serializes pool sessions, matching the
    /// one-operation-per-request model.
    pub async fn with_document<F, T>(&self, path: &Path, op: F) -> Result<T>
    where
        F: FnOnce(&mut Book) -> Result<T>,
    {
        let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        let mut entries = self.entries.lock().await;

        if !entries.contains_key(&key) {
            if !path.exists() {
                return Err(WorkbookError::DocumentNotFound(path.to_path_buf()));
            }
            tracing::debug!(path = %path.display(), "pool loading document");
            entries.insert(
                key.clone(),
                PoolEntry {
                    book: xlsx::load(path)?,
                    last_used: Instant::now(),
                },
            );
        }

        let entry = entries
            .get_mut(&key)
            .ok_or_else(|| WorkbookError::DocumentNotFound(path.to_path_buf()))?;
        entry.last_used = Instant::now();

        let outcome = op(&mut entry.book)?;

        if entry.book.is_dirty() {
            xlsx::save(&entry.book, path)?;
            entry.book.clear_dirty();
            tracing::debug!(path = %path.display(), "pool flushed document");
        }

        Ok(outcome)
    }

    /// Drop entries idle for longer than the configured timeout, flushing any
    /// that still carry unsaved changes. Returns the number evicted.
    pub async fn evict_idle(&self) -> usize {
        let mut entries = self.entries.lock().await;
        let mut evicted = 0;

        entries.retain(|path, entry| {
            if entry.last_used.elapsed() < self.idle_timeout {
                return true;
            }
            if entry.book.is_dirty() {
                if let Err(e) = xlsx::save(&entry.book, path) {
                    tracing::warn!(path = %path.display(), error = %e, "flush on eviction failed");
                }
            }
            tracing::debug!(path = %path.display(), "pool evicted idle document");
            evicted += 1;
            false
        });

        evicted
    }

    /// Flush every dirty entry and drop the whole cache.
    pub async fn shutdown(&self) {
        let mut entries = self.entries.lock().await;
        for (path, entry) in entries.iter() {
            if entry.book.is_dirty() {
                if let Err(e) = xlsx::save(&entry.book, path) {
                    tracing::warn!(path = %path.display(), error = %e, "flush on shutdown failed");
                }
            }
        }
        entries.clear();
    }

    /// Number of documents currently held open.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn seed(path: &Path) {
        let mut book = Book::new();
        book.add_sheet("Sheet1").set_value(0, 0, "seed");
        xlsx::save(&book, path).unwrap();
    }

    #[tokio::test]
    async fn test_pool_reuses_loaded_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pooled.xlsx");
        seed(&path);

        let pool = DocumentPool::new(Duration::from_secs(60));

        pool.with_document(&path, |book| {
            book.sheet_mut("Sheet1").unwrap().set_value(0, 1, "cached");
            Ok(())
        })
        .await
        .unwrap();
        assert_eq!(pool.len().await, 1);

        let value = pool
            .with_document(&path, |book| {
                Ok(book.sheet("Sheet1").unwrap().value(0, 1).to_string())
            })
            .await
            .unwrap();
        assert_eq!(value, "cached");
        assert_eq!(pool.len().await, 1);
    }

    #[tokio::test]
    async fn test_pool_writes_through_to_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("through.xlsx");
        seed(&path);

        let pool = DocumentPool::new(Duration::from_secs(60));
        pool.with_document(&path, |book| {
            book.sheet_mut("Sheet1").unwrap().set_value(2, 0, "flushed");
            Ok(())
        })
        .await
        .unwrap();

        // Visible to a fresh load that bypasses the pool.
        let fresh = xlsx::load(&path).unwrap();
        assert_eq!(fresh.sheet("Sheet1").unwrap().value(2, 0), "flushed");
    }

    #[tokio::test]
    async fn test_pool_missing_document() {
        let dir = tempdir().unwrap();
        let pool = DocumentPool::new(Duration::from_secs(60));
        let result = pool
            .with_document(&dir.path().join("absent.xlsx"), |_| Ok(()))
            .await;
        assert!(matches!(result, Err(WorkbookError::DocumentNotFound(_))));
    }

    #[tokio::test]
    async fn test_idle_entries_are_evicted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("idle.xlsx");
        seed(&path);

        let pool = DocumentPool::new(Duration::ZERO);
        pool.with_document(&path, |_| Ok(())).await.unwrap();
        assert_eq!(pool.len().await, 1);

        assert_eq!(pool.evict_idle().await, 1);
        assert_eq!(pool.len().await, 0);
    }

    #[tokio::test]
    async fn test_fresh_entries_survive_eviction() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fresh.xlsx");
        seed(&path);

        let pool = DocumentPool::new(Duration::from_secs(600));
        pool.with_document(&path, |_| Ok(())).await.unwrap();

        assert_eq!(pool.evict_idle().await, 0);
        assert_eq!(pool.len().await, 1);
    }

    #[tokio::test]
    async fn test_shutdown_drops_everything() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("down.xlsx");
        seed(&path);

        let pool = DocumentPool::new(Duration::from_secs(600));
        pool.with_document(&path, |_| Ok(())).await.unwrap();

        pool.shutdown().await;
        assert_eq!(pool.len().await, 0);
    }
}
