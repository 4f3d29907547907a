//! Scoped document sessions: open → act → save → release.
//!
//! [`with_document`] is the only way the rest of the system touches a
//! spreadsheet file. It owns the whole lifecycle as a single-entry,
//! single-exit scope: the per-path lock and the loaded book are released on
//! every exit path (including errors and panics inside the operation), and
//! persistence happens only after the operation succeeds. A failed operation
//! never flushes partial in-memory mutations.
//!
//! Concurrent sessions against the same file are serialized by an async
//! mutex keyed by canonicalized path; sessions on different files proceed
//! independently.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex as StdMutex, OnceLock};

use tokio::sync::Mutex as AsyncMutex;

use crate::book::Book;
use crate::error::{Result, WorkbookError};
use crate::xlsx;

static PATH_LOCKS: OnceLock<StdMutex<HashMap<PathBuf, Arc<AsyncMutex<()>>>>> = OnceLock::new();

/// Fetch (or create) the lock guarding one document path.
fn lock_for(path: &Path) -> Arc<AsyncMutex<()>> {
    // Canonicalization fails for paths that don't exist yet; fall back to the
    // raw path so DocumentNotFound is still reported under the lock.
    let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

    let registry = PATH_LOCKS.get_or_init(|| StdMutex::new(HashMap::new()));
    let mut map = registry.lock().unwrap_or_else(|e| e.into_inner());
    map.entry(key)
        .or_insert_with(|| Arc::new(AsyncMutex::new(())))
        .clone()
}

/// Run `op` against the document at `path` inside a scoped session.
///
/// Fails with [`WorkbookError::DocumentNotFound`] if the path does not exist
/// before open. The book is persisted only when `op` succeeded *and* marked
/// it dirty; pure reads never rewrite the file.
pub async fn with_document<F, T>(path: &Path, op: F) -> Result<T>
where
    F: FnOnce(&mut Book) -> Result<T>,
{
    let lock = lock_for(path);
    let _guard = lock.lock().await;

    if !path.exists() {
        return Err(WorkbookError::DocumentNotFound(path.to_path_buf()));
    }

    tracing::debug!(path = %path.display(), "opening document session");
    let mut book = xlsx::load(path)?;

    let outcome = op(&mut book)?;

    if book.is_dirty() {
        xlsx::save(&book, path)?;
        tracing::debug!(path = %path.display(), "document persisted");
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::Book;
    use tempfile::tempdir;

    fn seed(path: &Path) {
        let mut book = Book::new();
        book.add_sheet("Sheet1").set_value(0, 0, "seed");
        xlsx::save(&book, path).unwrap();
    }

    #[tokio::test]
    async fn test_missing_document_is_document_not_found() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.xlsx");

        let result = with_document(&path, |_| Ok(())).await;
        assert!(matches!(result, Err(WorkbookError::DocumentNotFound(p)) if p == path));
    }

    #[tokio::test]
    async fn test_mutation_persists_across_sessions() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("persist.xlsx");
        seed(&path);

        with_document(&path, |book| {
            book.sheet_mut("Sheet1").unwrap().set_value(0, 2, "Done");
            Ok(())
        })
        .await
        .unwrap();

        let value = with_document(&path, |book| {
            Ok(book.sheet("Sheet1").unwrap().value(0, 2).to_string())
        })
        .await
        .unwrap();

        assert_eq!(value, "Done");
    }

    #[tokio::test]
    async fn test_pure_read_does_not_rewrite_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("readonly.xlsx");
        seed(&path);
        let before = std::fs::read(&path).unwrap();

        with_document(&path, |book| {
            Ok(book.sheet("Sheet1").unwrap().value(0, 0).to_string())
        })
        .await
        .unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), before);
    }

    #[tokio::test]
    async fn test_failed_op_discards_mutations_and_releases_lock() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("faulty.xlsx");
        seed(&path);
        let before = std::fs::read(&path).unwrap();

        // Fault-injected operation: mutate, then fail partway through.
        let result: Result<()> = with_document(&path, |book| {
            book.sheet_mut("Sheet1").unwrap().set_value(0, 0, "partial");
            Err(WorkbookError::SheetNotFound("Ghost".into()))
        })
        .await;
        assert!(result.is_err());

        // Nothing was flushed.
        assert_eq!(std::fs::read(&path).unwrap(), before);

        // The lock was released: a subsequent session runs and sees the
        // original value.
        let value = with_document(&path, |book| {
            Ok(book.sheet("Sheet1").unwrap().value(0, 0).to_string())
        })
        .await
        .unwrap();
        assert_eq!(value, "seed");
    }

    #[tokio::test]
    async fn test_concurrent_sessions_on_same_path_are_serialized() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("counter.xlsx");
        {
            let mut book = Book::new();
            book.add_sheet("Sheet1").set_value(0, 0, "0");
            xlsx::save(&book, &path).unwrap();
        }

        let mut handles = Vec::new();
        for _ in 0..8 {
            let path = path.clone();
            handles.push(tokio::spawn(async move {
                with_document(&path, |book| {
                    let current: u64 = book
                        .sheet("Sheet1")
                        .unwrap()
                        .value(0, 0)
                        .parse()
                        .unwrap_or(0);
                    book.sheet_mut("Sheet1")
                        .unwrap()
                        .set_value(0, 0, (current + 1).to_string());
                    Ok(())
                })
                .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let total = with_document(&path, |book| {
            Ok(book.sheet("Sheet1").unwrap().value(0, 0).to_string())
        })
        .await
        .unwrap();
        assert_eq!(total, "8");
    }
}
