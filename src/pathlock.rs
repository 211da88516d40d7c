//! Process-wide per-path locks.
//!
//! The safety codec rewrites an input file in place before and after a
//! conversion, which is not safe under concurrent readers of the same path.
//! Every disk-touching entry point takes the path's lock for the duration of
//! its work; operations on different paths proceed independently.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

static LOCKS: Lazy<Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Fetch (or create) the lock guarding a path.
pub fn lock_for(path: &Path) -> Arc<Mutex<()>> {
    let mut locks = LOCKS.lock().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(locks.entry(path.to_path_buf()).or_default())
}

/// Acquire a path lock. Poisoning is ignored; the mutex guards no state
/// of its own.
pub fn acquire(lock: &Arc<Mutex<()>>) -> MutexGuard<'_, ()> {
    lock.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Fetch locks for several paths in sorted, deduplicated order, so that two
/// operations sharing files always acquire them in the same order.
pub fn locks_for(paths: &[&Path]) -> Vec<Arc<Mutex<()>>> {
    let mut ordered: Vec<PathBuf> = paths.iter().map(|p| p.to_path_buf()).collect();
    ordered.sort();
    ordered.dedup();
    ordered.iter().map(|p| lock_for(p)).collect()
}
