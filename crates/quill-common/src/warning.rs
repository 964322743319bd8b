//! Deduplicated warnings.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the DOM, style, and bridge crates to report recoverable problems
//! (malformed link targets, unreadable style values) without failing the
//! operation that hit them.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a recoverable problem (emits once per unique message).
///
/// The warning is emitted through `tracing` at `WARN` level with the
/// component recorded as a structured field. Returns `true` if this call
/// emitted the warning, `false` if it was suppressed as a duplicate.
///
/// # Example
/// ```
/// use quill_common::warning::warn_once;
///
/// assert!(warn_once("Link", "malformed target 'http://['"));
/// assert!(!warn_once("Link", "malformed target 'http://['"));
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let should_emit = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_emit {
        tracing::warn!(component, "{message}");
    }
    should_emit
}

/// Clear all recorded warnings (call when loading a new document).
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
