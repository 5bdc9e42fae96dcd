//! Deduplicated painting diagnostics.
//!
//! Avoids spamming the same warning for every element of a page that hits
//! the same fallback (an undecodable background image, a missing text
//! rasterizer, ...). Messages are emitted through `tracing` so the host
//! decides where they end up.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a fallback or unsupported input (emitted once per unique message).
///
/// # Example
/// ```
/// use gouache_common::warning::warn_once;
///
/// warn_once("image", "layer skipped: could not decode image");
/// ```
pub fn warn_once(component: &str, message: &str) {
    if first_occurrence(component, message) {
        tracing::warn!(target: "gouache", component, "{message}");
    }
}

/// Record `message` and report whether it had not been seen before.
fn first_occurrence(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key)
}

/// Clear all recorded warnings (call when starting a new paint pass).
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_messages_are_suppressed() {
        let message = "duplicate_messages_are_suppressed sample";
        assert!(first_occurrence("test", message));
        assert!(!first_occurrence("test", message));
        assert!(first_occurrence("other", message));
    }
}
