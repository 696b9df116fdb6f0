//! Warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the selector engine and the HTML importer to report input that is
//! accepted but not fully honoured.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Whether warnings reach stderr at all.
static ENABLED: AtomicBool = AtomicBool::new(true);

/// Warn about partially supported input (prints once per unique message)
///
/// # Example
/// ```
/// use sprig_common::warning::warn_once;
///
/// warn_once("Selector", "only the last positional pseudo-class is used in 'li:first-child:last-child'");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let first_time = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if first_time && ENABLED.load(Ordering::Relaxed) {
        eprintln!("{}", format!("[sprig {component}] ⚠ {message}").yellow());
    }
}

/// Returns true if `component`/`message` has already been reported.
#[must_use]
pub fn was_warned(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key))
}

/// Turn stderr output on or off. Warnings are still recorded while disabled.
pub fn set_warnings_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}
