//! Deduplicated parse diagnostics.
//!
//! The engine never fails a parse over one bad construct: CSS 2.1
//! error handling discards the malformed declaration or rule and moves
//! on. What was discarded still matters to whoever is debugging a
//! stylesheet, so each distinct loss is reported once on stderr.
//! Repeats are swallowed — a sheet using the same unknown property in
//! every rule produces one line, not hundreds.

use std::collections::HashSet;
use std::sync::{Mutex, OnceLock};

/// The (component, message) pairs reported so far.
static REPORTED: OnceLock<Mutex<HashSet<(String, String)>>> = OnceLock::new();

fn reported() -> &'static Mutex<HashSet<(String, String)>> {
    REPORTED.get_or_init(|| Mutex::new(HashSet::new()))
}

/// Report a recoverable parse loss.
///
/// `component` names the engine layer doing the discarding (e.g.
/// `"property"`, `"language"`); `message` says what was thrown away.
/// Each distinct (component, message) pair prints once until
/// [`clear_warnings`] is called.
///
/// # Example
/// ```ignore
/// warn_once("property", "discarding invalid value for 'color' at 3:5");
/// ```
///
/// # Panics
/// Panics if the diagnostics mutex is poisoned.
pub fn warn_once(component: &str, message: &str) {
    let mut seen = reported().lock().unwrap();
    if seen.insert((component.to_owned(), message.to_owned())) {
        eprintln!("civet: {component}: {message}");
    }
}

/// Number of distinct warnings reported since the last clear.
///
/// # Panics
/// Panics if the diagnostics mutex is poisoned.
#[must_use]
pub fn warning_count() -> usize {
    reported().lock().unwrap().len()
}

/// Forget previously reported warnings, so the next parse reports its
/// losses afresh (call between documents).
///
/// # Panics
/// Panics if the diagnostics mutex is poisoned.
pub fn clear_warnings() {
    reported().lock().unwrap().clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    // One combined test: the warning set is process-global, so
    // splitting these assertions across tests would race.
    #[test]
    fn deduplicates_counts_and_clears() {
        clear_warnings();

        warn_once("property", "discarding invalid value for 'color'");
        warn_once("property", "discarding invalid value for 'color'");
        assert_eq!(warning_count(), 1);

        // Same message under another component is a distinct warning.
        warn_once("language", "discarding invalid value for 'color'");
        assert_eq!(warning_count(), 2);

        clear_warnings();
        assert_eq!(warning_count(), 0);

        // After a clear, the same loss reports again.
        warn_once("property", "discarding invalid value for 'color'");
        assert_eq!(warning_count(), 1);

        clear_warnings();
    }
}
