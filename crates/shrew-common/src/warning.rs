//! Repair notices for malformed markup.
//!
//! The tree builder never rejects input; when it has to throw a token
//! away to keep going it reports the repair here. Notices are
//! deduplicated process-wide so a document full of the same mistake
//! produces one line on stderr, not thousands.

use std::collections::BTreeSet;
use std::sync::Mutex;

/// ANSI color codes for terminal output
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Notices already reported, for deduplication.
static SEEN: Mutex<BTreeSet<String>> = Mutex::new(BTreeSet::new());

/// Report a markup repair, printing each distinct notice once.
///
/// # Example
/// ```ignore
/// warn_once("discarding unmatched close tag </div>");
/// ```
///
/// # Panics
/// Panics if the notice set mutex is poisoned.
pub fn warn_once(message: &str) {
    let first_time = SEEN.lock().unwrap().insert(message.to_string());
    if first_time {
        eprintln!("{YELLOW}shrew: {message}{RESET}");
    }
}
