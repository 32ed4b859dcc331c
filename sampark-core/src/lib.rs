extern crate core;

use std::sync::LazyLock;

use regex::Regex;

pub use smallvec;
pub use ustr;

pub mod config;
pub mod index;
pub mod listing;
pub mod matcher;

/// Score attached to a listing whose location matches the target.
pub const MATCH_SCORE: i64 = 100;

/// Minimum length of the shorter string before a containment check counts
/// as a partial match. Keeps two-letter fragments from swallowing names.
const PARTIAL_MATCH_MIN_LEN: usize = 3;

/// Minimum Levenshtein similarity (percent) for a fuzzy resolution.
const FUZZY_SIMILARITY_THRESHOLD: f64 = 60.0;

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]+").expect("clean regex"));

/// Reduce raw location text to its comparable form: ASCII-fold, lowercase,
/// drop everything that is neither a word character nor whitespace, collapse
/// whitespace runs. Idempotent.
pub fn clean(s: &str) -> String {
    let folded = deunicode::deunicode(s).to_lowercase();
    let stripped = NON_WORD.replace_all(&folded, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
