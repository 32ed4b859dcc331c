use schemars::JsonSchema;
use serde::Serialize;
use strsim::levenshtein;
use strum_macros;
use tracing::debug;
use ustr::Ustr;

use crate::index::LocationIndex;
use crate::{clean, FUZZY_SIMILARITY_THRESHOLD, PARTIAL_MATCH_MIN_LEN};

/// Which stage of the pipeline produced a resolution.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, JsonSchema, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum MatchKind {
    Exact,
    Partial,
    Fuzzy,
    Unmatched,
}

/// Outcome of resolving one raw location string.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub cleaned: String,
    pub canonical: Option<Ustr>,
    pub kind: MatchKind,
}

impl Resolution {
    fn canonical(cleaned: String, canonical: Ustr, kind: MatchKind) -> Self {
        Resolution {
            cleaned,
            canonical: Some(canonical),
            kind,
        }
    }

    fn unmatched(cleaned: String) -> Self {
        Resolution {
            cleaned,
            canonical: None,
            kind: MatchKind::Unmatched,
        }
    }

    /// The normalized name: the canonical identifier when one was found,
    /// the cleaned input otherwise.
    pub fn name(&self) -> &str {
        match self.canonical {
            Some(c) => c.as_str(),
            None => &self.cleaned,
        }
    }

    pub fn into_name(self) -> String {
        match self.canonical {
            Some(c) => c.to_string(),
            None => self.cleaned,
        }
    }
}

/// Percentage similarity derived from Levenshtein edit distance, measured in
/// chars against the longer input. Two empty strings are fully similar.
pub fn levenshtein_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 100.0;
    }
    let dist = levenshtein(a, b);
    ((max_len - dist) as f64 / max_len as f64) * 100.0
}

impl LocationIndex {
    /// Resolve raw location text to a canonical name, first stage to
    /// succeed wins:
    ///
    /// 1. clean the input; empty stays empty
    /// 2. exact lookup against every known variant
    /// 3. containment either way, if the shorter side has at least three
    ///    chars; first hit in table order
    /// 4. best Levenshtein similarity over all variants, accepted at 60
    ///    percent or better; on equal similarity the earlier table entry
    ///    is kept
    /// 5. fall through to the cleaned text
    pub fn resolve(&self, raw: &str) -> Resolution {
        let cleaned = clean(raw);
        if cleaned.is_empty() {
            return Resolution::unmatched(cleaned);
        }
        if let Some(canonical) = self.by_variant.get(&cleaned) {
            return Resolution::canonical(cleaned, *canonical, MatchKind::Exact);
        }
        for (canonical, variant) in &self.scan {
            let variant = variant.as_str();
            if variant.len().min(cleaned.len()) >= PARTIAL_MATCH_MIN_LEN
                && (cleaned.contains(variant) || variant.contains(&cleaned))
            {
                return Resolution::canonical(cleaned, *canonical, MatchKind::Partial);
            }
        }
        let mut best: Option<(Ustr, f64)> = None;
        for (canonical, variant) in &self.scan {
            let similarity = levenshtein_similarity(&cleaned, variant.as_str());
            match best {
                Some((_, s)) if similarity <= s => {}
                _ => best = Some((*canonical, similarity)),
            }
        }
        if let Some((canonical, similarity)) = best {
            if similarity >= FUZZY_SIMILARITY_THRESHOLD {
                debug!("fuzzy resolution {cleaned} -> {canonical} ({similarity:.1}%)");
                return Resolution::canonical(cleaned, canonical, MatchKind::Fuzzy);
            }
        }
        Resolution::unmatched(cleaned)
    }

    /// Canonical name for raw location text, or the cleaned text when
    /// nothing in the table is close enough.
    pub fn normalize(&self, raw: &str) -> String {
        self.resolve(raw).into_name()
    }

    /// Whether two raw location strings refer to the same place. Two inputs
    /// that fail to canonicalize only match when their cleaned forms are
    /// identical; unrecognized places are not assumed equivalent.
    pub fn matches(&self, a: &str, b: &str) -> bool {
        let a = self.resolve(a);
        let b = self.resolve(b);
        !a.name().is_empty() && a.name() == b.name()
    }
}
