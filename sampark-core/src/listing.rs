use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use schemars::JsonSchema;
use serde::Serialize;

use crate::index::LocationIndex;
use crate::MATCH_SCORE;

/// Anything carrying a free-text location: job postings, product listings.
pub trait Locatable {
    fn location(&self) -> &str;
}

/// A listing annotated with the outcome of matching it against a target
/// location. The source listing is copied in, never mutated.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct Matched<L> {
    #[serde(flatten)]
    pub listing: L,
    pub location_match: bool,
    pub location_score: i64,
    pub normalized_location: String,
}

impl<L> Matched<L> {
    fn passthrough(listing: L) -> Self {
        Matched {
            listing,
            location_match: false,
            location_score: 0,
            normalized_location: String::new(),
        }
    }
}

/// Annotate every listing with its match against `target` and rank matches
/// first, the caller-supplied popularity metric breaking ties inside each
/// partition (descending). The sort is stable, so equal listings keep their
/// input order. Jobs rank by application count; product listings have no
/// such field and pass a neutral `|_| 0`.
///
/// An empty target or an empty collection short-circuits: listings come
/// back wrapped in input order with default match fields, nothing computed.
/// Callers toggle location filtering on and off against the same source
/// data, so the input slice and its elements are left untouched.
pub fn filter_by_location<L, F>(
    index: &LocationIndex,
    listings: &[L],
    target: &str,
    popularity: F,
) -> Vec<Matched<L>>
where
    L: Locatable + Clone + Send + Sync,
    F: Fn(&L) -> i64,
{
    if target.trim().is_empty() || listings.is_empty() {
        return listings
            .iter()
            .cloned()
            .map(Matched::passthrough)
            .collect();
    }
    let target = index.resolve(target);
    let mut annotated: Vec<Matched<L>> = listings
        .par_iter()
        .map(|listing| {
            let resolved = index.resolve(listing.location());
            let location_match = !target.name().is_empty() && target.name() == resolved.name();
            Matched {
                listing: listing.clone(),
                location_match,
                location_score: if location_match { MATCH_SCORE } else { 0 },
                normalized_location: resolved.into_name(),
            }
        })
        .collect();
    annotated.sort_by(|a, b| {
        b.location_match
            .cmp(&a.location_match)
            .then_with(|| popularity(&b.listing).cmp(&popularity(&a.listing)))
    });
    annotated
}

/// Top `limit` listings for a target location. Filter, rank, truncate; a
/// limit past the end just returns everything available.
pub fn recommend_by_location<L, F>(
    index: &LocationIndex,
    listings: &[L],
    target: &str,
    limit: usize,
    popularity: F,
) -> Vec<Matched<L>>
where
    L: Locatable + Clone + Send + Sync,
    F: Fn(&L) -> i64,
{
    let mut ranked = filter_by_location(index, listings, target, popularity);
    ranked.truncate(limit);
    ranked
}
