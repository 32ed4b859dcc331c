use schemars::JsonSchema;
use serde::Serialize;

use sampark_core::index::LocationIndex;
use sampark_core::listing::{filter_by_location, recommend_by_location, Locatable};
use sampark_core::matcher::MatchKind;

#[derive(Debug, Clone, Serialize, JsonSchema)]
struct Job {
    title: String,
    location: String,
    applications: i64,
}

impl Locatable for Job {
    fn location(&self) -> &str {
        &self.location
    }
}

fn job(title: &str, location: &str, applications: i64) -> Job {
    Job {
        title: title.to_string(),
        location: location.to_string(),
        applications,
    }
}

#[test]
fn bundled_table_resolves_odisha_spellings() {
    let idx = LocationIndex::builtin();
    assert_eq!(idx.normalize("Bolangir"), "balangir");
    assert_eq!(idx.normalize("Orissa"), "odisha");
    assert_eq!(idx.normalize("Bhubaneshwar"), "bhubaneswar");
    assert_eq!(idx.normalize("Calcutta"), "kolkata");
    assert!(idx.matches("Bolangir", "Balangir"));
    assert!(idx.matches("Bombay", "Mumbai"));
    assert!(!idx.matches("Cuttack", "Mumbai"));
}

#[test]
fn bundled_table_survives_punctuation_and_case() {
    let idx = LocationIndex::builtin();
    assert_eq!(idx.normalize("  BALANGIR, Odisha "), "balangir");
    assert_eq!(idx.normalize("Vizag."), "visakhapatnam");
}

#[test]
fn bundled_table_fuzzy_recovers_common_typos() {
    let idx = LocationIndex::builtin();
    for (typo, expect) in [
        ("kolkatta", "kolkata"),
        ("mumbay", "mumbai"),
        ("balangr", "balangir"),
        ("hyderbad", "hyderabad"),
    ] {
        let res = idx.resolve(typo);
        assert_eq!(res.name(), expect, "typo {typo}");
        assert_eq!(res.kind, MatchKind::Fuzzy, "typo {typo}");
    }
}

#[test]
fn bundled_table_resolves_balangir_transliterations() {
    let idx = LocationIndex::builtin();
    for spelling in ["Bolangir", "balangiri", "bolangiri", "bongalir", "bongaliri"] {
        assert_eq!(idx.normalize(spelling), "balangir", "spelling {spelling}");
    }
    assert!(idx.matches("bongaliri", "Balangir"));
}

#[test]
fn bundled_table_leaves_unknown_places_alone() {
    let idx = LocationIndex::builtin();
    assert_eq!(idx.normalize("Timbuktu"), "timbuktu");
    assert_eq!(idx.resolve("Timbuktu").kind, MatchKind::Unmatched);
}

#[test]
fn every_canonical_normalizes_to_itself() {
    let idx = LocationIndex::builtin();
    for canonical in idx.canonical_names() {
        assert_eq!(idx.normalize(canonical.as_str()), canonical.as_str());
        assert!(idx.matches(canonical.as_str(), canonical.as_str()));
    }
}

#[test]
fn every_variant_matches_its_canonical() {
    let idx = LocationIndex::builtin();
    for canonical in idx.canonical_names() {
        for variant in idx.variants_of(canonical.as_str()) {
            assert!(
                idx.matches(canonical.as_str(), variant.as_str()),
                "{variant} should match {canonical}"
            );
        }
    }
}

#[test]
fn job_board_filter_and_recommend() {
    let idx = LocationIndex::builtin();
    let jobs = vec![
        job("paddy harvest", "Bolangir", 12),
        job("construction", "Mumbai", 50),
        job("rickshaw driver", "balangiri", 4),
        job("loader", "Kolkata", 30),
    ];

    let ranked = filter_by_location(&idx, &jobs, "Balangir", |j| j.applications);
    let titles: Vec<&str> = ranked.iter().map(|m| m.listing.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["paddy harvest", "rickshaw driver", "construction", "loader"]
    );
    assert!(ranked[0].location_match && ranked[1].location_match);
    assert!(!ranked[2].location_match && !ranked[3].location_match);

    let top = recommend_by_location(&idx, &jobs, "Balangir", 2, |j| j.applications);
    assert_eq!(top.len(), 2);
    assert!(top.iter().all(|m| m.location_match));

    // location filter toggled off: everything back in input order
    let unfiltered = filter_by_location(&idx, &jobs, "", |j| j.applications);
    let titles: Vec<&str> = unfiltered
        .iter()
        .map(|m| m.listing.title.as_str())
        .collect();
    assert_eq!(
        titles,
        vec!["paddy harvest", "construction", "rickshaw driver", "loader"]
    );
}
