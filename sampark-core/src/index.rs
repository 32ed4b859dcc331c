use ahash::AHashMap;
use smallvec::SmallVec;
use tracing::{info, warn};
use ustr::{Ustr, UstrMap};

use crate::clean;
use crate::config::VariantTable;

/// Read-only lookup structure derived from a [`VariantTable`]. Built once,
/// then shared freely between callers; nothing here mutates after build.
///
/// Passed explicitly to every matching operation rather than living in a
/// global, so tests can run against a fixture table.
#[derive(Default)]
pub struct LocationIndex {
    /// Canonical identifiers in configuration order.
    canonicals: Vec<Ustr>,
    /// (canonical, variant) pairs in configuration order. Partial and fuzzy
    /// stages iterate this, which is what makes their tie-breaks
    /// deterministic.
    pub(crate) scan: Vec<(Ustr, Ustr)>,
    /// variant string -> canonical identifier, the exact-lookup structure.
    pub(crate) by_variant: AHashMap<String, Ustr>,
    /// canonical -> its accepted variants.
    variants: UstrMap<SmallVec<[Ustr; 8]>>,
}

impl LocationIndex {
    pub fn from_table(table: &VariantTable) -> Self {
        let mut idx = LocationIndex::default();
        for entry in &table.entries {
            let canonical_str = clean(&entry.canonical);
            if canonical_str.is_empty() {
                warn!("skipping entry with empty canonical name");
                continue;
            }
            let canonical = Ustr::from(&canonical_str);
            if idx.variants.contains_key(&canonical) {
                warn!("duplicate canonical entry {canonical}, merging variants");
            } else {
                idx.canonicals.push(canonical);
                idx.variants.insert(canonical, SmallVec::new());
            }
            // Self-inclusion first: the canonical name is always one of its
            // own variants, whether or not the data file repeats it.
            let variants_iter =
                std::iter::once(canonical_str).chain(entry.variants.iter().map(|v| clean(v)));
            for variant in variants_iter {
                if variant.is_empty() {
                    continue;
                }
                if let Some(owner) = idx.by_variant.get(&variant) {
                    if *owner != canonical {
                        warn!("variant {variant} already maps to {owner}, ignoring for {canonical}");
                    }
                    continue;
                }
                let variant_u = Ustr::from(&variant);
                idx.by_variant.insert(variant, canonical);
                idx.scan.push((canonical, variant_u));
                idx.variants
                    .get_mut(&canonical)
                    .expect("canonical registered above")
                    .push(variant_u);
            }
        }
        info!(
            "location index built: {} canonical names, {} variants",
            idx.canonicals.len(),
            idx.scan.len()
        );
        idx
    }

    /// Index over the bundled Indian place-name table.
    pub fn builtin() -> Self {
        Self::from_table(&VariantTable::builtin())
    }

    pub fn canonical_names(&self) -> &[Ustr] {
        &self.canonicals
    }

    /// Accepted spellings for a canonical name. The argument goes through
    /// the full resolution pipeline first, so a variant or a misspelling of
    /// a known place works too. Unrecognized input yields an empty list.
    pub fn variants_of(&self, canonical_or_raw: &str) -> SmallVec<[Ustr; 8]> {
        match self.resolve(canonical_or_raw).canonical {
            Some(canonical) => self.variants.get(&canonical).cloned().unwrap_or_default(),
            None => SmallVec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.canonicals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canonicals.is_empty()
    }
}
