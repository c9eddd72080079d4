// Gene name table: which gene index encodes which trait.
//
// The layout is computed from three name lists rather than written out as
// index constants, so adding a per-category trait shifts everything after it
// consistently:
//
//   0..2            global genes ("frequency", "cutoff")
//   2..110          four category blocks of 27 genes each, in
//                   `CATEGORY_GENE_NAMES` order
//   110..118        trailing genes (food types, then the six utterance genes)
//   118..256        junk: carried and inherited, never read
//
// Lookups go through `GeneMap` and return `MissingGeneMapping` for names the
// table does not contain. Category-scoped names are looked up as a
// (category, name) pair. The canonical map is built once and shared.

use crate::error::GeneticsError;
use crate::gene_sequence::NUM_GENES;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Range;
use std::sync::LazyLock;

/// Number of body-part categories, each with its own gene block.
pub const NUM_CATEGORIES: usize = 4;

pub const GLOBAL_GENE_NAMES: [&str; 2] = ["frequency", "cutoff"];

/// Per-category gene names, in block order.
pub const CATEGORY_GENE_NAMES: [&str; 27] = [
    "start red",
    "start green",
    "start blue",
    "end red",
    "end green",
    "end blue",
    "start width",
    "end width",
    "start length",
    "end length",
    "amplitude",
    "phase",
    "turn amplitude",
    "turn phase",
    "branch amplitude",
    "branch phase",
    "branch turn amplitude",
    "branch turn phase",
    "sequence count",
    "branch period",
    "branch angle",
    "branch number",
    "branch shift",
    "branch category",
    "branch reflect",
    "splined",
    "end cap spline",
];

pub const TRAILING_GENE_NAMES: [&str; 8] = [
    "preferred food type",
    "digestible food type",
    "utter period",
    "utter duration",
    "utter strangeness",
    "utter flavor",
    "utter spin",
    "utter charm",
];

pub const GENES_PER_CATEGORY: usize = CATEGORY_GENE_NAMES.len();

/// Index of the first trailing gene.
pub const TRAILING_GENE_START: usize = GLOBAL_GENE_NAMES.len() + NUM_CATEGORIES * GENES_PER_CATEGORY;

/// Genes at or past this index are junk.
pub const NUM_GENES_USED: usize = TRAILING_GENE_START + TRAILING_GENE_NAMES.len();

/// The contiguous range holding the six utterance genes, "utter period"
/// through "utter charm". Utterance seeding hashes exactly these bytes.
pub const UTTERANCE_GENES: Range<usize> = (TRAILING_GENE_START + 2)..NUM_GENES_USED;

const _: () = assert!(NUM_GENES_USED <= NUM_GENES);

/// Name returned by `GeneMap::name_of` for genes no trait reads.
pub const JUNK_GENE_NAME: &str = "junk";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GeneScope {
    Global,
    Category(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GeneEntry {
    pub index: usize,
    pub scope: GeneScope,
    pub name: &'static str,
}

#[derive(Clone, Debug)]
pub struct GeneMap {
    entries: Vec<GeneEntry>,
    lookup: BTreeMap<(GeneScope, &'static str), usize>,
}

static CANONICAL: LazyLock<GeneMap> = LazyLock::new(|| {
    GeneMap::with_layout(
        &GLOBAL_GENE_NAMES,
        NUM_CATEGORIES,
        &CATEGORY_GENE_NAMES,
        &TRAILING_GENE_NAMES,
    )
});

impl GeneMap {
    /// The layout every organism in the gene pool uses.
    pub fn canonical() -> &'static GeneMap {
        &CANONICAL
    }

    /// Lay out global names, then `num_categories` blocks of
    /// `category_names`, then the trailing names (which are global in scope).
    pub fn with_layout(
        global_names: &[&'static str],
        num_categories: usize,
        category_names: &[&'static str],
        trailing_names: &[&'static str],
    ) -> GeneMap {
        let mut entries = Vec::new();
        for &name in global_names {
            entries.push((GeneScope::Global, name));
        }
        for c in 0..num_categories {
            for &name in category_names {
                entries.push((GeneScope::Category(c), name));
            }
        }
        for &name in trailing_names {
            entries.push((GeneScope::Global, name));
        }

        let entries: Vec<GeneEntry> = entries
            .into_iter()
            .enumerate()
            .map(|(index, (scope, name))| GeneEntry { index, scope, name })
            .collect();
        let lookup = entries.iter().map(|e| ((e.scope, e.name), e.index)).collect();
        GeneMap { entries, lookup }
    }

    /// Index of a global (non-category) gene.
    pub fn index_of(&self, name: &str) -> Result<usize, GeneticsError> {
        self.find(GeneScope::Global, name)
    }

    /// Index of a per-category gene.
    pub fn category_index_of(&self, category: usize, name: &str) -> Result<usize, GeneticsError> {
        self.find(GeneScope::Category(category), name).map_err(|_| {
            GeneticsError::MissingGeneMapping(format!("category {category} {name}"))
        })
    }

    /// Trait name for a gene index, or `"junk"` for unused genes.
    pub fn name_of(&self, index: usize) -> &'static str {
        self.entries.get(index).map_or(JUNK_GENE_NAME, |e| e.name)
    }

    pub fn entry(&self, index: usize) -> Option<&GeneEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[GeneEntry] {
        &self.entries
    }

    pub fn num_genes_used(&self) -> usize {
        self.entries.len()
    }

    /// Contiguous index range from "utter period" to "utter charm".
    pub fn utterance_range(&self) -> Result<Range<usize>, GeneticsError> {
        let first = self.index_of("utter period")?;
        let last = self.index_of("utter charm")?;
        Ok(first..last + 1)
    }

    fn find(&self, scope: GeneScope, name: &str) -> Result<usize, GeneticsError> {
        // Keys hold `&'static str`, so scan the scope's slice of the map
        // instead of building a key from the caller's string.
        self.lookup
            .range((scope, "")..)
            .take_while(|((s, _), _)| *s == scope)
            .find(|((_, n), _)| *n == name)
            .map(|(_, &index)| index)
            .ok_or_else(|| GeneticsError::MissingGeneMapping(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_layout_matches_constants() {
        let map = GeneMap::canonical();
        assert_eq!(map.num_genes_used(), NUM_GENES_USED);
        assert_eq!(NUM_GENES_USED, 118);
        assert_eq!(map.index_of("frequency").unwrap(), 0);
        assert_eq!(map.index_of("cutoff").unwrap(), 1);
        assert_eq!(map.index_of("preferred food type").unwrap(), 110);
        assert_eq!(map.index_of("utter charm").unwrap(), 117);
    }

    #[test]
    fn category_blocks_are_contiguous() {
        let map = GeneMap::canonical();
        for c in 0..NUM_CATEGORIES {
            let base = 2 + c * GENES_PER_CATEGORY;
            assert_eq!(map.category_index_of(c, "start red").unwrap(), base);
            assert_eq!(map.category_index_of(c, "end cap spline").unwrap(), base + 26);
            assert_eq!(map.category_index_of(c, "branch category").unwrap(), base + 23);
        }
    }

    #[test]
    fn utterance_range_is_six_contiguous_genes() {
        let map = GeneMap::canonical();
        let range = map.utterance_range().unwrap();
        assert_eq!(range, UTTERANCE_GENES);
        assert_eq!(range, 112..118);
        let names: Vec<_> = range.map(|i| map.name_of(i)).collect();
        assert_eq!(
            names,
            [
                "utter period",
                "utter duration",
                "utter strangeness",
                "utter flavor",
                "utter spin",
                "utter charm"
            ]
        );
    }

    #[test]
    fn reverse_lookup_reports_junk_past_used_genes() {
        let map = GeneMap::canonical();
        assert_eq!(map.name_of(0), "frequency");
        assert_eq!(map.name_of(2), "start red");
        assert_eq!(map.name_of(NUM_GENES_USED), JUNK_GENE_NAME);
        assert_eq!(map.name_of(NUM_GENES - 1), JUNK_GENE_NAME);
    }

    #[test]
    fn every_used_index_round_trips_through_its_name() {
        let map = GeneMap::canonical();
        for entry in map.entries() {
            let found = match entry.scope {
                GeneScope::Global => map.index_of(entry.name).unwrap(),
                GeneScope::Category(c) => map.category_index_of(c, entry.name).unwrap(),
            };
            assert_eq!(found, entry.index);
        }
    }

    #[test]
    fn unknown_names_are_missing_mappings() {
        let map = GeneMap::canonical();
        assert!(matches!(
            map.index_of("wingspan"),
            Err(GeneticsError::MissingGeneMapping(_))
        ));
        // Category names are not global.
        assert!(map.index_of("start red").is_err());
        assert!(map.category_index_of(NUM_CATEGORIES, "start red").is_err());
    }

    #[test]
    fn reduced_layout_lacks_trailing_names() {
        let map = GeneMap::with_layout(&GLOBAL_GENE_NAMES, 1, &CATEGORY_GENE_NAMES, &[]);
        assert_eq!(map.num_genes_used(), 2 + GENES_PER_CATEGORY);
        assert!(map.utterance_range().is_err());
    }
}
