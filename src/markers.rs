use crate::types::Index;
use std::collections::HashMap;

/////////////////////////////////////////////////////////////////////////////////////////////////

/// Anatomical landmark names of the standard capture protocol, in the column
/// order of the trajectory file.
#[rustfmt::skip]
pub const MARKERS: [&str; 19] = [
    "C7", "LA", "RA", "REP", "LEP", "RUL", "LUL",
    "RASIS", "LASIS", "RPSIS", "LPSIS",
    "RGT", "LGT", "RLE", "LLE",
    "RCA", "LCA", "RFM", "LFM",
];

/// Skeletal connections to draw, as (marker name, marker name) pairs.
#[rustfmt::skip]
pub const BONES: [(&str, &str); 19] = [
    ("C7", "LA"), ("C7", "RA"),             // neck to shoulders
    ("LA", "LEP"), ("RA", "REP"),           // shoulders to elbows
    ("LEP", "LUL"), ("REP", "RUL"),         // elbows to wrists
    ("C7", "RASIS"), ("C7", "LASIS"),       // spine to pelvis
    ("RASIS", "RPSIS"), ("LASIS", "LPSIS"), // pelvis rectangle
    ("RPSIS", "LPSIS"),
    ("RPSIS", "RGT"), ("LPSIS", "LGT"),     // pelvis to knees
    ("RGT", "RLE"), ("LGT", "LLE"),         // knees to ankles
    ("RLE", "RCA"), ("RCA", "RFM"),         // right foot
    ("LLE", "LCA"), ("LCA", "LFM"),         // left foot
];

/////////////////////////////////////////////////////////////////////////////////////////////////

/// Ordered marker names plus a name→column map built once at construction.
///
/// The map is the only resolution contract: [`MarkerSet::lookup`] returns
/// `None` for unknown names and the caller decides what absence means (for
/// bone drawing it means "skip"). Names are expected to be unique; if a
/// duplicate ever slips in, the first occurrence keeps its column.
#[derive(Debug, Clone)]
pub struct MarkerSet {
    names: Vec<String>,
    index: HashMap<String, Index>,
}

impl MarkerSet {
    /// The fixed [`MARKERS`] table.
    pub fn standard() -> Self {
        MarkerSet::from_names(&MARKERS)
    }

    pub fn from_names(names: &[&str]) -> Self {
        let names: Vec<String> = names.iter().map(|name| name.to_string()).collect();
        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            index.entry(name.clone()).or_insert(i);
        }
        MarkerSet { names, index }
    }

    /// Column index of `name`, or `None` if the set does not contain it.
    pub fn lookup(&self, name: &str) -> Option<Index> {
        self.index.get(name).copied()
    }

    /// Name of the marker in column `index`. Panics when out of range.
    pub fn name(&self, index: Index) -> &str {
        &self.names[index]
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_set_matches_table_order() {
        let markers = MarkerSet::standard();
        assert_eq!(markers.len(), MARKERS.len());
        assert_eq!(markers.lookup("C7"), Some(0));
        assert_eq!(markers.lookup("LA"), Some(1));
        assert_eq!(markers.lookup("LFM"), Some(18));
        assert_eq!(markers.name(0), "C7");
        assert_eq!(markers.name(18), "LFM");
    }

    #[test]
    fn standard_names_are_unique() {
        let markers = MarkerSet::standard();
        for (i, name) in MARKERS.iter().enumerate() {
            assert_eq!(markers.lookup(name), Some(i));
        }
    }

    #[test]
    fn every_standard_bone_endpoint_resolves() {
        let markers = MarkerSet::standard();
        for (from, to) in BONES {
            assert!(markers.lookup(from).is_some(), "unknown endpoint {from}");
            assert!(markers.lookup(to).is_some(), "unknown endpoint {to}");
        }
    }

    #[test]
    fn lookup_misses_are_none() {
        let markers = MarkerSet::from_names(&["A", "B"]);
        assert_eq!(markers.lookup("A"), Some(0));
        assert_eq!(markers.lookup("B"), Some(1));
        assert_eq!(markers.lookup("X"), None);
        assert_eq!(markers.lookup(""), None);
    }

    #[test]
    fn duplicate_names_keep_the_first_column() {
        let markers = MarkerSet::from_names(&["A", "B", "A"]);
        assert_eq!(markers.lookup("A"), Some(0));
        assert_eq!(markers.len(), 3);
    }
}
