// Pingshui phonology crate.
//
// Provides the historical Pingshui (平水韻) rhyme table as a programmatic
// resource for the verse checker in `pingshui_verse`. Pure lookups over an
// immutable table; no I/O beyond the one-time resource read.
//
// Architecture:
// - `types.rs`: core types `Tone`, `ToneCategory`, `RhymeGroup`
// - `resource.rs`: Typed model of the scraped JSON document (`RhymeResource`)
// - `table.rs`: `RhymeTable`, character to rhyme groups, rhyme equivalence
// - `classifier.rs`: `ToneClassifier`, ping/ze/unknown per character
// - `error.rs`: `LoadError`, the only fatal condition in the system
// - `lib.rs` (this file): `Phonology`, both lookups built from one resource
//
// Everything here is built once and read-only afterwards, so a `Phonology`
// can be shared across threads behind a plain reference or `Arc`.

pub mod classifier;
pub mod error;
pub mod resource;
pub mod table;
pub mod types;

// Re-export key types at crate root for convenience.
pub use classifier::{OverlapPolicy, ToneClassifier};
pub use error::LoadError;
pub use resource::{CharGroup, RhymeResource};
pub use table::RhymeTable;
pub use types::{RhymeGroup, Tone, ToneCategory};

use std::path::Path;

/// The rhyme table and tone classifier built from the same resource.
#[derive(Debug, Clone)]
pub struct Phonology {
    pub table: RhymeTable,
    pub classifier: ToneClassifier,
}

impl Phonology {
    pub fn from_resource(resource: &RhymeResource, policy: OverlapPolicy) -> Result<Self, LoadError> {
        Ok(Phonology {
            table: RhymeTable::from_resource(resource)?,
            classifier: ToneClassifier::from_resource(resource, policy)?,
        })
    }

    /// Parse a JSON resource string.
    pub fn from_json(json: &str, policy: OverlapPolicy) -> Result<Self, LoadError> {
        Self::from_resource(&RhymeResource::from_json(json)?, policy)
    }

    /// Read a JSON resource file.
    pub fn load(path: &Path, policy: OverlapPolicy) -> Result<Self, LoadError> {
        Self::from_resource(&RhymeResource::load(path)?, policy)
    }

    pub fn classify_char(&self, ch: char) -> ToneCategory {
        self.classifier.classify_char(ch)
    }

    pub fn do_rhyme(&self, a: char, b: char) -> bool {
        self.table.do_rhyme(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phonology_from_sample() {
        let phonology = Phonology::from_json(
            include_str!("../../data/pingshui_sample.json"),
            OverlapPolicy::LevelFirst,
        )
        .unwrap();
        assert!(phonology.table.len() > 500);
        assert_eq!(phonology.classify_char('東'), ToneCategory::Level);
        assert_eq!(phonology.classify_char('董'), ToneCategory::Oblique);
        assert!(phonology.do_rhyme('光', '霜'));
    }

    #[test]
    fn test_table_and_classifier_agree_on_membership() {
        let phonology = Phonology::from_json(
            include_str!("../../data/pingshui_sample.json"),
            OverlapPolicy::LevelFirst,
        )
        .unwrap();
        for ch in "床前明月光疑是地上霜舉頭望明月低頭思故鄉？x".chars() {
            assert_eq!(
                phonology.table.contains(ch),
                phonology.classify_char(ch).is_known(),
                "{ch}"
            );
        }
    }

    #[test]
    fn test_malformed_resource_is_fatal() {
        assert!(Phonology::from_json("[]", OverlapPolicy::LevelFirst).is_err());
        assert!(Phonology::from_json("{", OverlapPolicy::LevelFirst).is_err());
        assert!(matches!(
            Phonology::from_json(r#"{"ping": {}, "ze": {}}"#, OverlapPolicy::LevelFirst),
            Err(LoadError::Empty)
        ));
    }
}
