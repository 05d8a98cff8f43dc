// Ping/ze tone classification.
//
// Collapses the resource's level section and oblique section into one
// character set each, ignoring rhyme-category structure. Classification is
// total: characters in neither set (punctuation, Latin text, characters the
// table simply lacks) classify as `ToneCategory::Unknown`.
//
// The real Pingshui data lists a number of characters under both sections
// (看, 思, 望, 更, 應, ...: characters with a level and an oblique reading).
// `OverlapPolicy` makes the resolution explicit instead of leaving it to
// lookup order:
// - `LevelFirst`: such characters classify as level. The overlap is logged
//   and kept available through `overlapping()`.
// - `Reject`: construction fails with `LoadError::Overlap`, for callers that
//   need the two sets to be disjoint.

use crate::error::LoadError;
use crate::resource::RhymeResource;
use crate::types::{Tone, ToneCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How to treat a character listed under both tone sections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Classify as level.
    #[default]
    LevelFirst,
    /// Refuse to build the classifier.
    Reject,
}

/// Examples quoted in overlap diagnostics.
const OVERLAP_EXAMPLES: usize = 8;

#[derive(Debug, Clone, Default)]
pub struct ToneClassifier {
    level: BTreeSet<char>,
    oblique: BTreeSet<char>,
    overlapping: BTreeSet<char>,
}

impl ToneClassifier {
    pub fn from_resource(resource: &RhymeResource, policy: OverlapPolicy) -> Result<Self, LoadError> {
        let mut level = BTreeSet::new();
        let mut oblique = BTreeSet::new();
        for entry in resource.entries() {
            match entry.tone {
                Tone::Level => level.insert(entry.ch),
                Tone::Oblique => oblique.insert(entry.ch),
            };
        }

        if level.is_empty() && oblique.is_empty() {
            return Err(LoadError::Empty);
        }

        let overlapping: BTreeSet<char> = level.intersection(&oblique).copied().collect();
        if !overlapping.is_empty() {
            let examples: String = overlapping.iter().take(OVERLAP_EXAMPLES).collect();
            match policy {
                OverlapPolicy::Reject => {
                    return Err(LoadError::Overlap {
                        count: overlapping.len(),
                        examples,
                    });
                }
                OverlapPolicy::LevelFirst => {
                    log::warn!(
                        "{} characters are both ping and ze (e.g. {}); classifying them as ping",
                        overlapping.len(),
                        examples
                    );
                }
            }
        }

        log::debug!(
            "tone classifier: {} ping characters, {} ze characters",
            level.len(),
            oblique.len()
        );

        Ok(ToneClassifier {
            level,
            oblique,
            overlapping,
        })
    }

    pub fn from_json(json: &str, policy: OverlapPolicy) -> Result<Self, LoadError> {
        Self::from_resource(&RhymeResource::from_json(json)?, policy)
    }

    /// Classify every character of `text`, in order, one entry per `char`.
    pub fn classify(&self, text: &str) -> Vec<ToneCategory> {
        text.chars().map(|ch| self.classify_char(ch)).collect()
    }

    pub fn classify_char(&self, ch: char) -> ToneCategory {
        if self.level.contains(&ch) {
            ToneCategory::Level
        } else if self.oblique.contains(&ch) {
            ToneCategory::Oblique
        } else {
            ToneCategory::Unknown
        }
    }

    /// Characters listed under both sections, in code point order.
    pub fn overlapping(&self) -> &BTreeSet<char> {
        &self.overlapping
    }

    pub fn is_disjoint(&self) -> bool {
        self.overlapping.is_empty()
    }

    /// Size of the level and oblique sets.
    pub fn counts(&self) -> (usize, usize) {
        (self.level.len(), self.oblique.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ToneClassifier {
        ToneClassifier::from_json(
            include_str!("../../data/pingshui_sample.json"),
            OverlapPolicy::LevelFirst,
        )
        .unwrap()
    }

    #[test]
    fn test_classify_sentence_with_punctuation() {
        let classifier = sample();
        let result = classifier.classify("知否？知否？應是綠肥紅瘦。");
        use ToneCategory::{Level as P, Oblique as Z, Unknown as U};
        assert_eq!(result, vec![P, Z, U, P, Z, U, P, Z, Z, P, P, Z, U]);
    }

    #[test]
    fn test_classify_preserves_length() {
        let classifier = sample();
        for text in ["", "東", "abc 東董", "床前明月光"] {
            assert_eq!(classifier.classify(text).len(), text.chars().count());
        }
    }

    #[test]
    fn test_unknown_characters() {
        let classifier = sample();
        assert_eq!(classifier.classify_char('x'), ToneCategory::Unknown);
        assert_eq!(classifier.classify_char('，'), ToneCategory::Unknown);
    }

    #[test]
    fn test_overlap_level_first() {
        let classifier = sample();
        assert!(!classifier.is_disjoint());
        for ch in ['望', '更', '應', '看', '思'] {
            assert!(classifier.overlapping().contains(&ch), "{ch} should overlap");
            assert_eq!(classifier.classify_char(ch), ToneCategory::Level);
        }
        // Oblique-only homographs are not overlaps.
        assert!(!classifier.overlapping().contains(&'樹'));
    }

    #[test]
    fn test_overlap_reject() {
        let err = ToneClassifier::from_json(
            include_str!("../../data/pingshui_sample.json"),
            OverlapPolicy::Reject,
        )
        .unwrap_err();
        match err {
            LoadError::Overlap { count, examples } => {
                assert!(count >= 5);
                assert!(!examples.is_empty());
            }
            other => panic!("expected Overlap, got {other:?}"),
        }
    }

    #[test]
    fn test_disjoint_resource_accepted_under_reject() {
        let json = r#"{
            "ping": { "上平聲部": { "上平聲一東": ["東同"] } },
            "ze": { "上聲部": { "上聲一董": ["董動"] } }
        }"#;
        let classifier = ToneClassifier::from_json(json, OverlapPolicy::Reject).unwrap();
        assert!(classifier.is_disjoint());
        assert_eq!(classifier.counts(), (2, 2));
        assert_eq!(classifier.classify("東董"), vec![ToneCategory::Level, ToneCategory::Oblique]);
    }

    #[test]
    fn test_policy_serde() {
        let json = serde_json::to_string(&OverlapPolicy::LevelFirst).unwrap();
        assert_eq!(json, "\"level_first\"");
        let parsed: OverlapPolicy = serde_json::from_str("\"reject\"").unwrap();
        assert_eq!(parsed, OverlapPolicy::Reject);
    }
}
