// Checker configuration.
//
// The few tunable parts of the checker, loadable from JSON. Every field has
// a default, so `{}` is a valid config and partial documents only override
// what they name.

use pingshui_rhyme::OverlapPolicy;
use serde::{Deserialize, Serialize};

/// Punctuation removed before line splitting: full-width comma, period,
/// exclamation mark, question mark, semicolon, colon, enumeration comma.
pub const DEFAULT_PUNCTUATION: [char; 7] = ['，', '。', '！', '？', '；', '：', '、'];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// Marks stripped by the normalizer. Whitespace is always stripped.
    pub punctuation: Vec<char>,
    /// Treat the first character of a seven-character line as free in strict
    /// meter matching (凡七言第一字俱不論).
    pub exempt_first_char_of_seven: bool,
    /// Resolution for characters listed as both ping and ze.
    pub overlap_policy: OverlapPolicy,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        CheckerConfig {
            punctuation: DEFAULT_PUNCTUATION.to_vec(),
            exempt_first_char_of_seven: true,
            overlap_policy: OverlapPolicy::LevelFirst,
        }
    }
}

impl CheckerConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
