// Core phonological types: tones, tone categories, and rhyme groups.
//
// These types are shared by the rhyme table (`table.rs`), the tone
// classifier (`classifier.rs`), and the verse checker crate. The resource
// document uses the traditional `ping`/`ze` keys; `level`/`oblique` are
// accepted as aliases.
//
// The type hierarchy is:
// - `Tone`: one of the two historical tone classes a rhyme group belongs to
// - `ToneCategory`: the result of classifying an arbitrary character, which
//   adds `Unknown` for characters missing from the resource
// - `RhymeGroup`: a (tone, subgroup, category) triple from the Pingshui table

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two broad historical tone classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tone {
    /// Level tone (平).
    #[serde(rename = "ping", alias = "level")]
    Level,
    /// Oblique tone (仄): rising, departing and entering tones.
    #[serde(rename = "ze", alias = "oblique")]
    Oblique,
}

impl Tone {
    pub const ALL: [Tone; 2] = [Tone::Level, Tone::Oblique];

    /// The romanized name used in diagnostics (`ping` / `ze`).
    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Level => "ping",
            Tone::Oblique => "ze",
        }
    }

    /// The glyph used in meter patterns (平 / 仄).
    pub fn glyph(self) -> char {
        match self {
            Tone::Level => '平',
            Tone::Oblique => '仄',
        }
    }

    pub fn from_glyph(glyph: char) -> Option<Tone> {
        match glyph {
            '平' => Some(Tone::Level),
            '仄' => Some(Tone::Oblique),
            _ => None,
        }
    }

    pub fn opposite(self) -> Tone {
        match self {
            Tone::Level => Tone::Oblique,
            Tone::Oblique => Tone::Level,
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of an arbitrary character.
///
/// Unlike `Tone`, this is total: a character missing from both tone sets is
/// `Unknown` rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToneCategory {
    Level,
    Oblique,
    Unknown,
}

impl ToneCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ToneCategory::Level => "ping",
            ToneCategory::Oblique => "ze",
            ToneCategory::Unknown => "unknown",
        }
    }

    /// Glyph for pattern rendering; unknown characters render as `？`.
    pub fn glyph(self) -> char {
        match self {
            ToneCategory::Level => '平',
            ToneCategory::Oblique => '仄',
            ToneCategory::Unknown => '？',
        }
    }

    pub fn tone(self) -> Option<Tone> {
        match self {
            ToneCategory::Level => Some(Tone::Level),
            ToneCategory::Oblique => Some(Tone::Oblique),
            ToneCategory::Unknown => None,
        }
    }

    pub fn is_known(self) -> bool {
        self != ToneCategory::Unknown
    }
}

impl From<Tone> for ToneCategory {
    fn from(tone: Tone) -> Self {
        match tone {
            Tone::Level => ToneCategory::Level,
            Tone::Oblique => ToneCategory::Oblique,
        }
    }
}

impl fmt::Display for ToneCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A historical rhyme class from the Pingshui table.
///
/// Equality covers all three fields. Two characters rhyme when they share at
/// least one group, so homographs carry several of these.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RhymeGroup {
    /// Tone class of the whole group.
    pub tone: Tone,
    /// Tone section label, e.g. `上平聲部`.
    pub subgroup: String,
    /// Rhyme category label, e.g. `上平聲一東`.
    pub category: String,
}

impl RhymeGroup {
    pub fn new(tone: Tone, subgroup: impl Into<String>, category: impl Into<String>) -> Self {
        RhymeGroup {
            tone,
            subgroup: subgroup.into(),
            category: category.into(),
        }
    }
}

impl fmt::Display for RhymeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.tone, self.subgroup, self.category)
    }
}
