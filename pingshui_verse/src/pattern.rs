// Tone patterns, line shapes, and the four opening-tone schemes.
//
// A `TonePattern` is a per-position sequence of expected tones, written
// with the traditional glyphs: 平 (level), 仄 (oblique), and 〇 (any tone).
// The wildcard is how the unconstrained first character of a seven-character
// line is expressed.
//
// The shape and scheme tables below are the generative rules the meter
// templates are expanded from (see `meter.rs`):
// - `LineShape`: the four elementary line shapes a/A/b/B, each with a
//   five-character and a seven-character form.
// - `MeterScheme`: the four canonical opening/rhyme variants, each a
//   sequence of four shape pairs covering eight lines. The seven-character
//   sequences are the five-character ones with level and oblique openings
//   swapped.

use pingshui_rhyme::{Tone, ToneCategory};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const P: Tone = Tone::Level;
const Z: Tone = Tone::Oblique;

/// Characters per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LineLength {
    Five,
    Seven,
}

impl LineLength {
    pub const ALL: [LineLength; 2] = [LineLength::Five, LineLength::Seven];

    pub fn from_chars(count: usize) -> Option<LineLength> {
        match count {
            5 => Some(LineLength::Five),
            7 => Some(LineLength::Seven),
            _ => None,
        }
    }

    pub fn chars(self) -> usize {
        match self {
            LineLength::Five => 5,
            LineLength::Seven => 7,
        }
    }

    /// Zero-based positions that must alternate between paired lines
    /// (the 2nd, 4th and, for seven-character lines, 6th characters).
    pub fn alternating_positions(self) -> &'static [usize] {
        match self {
            LineLength::Five => &[1, 3],
            LineLength::Seven => &[1, 3, 5],
        }
    }
}

/// One expected position in a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Tone(Tone),
    Any,
}

impl Slot {
    pub fn matches(self, category: ToneCategory) -> bool {
        match self {
            Slot::Any => true,
            Slot::Tone(tone) => category == ToneCategory::from(tone),
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Slot::Tone(tone) => tone.glyph(),
            Slot::Any => '〇',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized tone glyph '{0}' (expected 平, 仄 or 〇)")]
pub struct PatternError(pub char);

/// Expected tones for one line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TonePattern(Vec<Slot>);

impl TonePattern {
    pub fn from_tones(tones: &[Tone]) -> Self {
        TonePattern(tones.iter().map(|&t| Slot::Tone(t)).collect())
    }

    pub fn slots(&self) -> &[Slot] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A copy with the first position relaxed to a wildcard.
    pub fn with_free_first(&self) -> Self {
        let mut slots = self.0.clone();
        if let Some(first) = slots.first_mut() {
            *first = Slot::Any;
        }
        TonePattern(slots)
    }

    /// Whether a classified line fits this pattern. Lengths must agree, and an
    /// unknown tone only fits a wildcard.
    pub fn matches(&self, tones: &[ToneCategory]) -> bool {
        self.0.len() == tones.len() && self.0.iter().zip(tones).all(|(slot, &t)| slot.matches(t))
    }

    /// Render a classified line with the pattern glyphs (`？` for unknown).
    pub fn render(tones: &[ToneCategory]) -> String {
        tones.iter().map(|t| t.glyph()).collect()
    }
}

impl fmt::Display for TonePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|slot| write!(f, "{}", slot.glyph()))
    }
}

impl FromStr for TonePattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|c| match c {
                '〇' => Ok(Slot::Any),
                _ => Tone::from_glyph(c).map(Slot::Tone).ok_or(PatternError(c)),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(TonePattern)
    }
}

/// The four elementary line shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineShape {
    /// `a`: 仄仄平平仄 / 平平仄仄平平仄
    LowerA,
    /// `A`: 仄仄仄平平 / 平平仄仄仄平平
    UpperA,
    /// `b`: 平平平仄仄 / 仄仄平平平仄仄
    LowerB,
    /// `B`: 平平仄仄平 / 仄仄平平仄仄平
    UpperB,
}

impl LineShape {
    pub fn letter(self) -> char {
        match self {
            LineShape::LowerA => 'a',
            LineShape::UpperA => 'A',
            LineShape::LowerB => 'b',
            LineShape::UpperB => 'B',
        }
    }

    pub fn from_letter(letter: char) -> Option<LineShape> {
        match letter {
            'a' => Some(LineShape::LowerA),
            'A' => Some(LineShape::UpperA),
            'b' => Some(LineShape::LowerB),
            'B' => Some(LineShape::UpperB),
            _ => None,
        }
    }

    /// The tone sequence of this shape at the given line length.
    pub fn tones(self, length: LineLength) -> &'static [Tone] {
        match (length, self) {
            (LineLength::Five, LineShape::LowerA) => &[Z, Z, P, P, Z],
            (LineLength::Five, LineShape::UpperA) => &[Z, Z, Z, P, P],
            (LineLength::Five, LineShape::LowerB) => &[P, P, P, Z, Z],
            (LineLength::Five, LineShape::UpperB) => &[P, P, Z, Z, P],
            (LineLength::Seven, LineShape::LowerA) => &[P, P, Z, Z, P, P, Z],
            (LineLength::Seven, LineShape::UpperA) => &[P, P, Z, Z, Z, P, P],
            (LineLength::Seven, LineShape::LowerB) => &[Z, Z, P, P, P, Z, Z],
            (LineLength::Seven, LineShape::UpperB) => &[Z, Z, P, P, Z, Z, P],
        }
    }

    pub fn pattern(self, length: LineLength) -> TonePattern {
        TonePattern::from_tones(self.tones(length))
    }
}

/// The canonical opening-tone / first-line-rhyme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeterScheme {
    /// 平起首句入韻
    EvenToneRhymed,
    /// 平起首句不入韻
    EvenToneUnrhymed,
    /// 仄起首句入韻
    ObliqueToneRhymed,
    /// 仄起首句不入韻
    ObliqueToneUnrhymed,
}

impl MeterScheme {
    /// Matching order.
    pub const ALL: [MeterScheme; 4] = [
        MeterScheme::EvenToneRhymed,
        MeterScheme::EvenToneUnrhymed,
        MeterScheme::ObliqueToneRhymed,
        MeterScheme::ObliqueToneUnrhymed,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MeterScheme::EvenToneRhymed => "even_tone_rhymed",
            MeterScheme::EvenToneUnrhymed => "even_tone_unrhymed",
            MeterScheme::ObliqueToneRhymed => "oblique_tone_rhymed",
            MeterScheme::ObliqueToneUnrhymed => "oblique_tone_unrhymed",
        }
    }

    pub fn chinese_name(self) -> &'static str {
        match self {
            MeterScheme::EvenToneRhymed => "平起首句入韻",
            MeterScheme::EvenToneUnrhymed => "平起首句不入韻",
            MeterScheme::ObliqueToneRhymed => "仄起首句入韻",
            MeterScheme::ObliqueToneUnrhymed => "仄起首句不入韻",
        }
    }

    /// Shape pairs for the eight lines, two lines per pair.
    pub fn shape_pairs(self, length: LineLength) -> [[LineShape; 2]; 4] {
        use LineShape::{LowerA as a, LowerB as b, UpperA as A, UpperB as B};
        match (length, self) {
            (LineLength::Five, MeterScheme::EvenToneRhymed) => [[B, A], [a, B], [b, A], [a, B]],
            (LineLength::Five, MeterScheme::EvenToneUnrhymed) => [[b, A], [a, B], [b, A], [a, B]],
            (LineLength::Five, MeterScheme::ObliqueToneRhymed) => [[A, B], [b, A], [a, B], [b, A]],
            (LineLength::Five, MeterScheme::ObliqueToneUnrhymed) => [[a, B], [b, A], [a, B], [b, A]],
            (LineLength::Seven, MeterScheme::EvenToneRhymed) => [[A, B], [b, A], [a, B], [b, A]],
            (LineLength::Seven, MeterScheme::EvenToneUnrhymed) => [[a, B], [b, A], [a, B], [b, A]],
            (LineLength::Seven, MeterScheme::ObliqueToneRhymed) => [[B, A], [a, B], [b, A], [a, B]],
            (LineLength::Seven, MeterScheme::ObliqueToneUnrhymed) => [[b, A], [a, B], [b, A], [a, B]],
        }
    }

    /// The shape letters as a string, e.g. `BAaBbAaB`.
    pub fn letters(self, length: LineLength) -> String {
        self.shape_pairs(length)
            .iter()
            .flatten()
            .map(|shape| shape.letter())
            .collect()
    }
}

impl fmt::Display for MeterScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
