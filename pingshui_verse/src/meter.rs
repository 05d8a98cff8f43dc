// Meter template generation.
//
// Expands the shape and scheme tables in `pattern.rs` into the full table
// of admissible eight-line tone sequences, one template per (line length,
// scheme). Generation is a pure function of the fixed tables and is run
// once when a `PoemChecker` is built; the checker keeps the result for its
// lifetime.
//
// Quatrains (jueju) are matched against the first four lines of each
// template.

use crate::pattern::{LineLength, MeterScheme, TonePattern};

/// Lines in a full template.
pub const TEMPLATE_LINES: usize = 8;

/// Expected tones for every line of a poem under one scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeterTemplate {
    pub scheme: MeterScheme,
    pub length: LineLength,
    pub lines: Vec<TonePattern>,
}

impl MeterTemplate {
    /// Expand one scheme: each shape letter becomes its line-length-specific
    /// pattern, two lines per pair.
    pub fn expand(length: LineLength, scheme: MeterScheme) -> Self {
        let lines = scheme
            .shape_pairs(length)
            .iter()
            .flatten()
            .map(|shape| shape.pattern(length))
            .collect();
        MeterTemplate {
            scheme,
            length,
            lines,
        }
    }
}

/// Every template, grouped by line length, in scheme matching order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeterTemplates {
    five: Vec<MeterTemplate>,
    seven: Vec<MeterTemplate>,
}

impl MeterTemplates {
    pub fn generate() -> Self {
        let expand_all = |length| {
            MeterScheme::ALL
                .iter()
                .map(|&scheme| MeterTemplate::expand(length, scheme))
                .collect::<Vec<_>>()
        };
        let templates = MeterTemplates {
            five: expand_all(LineLength::Five),
            seven: expand_all(LineLength::Seven),
        };
        log::debug!(
            "generated {} meter templates",
            templates.five.len() + templates.seven.len()
        );
        templates
    }

    pub fn for_length(&self, length: LineLength) -> &[MeterTemplate] {
        match length {
            LineLength::Five => &self.five,
            LineLength::Seven => &self.seven,
        }
    }

    pub fn get(&self, length: LineLength, scheme: MeterScheme) -> Option<&MeterTemplate> {
        self.for_length(length).iter().find(|t| t.scheme == scheme)
    }
}

impl Default for MeterTemplates {
    fn default() -> Self {
        Self::generate()
    }
}
