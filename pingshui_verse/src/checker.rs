// Structure validation: rhyme scheme and ping-ze meter.
//
// `PoemChecker` owns the phonology tables and the generated meter
// templates, both built once in the constructor and only read afterwards.
// Two independent checks run over a normalized poem:
//
// Rhyme scheme (`rhyme_report`):
//   Structural checks (4 or 8 lines, all 5 or all 7 characters), then the
//   end-of-line rules for jueju or lushi. The first broken rule wins.
//
// Meter (`meter_report`):
//   1. Strict: every line must match the corresponding line of one of the
//      four scheme templates. The first character of a seven-character line
//      is free (凡七言第一字俱不論) unless the config turns that off.
//   2. Relaxed fallback: within each couplet the 2nd, 4th (and 6th)
//      characters must differ in tone (一三五不論，二四六分明).
//
// The public `check_rhyming` / `check_meter` entry points take raw text and
// always return a `Verdict`; malformed poems are failed verdicts, never
// errors. The typed `*_report` methods expose the same results as `Result`s.

use crate::config::CheckerConfig;
use crate::meter::MeterTemplates;
use crate::normalize::{Line, PoemNormalizer};
use crate::pattern::{LineLength, MeterScheme};
use pingshui_rhyme::{LoadError, Phonology, RhymeResource, ToneCategory};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Regulated verse forms, by line count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoemForm {
    /// 絕句, four lines.
    Jueju,
    /// 律詩, eight lines.
    Lushi,
}

impl PoemForm {
    pub fn from_line_count(count: usize) -> Option<PoemForm> {
        match count {
            4 => Some(PoemForm::Jueju),
            8 => Some(PoemForm::Lushi),
            _ => None,
        }
    }

    pub fn line_count(self) -> usize {
        match self {
            PoemForm::Jueju => 4,
            PoemForm::Lushi => 8,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PoemForm::Jueju => "jueju",
            PoemForm::Lushi => "lushi",
        }
    }
}

impl fmt::Display for PoemForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pass/fail plus a human-readable diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub passed: bool,
    pub message: String,
}

impl Verdict {
    pub fn pass(message: impl Into<String>) -> Self {
        Verdict {
            passed: true,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Verdict {
            passed: false,
            message: message.into(),
        }
    }
}

/// The first rhyme-scheme rule a poem breaks. Line numbers are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RhymeViolation {
    #[error("Poem must have either 4 lines (Jueju) or 8 lines (Lushi), found {0}.")]
    LineCount(usize),
    #[error("Each line must have 5 or 7 characters.")]
    LineLength,
    #[error("First line's last character must be either ping or ze.")]
    FirstLineUnknown,
    #[error("Second and fourth lines must end with ping characters.")]
    EvenLinesNotLevel,
    #[error("Second and fourth lines must rhyme.")]
    EvenLinesDoNotRhyme,
    #[error("First line must rhyme with the second and fourth lines if it uses ping.")]
    QuatrainFirstLineDoesNotRhyme,
    #[error("Third line must end with a ze character.")]
    ThirdLineNotOblique,
    #[error("Line {0} must end with a ping character.")]
    LineNotLevel(usize),
    #[error("Line {0} must rhyme with line 2.")]
    LineDoesNotRhyme(usize),
    #[error("Line {0} must not rhyme with line 2.")]
    LineRhymes(usize),
    #[error("First line must rhyme with even lines if it uses ping.")]
    FirstLineDoesNotRhyme,
    #[error("Line {0} must end with a ze character.")]
    LineNotOblique(usize),
    #[error("No three consecutive ping or ze are allowed.")]
    ThreeConsecutiveTones,
}

/// How a poem satisfied the meter check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MeterMatch {
    /// Every line matches this scheme's template.
    Strict(MeterScheme),
    /// No template matched, but every couplet alternates at the even positions.
    Relaxed(LineLength),
}

impl fmt::Display for MeterMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeterMatch::Strict(scheme) => write!(f, "Poem follows {scheme} ping-ze pattern."),
            MeterMatch::Relaxed(LineLength::Five) => f.write_str(
                "Poem follows the less restrictive ping-ze alternation pattern in 2nd and 4th characters.",
            ),
            MeterMatch::Relaxed(LineLength::Seven) => f.write_str(
                "Poem follows the less restrictive ping-ze alternation pattern in 2nd, 4th, and 6th characters.",
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MeterViolation {
    #[error("Poem must have either 4 lines (Jueju) or 8 lines (Lushi), found {0}.")]
    LineCount(usize),
    #[error("Each line must have 5 or 7 characters.")]
    LineLength,
    /// Paired lines share a tone at a position that must alternate.
    #[error("Ping ze tone mismatch between line {first} and line {second} at character position {position}.")]
    Mismatch {
        first: usize,
        second: usize,
        position: usize,
    },
}

/// Both checks over one poem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoemReport {
    pub lines: Vec<String>,
    pub rhyme: Verdict,
    pub meter: Verdict,
}

/// Shared line length of a poem, if every line has the same supported length.
fn line_length(lines: &[Line]) -> Option<LineLength> {
    let length = LineLength::from_chars(lines.first()?.len())?;
    lines
        .iter()
        .all(|line| line.len() == length.chars())
        .then_some(length)
}

#[derive(Debug, Clone)]
pub struct PoemChecker {
    phonology: Phonology,
    templates: MeterTemplates,
    normalizer: PoemNormalizer,
    config: CheckerConfig,
}

impl PoemChecker {
    pub fn new(phonology: Phonology, config: CheckerConfig) -> Self {
        PoemChecker {
            phonology,
            templates: MeterTemplates::generate(),
            normalizer: PoemNormalizer::from_config(&config),
            config,
        }
    }

    /// Build the phonology from a parsed resource, honoring the config's
    /// overlap policy.
    pub fn from_resource(resource: &RhymeResource, config: CheckerConfig) -> Result<Self, LoadError> {
        let phonology = Phonology::from_resource(resource, config.overlap_policy)?;
        Ok(Self::new(phonology, config))
    }

    pub fn from_json(json: &str, config: CheckerConfig) -> Result<Self, LoadError> {
        Self::from_resource(&RhymeResource::from_json(json)?, config)
    }

    pub fn phonology(&self) -> &Phonology {
        &self.phonology
    }

    pub fn templates(&self) -> &MeterTemplates {
        &self.templates
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    pub fn normalize(&self, raw: &str) -> Vec<Line> {
        self.normalizer.normalize(raw)
    }

    pub fn line_tones(&self, line: &Line) -> Vec<ToneCategory> {
        line.chars()
            .iter()
            .map(|&ch| self.phonology.classify_char(ch))
            .collect()
    }

    /// Judge rhyme-scheme conformance of raw poem text.
    pub fn check_rhyming(&self, raw: &str) -> Verdict {
        match self.rhyme_report(&self.normalize(raw)) {
            Ok(form) => Verdict::pass(format!("Poem follows {form} rhyming rules.")),
            Err(violation) => Verdict::fail(violation.to_string()),
        }
    }

    /// Judge ping-ze meter conformance of raw poem text.
    pub fn check_meter(&self, raw: &str) -> Verdict {
        match self.meter_report(&self.normalize(raw)) {
            Ok(matched) => Verdict::pass(matched.to_string()),
            Err(violation) => Verdict::fail(violation.to_string()),
        }
    }

    /// Run both checks.
    pub fn check(&self, raw: &str) -> PoemReport {
        let lines = self.normalize(raw);
        let rhyme = match self.rhyme_report(&lines) {
            Ok(form) => Verdict::pass(format!("Poem follows {form} rhyming rules.")),
            Err(violation) => Verdict::fail(violation.to_string()),
        };
        let meter = match self.meter_report(&lines) {
            Ok(matched) => Verdict::pass(matched.to_string()),
            Err(violation) => Verdict::fail(violation.to_string()),
        };
        PoemReport {
            lines: lines.iter().map(Line::to_string).collect(),
            rhyme,
            meter,
        }
    }

    pub fn rhyme_report(&self, lines: &[Line]) -> Result<PoemForm, RhymeViolation> {
        let form = PoemForm::from_line_count(lines.len()).ok_or(RhymeViolation::LineCount(lines.len()))?;
        if line_length(lines).is_none() {
            return Err(RhymeViolation::LineLength);
        }

        // Every line is non-empty here, so there is one ending per line.
        let endings: Vec<char> = lines.iter().filter_map(Line::last).collect();
        let tones: Vec<ToneCategory> = endings
            .iter()
            .map(|&ch| self.phonology.classify_char(ch))
            .collect();
        let rhymes = |i: usize, j: usize| self.phonology.do_rhyme(endings[i], endings[j]);

        let first_may_rhyme = match tones[0] {
            ToneCategory::Level => true,
            ToneCategory::Oblique => false,
            ToneCategory::Unknown => return Err(RhymeViolation::FirstLineUnknown),
        };

        match form {
            PoemForm::Jueju => {
                if tones[1] != ToneCategory::Level || tones[3] != ToneCategory::Level {
                    return Err(RhymeViolation::EvenLinesNotLevel);
                }
                if !rhymes(1, 3) {
                    return Err(RhymeViolation::EvenLinesDoNotRhyme);
                }
                if first_may_rhyme && !rhymes(0, 1) {
                    return Err(RhymeViolation::QuatrainFirstLineDoesNotRhyme);
                }
                if tones[2] != ToneCategory::Oblique {
                    return Err(RhymeViolation::ThirdLineNotOblique);
                }
            }
            PoemForm::Lushi => {
                if let Some(i) = [1, 3, 5, 7].into_iter().find(|&i| tones[i] != ToneCategory::Level) {
                    return Err(RhymeViolation::LineNotLevel(i + 1));
                }
                if let Some(i) = [3, 5, 7].into_iter().find(|&i| !rhymes(1, i)) {
                    return Err(RhymeViolation::LineDoesNotRhyme(i + 1));
                }
                if let Some(i) = [2, 4, 6].into_iter().find(|&i| rhymes(1, i)) {
                    return Err(RhymeViolation::LineRhymes(i + 1));
                }
                if first_may_rhyme && !rhymes(0, 1) {
                    return Err(RhymeViolation::FirstLineDoesNotRhyme);
                }
                if let Some(i) = [2, 4, 6].into_iter().find(|&i| tones[i] != ToneCategory::Oblique) {
                    return Err(RhymeViolation::LineNotOblique(i + 1));
                }
                if tones.windows(3).any(|w| w[0] == w[1] && w[1] == w[2]) {
                    return Err(RhymeViolation::ThreeConsecutiveTones);
                }
            }
        }

        Ok(form)
    }

    pub fn meter_report(&self, lines: &[Line]) -> Result<MeterMatch, MeterViolation> {
        if PoemForm::from_line_count(lines.len()).is_none() {
            return Err(MeterViolation::LineCount(lines.len()));
        }
        let length = line_length(lines).ok_or(MeterViolation::LineLength)?;
        let tones: Vec<Vec<ToneCategory>> = lines.iter().map(|line| self.line_tones(line)).collect();
        let free_first = length == LineLength::Seven && self.config.exempt_first_char_of_seven;

        for template in self.templates.for_length(length) {
            let fits = tones.iter().zip(&template.lines).all(|(line, pattern)| {
                if free_first {
                    pattern.with_free_first().matches(line)
                } else {
                    pattern.matches(line)
                }
            });
            if fits {
                return Ok(MeterMatch::Strict(template.scheme));
            }
            log::trace!("meter: scheme {} does not match", template.scheme);
        }

        for (pair, couplet) in tones.chunks_exact(2).enumerate() {
            let (upper, lower) = (&couplet[0], &couplet[1]);
            for &pos in length.alternating_positions() {
                if upper[pos] == lower[pos] {
                    return Err(MeterViolation::Mismatch {
                        first: pair * 2 + 1,
                        second: pair * 2 + 2,
                        position: pos + 1,
                    });
                }
            }
        }

        Ok(MeterMatch::Relaxed(length))
    }
}
