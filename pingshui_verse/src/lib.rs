// Regulated verse checker.
//
// Judges whether a classical Chinese poem follows the structural rules of
// jueju (絕句, four lines) and lushi (律詩, eight lines): the rhyme scheme at
// the line endings and the ping-ze (平仄) meter across each line. Tone and
// rhyme facts come from the `pingshui_rhyme` crate.
//
// Architecture:
// - `pattern.rs`: `TonePattern`, the line shapes a/A/b/B, the four schemes
// - `meter.rs`: `MeterTemplates`, the expanded per-line tone templates
// - `normalize.rs`: `PoemNormalizer`, raw text to equal-length `Line`s
// - `config.rs`: `CheckerConfig`, JSON-loadable tunables
// - `checker.rs`: `PoemChecker`, the rhyme and meter checks and their
//   verdict and violation types
//
// Data flow: raw text -> normalize -> (rhyme rules | meter templates, then
// relaxed alternation) -> `Verdict`. A checker is immutable once built and
// can serve concurrent callers.

pub mod checker;
pub mod config;
pub mod meter;
pub mod normalize;
pub mod pattern;

pub use checker::{MeterMatch, MeterViolation, PoemChecker, PoemForm, PoemReport, RhymeViolation, Verdict};
pub use config::CheckerConfig;
pub use meter::{MeterTemplate, MeterTemplates};
pub use normalize::{Line, PoemNormalizer};
pub use pattern::{LineLength, LineShape, MeterScheme, TonePattern};
pub use pingshui_rhyme::{LoadError, OverlapPolicy, Phonology, ToneCategory};
