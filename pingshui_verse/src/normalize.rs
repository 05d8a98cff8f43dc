// Poem normalization: raw text to equal-length lines.
//
// Strips the configured punctuation and all whitespace, then splits the
// remaining characters into lines:
// 1. If the count is divisible by 5, into five-character lines.
// 2. Else if divisible by 7, into seven-character lines.
// 3. Else split the raw text on newlines, cleaning each piece the same
//    way and dropping empty ones.
//
// Five is tried before seven, so 35 characters always become seven
// five-character lines even if the poem was written as five seven-character
// lines. That tie-break is kept for compatibility with existing results.
//
// Tone and rhyme lookups happen later, in `checker.rs`.

use crate::config::{CheckerConfig, DEFAULT_PUNCTUATION};
use crate::pattern::LineLength;
use std::fmt;

/// One line of a poem, as characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Line(Vec<char>);

impl Line {
    pub fn chars(&self) -> &[char] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<char> {
        self.0.first().copied()
    }

    /// The rhyme position.
    pub fn last(&self) -> Option<char> {
        self.0.last().copied()
    }

    pub fn get(&self, index: usize) -> Option<char> {
        self.0.get(index).copied()
    }
}

impl From<&str> for Line {
    fn from(text: &str) -> Self {
        Line(text.chars().collect())
    }
}

impl From<Vec<char>> for Line {
    fn from(chars: Vec<char>) -> Self {
        Line(chars)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

#[derive(Debug, Clone)]
pub struct PoemNormalizer {
    punctuation: Vec<char>,
}

impl Default for PoemNormalizer {
    fn default() -> Self {
        PoemNormalizer::new(DEFAULT_PUNCTUATION.to_vec())
    }
}

impl PoemNormalizer {
    pub fn new(punctuation: Vec<char>) -> Self {
        PoemNormalizer { punctuation }
    }

    pub fn from_config(config: &CheckerConfig) -> Self {
        PoemNormalizer::new(config.punctuation.clone())
    }

    fn is_stripped(&self, ch: char) -> bool {
        ch.is_whitespace() || self.punctuation.contains(&ch)
    }

    fn clean(&self, text: &str) -> Vec<char> {
        text.chars().filter(|&c| !self.is_stripped(c)).collect()
    }

    pub fn normalize(&self, raw: &str) -> Vec<Line> {
        let chars = self.clean(raw);

        for length in LineLength::ALL {
            if chars.len() % length.chars() == 0 {
                return chars
                    .chunks(length.chars())
                    .map(|chunk| Line(chunk.to_vec()))
                    .collect();
            }
        }

        log::trace!(
            "{} characters fit neither line length; splitting on newlines",
            chars.len()
        );
        raw.lines()
            .map(|piece| self.clean(piece))
            .filter(|piece| !piece.is_empty())
            .map(Line)
            .collect()
    }
}
