// Typed model of the scraped Pingshui rhyme document.
//
// The document is nested exactly four levels deep:
//
//   { "ping": { "上平聲部": { "上平聲一東": ["東", "同", ...], ... }, ... },
//     "ze":   { "上聲部": { ... }, "去聲部": { ... }, "入聲部": { ... } } }
//
// Each leaf list holds character groups. The scraper stores a group as a
// string of one or more characters; an array of single characters is also
// accepted. Serde enforces the nesting depth, so a flatter or deeper
// document fails at load time with `LoadError::Json`.
//
// The resource is parsed once and then handed to both `RhymeTable` and
// `ToneClassifier`, which flatten it in their own ways.

use crate::error::LoadError;
use crate::types::Tone;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// Rhyme categories of one tone subgroup, keyed by category label.
pub type CategoryMap = BTreeMap<String, Vec<CharGroup>>;

/// Tone subgroups of one tone type, keyed by subgroup label.
pub type ToneSection = BTreeMap<String, CategoryMap>;

/// One entry in a rhyme category's list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CharGroup {
    /// A run of characters stored as one string, as the scraper writes them.
    Run(String),
    /// Individual characters.
    Chars(Vec<char>),
}

impl CharGroup {
    /// Every character in this group, in order.
    pub fn chars(&self) -> Box<dyn Iterator<Item = char> + '_> {
        match self {
            CharGroup::Run(text) => Box::new(text.chars().filter(|c| !c.is_whitespace())),
            CharGroup::Chars(chars) => Box::new(chars.iter().copied()),
        }
    }
}

/// The whole phonological resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RhymeResource {
    #[serde(alias = "level")]
    pub ping: ToneSection,
    #[serde(alias = "oblique")]
    pub ze: ToneSection,
}

/// A single character occurrence in the resource, with its owning group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    pub tone: Tone,
    pub subgroup: &'a str,
    pub category: &'a str,
    pub ch: char,
}

impl RhymeResource {
    /// Parse the resource from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, LoadError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Read and parse the resource from a file.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let data = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&data)
    }

    pub fn section(&self, tone: Tone) -> &ToneSection {
        match tone {
            Tone::Level => &self.ping,
            Tone::Oblique => &self.ze,
        }
    }

    /// Every character occurrence, level section first, then oblique.
    /// Within a section the order is subgroup label, category label, list order.
    pub fn entries(&self) -> impl Iterator<Item = Entry<'_>> + '_ {
        Tone::ALL.into_iter().flat_map(move |tone| {
            self.section(tone).iter().flat_map(move |(subgroup, categories)| {
                categories.iter().flat_map(move |(category, groups)| {
                    groups.iter().flat_map(|group| group.chars()).map(move |ch| Entry {
                        tone,
                        subgroup: subgroup.as_str(),
                        category: category.as_str(),
                        ch,
                    })
                })
            })
        })
    }

    /// Number of rhyme categories across both sections.
    pub fn category_count(&self) -> usize {
        Tone::ALL
            .iter()
            .flat_map(|&tone| self.section(tone).values())
            .map(|categories| categories.len())
            .sum()
    }
}
