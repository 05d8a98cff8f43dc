// Character-to-rhyme-group lookup table.
//
// Flattens the resource into a map from character to every rhyme group the
// character appears in. A character listed under several categories (a
// homograph with more than one historical reading) keeps all of them, in
// the order they were encountered; a repeated listing under the same group
// is recorded once.
//
// Groups are interned: each distinct (tone, subgroup, category) triple is
// stored once in `groups` and characters refer to it by index, so rhyme
// equivalence is an intersection of small index lists.
//
// Read-only after construction. Consumed by the verse checker for
// end-of-line rhyme agreement.

use crate::error::LoadError;
use crate::resource::RhymeResource;
use crate::types::{RhymeGroup, Tone};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct RhymeTable {
    groups: Vec<RhymeGroup>,
    by_char: BTreeMap<char, Vec<usize>>,
}

impl RhymeTable {
    /// Build the table from a parsed resource.
    ///
    /// Fails only when the resource lists no characters at all.
    pub fn from_resource(resource: &RhymeResource) -> Result<Self, LoadError> {
        let mut groups: Vec<RhymeGroup> = Vec::new();
        let mut group_index: BTreeMap<(Tone, &str, &str), usize> = BTreeMap::new();
        let mut by_char: BTreeMap<char, Vec<usize>> = BTreeMap::new();

        for entry in resource.entries() {
            let key = (entry.tone, entry.subgroup, entry.category);
            let idx = *group_index.entry(key).or_insert_with(|| {
                groups.push(RhymeGroup::new(entry.tone, entry.subgroup, entry.category));
                groups.len() - 1
            });

            let owned = by_char.entry(entry.ch).or_default();
            if !owned.contains(&idx) {
                owned.push(idx);
            }
        }

        if by_char.is_empty() {
            return Err(LoadError::Empty);
        }

        let multi = by_char.values().filter(|g| g.len() > 1).count();
        log::debug!(
            "rhyme table: {} characters, {} rhyme groups, {} characters with multiple readings",
            by_char.len(),
            groups.len(),
            multi
        );

        Ok(RhymeTable { groups, by_char })
    }

    /// Parse a JSON resource and build the table from it.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Self::from_resource(&RhymeResource::from_json(json)?)
    }

    /// All rhyme groups recorded for `ch`. Empty if the character is unknown.
    pub fn rhyme_groups_of(&self, ch: char) -> Vec<&RhymeGroup> {
        self.indices(ch).iter().map(|&i| &self.groups[i]).collect()
    }

    /// The full rhyme type of a character, e.g. `ping/上平聲部/上平聲一東`.
    /// Same as `rhyme_groups_of`.
    pub fn rhyme_type(&self, ch: char) -> Vec<&RhymeGroup> {
        self.rhyme_groups_of(ch)
    }

    /// Whether two characters share at least one rhyme group.
    ///
    /// A character missing from the table rhymes with nothing, itself included.
    pub fn do_rhyme(&self, a: char, b: char) -> bool {
        let (ga, gb) = (self.indices(a), self.indices(b));
        ga.iter().any(|i| gb.contains(i))
    }

    /// The rhyme groups `a` and `b` have in common.
    pub fn shared_groups(&self, a: char, b: char) -> Vec<&RhymeGroup> {
        let gb = self.indices(b);
        self.indices(a)
            .iter()
            .filter(|i| gb.contains(i))
            .map(|&i| &self.groups[i])
            .collect()
    }

    pub fn contains(&self, ch: char) -> bool {
        self.by_char.contains_key(&ch)
    }

    /// Number of distinct characters in the table.
    pub fn len(&self) -> usize {
        self.by_char.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_char.is_empty()
    }

    /// Every distinct rhyme group, in first-seen order.
    pub fn groups(&self) -> &[RhymeGroup] {
        &self.groups
    }

    fn indices(&self, ch: char) -> &[usize] {
        self.by_char.get(&ch).map(Vec::as_slice).unwrap_or(&[])
    }
}
