//! The shopper's in-progress choice of values per attribute.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{AttributeId, ModelError, ValueId};

/// Selected values of one attribute; empty when nothing is chosen yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSelection {
    pub attribute_id: AttributeId,
    #[serde(default)]
    pub value_ids: BTreeSet<ValueId>,
}

impl AttributeSelection {
    pub fn new(attribute_id: AttributeId, value_ids: impl IntoIterator<Item = ValueId>) -> Self {
        Self {
            attribute_id,
            value_ids: value_ids.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value_ids.is_empty()
    }
}

/// Parses `ATTR=VALUE[,VALUE...]`, as accepted on the command line.
impl FromStr for AttributeSelection {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (attribute, values) = s
            .split_once('=')
            .ok_or_else(|| ModelError::InvalidSelection(s.to_string()))?;
        let attribute_id = attribute.parse::<AttributeId>()?;
        let value_ids = values
            .split(',')
            .filter(|token| !token.trim().is_empty())
            .map(str::parse::<ValueId>)
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(Self {
            attribute_id,
            value_ids,
        })
    }
}

/// Live selection state, one entry per known attribute in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    entries: Vec<AttributeSelection>,
}

impl Selection {
    pub fn new(entries: Vec<AttributeSelection>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[AttributeSelection] {
        &self.entries
    }

    pub fn push(&mut self, entry: AttributeSelection) {
        self.entries.push(entry);
    }

    /// True when at least one attribute is tracked, chosen or not.
    pub fn has_entries(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn get(&self, attribute_id: AttributeId) -> Option<&AttributeSelection> {
        self.entries
            .iter()
            .find(|entry| entry.attribute_id == attribute_id)
    }

    /// Entries that actually restrict anything (non-empty value sets).
    pub fn constraints(&self) -> impl Iterator<Item = &AttributeSelection> {
        self.entries.iter().filter(|entry| !entry.is_empty())
    }

    /// The selection as it would look if exactly `value` were picked for `attribute_id`.
    ///
    /// Entries with no chosen values are dropped, any existing entry for
    /// `attribute_id` is replaced, and the new entry goes last.
    pub fn hypothetical(&self, attribute_id: AttributeId, value: ValueId) -> Selection {
        let mut entries: Vec<AttributeSelection> = self
            .constraints()
            .filter(|entry| entry.attribute_id != attribute_id)
            .cloned()
            .collect();
        entries.push(AttributeSelection::new(attribute_id, [value]));
        Selection { entries }
    }
}

impl FromIterator<AttributeSelection> for Selection {
    fn from_iter<I: IntoIterator<Item = AttributeSelection>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
