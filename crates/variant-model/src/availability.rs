//! Derived enabled/disabled state of attribute values.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ValueId;

/// Why a value was disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisabledReason {
    /// No combination data was available at all.
    NoCombinationData,
    /// No combination supports the value together with the current selection.
    NoMatch,
    /// Supporting combinations exist, none of them in stock.
    OutOfStock,
}

impl DisabledReason {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NoCombinationData => "no combination data",
            Self::NoMatch => "no matching combination",
            Self::OutOfStock => "out of stock",
        }
    }
}

impl fmt::Display for DisabledReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum Availability {
    Enabled,
    Disabled(DisabledReason),
}

impl Availability {
    pub const fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled)
    }

    pub const fn reason(&self) -> Option<DisabledReason> {
        match self {
            Self::Enabled => None,
            Self::Disabled(reason) => Some(*reason),
        }
    }
}

/// Availability of every evaluated value, recomputed from scratch on each change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvailabilitySet {
    values: BTreeMap<ValueId, Availability>,
}

impl AvailabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every value disabled for the same reason.
    pub fn all_disabled(values: impl IntoIterator<Item = ValueId>, reason: DisabledReason) -> Self {
        values
            .into_iter()
            .map(|value| (value, Availability::Disabled(reason)))
            .collect()
    }

    /// Records the state of `value`; a later write for the same value wins.
    pub fn insert(&mut self, value: ValueId, availability: Availability) {
        self.values.insert(value, availability);
    }

    pub fn get(&self, value: ValueId) -> Option<Availability> {
        self.values.get(&value).copied()
    }

    /// `None` when the value was never evaluated.
    pub fn is_enabled(&self, value: ValueId) -> Option<bool> {
        self.get(value).map(|availability| availability.is_enabled())
    }

    pub fn enabled(&self) -> impl Iterator<Item = ValueId> + '_ {
        self.values
            .iter()
            .filter(|(_, availability)| availability.is_enabled())
            .map(|(value, _)| *value)
    }

    pub fn disabled(&self) -> impl Iterator<Item = ValueId> + '_ {
        self.values
            .iter()
            .filter(|(_, availability)| !availability.is_enabled())
            .map(|(value, _)| *value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ValueId, Availability)> + '_ {
        self.values.iter().map(|(value, availability)| (*value, *availability))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(ValueId, Availability)> for AvailabilitySet {
    fn from_iter<I: IntoIterator<Item = (ValueId, Availability)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
