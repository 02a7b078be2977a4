//! Attribute combinations as published by the storefront.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{AttributeId, ValueId};

/// One attribute entry of a combination: the values of `id` that take part in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CombinationAttribute {
    pub id: AttributeId,
    #[serde(default)]
    pub value_ids: BTreeSet<ValueId>,
}

impl CombinationAttribute {
    pub fn new(id: AttributeId, value_ids: impl IntoIterator<Item = ValueId>) -> Self {
        Self {
            id,
            value_ids: value_ids.into_iter().collect(),
        }
    }

    /// True when at least one of `values` participates in this entry.
    pub fn intersects(&self, values: &BTreeSet<ValueId>) -> bool {
        values.iter().any(|value| self.value_ids.contains(value))
    }
}

/// A valid assignment of values across some or all attributes of a product.
///
/// Combinations are immutable snapshots; nothing in the engine mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Combination {
    #[serde(default)]
    pub attributes: Vec<CombinationAttribute>,
    #[serde(default)]
    pub in_stock: bool,
}

impl Combination {
    pub fn new(attributes: Vec<CombinationAttribute>, in_stock: bool) -> Self {
        Self {
            attributes,
            in_stock,
        }
    }

    /// First entry for `id`, in the order the combination lists them.
    pub fn attribute(&self, id: AttributeId) -> Option<&CombinationAttribute> {
        self.attributes.iter().find(|attribute| attribute.id == id)
    }

    /// True when some entry for `id` intersects `values`.
    ///
    /// A combination without an entry for `id` supports no constraint on it.
    pub fn supports(&self, id: AttributeId, values: &BTreeSet<ValueId>) -> bool {
        self.attributes
            .iter()
            .any(|attribute| attribute.id == id && attribute.intersects(values))
    }

    /// True when `value` appears under any attribute of this combination.
    pub fn contains_value(&self, value: ValueId) -> bool {
        self.attributes
            .iter()
            .any(|attribute| attribute.value_ids.contains(&value))
    }

    /// Every value id mentioned by the combination.
    pub fn value_ids(&self) -> impl Iterator<Item = ValueId> + '_ {
        self.attributes
            .iter()
            .flat_map(|attribute| attribute.value_ids.iter().copied())
    }
}
