//! Availability computation over a fixed combination list.
//!
//! For every value `v` of every attribute `A` the engine asks: if the shopper
//! picked exactly `v` for `A`, keeping every other non-empty choice, would
//! an in-stock combination still exist?

use variant_model::{
    AttributeId, Availability, AvailabilitySet, Combination, DisabledReason, Selection, ValueId,
};

/// The values the UI groups under one attribute, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeValues {
    pub attribute_id: AttributeId,
    pub value_ids: Vec<ValueId>,
}

impl AttributeValues {
    pub fn new(attribute_id: AttributeId, value_ids: Vec<ValueId>) -> Self {
        Self {
            attribute_id,
            value_ids,
        }
    }
}

/// Combinations that could realise `hypothetical`, where `attribute_id` is
/// the attribute being evaluated.
///
/// A combination qualifies when it has an entry for `attribute_id` and, for
/// every constrained attribute, an entry whose values intersect the choice.
pub fn matching_combinations<'a>(
    combinations: &'a [Combination],
    attribute_id: AttributeId,
    hypothetical: &Selection,
) -> Vec<&'a Combination> {
    combinations
        .iter()
        .filter(|combination| combination.attribute(attribute_id).is_some())
        .filter(|combination| {
            hypothetical
                .constraints()
                .all(|entry| combination.supports(entry.attribute_id, &entry.value_ids))
        })
        .collect()
}

fn offers_every_choice(combination: &Combination, hypothetical: &Selection) -> bool {
    let total = hypothetical.constraints().count();
    let satisfied = hypothetical
        .constraints()
        .filter(|entry| {
            entry
                .value_ids
                .iter()
                .any(|&value| combination.contains_value(value))
        })
        .count();
    satisfied == total
}

/// Availability of `value` for `attribute_id` given the current selection.
pub fn value_availability(
    combinations: &[Combination],
    selection: &Selection,
    attribute_id: AttributeId,
    value: ValueId,
) -> Availability {
    if combinations.is_empty() {
        return Availability::Disabled(DisabledReason::NoCombinationData);
    }
    let hypothetical = selection.hypothetical(attribute_id, value);
    let candidates = matching_combinations(combinations, attribute_id, &hypothetical);
    if candidates.is_empty() {
        return Availability::Disabled(DisabledReason::NoMatch);
    }
    let in_stock = candidates.iter().any(|combination| {
        combination.in_stock && offers_every_choice(combination, &hypothetical)
    });
    if in_stock {
        Availability::Enabled
    } else {
        Availability::Disabled(DisabledReason::OutOfStock)
    }
}

/// Availability of every value in `layout`, evaluated in declaration order.
///
/// Placeholder values (id `0`) are skipped.
pub fn compute_availability(
    layout: &[AttributeValues],
    selection: &Selection,
    combinations: &[Combination],
) -> AvailabilitySet {
    let mut availability = AvailabilitySet::new();
    for attribute in layout {
        for &value in &attribute.value_ids {
            if !value.is_assigned() {
                continue;
            }
            let verdict =
                value_availability(combinations, selection, attribute.attribute_id, value);
            tracing::trace!(
                attribute = %attribute.attribute_id,
                value = %value,
                enabled = verdict.is_enabled(),
                "evaluated value"
            );
            availability.insert(value, verdict);
        }
    }
    availability
}
