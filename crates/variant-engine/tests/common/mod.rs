#![allow(dead_code)]

use variant_engine::{AttributeLayout, ProductLayout, StaticSelection, ValueLayout};
use variant_model::{AttributeId, Combination, CombinationAttribute, ValueId};

pub const COLOR: AttributeId = AttributeId::new(1);
pub const SIZE: AttributeId = AttributeId::new(2);

pub const RED: ValueId = ValueId::new(10);
pub const BLUE: ValueId = ValueId::new(11);
pub const GREEN: ValueId = ValueId::new(12);
pub const SMALL: ValueId = ValueId::new(20);
pub const MEDIUM: ValueId = ValueId::new(21);
pub const LARGE: ValueId = ValueId::new(22);

pub fn product_ui() -> StaticSelection {
    StaticSelection::new(ProductLayout::new(vec![
        AttributeLayout::new(
            COLOR,
            "Color",
            vec![
                ValueLayout::new(RED, "Red"),
                ValueLayout::new(BLUE, "Blue"),
                ValueLayout::new(GREEN, "Green"),
            ],
        ),
        AttributeLayout::new(
            SIZE,
            "Size",
            vec![
                ValueLayout::new(SMALL, "S"),
                ValueLayout::new(MEDIUM, "M"),
                ValueLayout::new(LARGE, "L"),
            ],
        ),
    ]))
}

pub fn combination(entries: &[(AttributeId, &[ValueId])], in_stock: bool) -> Combination {
    Combination::new(
        entries
            .iter()
            .map(|(id, values)| CombinationAttribute::new(*id, values.iter().copied()))
            .collect(),
        in_stock,
    )
}
