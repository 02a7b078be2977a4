//! Capability interface to the selection UI.

use variant_model::{AttributeId, AttributeSelection, Selection, ValueId};

use crate::settings::ContentScope;

/// What the engine needs from whatever renders the attribute pickers.
///
/// Every query is restricted to `scope`; implementations decide how a scope
/// maps onto their widget tree.
pub trait SelectionSource {
    /// Attributes declared within `scope`, in declaration order.
    fn attribute_ids(&self, scope: &ContentScope) -> Vec<AttributeId>;

    /// Values rendered for `attribute` (or for every attribute when `None`).
    fn value_ids(&self, scope: &ContentScope, attribute: Option<AttributeId>) -> Vec<ValueId>;

    /// Values currently selected or checked for `attribute`.
    fn selected_value_ids(&self, scope: &ContentScope, attribute: AttributeId) -> Vec<ValueId>;

    /// Enable or disable a value, including any nested input control.
    fn set_value_enabled(&mut self, scope: &ContentScope, value: ValueId, enabled: bool);

    /// Current selection for the given attributes, empty entries included.
    fn selection(&self, scope: &ContentScope, attributes: &[AttributeId]) -> Selection {
        attributes
            .iter()
            .map(|&attribute| {
                AttributeSelection::new(attribute, self.selected_value_ids(scope, attribute))
            })
            .collect()
    }
}

impl<T: SelectionSource + ?Sized> SelectionSource for &mut T {
    fn attribute_ids(&self, scope: &ContentScope) -> Vec<AttributeId> {
        (**self).attribute_ids(scope)
    }

    fn value_ids(&self, scope: &ContentScope, attribute: Option<AttributeId>) -> Vec<ValueId> {
        (**self).value_ids(scope, attribute)
    }

    fn selected_value_ids(&self, scope: &ContentScope, attribute: AttributeId) -> Vec<ValueId> {
        (**self).selected_value_ids(scope, attribute)
    }

    fn set_value_enabled(&mut self, scope: &ContentScope, value: ValueId, enabled: bool) {
        (**self).set_value_enabled(scope, value, enabled);
    }
}
