//! In-memory selection UI built from a product layout description.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use variant_model::{AttributeId, AttributeSelection, ValueId};

use crate::error::{EngineError, Result};
use crate::selection_source::SelectionSource;
use crate::settings::ContentScope;

/// One selectable value as rendered by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueLayout {
    pub id: ValueId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub selected: bool,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl ValueLayout {
    pub fn new(id: ValueId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            selected: false,
            enabled: true,
        }
    }
}

/// An attribute picker and its values, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeLayout {
    pub id: AttributeId,
    #[serde(default)]
    pub name: String,
    /// Container the picker is rendered in, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    #[serde(default)]
    pub values: Vec<ValueLayout>,
}

impl AttributeLayout {
    pub fn new(id: AttributeId, name: impl Into<String>, values: Vec<ValueLayout>) -> Self {
        Self {
            id,
            name: name.into(),
            container: None,
            values,
        }
    }

    #[must_use]
    pub fn in_container(mut self, container: impl Into<String>) -> Self {
        self.container = Some(container.into());
        self
    }
}

/// The attribute pickers of a product page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductLayout {
    #[serde(default)]
    pub attributes: Vec<AttributeLayout>,
}

impl ProductLayout {
    pub fn new(attributes: Vec<AttributeLayout>) -> Self {
        Self { attributes }
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| EngineError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// A [`SelectionSource`] over a [`ProductLayout`] held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSelection {
    layout: ProductLayout,
}

impl StaticSelection {
    pub fn new(layout: ProductLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &ProductLayout {
        &self.layout
    }

    pub fn attribute(&self, id: AttributeId) -> Option<&AttributeLayout> {
        self.layout.attributes.iter().find(|attribute| attribute.id == id)
    }

    /// Replace the chosen values of `attribute`; values not listed are deselected.
    ///
    /// Returns `false` when the attribute is not part of the layout.
    pub fn select(&mut self, attribute: AttributeId, values: &[ValueId]) -> bool {
        let Some(layout) = self
            .layout
            .attributes
            .iter_mut()
            .find(|candidate| candidate.id == attribute)
        else {
            return false;
        };
        for value in &mut layout.values {
            value.selected = values.contains(&value.id);
        }
        true
    }

    pub fn apply_selection(&mut self, selection: &AttributeSelection) -> bool {
        let values: Vec<ValueId> = selection.value_ids.iter().copied().collect();
        self.select(selection.attribute_id, &values)
    }

    /// Rendered state of `value`; `None` when the value is not in the layout.
    pub fn is_enabled(&self, value: ValueId) -> Option<bool> {
        self.layout
            .attributes
            .iter()
            .flat_map(|attribute| attribute.values.iter())
            .find(|candidate| candidate.id == value)
            .map(|candidate| candidate.enabled)
    }

    fn scoped<'a>(
        &'a self,
        scope: &'a ContentScope,
    ) -> impl Iterator<Item = &'a AttributeLayout> + 'a {
        self.layout
            .attributes
            .iter()
            .filter(move |attribute| scope.contains(attribute.container.as_deref()))
    }
}

impl SelectionSource for StaticSelection {
    fn attribute_ids(&self, scope: &ContentScope) -> Vec<AttributeId> {
        self.scoped(scope).map(|attribute| attribute.id).collect()
    }

    fn value_ids(&self, scope: &ContentScope, attribute: Option<AttributeId>) -> Vec<ValueId> {
        self.scoped(scope)
            .filter(|candidate| attribute.is_none_or(|id| candidate.id == id))
            .flat_map(|candidate| candidate.values.iter().map(|value| value.id))
            .collect()
    }

    fn selected_value_ids(&self, scope: &ContentScope, attribute: AttributeId) -> Vec<ValueId> {
        self.scoped(scope)
            .filter(|candidate| candidate.id == attribute)
            .flat_map(|candidate| candidate.values.iter())
            .filter(|value| value.selected)
            .map(|value| value.id)
            .collect()
    }

    fn set_value_enabled(&mut self, scope: &ContentScope, value: ValueId, enabled: bool) {
        if !value.is_assigned() {
            return;
        }
        for attribute in self
            .layout
            .attributes
            .iter_mut()
            .filter(|attribute| scope.contains(attribute.container.as_deref()))
        {
            for candidate in attribute.values.iter_mut().filter(|v| v.id == value) {
                candidate.enabled = enabled;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> ProductLayout {
        ProductLayout::new(vec![
            AttributeLayout::new(
                AttributeId::new(1),
                "Color",
                vec![
                    ValueLayout::new(ValueId::new(10), "Red"),
                    ValueLayout::new(ValueId::new(11), "Blue"),
                ],
            )
            .in_container("main"),
            AttributeLayout::new(
                AttributeId::new(9),
                "Gift wrap",
                vec![ValueLayout::new(ValueId::new(90), "Yes")],
            )
            .in_container("addons"),
        ])
    }

    #[test]
    fn queries_respect_scope() {
        let ui = StaticSelection::new(layout());
        let main = ContentScope::element("main");
        assert_eq!(ui.attribute_ids(&main), vec![AttributeId::new(1)]);
        assert_eq!(ui.value_ids(&ContentScope::All, None).len(), 3);
        assert_eq!(
            ui.value_ids(&main, Some(AttributeId::new(9))),
            Vec::<ValueId>::new()
        );
    }

    #[test]
    fn select_replaces_previous_choice() {
        let mut ui = StaticSelection::new(layout());
        assert!(ui.select(AttributeId::new(1), &[ValueId::new(10)]));
        assert!(ui.select(AttributeId::new(1), &[ValueId::new(11)]));
        assert_eq!(
            ui.selected_value_ids(&ContentScope::All, AttributeId::new(1)),
            vec![ValueId::new(11)]
        );
        assert!(!ui.select(AttributeId::new(5), &[]));
    }

    #[test]
    fn placeholder_value_is_never_toggled() {
        let mut ui = StaticSelection::new(ProductLayout::new(vec![AttributeLayout::new(
            AttributeId::new(1),
            "Size",
            vec![ValueLayout::new(ValueId::UNASSIGNED, "Please select")],
        )]));
        ui.set_value_enabled(&ContentScope::All, ValueId::UNASSIGNED, false);
        assert_eq!(ui.is_enabled(ValueId::UNASSIGNED), Some(true));
    }

    #[test]
    fn layout_reads_json() {
        let json = r#"{"attributes":[{"id":1,"name":"Color","values":[{"id":10,"name":"Red","selected":true}]}]}"#;
        let layout: ProductLayout = serde_json::from_str(json).unwrap();
        assert!(layout.attributes[0].values[0].selected);
        assert!(layout.attributes[0].values[0].enabled);
        assert_eq!(layout.attributes[0].container, None);
    }
}
