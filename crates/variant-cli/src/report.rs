//! Rendering of availability results and combination listings.

use std::fmt::Write as _;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;
use variant_engine::{LoadState, StaticSelection};
use variant_model::{AttributeId, Availability, AvailabilitySet, Combination, ValueId};

/// One value row of an availability report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub attribute_id: AttributeId,
    pub attribute: String,
    pub value_id: ValueId,
    pub value: String,
    pub selected: bool,
    /// `None` for values that were not evaluated (placeholders).
    pub availability: Option<Availability>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityReport {
    pub load_state: &'static str,
    pub combinations: usize,
    /// Availability passes run while producing the report.
    pub recomputations: usize,
    pub rows: Vec<ReportRow>,
}

fn load_state_label(state: LoadState) -> &'static str {
    match state {
        LoadState::NotStarted => "not started",
        LoadState::InFlight => "in flight",
        LoadState::Loaded => "loaded",
        LoadState::Failed => "failed",
    }
}

impl AvailabilityReport {
    /// Rows for every value of `attribute_ids`, in layout order.
    pub fn build(
        ui: &StaticSelection,
        attribute_ids: &[AttributeId],
        availability: &AvailabilitySet,
        load_state: LoadState,
        combinations: usize,
        recomputations: usize,
    ) -> Self {
        let rows = attribute_ids
            .iter()
            .filter_map(|&id| ui.attribute(id))
            .flat_map(|attribute| {
                attribute.values.iter().map(move |value| ReportRow {
                    attribute_id: attribute.id,
                    attribute: attribute.name.clone(),
                    value_id: value.id,
                    value: value.name.clone(),
                    selected: value.selected,
                    availability: availability.get(value.id),
                })
            })
            .collect();
        Self {
            load_state: load_state_label(load_state),
            combinations,
            recomputations,
            rows,
        }
    }

    pub fn enabled_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| row.availability.is_some_and(|a| a.is_enabled()))
            .count()
    }
}

fn state_text(availability: Option<Availability>) -> String {
    match availability {
        None => "-".to_string(),
        Some(Availability::Enabled) => "enabled".to_string(),
        Some(Availability::Disabled(reason)) => format!("disabled ({reason})"),
    }
}

/// Plain-text rendering, one attribute header followed by its values.
pub fn render_text(report: &AvailabilityReport) -> String {
    let mut out = String::new();
    let mut current = None;
    for row in &report.rows {
        if current != Some(row.attribute_id) {
            current = Some(row.attribute_id);
            let _ = writeln!(out, "{} ({})", row.attribute, row.attribute_id);
        }
        let marker = if row.selected { " *" } else { "" };
        let _ = writeln!(
            out,
            "  {} ({}){}: {}",
            row.value,
            row.value_id,
            marker,
            state_text(row.availability)
        );
    }
    let _ = write!(
        out,
        "{} of {} values enabled; {} combinations ({})",
        report.enabled_count(),
        report.rows.len(),
        report.combinations,
        report.load_state
    );
    out
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn availability_cell(availability: Option<Availability>) -> Cell {
    match availability {
        None => Cell::new("-").add_attribute(Attribute::Dim),
        Some(Availability::Enabled) => Cell::new("enabled").fg(Color::Green),
        Some(Availability::Disabled(_)) => Cell::new("disabled").fg(Color::Red),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

pub fn availability_table(report: &AvailabilityReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Attribute"),
        header_cell("Value"),
        header_cell("Id"),
        header_cell("Selected"),
        header_cell("State"),
        header_cell("Reason"),
    ]);
    apply_table_style(&mut table);
    for row in &report.rows {
        let reason = row
            .availability
            .and_then(|a| a.reason())
            .map(|reason| reason.to_string())
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(&row.attribute),
            Cell::new(&row.value),
            Cell::new(row.value_id).set_alignment(CellAlignment::Right),
            Cell::new(if row.selected { "yes" } else { "" }).set_alignment(CellAlignment::Center),
            availability_cell(row.availability),
            Cell::new(reason),
        ]);
    }
    table
}

pub fn combinations_table(combinations: &[Combination]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Attributes"),
        header_cell("In stock"),
    ]);
    apply_table_style(&mut table);
    for (index, combination) in combinations.iter().enumerate() {
        let stock = if combination.in_stock {
            Cell::new("yes").fg(Color::Green)
        } else {
            Cell::new("no").fg(Color::Red)
        };
        table.add_row(vec![
            Cell::new(index + 1).set_alignment(CellAlignment::Right),
            Cell::new(describe_attributes(combination)),
            stock,
        ]);
    }
    table
}

/// `1=[10,11] 2=[20]` style summary of a combination's entries.
pub fn describe_attributes(combination: &Combination) -> String {
    combination
        .attributes
        .iter()
        .map(|attribute| {
            let values: Vec<String> = attribute
                .value_ids
                .iter()
                .map(ToString::to_string)
                .collect();
            format!("{}=[{}]", attribute.id, values.join(","))
        })
        .collect::<Vec<_>>()
        .join(" ")
}
