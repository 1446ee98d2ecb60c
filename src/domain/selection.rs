//! Editable vehicle selection backing the delivery form.

use serde::{Deserialize, Serialize};

use super::delivery::{DeliveryPricingSummary, TransportSelection, VehicleOption};
use crate::util::generate_id;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRow {
    pub id: String,
    pub vehicle_value: String,
    pub count: i64,
}

impl SelectionRow {
    fn new(vehicle_value: impl Into<String>, count: i64) -> Self {
        Self {
            id: generate_id("transport"),
            vehicle_value: vehicle_value.into(),
            count,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionDraft {
    pub rows: Vec<SelectionRow>,
}

impl SelectionDraft {
    pub fn from_selections(selections: &[TransportSelection]) -> Self {
        Self {
            rows: selections
                .iter()
                .map(|selection| SelectionRow::new(selection.vehicle_value.clone(), selection.count))
                .collect(),
        }
    }

    pub fn from_summary(summary: &DeliveryPricingSummary) -> Self {
        Self::from_selections(&summary.selections())
    }

    /// One vehicle of the largest class, or nothing when the catalog is empty.
    pub fn suggested(options: &[VehicleOption]) -> Self {
        let rows = options
            .first()
            .map(|option| vec![SelectionRow::new(option.value.clone(), 1)])
            .unwrap_or_default();
        Self { rows }
    }

    /// Starting draft for an order: an unsaved draft wins, then the pricing already stored on
    /// the order, then the suggestion.
    pub fn restore(
        saved: Option<&[TransportSelection]>,
        pricing: Option<&DeliveryPricingSummary>,
        options: &[VehicleOption],
    ) -> Self {
        if let Some(saved) = saved.filter(|saved| !saved.is_empty()) {
            return Self::from_selections(saved);
        }
        if let Some(pricing) = pricing {
            return Self::from_summary(pricing);
        }
        Self::suggested(options)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Adds a row for the first vehicle class not already in the draft. When every class is
    /// taken the largest one is repeated. Returns the new row id.
    pub fn add_row(&mut self, options: &[VehicleOption]) -> Option<String> {
        let option = options
            .iter()
            .find(|option| !self.rows.iter().any(|row| row.vehicle_value == option.value))
            .or_else(|| options.first())?;
        let row = SelectionRow::new(option.value.clone(), 1);
        let id = row.id.clone();
        self.rows.push(row);
        Some(id)
    }

    pub fn remove_row(&mut self, id: &str) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| row.id != id);
        self.rows.len() != before
    }

    /// Applies raw text from the count input. Unparseable text counts as zero, which the
    /// evaluator ignores.
    pub fn set_count(&mut self, id: &str, raw: &str) {
        if let Some(row) = self.rows.iter_mut().find(|row| row.id == id) {
            row.count = raw.trim().parse::<u32>().map(i64::from).unwrap_or(0);
        }
    }

    pub fn set_vehicle(&mut self, id: &str, vehicle_value: &str) {
        if let Some(row) = self.rows.iter_mut().find(|row| row.id == id) {
            row.vehicle_value = vehicle_value.to_string();
        }
    }

    pub fn selections(&self) -> Vec<TransportSelection> {
        self.rows
            .iter()
            .map(|row| TransportSelection::new(row.vehicle_value.clone(), row.count))
            .collect()
    }
}
