//! Delivery pricing: vehicle catalog shaping and selection evaluation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::wire::{format_amount, number_from_json, string_from_json, MAX_AMOUNT};

/// A class of delivery vehicle offered for an order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "VehicleOptionDto", rename_all = "camelCase")]
pub struct VehicleOption {
    pub value: String,
    pub label: String,
    pub capacity_volume_cm3: Option<u64>,
    pub cost_per_trip: Option<f64>,
}

impl VehicleOption {
    pub fn new(
        value: impl Into<String>,
        label: impl Into<String>,
        capacity_volume_cm3: Option<u64>,
        cost_per_trip: Option<f64>,
    ) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            capacity_volume_cm3,
            cost_per_trip,
        }
    }

    fn capacity(&self) -> u64 {
        self.capacity_volume_cm3.unwrap_or(0)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum VehicleOptionError {
    #[error("vehicle option is missing an identifier")]
    BlankValue,
    #[error("vehicle {value} has an invalid capacity: {capacity}")]
    InvalidCapacity { value: String, capacity: f64 },
    #[error("vehicle {value} has an invalid cost per trip: {cost}")]
    InvalidCost { value: String, cost: f64 },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VehicleOptionDto {
    #[serde(deserialize_with = "string_from_json")]
    value: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(
        default,
        alias = "capacity_volume_cm3",
        deserialize_with = "number_from_json"
    )]
    capacity_volume_cm3: Option<f64>,
    #[serde(default, alias = "cost_per_trip", deserialize_with = "number_from_json")]
    cost_per_trip: Option<f64>,
}

impl TryFrom<VehicleOptionDto> for VehicleOption {
    type Error = VehicleOptionError;

    fn try_from(dto: VehicleOptionDto) -> Result<Self, Self::Error> {
        let value = dto.value.trim().to_string();
        if value.is_empty() {
            return Err(VehicleOptionError::BlankValue);
        }

        let capacity_volume_cm3 = match dto.capacity_volume_cm3 {
            Some(capacity) if !capacity.is_finite() || capacity < 0.0 => {
                return Err(VehicleOptionError::InvalidCapacity { value, capacity });
            }
            Some(capacity) => Some(capacity.round() as u64),
            None => None,
        };

        let cost_per_trip = match dto.cost_per_trip {
            Some(cost) if !(0.0..=MAX_AMOUNT).contains(&cost) => {
                return Err(VehicleOptionError::InvalidCost { value, cost });
            }
            other => other,
        };

        let label = dto
            .label
            .map(|label| label.trim().to_string())
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| value.clone());

        Ok(Self {
            value,
            label,
            capacity_volume_cm3,
            cost_per_trip,
        })
    }
}

/// How many vehicles of one class the user assigned to a delivery.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportSelection {
    pub vehicle_value: String,
    pub count: i64,
}

impl TransportSelection {
    pub fn new(vehicle_value: impl Into<String>, count: i64) -> Self {
        Self {
            vehicle_value: vehicle_value.into(),
            count,
        }
    }
}

/// Per-class breakdown of a delivery selection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportAllocation {
    pub transport: VehicleOption,
    pub transport_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_volume_cm3: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity_volume_cm3: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_capacity_cm3: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_per_transport: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<String>,
}

/// The pricing block written back to the order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryPricingSummary {
    pub transport: VehicleOption,
    pub transport_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_per_transport: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_delivery_cost: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_volume_cm3: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_capacity_cm3: Option<u64>,
    #[serde(default)]
    pub transports: Vec<TransportAllocation>,
}

impl DeliveryPricingSummary {
    pub fn with_distance(mut self, distance_km: Option<String>) -> Self {
        self.distance_km = distance_km;
        self
    }

    /// Reconstructs the selection that produced this summary.
    pub fn selections(&self) -> Vec<TransportSelection> {
        if self.transports.is_empty() {
            return vec![TransportSelection::new(
                self.transport.value.clone(),
                i64::from(self.transport_count),
            )];
        }
        self.transports
            .iter()
            .map(|entry| {
                TransportSelection::new(
                    entry.transport.value.clone(),
                    i64::from(entry.transport_count),
                )
            })
            .collect()
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("selected vehicle types do not meet order requirements")]
    CapacityClassMismatch {
        required_capacity_cm3: u64,
        selected_capacity_cm3: u64,
    },
    #[error("selected vehicles do not cover required volume")]
    InsufficientVolumeCoverage {
        required_volume_cm3: u64,
        total_capacity_cm3: u64,
    },
    #[error("delivery cost exceeds the supported amount")]
    CostOutOfRange,
}

/// Result of evaluating a selection. Errors are values, never panics.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeliveryEvaluation {
    pub payload: Option<DeliveryPricingSummary>,
    pub error: Option<DeliveryError>,
    pub total_transport_count: u32,
    pub total_capacity_cm3: Option<u64>,
    pub total_delivery_cost: Option<f64>,
    pub average_cost_per_transport: Option<f64>,
    pub allocations: Vec<TransportAllocation>,
}

impl DeliveryEvaluation {
    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }

    pub fn can_submit(&self) -> bool {
        self.payload.is_some() && self.error.is_none()
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|error| error.to_string())
    }
}

/// Collapses repeated vehicle classes into one option each (largest capacity wins)
/// and orders the catalog from the largest class down. Unknown capacities go last.
pub fn derive_vehicle_options(candidates: &[VehicleOption]) -> Vec<VehicleOption> {
    let mut options: Vec<VehicleOption> = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        match options
            .iter_mut()
            .find(|option| option.value == candidate.value)
        {
            Some(existing) => {
                if candidate.capacity_volume_cm3 > existing.capacity_volume_cm3 {
                    let fallback_cost = existing.cost_per_trip;
                    *existing = candidate.clone();
                    if existing.cost_per_trip.is_none() {
                        existing.cost_per_trip = fallback_cost;
                    }
                } else if existing.cost_per_trip.is_none() {
                    existing.cost_per_trip = candidate.cost_per_trip;
                }
            }
            None => options.push(candidate.clone()),
        }
    }

    options.sort_by(|a, b| b.capacity_volume_cm3.cmp(&a.capacity_volume_cm3));
    options
}

/// Checks a vehicle selection against the order volume and the catalog's largest class,
/// and builds the pricing summary when the selection is acceptable.
pub fn evaluate_delivery_selection(
    required_volume_cm3: Option<u64>,
    options: &[VehicleOption],
    selections: &[TransportSelection],
) -> DeliveryEvaluation {
    let chosen = resolve_selections(options, selections);
    if chosen.is_empty() {
        return DeliveryEvaluation::default();
    }

    let mut allocations: Vec<TransportAllocation> = chosen
        .iter()
        .map(|(option, count)| {
            let count = *count;
            TransportAllocation {
                transport: (*option).clone(),
                transport_count: count,
                required_volume_cm3: None,
                capacity_volume_cm3: option.capacity_volume_cm3,
                total_capacity_cm3: option
                    .capacity_volume_cm3
                    .map(|capacity| capacity.saturating_mul(u64::from(count))),
                cost_per_transport: option.cost_per_trip.map(format_amount),
                total_cost: option
                    .cost_per_trip
                    .map(|cost| format_amount(cost * f64::from(count))),
            }
        })
        .collect();

    let total_transport_count = chosen
        .iter()
        .fold(0u32, |sum, (_, count)| sum.saturating_add(*count));
    let total_capacity_cm3 = allocations.iter().fold(0u64, |sum, entry| {
        sum.saturating_add(entry.total_capacity_cm3.unwrap_or(0))
    });
    let total_delivery_cost: f64 = chosen
        .iter()
        .map(|(option, count)| option.cost_per_trip.unwrap_or(0.0) * f64::from(*count))
        .sum();
    let average_cost_per_transport = if total_transport_count > 0 {
        Some(total_delivery_cost / f64::from(total_transport_count))
    } else {
        None
    };

    assign_required_volume(&mut allocations, required_volume_cm3);

    let mut evaluation = DeliveryEvaluation {
        payload: None,
        error: None,
        total_transport_count,
        total_capacity_cm3: Some(total_capacity_cm3),
        total_delivery_cost: Some(total_delivery_cost),
        average_cost_per_transport,
        allocations,
    };

    let required_capacity_cm3 = options
        .iter()
        .map(VehicleOption::capacity)
        .max()
        .unwrap_or(0);
    let selected_capacity_cm3 = chosen
        .iter()
        .map(|(option, _)| option.capacity())
        .max()
        .unwrap_or(0);

    if required_capacity_cm3 > 0 && selected_capacity_cm3 < required_capacity_cm3 {
        evaluation.error = Some(DeliveryError::CapacityClassMismatch {
            required_capacity_cm3,
            selected_capacity_cm3,
        });
        return evaluation;
    }

    if let Some(required) = required_volume_cm3.filter(|volume| *volume > 0) {
        if total_capacity_cm3 < required {
            evaluation.error = Some(DeliveryError::InsufficientVolumeCoverage {
                required_volume_cm3: required,
                total_capacity_cm3,
            });
            return evaluation;
        }
    }

    let cost_in_range = |cost: f64| cost.is_finite() && cost <= MAX_AMOUNT;
    if !cost_in_range(total_delivery_cost)
        || chosen.iter().any(|(option, count)| {
            option
                .cost_per_trip
                .is_some_and(|cost| !cost_in_range(cost * f64::from(*count)))
        })
    {
        evaluation.error = Some(DeliveryError::CostOutOfRange);
        return evaluation;
    }

    let primary = chosen
        .iter()
        .map(|(option, _)| *option)
        .reduce(|best, candidate| {
            if candidate.capacity() > best.capacity() {
                candidate
            } else {
                best
            }
        });

    if let Some(primary) = primary {
        evaluation.payload = Some(DeliveryPricingSummary {
            transport: primary.clone(),
            transport_count: total_transport_count,
            distance_km: None,
            cost_per_transport: average_cost_per_transport.map(format_amount),
            total_delivery_cost: Some(format_amount(total_delivery_cost)),
            total_volume_cm3: required_volume_cm3,
            total_capacity_cm3: Some(total_capacity_cm3),
            transports: evaluation.allocations.clone(),
        });
    }

    evaluation
}

/// Keeps selections that name a known vehicle with a positive count. Repeated rows for the
/// same vehicle are merged in first-seen order.
fn resolve_selections<'a>(
    options: &'a [VehicleOption],
    selections: &[TransportSelection],
) -> Vec<(&'a VehicleOption, u32)> {
    let mut chosen: Vec<(&VehicleOption, u32)> = Vec::new();

    for selection in selections {
        // Non-positive counts and counts beyond u32 are dropped, never truncated.
        let Some(count) = u32::try_from(selection.count).ok().filter(|count| *count > 0) else {
            continue;
        };
        let Some(option) = options
            .iter()
            .find(|option| option.value == selection.vehicle_value)
        else {
            continue;
        };

        match chosen
            .iter_mut()
            .find(|(existing, _)| existing.value == option.value)
        {
            Some((_, total)) => *total = total.saturating_add(count),
            None => chosen.push((option, count)),
        }
    }

    chosen
}

/// Spreads the order volume over the selected classes, largest vehicles first.
fn assign_required_volume(allocations: &mut [TransportAllocation], required: Option<u64>) {
    let Some(mut remaining) = required else {
        return;
    };

    let mut order: Vec<usize> = (0..allocations.len()).collect();
    order.sort_by(|a, b| {
        allocations[*b]
            .capacity_volume_cm3
            .cmp(&allocations[*a].capacity_volume_cm3)
    });

    for index in order {
        let entry = &mut allocations[index];
        let share = remaining.min(entry.total_capacity_cm3.unwrap_or(0));
        entry.required_volume_cm3 = Some(share);
        remaining -= share;
    }
}
