use dioxus::prelude::*;

use crate::domain::TransportAllocation;
use crate::ui::{format, theme};

/// Per-vehicle breakdown of the current selection.
#[component]
pub fn TransportTable(allocations: Vec<TransportAllocation>) -> Element {
    if allocations.is_empty() {
        return rsx! { Fragment {} };
    }

    rsx! {
        table { class: theme::TABLE,
            thead {
                tr {
                    th { "Vehicle" }
                    th { class: theme::NUMERIC, "Count" }
                    th { class: theme::NUMERIC, "Capacity each" }
                    th { class: theme::NUMERIC, "Total capacity" }
                    th { class: theme::NUMERIC, "Assigned volume" }
                    th { class: theme::NUMERIC, "Cost each" }
                    th { class: theme::NUMERIC, "Total cost" }
                }
            }
            tbody {
                for allocation in allocations {
                    tr { key: "{allocation.transport.value}",
                        td { "{allocation.transport.label}" }
                        td { class: theme::NUMERIC, "{allocation.transport_count}" }
                        td { class: theme::NUMERIC, "{format::volume_m3(allocation.capacity_volume_cm3)}" }
                        td { class: theme::NUMERIC, "{format::volume_m3(allocation.total_capacity_cm3)}" }
                        td { class: theme::NUMERIC, "{format::volume_m3(allocation.required_volume_cm3)}" }
                        td { class: theme::NUMERIC, "{format::money_str(allocation.cost_per_transport.as_deref())}" }
                        td { class: theme::NUMERIC, "{format::money_str(allocation.total_cost.as_deref())}" }
                    }
                }
            }
        }
    }
}
