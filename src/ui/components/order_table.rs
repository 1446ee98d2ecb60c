use dioxus::prelude::*;

use crate::app::Route;
use crate::domain::Order;
use crate::ui::{format, theme};

#[component]
pub fn OrderTable(orders: Vec<Order>) -> Element {
    if orders.is_empty() {
        return rsx! {
            p { class: "hint", "No orders match the current filter." }
        };
    }

    rsx! {
        table { class: theme::TABLE,
            thead {
                tr {
                    th { "Order" }
                    th { "Status" }
                    th { "Event date" }
                    th { "Address" }
                    th { class: theme::NUMERIC, "Volume" }
                    th { class: theme::NUMERIC, "Delivery cost" }
                    th {}
                }
            }
            tbody {
                for order in orders {
                    OrderRow { key: "{order.id}", order: order.clone() }
                }
            }
        }
    }
}

#[component]
fn OrderRow(order: Order) -> Element {
    let delivery_cost = order
        .delivery_pricing
        .as_ref()
        .and_then(|pricing| pricing.total_delivery_cost.as_deref())
        .map(|cost| format::money_str(Some(cost)))
        .unwrap_or_else(|| "not priced".to_string());
    let event_date = order.event_date.clone().unwrap_or_default();
    let address = order.delivery_address.clone().unwrap_or_default();

    rsx! {
        tr {
            td { "{order.number}" }
            td {
                span { class: theme::status_badge(order.status), "{order.status.label()}" }
            }
            td { "{event_date}" }
            td { "{address}" }
            td { class: theme::NUMERIC, "{format::volume_m3(order.required_volume_cm3())}" }
            td { class: theme::NUMERIC, "{delivery_cost}" }
            td {
                Link {
                    class: "link",
                    to: Route::OrderDelivery { id: order.id.clone() },
                    "Delivery →"
                }
            }
        }
    }
}
