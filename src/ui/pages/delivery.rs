use dioxus::prelude::*;
use tracing::{info, warn};

use crate::{
    app::{persist_user_state, Route},
    domain::{evaluate_delivery_selection, AppState, Order, SelectionDraft},
    infra::RentalApi,
    ui::{
        components::{
            toast::{push_toast, ToastKind, ToastMessage},
            KpiCard, TransportTable,
        },
        format, theme,
    },
};

#[component]
pub fn DeliveryPage(id: String) -> Element {
    let api = use_context::<Signal<RentalApi>>();

    let order = use_resource(move || {
        let id = id.clone();
        async move {
            let client = api();
            client
                .get::<Order>(&id)
                .await
                .map_err(|err| err.to_string())
        }
    });

    let loaded = order.read().clone();
    match loaded {
        None => rsx! { p { class: "hint", "Loading order…" } },
        Some(Err(message)) => rsx! {
            section { class: theme::PANEL,
                p { class: "inline-error", "Failed to load order: {message}" }
                Link { class: "link", to: Route::Orders {}, "← Back to orders" }
            }
        },
        Some(Ok(order)) => rsx! { DeliveryForm { key: "{order.id}", order: order.clone() } },
    }
}

#[component]
fn DeliveryForm(order: Order) -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let api = use_context::<Signal<RentalApi>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let options = use_hook(|| order.vehicle_options());
    let required_volume = order.required_volume_cm3();

    let mut draft = use_signal(|| {
        let saved = state.peek().selection_drafts.get(&order.id).cloned();
        SelectionDraft::restore(saved.as_deref(), order.delivery_pricing.as_ref(), &options)
    });
    let mut saving = use_signal(|| false);

    let evaluation = use_memo({
        let options = options.clone();
        move || evaluate_delivery_selection(required_volume, &options, &draft.read().selections())
    });

    // Every edit is kept as an unsaved draft so it survives navigation and restarts.
    let edit = use_callback({
        let order_id = order.id.clone();
        move |change: Box<dyn FnOnce(&mut SelectionDraft)>| {
            draft.with_mut(|current| change(current));
            let selections = draft.peek().selections();
            state.with_mut(|st| {
                st.selection_drafts.insert(order_id.clone(), selections);
            });
            persist_user_state(&state);
        }
    });

    let on_save = {
        let order_id = order.id.clone();
        let number = order.number.clone();
        let distance_km = order.distance_km();
        move |_| {
            let current = evaluation.peek().clone();
            let Some(summary) = current.payload.filter(|_| current.error.is_none()) else {
                return;
            };
            let summary = summary.with_distance(distance_km.clone());
            let order_id = order_id.clone();
            let number = number.clone();
            saving.set(true);

            spawn(async move {
                let client = api.peek().clone();
                match client.update_service_totals(&order_id, &summary).await {
                    Ok(updated) => {
                        info!(order_id = %order_id, "delivery pricing updated");
                        state.with_mut(|st| {
                            st.selection_drafts.remove(&order_id);
                            st.upsert_order(updated);
                        });
                        persist_user_state(&state);
                        push_toast(
                            toasts,
                            ToastKind::Success,
                            format!("Delivery pricing saved for order {number}."),
                        );
                    }
                    Err(err) => {
                        warn!(order_id = %order_id, %err, "failed to save delivery pricing");
                        push_toast(
                            toasts,
                            ToastKind::Error,
                            format!("Failed to save delivery pricing: {err}"),
                        );
                    }
                }
                saving.set(false);
            });
        }
    };

    let result = evaluation();
    let rows = draft.read().rows.clone();
    let can_save = result.can_submit() && !saving();
    let vehicle_count = result.total_transport_count;
    let address = order.delivery_address.clone().unwrap_or_default();
    let distance = order
        .distance_km()
        .map(|km| format!("{km} km"))
        .unwrap_or_else(|| "distance not quoted".to_string());

    rsx! {
        div { class: "stack",
            section { class: theme::PANEL,
                Link { class: "link", to: Route::Orders {}, "← Back to orders" }
                h2 { class: theme::PANEL_TITLE, "Delivery for order {order.number}" }
                p { class: "hint",
                    span { class: theme::status_badge(order.status), "{order.status.label()}" }
                    " {address} · {distance}"
                }
            }

            div { class: "kpi-grid",
                KpiCard {
                    title: "Required volume".to_string(),
                    value: format::volume_m3(required_volume),
                }
                KpiCard {
                    title: "Selected capacity".to_string(),
                    value: format::volume_m3(result.total_capacity_cm3),
                    description: format!("{vehicle_count} vehicle(s)"),
                }
                KpiCard {
                    title: "Delivery cost".to_string(),
                    value: format::money(result.total_delivery_cost),
                }
                KpiCard {
                    title: "Average per vehicle".to_string(),
                    value: format::money(result.average_cost_per_transport),
                }
            }

            section { class: theme::PANEL,
                h2 { class: theme::PANEL_TITLE, "Vehicles" }
                if options.is_empty() {
                    p { class: "hint", "This order has no delivery quote; no vehicles are available." }
                }
                for row in rows {
                    div { key: "{row.id}", class: "selection-row",
                        select {
                            class: theme::SELECT,
                            onchange: {
                                let row_id = row.id.clone();
                                move |evt: FormEvent| {
                                    let row_id = row_id.clone();
                                    let value = evt.value();
                                    edit.call(Box::new(move |d| d.set_vehicle(&row_id, &value)));
                                }
                            },
                            for vehicle in options.iter() {
                                option {
                                    value: "{vehicle.value}",
                                    selected: vehicle.value == row.vehicle_value,
                                    "{vehicle.label} · {format::volume_m3(vehicle.capacity_volume_cm3)}"
                                }
                            }
                        }
                        input {
                            class: "{theme::INPUT} input-count",
                            r#type: "number",
                            min: "0",
                            value: "{row.count}",
                            oninput: {
                                let row_id = row.id.clone();
                                move |evt: FormEvent| {
                                    let row_id = row_id.clone();
                                    let raw = evt.value();
                                    edit.call(Box::new(move |d| d.set_count(&row_id, &raw)));
                                }
                            },
                        }
                        button {
                            class: "btn-danger",
                            onclick: {
                                let row_id = row.id.clone();
                                move |_| {
                                    let row_id = row_id.clone();
                                    edit.call(Box::new(move |d| {
                                        d.remove_row(&row_id);
                                    }));
                                }
                            },
                            "Remove"
                        }
                    }
                }
                div { class: "toolbar",
                    button {
                        class: "btn",
                        disabled: options.is_empty(),
                        onclick: {
                            let options = options.clone();
                            move |_| {
                                let options = options.clone();
                                edit.call(Box::new(move |d| {
                                    d.add_row(&options);
                                }));
                            }
                        },
                        "Add vehicle"
                    }
                    button {
                        class: "btn",
                        onclick: {
                            let options = options.clone();
                            move |_| {
                                let options = options.clone();
                                edit.call(Box::new(move |d| *d = SelectionDraft::suggested(&options)));
                            }
                        },
                        "Reset to suggestion"
                    }
                    button {
                        class: "btn-primary",
                        disabled: !can_save,
                        onclick: on_save,
                        if saving() { "Saving…" } else { "Save delivery pricing" }
                    }
                }
                if let Some(message) = result.error_message() {
                    p { class: "inline-error", "{message}" }
                } else if result.is_empty() {
                    p { class: "hint", "Select at least one vehicle to price the delivery." }
                }
            }

            if !result.allocations.is_empty() {
                section { class: theme::PANEL,
                    h2 { class: theme::PANEL_TITLE, "Breakdown" }
                    TransportTable { allocations: result.allocations.clone() }
                }
            }
        }
    }
}
