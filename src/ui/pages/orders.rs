use dioxus::prelude::*;
use tracing::warn;

use crate::{
    app::persist_user_state,
    domain::{AppState, Order, OrderStatus, OrdersView, PageInfo, ORDER_SORT_OPTIONS},
    infra::{ListQuery, RentalApi},
    ui::{
        components::{
            toast::{push_toast, ToastKind, ToastMessage},
            OrderTable,
        },
        theme,
    },
};

const PAGE_SIZE_CHOICES: [u32; 4] = [10, 20, 50, 100];

#[component]
pub fn OrdersPage() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let api = use_context::<Signal<RentalApi>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let mut view = use_signal(|| state.peek().orders_view.clone());

    let mut orders = use_resource(move || async move {
        let current = view();
        let client = api();
        load_orders(state, toasts, client, current).await
    });

    let mut update_view = move |change: Box<dyn FnOnce(&mut OrdersView)>| {
        view.with_mut(|current| change(current));
        let snapshot = view.peek().clone();
        state.with_mut(|st| st.orders_view = snapshot);
        persist_user_state(&state);
    };

    let current = view();
    let page_info = state.with(|st| st.orders_page.clone());
    let loaded = orders.read().clone();

    rsx! {
        div { class: "stack",
            section { class: theme::PANEL,
                h2 { class: theme::PANEL_TITLE, "Orders" }
                div { class: "toolbar",
                    label { class: "field",
                        "Status"
                        select {
                            class: theme::SELECT,
                            onchange: move |evt: FormEvent| {
                                let status = OrderStatus::from_str_opt(&evt.value());
                                update_view(Box::new(move |v| {
                                    v.status = status;
                                    v.page = 1;
                                }));
                            },
                            option { value: "", selected: current.status.is_none(), "All statuses" }
                            for status in OrderStatus::ALL {
                                option {
                                    value: status.as_str(),
                                    selected: current.status == Some(status),
                                    "{status.label()}"
                                }
                            }
                        }
                    }
                    label { class: "field",
                        "Sort"
                        select {
                            class: theme::SELECT,
                            onchange: move |evt: FormEvent| {
                                let sort = evt.value();
                                update_view(Box::new(move |v| {
                                    v.sort = sort;
                                    v.page = 1;
                                }));
                            },
                            for (value, label) in ORDER_SORT_OPTIONS {
                                option { value, selected: current.sort == value, "{label}" }
                            }
                        }
                    }
                    label { class: "field",
                        "Per page"
                        select {
                            class: theme::SELECT,
                            onchange: move |evt: FormEvent| {
                                if let Ok(size) = evt.value().parse::<u32>() {
                                    update_view(Box::new(move |v| {
                                        v.page_size = size;
                                        v.page = 1;
                                    }));
                                }
                            },
                            for size in PAGE_SIZE_CHOICES {
                                option {
                                    value: "{size}",
                                    selected: current.page_size == size,
                                    "{size}"
                                }
                            }
                        }
                    }
                    button { class: "btn", onclick: move |_| orders.restart(), "Refresh" }
                }
            }

            section { class: theme::PANEL,
                match loaded {
                    None => rsx! { p { class: "hint", "Loading orders…" } },
                    Some(Err(message)) => rsx! {
                        p { class: "inline-error", "Failed to load orders: {message}" }
                    },
                    Some(Ok(items)) => rsx! {
                        OrderTable { orders: items }
                        Pager {
                            info: page_info,
                            on_page: move |page: u32| update_view(Box::new(move |v| v.page = page)),
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn Pager(info: PageInfo, on_page: EventHandler<u32>) -> Element {
    let page = info.page;
    let total_pages = info.total_pages.max(1);
    rsx! {
        div { class: "pager",
            span { "{info.total} orders · page {page} of {total_pages}" }
            button {
                class: "btn",
                disabled: !info.has_previous(),
                onclick: move |_| on_page.call(page.saturating_sub(1).max(1)),
                "← Previous"
            }
            button {
                class: "btn",
                disabled: !info.has_next(),
                onclick: move |_| on_page.call(page + 1),
                "Next →"
            }
        }
    }
}

async fn load_orders(
    mut state: Signal<AppState>,
    toasts: Signal<Vec<ToastMessage>>,
    client: RentalApi,
    view: OrdersView,
) -> Result<Vec<Order>, String> {
    match client.list::<Order>(&ListQuery::from(&view)).await {
        Ok(page) => {
            let items = page.items.clone();
            state.with_mut(|st| {
                st.orders = page.items;
                st.orders_page = page.page;
            });
            Ok(items)
        }
        Err(err) => {
            warn!(%err, "failed to load orders");
            push_toast(
                toasts,
                ToastKind::Error,
                format!("Failed to load orders: {err}"),
            );
            Err(err.to_string())
        }
    }
}
