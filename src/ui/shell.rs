use dioxus::prelude::*;

use crate::app::Route;
use crate::infra::RentalApi;
use crate::ui::theme;
use crate::util::version::{version_label, APP_NAME};

#[component]
pub fn Shell(children: Element) -> Element {
    let api = use_context::<Signal<RentalApi>>();
    let current_route = use_route::<Route>();
    let nav = use_navigator();

    let mode = api.read().transport().label();
    let on_orders = matches!(
        current_route,
        Route::Orders {} | Route::OrderDelivery { .. }
    );
    let on_settings = matches!(current_route, Route::Settings {});

    rsx! {
        div { class: "app-shell",
            header { class: "app-header",
                div {
                    h1 { class: "app-title", "{APP_NAME}" }
                    p { class: "app-subtitle", "Orders and delivery pricing" }
                }
                nav { class: "nav",
                    span { class: "mode-pill", "{mode}" }
                    button {
                        class: theme::nav_button(on_orders),
                        onclick: move |_| {
                            nav.push(Route::Orders {});
                        },
                        "Orders"
                    }
                    button {
                        class: theme::nav_button(on_settings),
                        onclick: move |_| {
                            nav.push(Route::Settings {});
                        },
                        "Settings"
                    }
                }
            }
            main { class: "app-main", {children} }
            footer { class: "app-footer", "{version_label()}" }
        }
    }
}
