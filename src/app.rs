use dioxus::{prelude::*, signals::Signal};
use tracing::{info, warn};

use crate::{
    config::AppConfig,
    domain::AppState,
    infra::{MockTransport, RentalApi, Transport},
    ui::{
        components::toast::{Toast, ToastMessage},
        pages::{DeliveryPage, OrdersPage, SettingsPage},
        shell::Shell,
    },
    util::{
        assets,
        persistence::{load_persisted_state, persist_or_warn},
    },
};

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    #[route("/orders")]
    Orders {},
    #[route("/orders/:id/delivery")]
    OrderDelivery { id: String },
    #[route("/settings")]
    Settings {},
}

#[component]
pub fn App() -> Element {
    let mut state = use_signal(AppState::default);
    use_hook(move || {
        let saved = load_persisted_state();
        state.with_mut(|st| st.apply_persisted(saved));
    });
    use_context_provider(|| state);

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts);

    let startup = use_context::<AppConfig>();
    let config = use_signal(move || startup);
    use_context_provider(|| config);

    let api = use_signal(|| build_api_or_mock(&config.peek()));
    use_context_provider(|| api);

    rsx! {
        document::Style { "{assets::main_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

pub fn persist_user_state(state: &Signal<AppState>) {
    let snapshot = state.with(|st| st.to_persisted());
    persist_or_warn(&snapshot);
}

fn build_api_or_mock(config: &AppConfig) -> RentalApi {
    match config.build_api() {
        Ok(api) => {
            info!(mode = api.transport().label(), "api client ready");
            api
        }
        Err(err) => {
            warn!(%err, "failed to build configured api client; using the mock backend");
            RentalApi::new(Transport::Mock(MockTransport::seeded()))
        }
    }
}

#[component]
pub fn Orders() -> Element {
    rsx! { Shell { OrdersPage {} } }
}

#[component]
pub fn OrderDelivery(id: String) -> Element {
    rsx! { Shell { DeliveryPage { key: "{id}", id: id.clone() } } }
}

#[component]
pub fn Settings() -> Element {
    rsx! { Shell { SettingsPage {} } }
}
