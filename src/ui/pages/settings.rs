use dioxus::prelude::*;
use tracing::{info, warn};

use crate::{
    config::{ApiMode, AppConfig},
    infra::RentalApi,
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        theme,
    },
    util::version::{version_label, APP_NAME},
};

#[component]
pub fn SettingsPage() -> Element {
    let mut config = use_context::<Signal<AppConfig>>();
    let mut api = use_context::<Signal<RentalApi>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let initial = config.peek().clone();
    let mut mode = use_signal(|| initial.api.mode);
    let mut base_url = use_signal(|| initial.api.base_url.clone());
    let mut token = use_signal(|| initial.api.access_token.clone().unwrap_or_default());

    let on_apply = move |_| {
        let mut candidate = config.peek().clone();
        candidate.api.mode = mode();
        candidate.api.base_url = base_url().trim().to_string();
        let token_input = token().trim().to_string();
        if candidate.api.access_token.as_deref().unwrap_or_default() != token_input {
            // A new access token invalidates the stored refresh token.
            candidate.api.refresh_token = None;
        }
        candidate.api.access_token = Some(token_input).filter(|value| !value.is_empty());

        if let Err(err) = candidate.validate() {
            push_toast(toasts, ToastKind::Error, err.to_string());
            return;
        }
        let client = match candidate.build_api() {
            Ok(client) => client,
            Err(err) => {
                push_toast(toasts, ToastKind::Error, format!("Failed to build API client: {err}"));
                return;
            }
        };

        api.set(client);
        info!(%candidate, "settings applied");
        match candidate.save() {
            Ok(path) => push_toast(
                toasts,
                ToastKind::Success,
                format!("Settings saved to {}.", path.display()),
            ),
            Err(err) => {
                warn!(%err, "failed to save config");
                push_toast(
                    toasts,
                    ToastKind::Warning,
                    format!("Applied for this session only; saving failed: {err}"),
                );
            }
        }
        config.set(candidate);
    };

    let on_reset = move |_| {
        let defaults = AppConfig::default();
        mode.set(defaults.api.mode);
        base_url.set(defaults.api.base_url);
        token.set(String::new());
    };

    let config_path = AppConfig::config_path()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|err| err.to_string());
    let active_mode = api.read().transport().label();

    rsx! {
        div { class: "stack",
            section { class: theme::PANEL,
                h2 { class: theme::PANEL_TITLE, "Backend connection" }
                div { class: "toolbar",
                    label { class: "field",
                        "Mode"
                        select {
                            class: theme::SELECT,
                            onchange: move |evt: FormEvent| {
                                if let Some(parsed) = ApiMode::parse(&evt.value()) {
                                    mode.set(parsed);
                                }
                            },
                            option { value: "mock", selected: mode() == ApiMode::Mock, "Mock (seeded data)" }
                            option { value: "http", selected: mode() == ApiMode::Http, "HTTP backend" }
                        }
                    }
                    label { class: "field",
                        "Base URL"
                        input {
                            class: theme::INPUT,
                            disabled: mode() == ApiMode::Mock,
                            value: base_url(),
                            oninput: move |evt| base_url.set(evt.value()),
                        }
                    }
                    label { class: "field",
                        "Access token"
                        input {
                            class: theme::INPUT,
                            r#type: "password",
                            disabled: mode() == ApiMode::Mock,
                            value: token(),
                            oninput: move |evt| token.set(evt.value()),
                        }
                    }
                }
                div { class: "toolbar",
                    button { class: "btn-primary", onclick: on_apply, "Apply" }
                    button { class: "btn", onclick: on_reset, "Reset defaults" }
                }
                p { class: "hint", "Active transport: {active_mode}. Config file: {config_path}" }
            }

            section { class: theme::PANEL,
                h2 { class: theme::PANEL_TITLE, "About" }
                p { class: "hint", "{APP_NAME} {version_label()}" }
            }
        }
    }
}
