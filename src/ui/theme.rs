//! Class names from `assets/main.css`, picked by state.

use crate::domain::OrderStatus;
use crate::ui::components::toast::ToastKind;

pub const PANEL: &str = "panel";
pub const PANEL_TITLE: &str = "panel-title";
pub const INPUT: &str = "input";
pub const SELECT: &str = "select";
pub const TABLE: &str = "table";
pub const NUMERIC: &str = "numeric";

pub fn status_badge(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Draft => "badge badge-draft",
        OrderStatus::Confirmed => "badge badge-confirmed",
        OrderStatus::InDelivery => "badge badge-in-delivery",
        OrderStatus::Delivered => "badge badge-delivered",
        OrderStatus::Returned => "badge badge-returned",
        OrderStatus::Cancelled => "badge badge-cancelled",
    }
}

pub fn nav_button(active: bool) -> &'static str {
    if active {
        "nav-button active"
    } else {
        "nav-button"
    }
}

pub fn toast(kind: ToastKind) -> (&'static str, &'static str) {
    match kind {
        ToastKind::Info => ("toast toast-info", "ℹ️"),
        ToastKind::Success => ("toast toast-success", "✅"),
        ToastKind::Warning => ("toast toast-warning", "⚠️"),
        ToastKind::Error => ("toast toast-error", "⛔"),
    }
}
