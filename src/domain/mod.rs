//! Domain logic for orders and delivery pricing lives here.

pub mod app_state;
pub mod delivery;
pub mod entities;
pub mod selection;
pub mod wire;

pub use app_state::{
    AppState, OrdersView, PageInfo, PersistedState, DEFAULT_ORDER_SORT, DEFAULT_PAGE_SIZE,
    ORDER_SORT_OPTIONS,
};
pub use delivery::{
    derive_vehicle_options, evaluate_delivery_selection, DeliveryError, DeliveryEvaluation,
    DeliveryPricingSummary, TransportAllocation, TransportSelection, VehicleOption,
    VehicleOptionError,
};
pub use entities::{
    Customer, DeliveryQuote, Document, DocumentKind, InventoryItem, InventoryStatus, Order,
    OrderStatus, Product, Resource,
};
pub use selection::{SelectionDraft, SelectionRow};
pub use wire::format_amount;
