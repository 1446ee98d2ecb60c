pub mod delivery;
pub mod orders;
pub mod settings;

pub use delivery::DeliveryPage;
pub use orders::OrdersPage;
pub use settings::SettingsPage;
