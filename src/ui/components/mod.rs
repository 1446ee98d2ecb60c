pub mod kpi_card;
pub mod order_table;
pub mod toast;
pub mod transport_table;

pub use kpi_card::KpiCard;
pub use order_table::OrderTable;
pub use toast::Toast;
pub use transport_table::TransportTable;
