use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::delivery::{derive_vehicle_options, DeliveryPricingSummary, VehicleOption};
use super::wire::{amount_from_json, string_from_json, volume_from_json};

/// A backend collection the API client and the mock layer both know how to address.
pub trait Resource: Clone + Serialize + DeserializeOwned + Send + 'static {
    /// Path segment under the API root, without slashes.
    const PATH: &'static str;
    /// Fields accepted by the `sort` query parameter.
    const SORTABLE: &'static [&'static str];

    fn id(&self) -> &str;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Draft,
    Confirmed,
    InDelivery,
    Delivered,
    Returned,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Draft,
        OrderStatus::Confirmed,
        OrderStatus::InDelivery,
        OrderStatus::Delivered,
        OrderStatus::Returned,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Draft => "draft",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::InDelivery => "in_delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Returned => "returned",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Draft => "Draft",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::InDelivery => "In delivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Returned => "Returned",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    pub fn from_str_opt(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == raw)
    }
}

/// Pricing inputs computed by the backend when the order was quoted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeliveryQuote {
    #[serde(default, deserialize_with = "amount_from_json")]
    pub distance_km: Option<String>,
    #[serde(default, deserialize_with = "volume_from_json")]
    pub required_volume_cm3: Option<u64>,
    #[serde(default)]
    pub vehicles: Vec<VehicleOption>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(deserialize_with = "string_from_json")]
    pub id: String,
    pub number: String,
    #[serde(deserialize_with = "string_from_json")]
    pub customer_id: String,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub event_date: Option<String>,
    #[serde(default)]
    pub delivery_address: Option<String>,
    #[serde(default, deserialize_with = "volume_from_json")]
    pub total_volume_cm3: Option<u64>,
    #[serde(default)]
    pub delivery_quote: Option<DeliveryQuote>,
    #[serde(default)]
    pub delivery_pricing: Option<DeliveryPricingSummary>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Order {
    /// Volume the delivery has to carry: the quote's figure, else the order's own total.
    pub fn required_volume_cm3(&self) -> Option<u64> {
        self.delivery_quote
            .as_ref()
            .and_then(|quote| quote.required_volume_cm3)
            .or(self.total_volume_cm3)
    }

    pub fn vehicle_options(&self) -> Vec<VehicleOption> {
        self.delivery_quote
            .as_ref()
            .map(|quote| derive_vehicle_options(&quote.vehicles))
            .unwrap_or_default()
    }

    pub fn distance_km(&self) -> Option<String> {
        self.delivery_quote
            .as_ref()
            .and_then(|quote| quote.distance_km.clone())
    }
}

impl Resource for Order {
    const PATH: &'static str = "orders";
    const SORTABLE: &'static [&'static str] = &[
        "id",
        "number",
        "status",
        "event_date",
        "customer_id",
        "total_volume_cm3",
        "created_at",
    ];

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(deserialize_with = "string_from_json")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

impl Resource for Customer {
    const PATH: &'static str = "customers";
    const SORTABLE: &'static [&'static str] = &["id", "name", "email", "company"];

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(deserialize_with = "string_from_json")]
    pub id: String,
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "amount_from_json")]
    pub daily_rate: Option<String>,
    #[serde(default, deserialize_with = "volume_from_json")]
    pub volume_cm3: Option<u64>,
    #[serde(default)]
    pub stock: u32,
}

impl Resource for Product {
    const PATH: &'static str = "products";
    const SORTABLE: &'static [&'static str] =
        &["id", "sku", "name", "category", "daily_rate", "volume_cm3", "stock"];

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InventoryStatus {
    #[default]
    Available,
    Reserved,
    Rented,
    Maintenance,
    WrittenOff,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    #[serde(deserialize_with = "string_from_json")]
    pub id: String,
    #[serde(deserialize_with = "string_from_json")]
    pub product_id: String,
    pub serial: String,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub status: InventoryStatus,
}

impl Resource for InventoryItem {
    const PATH: &'static str = "inventory-items";
    const SORTABLE: &'static [&'static str] =
        &["id", "product_id", "serial", "location", "status"];

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Waybill,
    Invoice,
    Contract,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(deserialize_with = "string_from_json")]
    pub id: String,
    #[serde(deserialize_with = "string_from_json")]
    pub order_id: String,
    pub kind: DocumentKind,
    pub number: String,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Resource for Document {
    const PATH: &'static str = "documents";
    const SORTABLE: &'static [&'static str] = &["id", "order_id", "kind", "number", "created_at"];

    fn id(&self) -> &str {
        &self.id
    }
}
