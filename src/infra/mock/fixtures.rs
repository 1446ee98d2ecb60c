//! Seed data for the mock backend.

use crate::domain::{
    evaluate_delivery_selection, Customer, DeliveryQuote, Document, DocumentKind, InventoryItem,
    InventoryStatus, Order, OrderStatus, Product, TransportSelection, VehicleOption,
};

const M3: u64 = 1_000_000;

pub fn customers() -> Vec<Customer> {
    [
        ("c-1", "Northwind Weddings", Some("Northwind LLC"), "events@northwind.test"),
        ("c-2", "Olga Petrova", None, "olga.petrova@mail.test"),
        ("c-3", "City Expo Centre", Some("Expo Holdings"), "booking@cityexpo.test"),
        ("c-4", "Lakeside School", Some("Lakeside Education"), "office@lakeside.test"),
    ]
    .into_iter()
    .map(|(id, name, company, email)| Customer {
        id: id.to_string(),
        name: name.to_string(),
        email: Some(email.to_string()),
        phone: None,
        company: company.map(str::to_string),
    })
    .collect()
}

pub fn products() -> Vec<Product> {
    [
        ("p-1", "TENT-6X12", "Marquee tent 6x12 m", "tents", 12_000.0, 4_500_000, 3),
        ("p-2", "CHAIR-CHIA", "Chiavari chair", "furniture", 150.0, 60_000, 400),
        ("p-3", "TABLE-RND", "Round banquet table", "furniture", 600.0, 350_000, 60),
        ("p-4", "STAGE-2X1", "Stage deck 2x1 m", "staging", 900.0, 400_000, 40),
        ("p-5", "LIGHT-PAR", "LED PAR light", "lighting", 450.0, 20_000, 80),
        ("p-6", "HEATER-GAS", "Patio gas heater", "climate", 1_200.0, 250_000, 12),
    ]
    .into_iter()
    .map(|(id, sku, name, category, rate, volume, stock)| Product {
        id: id.to_string(),
        sku: sku.to_string(),
        name: name.to_string(),
        category: Some(category.to_string()),
        daily_rate: Some(crate::domain::format_amount(rate)),
        volume_cm3: Some(volume),
        stock,
    })
    .collect()
}

pub fn inventory_items() -> Vec<InventoryItem> {
    [
        ("i-1", "p-1", "TNT-0001", "Warehouse A", InventoryStatus::Available),
        ("i-2", "p-1", "TNT-0002", "Warehouse A", InventoryStatus::Reserved),
        ("i-3", "p-1", "TNT-0003", "Repair shop", InventoryStatus::Maintenance),
        ("i-4", "p-4", "STG-0101", "Warehouse B", InventoryStatus::Available),
        ("i-5", "p-4", "STG-0102", "On site", InventoryStatus::Rented),
        ("i-6", "p-5", "PAR-0310", "Warehouse B", InventoryStatus::Available),
        ("i-7", "p-6", "HTR-0007", "Warehouse A", InventoryStatus::Available),
        ("i-8", "p-6", "HTR-0002", "Scrap", InventoryStatus::WrittenOff),
    ]
    .into_iter()
    .map(|(id, product_id, serial, location, status)| InventoryItem {
        id: id.to_string(),
        product_id: product_id.to_string(),
        serial: serial.to_string(),
        condition: Some(if status == InventoryStatus::Maintenance {
            "needs repair".to_string()
        } else {
            "good".to_string()
        }),
        location: Some(location.to_string()),
        status,
    })
    .collect()
}

/// Quotes repeat vehicle classes on purpose; the catalog is deduplicated client-side.
fn fleet() -> Vec<VehicleOption> {
    vec![
        VehicleOption::new("van", "Cargo van", Some(9 * M3), Some(2_500.0)),
        VehicleOption::new("truck_3t", "3 t truck", Some(18 * M3), Some(4_200.0)),
        VehicleOption::new("van", "Cargo van", Some(8 * M3), None),
        VehicleOption::new("truck_10t", "10 t truck", Some(45 * M3), Some(9_800.0)),
        VehicleOption::new("truck_3t", "3 t truck", Some(16 * M3), Some(4_000.0)),
    ]
}

fn city_fleet() -> Vec<VehicleOption> {
    vec![
        VehicleOption::new("van", "Cargo van", Some(9 * M3), Some(1_900.0)),
        VehicleOption::new("courier", "Courier car", Some(M3), None),
        VehicleOption::new("van", "Cargo van", Some(9 * M3), Some(2_100.0)),
    ]
}

struct OrderSeed {
    customer_id: &'static str,
    status: OrderStatus,
    event_date: &'static str,
    address: &'static str,
    volume_cm3: u64,
    distance_km: Option<&'static str>,
    city: bool,
}

pub fn orders() -> Vec<Order> {
    use OrderStatus::*;

    let seeds = [
        ("c-1", Confirmed, "2026-11-07", "12 Harbour St", 14 * M3, Some("32.40"), false),
        ("c-2", Draft, "2026-11-09", "5 Elm Lane", 3 * M3, Some("8.00"), true),
        ("c-3", InDelivery, "2026-10-19", "1 Expo Ave", 60 * M3, Some("15.75"), false),
        ("c-4", Confirmed, "2026-11-21", "40 School Rd", 7 * M3, None, true),
        ("c-1", Delivered, "2026-10-03", "Riverside Park", 22 * M3, Some("41.10"), false),
        ("c-3", Returned, "2026-09-27", "1 Expo Ave", 35 * M3, Some("15.75"), false),
        ("c-2", Cancelled, "2026-10-25", "5 Elm Lane", 2 * M3, Some("8.00"), true),
        ("c-4", Draft, "2026-12-12", "40 School Rd", 500_000, Some("11.20"), true),
        ("c-1", Draft, "2026-12-19", "Castle Hill", 95 * M3, Some("63.00"), false),
        ("c-3", Confirmed, "2026-11-14", "Hall 3, 1 Expo Ave", 18 * M3, Some("15.75"), false),
        ("c-2", Draft, "2026-12-31", "Skyline Rooftop", 9 * M3, None, false),
        ("c-4", Confirmed, "2027-01-15", "Gymnasium, 40 School Rd", 26 * M3, Some("11.20"), false),
    ];

    seeds
        .into_iter()
        .enumerate()
        .map(
            |(index, (customer_id, status, event_date, address, volume_cm3, distance_km, city))| {
                let number = index + 1;
                order_from_seed(
                    number,
                    OrderSeed {
                        customer_id,
                        status,
                        event_date,
                        address,
                        volume_cm3,
                        distance_km,
                        city,
                    },
                )
            },
        )
        .collect()
}

fn order_from_seed(number: usize, seed: OrderSeed) -> Order {
    let vehicles = if seed.city { city_fleet() } else { fleet() };
    let quote = DeliveryQuote {
        distance_km: seed.distance_km.map(str::to_string),
        required_volume_cm3: Some(seed.volume_cm3),
        vehicles,
    };

    let mut order = Order {
        id: format!("o-{number}"),
        number: format!("R-{number:04}"),
        customer_id: seed.customer_id.to_string(),
        status: seed.status,
        event_date: Some(seed.event_date.to_string()),
        delivery_address: Some(seed.address.to_string()),
        total_volume_cm3: Some(seed.volume_cm3),
        delivery_quote: Some(quote),
        delivery_pricing: None,
        created_at: Some(format!("2026-09-{:02}T09:00:00Z", number + 1)),
        updated_at: None,
    };

    // Orders already past confirmation carry the pricing that was agreed at the time.
    if matches!(
        seed.status,
        OrderStatus::InDelivery | OrderStatus::Delivered | OrderStatus::Returned
    ) {
        order.delivery_pricing = agreed_pricing(&order);
    }
    order
}

fn agreed_pricing(order: &Order) -> Option<crate::domain::DeliveryPricingSummary> {
    let options = order.vehicle_options();
    let largest = options.first()?;
    let capacity = largest.capacity_volume_cm3?.max(1);
    let required = order.required_volume_cm3()?;
    let count = required.div_ceil(capacity).max(1) as i64;

    evaluate_delivery_selection(
        Some(required),
        &options,
        &[TransportSelection::new(largest.value.clone(), count)],
    )
    .payload
    .map(|summary| summary.with_distance(order.distance_km()))
}

pub fn documents() -> Vec<Document> {
    [
        ("d-1", "o-3", DocumentKind::Waybill, "WB-2026-0301"),
        ("d-2", "o-5", DocumentKind::Invoice, "INV-2026-0117"),
        ("d-3", "o-5", DocumentKind::Waybill, "WB-2026-0288"),
        ("d-4", "o-1", DocumentKind::Contract, "CT-2026-0042"),
    ]
    .into_iter()
    .map(|(id, order_id, kind, number)| Document {
        id: id.to_string(),
        order_id: order_id.to_string(),
        kind,
        number: number.to_string(),
        file_name: Some(format!("{}.pdf", number.to_lowercase())),
        created_at: Some("2026-10-01T12:00:00Z".to_string()),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_ids_are_unique() {
        let orders = orders();
        let mut ids: Vec<&str> = orders.iter().map(|order| order.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), orders.len());
    }

    #[test]
    fn test_quotes_collapse_duplicate_classes() {
        let order = &orders()[0];
        let options = order.vehicle_options();
        let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["truck_10t", "truck_3t", "van"]);
    }

    #[test]
    fn test_completed_orders_carry_pricing() {
        let orders = orders();
        let delivered = orders
            .iter()
            .find(|order| order.status == OrderStatus::Delivered)
            .unwrap();
        let pricing = delivered.delivery_pricing.as_ref().unwrap();
        assert_eq!(pricing.transport.value, "truck_10t");
        assert_eq!(pricing.transport_count, 1);
        assert_eq!(pricing.distance_km.as_deref(), Some("41.10"));

        assert!(orders
            .iter()
            .filter(|order| order.status == OrderStatus::Draft)
            .all(|order| order.delivery_pricing.is_none()));
    }
}
