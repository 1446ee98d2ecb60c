//! The typed client and the delivery evaluator running against the seeded mock backend.

use rental_desk::domain::{
    evaluate_delivery_selection, DeliveryError, Order, OrderStatus, Product, SelectionDraft,
};
use rental_desk::infra::{ApiError, ListQuery, MockTransport, RentalApi, Transport};
use serde_json::json;

fn api() -> RentalApi {
    RentalApi::new(Transport::Mock(MockTransport::seeded()))
}

#[tokio::test]
async fn test_delivery_form_flow_saves_pricing() {
    rental_desk::logging::init_test();
    let api = api();

    let drafts = api
        .list::<Order>(&ListQuery::new().filter("status", "draft").sort("number"))
        .await
        .unwrap();
    let order = drafts
        .items
        .into_iter()
        .find(|order| order.delivery_pricing.is_none() && !order.vehicle_options().is_empty())
        .expect("a draft order with a quote");

    let options = order.vehicle_options();
    let required = order.required_volume_cm3();
    let mut draft = SelectionDraft::restore(None, None, &options);

    // Default suggestion is one vehicle of the largest class.
    let evaluation = evaluate_delivery_selection(required, &options, &draft.selections());
    assert_eq!(evaluation.total_transport_count, 1);

    // Bump the count until the volume is covered.
    let row_id = draft.rows[0].id.clone();
    let mut count = 1;
    let evaluation = loop {
        draft.set_count(&row_id, &count.to_string());
        let evaluation = evaluate_delivery_selection(required, &options, &draft.selections());
        if evaluation.can_submit() {
            break evaluation;
        }
        assert!(matches!(
            evaluation.error,
            Some(DeliveryError::InsufficientVolumeCoverage { .. })
        ));
        count += 1;
        assert!(count < 50, "volume never covered");
    };

    let summary = evaluation
        .payload
        .unwrap()
        .with_distance(order.distance_km());
    let saved = api.update_service_totals(&order.id, &summary).await.unwrap();
    assert_eq!(saved.delivery_pricing.as_ref(), Some(&summary));

    let reloaded = api.get::<Order>(&order.id).await.unwrap();
    let restored = SelectionDraft::restore(None, reloaded.delivery_pricing.as_ref(), &options);
    assert_eq!(restored.selections(), draft.selections());
}

#[tokio::test]
async fn test_smaller_class_only_is_rejected_before_saving() {
    let api = api();
    let order = api.get::<Order>("o-1").await.unwrap();
    let options = order.vehicle_options();
    let smallest = options.last().unwrap();

    let mut draft = SelectionDraft::default();
    let id = draft.add_row(&options).unwrap();
    draft.set_vehicle(&id, &smallest.value);
    draft.set_count(&id, "10");

    let evaluation =
        evaluate_delivery_selection(order.required_volume_cm3(), &options, &draft.selections());
    assert!(!evaluation.can_submit());
    assert_eq!(
        evaluation.error_message().as_deref(),
        Some("selected vehicle types do not meet order requirements")
    );
}

#[tokio::test]
async fn test_paging_and_status_filters() {
    let api = api();

    let all = api.list::<Order>(&ListQuery::new()).await.unwrap();
    let total = all.page.total;
    assert_eq!(all.items.len() as u64, total.min(20));

    let beyond = api
        .list::<Order>(&ListQuery::new().page(99).page_size(5))
        .await
        .unwrap();
    assert!(beyond.items.is_empty());
    assert_eq!(beyond.page.total, total);
    assert!(!beyond.page.has_next());

    let settled = api
        .list::<Order>(
            &ListQuery::new()
                .filter("status", "delivered")
                .filter("status", "returned"),
        )
        .await
        .unwrap();
    assert!(!settled.items.is_empty());
    assert!(settled
        .items
        .iter()
        .all(|o| matches!(o.status, OrderStatus::Delivered | OrderStatus::Returned)));
}

#[tokio::test]
async fn test_products_crud() {
    let api = api();
    let created = api
        .create::<Product, _>(&json!({
            "sku": "CANDLE-LED",
            "name": "LED candle",
            "daily_rate": 35,
            "volume_cm3": 1200,
            "stock": 150
        }))
        .await
        .unwrap();
    assert_eq!(created.daily_rate.as_deref(), Some("35.00"));

    let updated = api
        .update::<Product, _>(&created.id, &json!({"stock": 140}))
        .await
        .unwrap();
    assert_eq!(updated.stock, 140);
    assert_eq!(updated.name, "LED candle");

    let sorted = api
        .list::<Product>(&ListQuery::new().sort("-stock").page_size(1))
        .await
        .unwrap();
    assert_eq!(sorted.items[0].sku, "CHAIR-CHIA");

    api.delete::<Product>(&created.id).await.unwrap();
    assert!(matches!(
        api.get::<Product>(&created.id).await,
        Err(ApiError::NotFound(_))
    ));
}
