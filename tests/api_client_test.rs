//! HTTP transport and typed client against a mocked backend.
//!
//! Run with: `cargo test --test api_client_test`

use std::time::Duration;

use mockito::{Matcher, Server};
use rental_desk::domain::{
    evaluate_delivery_selection, Order, TransportSelection, VehicleOption,
};
use rental_desk::infra::{ApiError, HttpTransport, ListQuery, RentalApi, Session, Transport};
use serde_json::json;

fn client(server: &Server, session: Session) -> RentalApi {
    let base_url = format!("{}/api/v1/", server.url());
    let http = HttpTransport::new(&base_url, Duration::from_secs(5), session)
        .expect("valid base url");
    RentalApi::new(Transport::Http(http))
}

fn order_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "number": "R-0001",
        "customer_id": "c-1",
        "status": "confirmed",
        "total_volume_cm3": 14000000,
        "delivery_quote": {
            "distance_km": "32.4",
            "required_volume_cm3": 14000000,
            "vehicles": [
                {"value": "van", "label": "Cargo van", "capacityVolumeCm3": 9000000, "costPerTrip": "2500"},
                {"value": "truck", "label": "Truck", "capacityVolumeCm3": 18000000, "costPerTrip": 4200}
            ]
        }
    })
}

fn list_body(orders: Vec<serde_json::Value>, total: u64) -> String {
    json!({
        "data": orders,
        "meta": {"pagination": {"page": 2, "page_size": 1, "total": total, "total_pages": total}}
    })
    .to_string()
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn test_bearer_token_and_query_are_sent() {
    rental_desk::logging::init_test();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/orders/")
        .match_header("authorization", "Bearer access-1")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "2".into()),
            Matcher::UrlEncoded("page_size".into(), "1".into()),
            Matcher::UrlEncoded("filter[status]".into(), "confirmed".into()),
            Matcher::UrlEncoded("sort".into(), "-created_at".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(list_body(vec![order_json("o-1")], 3))
        .create_async()
        .await;

    let api = client(&server, Session::new(Some("access-1".into()), None));
    let query = ListQuery::new()
        .page(2)
        .page_size(1)
        .filter("status", "confirmed")
        .sort("-created_at");
    let page = api.list::<Order>(&query).await.unwrap();

    mock.assert_async().await;
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].vehicle_options()[0].value, "truck");
    assert_eq!(page.page.total, 3);
    assert!(page.page.has_previous());
    assert!(page.page.has_next());
}

#[tokio::test]
async fn test_expired_token_is_refreshed_once() {
    let mut server = Server::new_async().await;
    let rejected = server
        .mock("GET", "/api/v1/orders/o-1/")
        .match_header("authorization", "Bearer stale")
        .with_status(401)
        .with_body(json!({"detail": "Token expired"}).to_string())
        .expect(1)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/api/v1/auth/token/refresh/")
        .match_body(Matcher::Json(json!({"refresh": "refresh-1"})))
        .with_status(200)
        .with_body(json!({"access": "fresh"}).to_string())
        .expect(1)
        .create_async()
        .await;
    let accepted = server
        .mock("GET", "/api/v1/orders/o-1/")
        .match_header("authorization", "Bearer fresh")
        .with_status(200)
        .with_body(json!({"data": order_json("o-1")}).to_string())
        .expect(1)
        .create_async()
        .await;

    let session = Session::new(Some("stale".into()), Some("refresh-1".into()));
    let api = client(&server, session.clone());
    let order = api.get::<Order>("o-1").await.unwrap();

    rejected.assert_async().await;
    refresh.assert_async().await;
    accepted.assert_async().await;
    assert_eq!(order.id, "o-1");
    assert_eq!(session.access_token().await.as_deref(), Some("fresh"));
    assert_eq!(session.refresh_token().await.as_deref(), Some("refresh-1"));
}

#[tokio::test]
async fn test_failed_refresh_clears_session() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v1/customers/")
        .with_status(401)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/api/v1/auth/token/refresh/")
        .with_status(401)
        .with_body(json!({"detail": "Token is blacklisted"}).to_string())
        .expect(1)
        .create_async()
        .await;

    let session = Session::new(Some("stale".into()), Some("revoked".into()));
    let api = client(&server, session.clone());
    let error = api
        .list::<rental_desk::domain::Customer>(&ListQuery::new())
        .await
        .unwrap_err();

    refresh.assert_async().await;
    assert!(matches!(error, ApiError::Unauthorized));
    assert!(!session.is_authenticated().await);
    assert_eq!(session.refresh_token().await, None);
}

#[tokio::test]
async fn test_unreadable_refresh_response_clears_session() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v1/customers/")
        .with_status(401)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/api/v1/auth/token/refresh/")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html>oops</html>")
        .expect(1)
        .create_async()
        .await;

    let session = Session::new(Some("stale".into()), Some("refresh-1".into()));
    let api = client(&server, session.clone());
    let error = api
        .list::<rental_desk::domain::Customer>(&ListQuery::new())
        .await
        .unwrap_err();

    refresh.assert_async().await;
    assert!(matches!(error, ApiError::Unauthorized));
    assert!(!session.is_authenticated().await);
    assert_eq!(session.refresh_token().await, None);
}

#[tokio::test]
async fn test_without_refresh_token_no_refresh_is_attempted() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v1/documents/")
        .with_status(401)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/api/v1/auth/token/refresh/")
        .expect(0)
        .create_async()
        .await;

    let api = client(&server, Session::new(Some("stale".into()), None));
    let error = api
        .list::<rental_desk::domain::Document>(&ListQuery::new())
        .await
        .unwrap_err();

    refresh.assert_async().await;
    assert!(matches!(error, ApiError::Unauthorized));
}

// ============================================================================
// Error mapping
// ============================================================================

#[tokio::test]
async fn test_error_envelope_maps_to_bad_request() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v1/orders/")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"errors": [{
                "status": "400",
                "code": "invalid_sort",
                "detail": "Unsupported sort field: secret",
                "source": {"parameter": "sort"}
            }]})
            .to_string(),
        )
        .create_async()
        .await;

    let api = client(&server, Session::anonymous());
    let error = api
        .list::<Order>(&ListQuery::new().sort("secret"))
        .await
        .unwrap_err();

    match error {
        ApiError::BadRequest(message) => assert_eq!(message, "Unsupported sort field: secret"),
        other => panic!("expected BadRequest, got {other:?}"),
    }
}

#[tokio::test]
async fn test_plain_text_gateway_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v1/orders/o-9/")
        .with_status(502)
        .with_body("Bad Gateway")
        .create_async()
        .await;

    let api = client(&server, Session::anonymous());
    match api.get::<Order>("o-9").await.unwrap_err() {
        ApiError::Api { status, message } => {
            assert_eq!(status, 502);
            assert_eq!(message, "Bad Gateway");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_record_is_a_decode_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v1/orders/o-1/")
        .with_status(200)
        .with_body(
            json!({"data": {
                "id": "o-1",
                "number": "R-1",
                "customer_id": "c-1",
                "delivery_quote": {"vehicles": [{"value": "", "capacityVolumeCm3": 100}]}
            }})
            .to_string(),
        )
        .create_async()
        .await;

    let api = client(&server, Session::anonymous());
    let error = api.get::<Order>("o-1").await.unwrap_err();
    assert!(matches!(error, ApiError::Decode(_)));
}

// ============================================================================
// Delivery pricing write-back
// ============================================================================

#[tokio::test]
async fn test_update_service_totals_patches_order() {
    let mut server = Server::new_async().await;
    let options = vec![
        VehicleOption::new("truck", "Truck", Some(18_000_000), Some(4200.0)),
        VehicleOption::new("van", "Cargo van", Some(9_000_000), Some(2500.0)),
    ];
    let summary = evaluate_delivery_selection(
        Some(14_000_000),
        &options,
        &[
            TransportSelection::new("truck", 1),
            TransportSelection::new("van", 1),
        ],
    )
    .payload
    .unwrap()
    .with_distance(Some("32.40".to_string()));

    let mut saved = order_json("o-1");
    saved["delivery_pricing"] = serde_json::to_value(&summary).unwrap();

    let mock = server
        .mock("PATCH", "/api/v1/orders/o-1/")
        .match_header("authorization", "Bearer token")
        .match_body(Matcher::PartialJson(json!({
            "delivery_pricing": {
                "transport": {"value": "truck"},
                "transportCount": 2,
                "distanceKm": "32.40",
                "totalDeliveryCost": "6700.00",
                "costPerTransport": "3350.00",
                "totalVolumeCm3": 14000000,
                "totalCapacityCm3": 27000000
            }
        })))
        .with_status(200)
        .with_body(json!({"data": saved}).to_string())
        .create_async()
        .await;

    let api = client(&server, Session::new(Some("token".into()), None));
    let order = api.update_service_totals("o-1", &summary).await.unwrap();

    mock.assert_async().await;
    assert_eq!(order.delivery_pricing, Some(summary));
}
