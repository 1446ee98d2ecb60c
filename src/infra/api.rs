//! Typed client for the order-management API.
//!
//! - Generic CRUD over every [`Resource`].
//! - Response envelopes are unwrapped and records parsed into domain types here.
//! - Works the same over HTTP and over the in-memory mock.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::domain::{DeliveryPricingSummary, Order, PageInfo, Resource};

use super::envelope::{ErrorEnvelope, ItemEnvelope, ListEnvelope, Pagination};
use super::error::ApiError;
use super::query::ListQuery;
use super::transport::{ApiRequest, ApiResponse, Transport};

/// One page of records plus the paging the server reported.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<R> {
    pub items: Vec<R>,
    pub page: PageInfo,
}

#[derive(Clone)]
pub struct RentalApi {
    transport: Transport,
}

impl RentalApi {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub async fn list<R: Resource>(&self, query: &ListQuery) -> Result<Page<R>, ApiError> {
        let request = ApiRequest::get(collection_path::<R>()).with_query(query.to_pairs());
        let envelope: ListEnvelope<R> = self.fetch(&request).await?;

        let count = envelope.data.len() as u64;
        let page = envelope
            .meta
            .and_then(|meta| meta.pagination)
            .unwrap_or_else(|| {
                Pagination::new(
                    query.page.unwrap_or(1),
                    query.page_size.unwrap_or(count.max(1) as u32),
                    count,
                )
            })
            .into();

        debug!(resource = R::PATH, count, "listed records");
        Ok(Page {
            items: envelope.data,
            page,
        })
    }

    pub async fn get<R: Resource>(&self, id: &str) -> Result<R, ApiError> {
        let request = ApiRequest::get(item_path::<R>(id));
        let envelope: ItemEnvelope<R> = self.fetch(&request).await?;
        Ok(envelope.data)
    }

    pub async fn create<R: Resource, B: Serialize>(&self, body: &B) -> Result<R, ApiError> {
        let request = ApiRequest::post(collection_path::<R>(), to_body(body)?);
        let envelope: ItemEnvelope<R> = self.fetch(&request).await?;
        Ok(envelope.data)
    }

    pub async fn update<R: Resource, B: Serialize>(
        &self,
        id: &str,
        patch: &B,
    ) -> Result<R, ApiError> {
        let request = ApiRequest::patch(item_path::<R>(id), to_body(patch)?);
        let envelope: ItemEnvelope<R> = self.fetch(&request).await?;
        Ok(envelope.data)
    }

    pub async fn delete<R: Resource>(&self, id: &str) -> Result<(), ApiError> {
        let request = ApiRequest::delete(item_path::<R>(id));
        let response = self.transport.execute(&request).await?;
        check_status(&response)?;
        Ok(())
    }

    /// Writes the agreed delivery pricing back to the order.
    pub async fn update_service_totals(
        &self,
        order_id: &str,
        summary: &DeliveryPricingSummary,
    ) -> Result<Order, ApiError> {
        let order = self
            .update::<Order, _>(order_id, &json!({ "delivery_pricing": summary }))
            .await?;
        debug!(
            order_id,
            transports = summary.transport_count,
            "delivery pricing saved"
        );
        Ok(order)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T, ApiError> {
        let response = self.transport.execute(request).await?;
        check_status(&response)?;

        let body = response.body.unwrap_or(Value::Null);
        serde_json::from_value(body).map_err(|err| {
            warn!(path = %request.path, %err, "response did not match the expected shape");
            ApiError::Decode(err.to_string())
        })
    }
}

fn collection_path<R: Resource>() -> String {
    format!("{}/", R::PATH)
}

fn item_path<R: Resource>(id: &str) -> String {
    format!("{}/{}/", R::PATH, id)
}

fn to_body<B: Serialize>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|err| ApiError::Decode(err.to_string()))
}

fn check_status(response: &ApiResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }

    let message = match &response.body {
        Some(Value::String(text)) if !text.trim().is_empty() => text.trim().to_string(),
        Some(body) => serde_json::from_value::<ErrorEnvelope>(body.clone())
            .ok()
            .and_then(|envelope| envelope.message())
            .unwrap_or_else(|| body.to_string()),
        None => format!("request failed with status {}", response.status),
    };
    Err(ApiError::from_status(response.status, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{evaluate_delivery_selection, Customer, OrderStatus, TransportSelection};
    use crate::infra::mock::MockApi;
    use crate::infra::transport::MockTransport;

    fn api() -> RentalApi {
        RentalApi::new(Transport::Mock(MockTransport::new(MockApi::seeded())))
    }

    #[tokio::test]
    async fn test_list_orders_filtered_and_sorted() {
        let api = api();
        let query = ListQuery::new()
            .filter("status", "draft")
            .sort("-total_volume_cm3")
            .page_size(2);
        let page = api.list::<Order>(&query).await.unwrap();

        assert_eq!(page.items.len(), 2);
        assert!(page.items.iter().all(|o| o.status == OrderStatus::Draft));
        assert!(page.items[0].total_volume_cm3 >= page.items[1].total_volume_cm3);
        assert_eq!(page.page.page_size, 2);
        assert!(page.page.has_next());
    }

    #[tokio::test]
    async fn test_invalid_sort_maps_to_bad_request() {
        let error = api()
            .list::<Customer>(&ListQuery::new().sort("secret"))
            .await
            .unwrap_err();
        match error {
            ApiError::BadRequest(message) => assert!(message.contains("secret")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_record_maps_to_not_found() {
        let error = api().get::<Order>("nope").await.unwrap_err();
        assert!(matches!(error, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_service_totals_round_trip() {
        let api = api();
        let order = api.get::<Order>("o-1").await.unwrap();
        let evaluation = evaluate_delivery_selection(
            order.required_volume_cm3(),
            &order.vehicle_options(),
            &[TransportSelection::new("truck_10t", 1)],
        );
        let summary = evaluation.payload.unwrap().with_distance(order.distance_km());

        let saved = api.update_service_totals(&order.id, &summary).await.unwrap();
        assert_eq!(saved.delivery_pricing.as_ref(), Some(&summary));
        assert!(saved.updated_at.is_some());

        let reloaded = api.get::<Order>(&order.id).await.unwrap();
        assert_eq!(reloaded.delivery_pricing, Some(summary));
    }

    #[tokio::test]
    async fn test_create_and_delete_customer() {
        let api = api();
        let created = api
            .create::<Customer, _>(&json!({"name": "Harbour Gala"}))
            .await
            .unwrap();
        assert!(!created.id.is_empty());

        api.delete::<Customer>(&created.id).await.unwrap();
        let error = api.delete::<Customer>(&created.id).await.unwrap_err();
        assert!(matches!(error, ApiError::NotFound(_)));
    }

    #[test]
    fn test_check_status_prefers_envelope_detail() {
        let response = ApiResponse::new(
            503,
            Some(json!({"errors": [{"status": "503", "detail": "maintenance"}]})),
        );
        match check_status(&response).unwrap_err() {
            ApiError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "maintenance");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let plain = ApiResponse::new(502, Some(Value::String("Bad Gateway".into())));
        assert!(matches!(
            check_status(&plain),
            Err(ApiError::Api { status: 502, .. })
        ));
    }
}
