//! In-memory stand-in for the order-management backend, used for local development and
//! tests. Mirrors the real API's routes, envelopes, paging, filtering and sort rules.

mod fixtures;
mod listing;

use reqwest::Method;
use serde_json::{json, Map, Value};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::{Customer, Document, InventoryItem, Order, Product, Resource};
use crate::infra::envelope::{ErrorEnvelope, ErrorObject, ItemEnvelope, ListEnvelope, Meta};
use crate::infra::query::ListQuery;
use crate::infra::transport::{ApiRequest, ApiResponse};

pub use listing::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Typed records of one resource.
#[derive(Clone, Debug)]
pub struct MockCollection<R: Resource> {
    records: Vec<R>,
}

impl<R: Resource> Default for MockCollection<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<R: Resource> MockCollection<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|record| record.id() == id)
    }

    fn list(&self, query: &ListQuery) -> ApiResponse {
        let values = match self
            .records
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(values) => values,
            Err(err) => return internal_error(err.to_string()),
        };

        match listing::apply_list_query(values, query, R::SORTABLE) {
            Ok((data, pagination)) => respond(
                200,
                &ListEnvelope {
                    data,
                    meta: Some(Meta {
                        pagination: Some(pagination),
                    }),
                },
            ),
            Err(error) => error_response(400, error),
        }
    }

    fn get(&self, id: &str) -> ApiResponse {
        match self.find(id) {
            Some(record) => respond(200, &ItemEnvelope { data: record }),
            None => not_found::<R>(id),
        }
    }

    fn create(&mut self, body: Option<&Value>) -> ApiResponse {
        let Some(Value::Object(fields)) = body else {
            return invalid_body("request body must be a JSON object");
        };
        let mut fields = fields.clone();

        let id = match fields.get("id") {
            Some(Value::String(id)) if !id.trim().is_empty() => id.trim().to_string(),
            Some(Value::Number(id)) => id.to_string(),
            _ => Uuid::new_v4().to_string(),
        };
        if self.find(&id).is_some() {
            return error_response(
                400,
                ErrorObject::new(400, "duplicate_id", format!("{} {id} already exists", R::PATH))
                    .with_parameter("id"),
            );
        }
        fields.insert("id".to_string(), Value::String(id));
        stamp(&mut fields, "created_at");

        let record = match serde_json::from_value::<R>(Value::Object(fields)) {
            Ok(record) => record,
            Err(err) => return invalid_body(err.to_string()),
        };
        debug!(resource = R::PATH, id = record.id(), "mock create");
        let response = respond(201, &ItemEnvelope { data: &record });
        self.records.push(record);
        response
    }

    /// PATCH merges top-level keys into the stored record; PUT replaces it. The id is kept.
    fn update(&mut self, id: &str, body: Option<&Value>, replace: bool) -> ApiResponse {
        let Some(index) = self.records.iter().position(|record| record.id() == id) else {
            return not_found::<R>(id);
        };
        let Some(Value::Object(patch)) = body else {
            return invalid_body("request body must be a JSON object");
        };

        let mut fields = if replace {
            Map::new()
        } else {
            match serde_json::to_value(&self.records[index]) {
                Ok(Value::Object(fields)) => fields,
                Ok(_) => return internal_error("record did not serialise to an object"),
                Err(err) => return internal_error(err.to_string()),
            }
        };
        for (key, value) in patch {
            if key != "id" {
                fields.insert(key.clone(), value.clone());
            }
        }
        fields.insert("id".to_string(), Value::String(id.to_string()));
        stamp(&mut fields, "updated_at");

        match serde_json::from_value::<R>(Value::Object(fields)) {
            Ok(record) => {
                debug!(resource = R::PATH, id, "mock update");
                let response = respond(200, &ItemEnvelope { data: &record });
                self.records[index] = record;
                response
            }
            Err(err) => invalid_body(err.to_string()),
        }
    }

    fn delete(&mut self, id: &str) -> ApiResponse {
        let before = self.records.len();
        self.records.retain(|record| record.id() != id);
        if self.records.len() == before {
            return not_found::<R>(id);
        }
        ApiResponse::new(204, None)
    }

    fn route(&mut self, method: &Method, id: Option<&str>, request: &ApiRequest) -> ApiResponse {
        match id {
            None if *method == Method::GET => self.list(&ListQuery::from_pairs(&request.query)),
            None if *method == Method::POST => self.create(request.body.as_ref()),
            Some(id) if *method == Method::GET => self.get(id),
            Some(id) if *method == Method::PATCH => self.update(id, request.body.as_ref(), false),
            Some(id) if *method == Method::PUT => self.update(id, request.body.as_ref(), true),
            Some(id) if *method == Method::DELETE => self.delete(id),
            _ => error_response(
                405,
                ErrorObject::new(
                    405,
                    "method_not_allowed",
                    format!("{method} is not supported on {}", R::PATH),
                ),
            ),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MockApi {
    pub orders: MockCollection<Order>,
    pub customers: MockCollection<Customer>,
    pub products: MockCollection<Product>,
    pub inventory_items: MockCollection<InventoryItem>,
    pub documents: MockCollection<Document>,
}

impl MockApi {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn seeded() -> Self {
        Self {
            orders: MockCollection::new(fixtures::orders()),
            customers: MockCollection::new(fixtures::customers()),
            products: MockCollection::new(fixtures::products()),
            inventory_items: MockCollection::new(fixtures::inventory_items()),
            documents: MockCollection::new(fixtures::documents()),
        }
    }

    pub fn handle(&mut self, request: &ApiRequest) -> ApiResponse {
        let segments: Vec<&str> = request
            .path
            .split('?')
            .next()
            .unwrap_or_default()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        let (resource, id) = match segments.as_slice() {
            [resource] => (*resource, None),
            [resource, id] => (*resource, Some(*id)),
            _ => return unknown_route(&request.path),
        };
        let method = &request.method;

        if resource == Order::PATH {
            self.orders.route(method, id, request)
        } else if resource == Customer::PATH {
            self.customers.route(method, id, request)
        } else if resource == Product::PATH {
            self.products.route(method, id, request)
        } else if resource == InventoryItem::PATH {
            self.inventory_items.route(method, id, request)
        } else if resource == Document::PATH {
            self.documents.route(method, id, request)
        } else {
            unknown_route(&request.path)
        }
    }
}

fn stamp(fields: &mut Map<String, Value>, key: &str) {
    match OffsetDateTime::now_utc().format(&Rfc3339) {
        Ok(now) => {
            fields.insert(key.to_string(), Value::String(now));
        }
        Err(err) => warn!(%err, "failed to format mock timestamp"),
    }
}

fn respond<T: serde::Serialize>(status: u16, body: &T) -> ApiResponse {
    match serde_json::to_value(body) {
        Ok(value) => ApiResponse::new(status, Some(value)),
        Err(err) => internal_error(err.to_string()),
    }
}

fn error_response(status: u16, error: ErrorObject) -> ApiResponse {
    let body = serde_json::to_value(ErrorEnvelope::single(error)).unwrap_or_else(|_| json!({}));
    ApiResponse::new(status, Some(body))
}

fn not_found<R: Resource>(id: &str) -> ApiResponse {
    error_response(
        404,
        ErrorObject::new(404, "not_found", format!("{} {id} not found", R::PATH)),
    )
}

fn invalid_body(detail: impl Into<String>) -> ApiResponse {
    error_response(400, ErrorObject::new(400, "invalid_body", detail))
}

fn internal_error(detail: impl Into<String>) -> ApiResponse {
    error_response(500, ErrorObject::new(500, "internal", detail))
}

fn unknown_route(path: &str) -> ApiResponse {
    error_response(
        404,
        ErrorObject::new(404, "not_found", format!("no mock route for {path}")),
    )
}
