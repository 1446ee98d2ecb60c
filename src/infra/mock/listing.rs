//! Filtering, sorting and pagination over JSON records.

use std::cmp::Ordering;

use serde_json::Value;

use crate::infra::envelope::{ErrorObject, Pagination};
use crate::infra::query::{ListQuery, SortKey};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Applies a list query to a collection. Fails only on sort fields outside `sortable`.
pub fn apply_list_query(
    mut records: Vec<Value>,
    query: &ListQuery,
    sortable: &[&str],
) -> Result<(Vec<Value>, Pagination), ErrorObject> {
    if let Some(unsupported) = query
        .sort
        .iter()
        .find(|key| !sortable.contains(&key.field.as_str()))
    {
        return Err(ErrorObject::new(
            400,
            "invalid_sort",
            format!("Unsupported sort field: {}", unsupported.field),
        )
        .with_parameter("sort"));
    }

    let groups = query.grouped_filters();
    if !groups.is_empty() {
        records.retain(|record| {
            groups.iter().all(|(field, accepted)| {
                field_as_string(record, field)
                    .map(|actual| accepted.iter().any(|value| *value == actual))
                    .unwrap_or(false)
            })
        });
    }

    if !query.sort.is_empty() {
        records.sort_by(|a, b| compare_records(a, b, &query.sort));
    }

    let page = query.page.unwrap_or(1);
    let page_size = query
        .page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .min(MAX_PAGE_SIZE);
    let total = records.len();
    let start = (page as usize - 1).saturating_mul(page_size as usize);

    let data = if start >= total {
        Vec::new()
    } else {
        records
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .collect()
    };

    Ok((data, Pagination::new(page, page_size, total as u64)))
}

/// Scalar field rendered the way it would appear in a query string.
fn field_as_string(record: &Value, field: &str) -> Option<String> {
    match record.get(field)? {
        Value::String(value) => Some(value.clone()),
        Value::Number(value) => Some(value.to_string()),
        Value::Bool(value) => Some(value.to_string()),
        _ => None,
    }
}

fn compare_records(a: &Value, b: &Value, keys: &[SortKey]) -> Ordering {
    for key in keys {
        let ordering = compare_values(a.get(&key.field), b.get(&key.field));
        let ordering = if key.descending {
            ordering.reverse()
        } else {
            ordering
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Missing and null sort first, then booleans, numbers, strings.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(value: Option<&Value>) -> u8 {
        match value {
            None | Some(Value::Null) => 0,
            Some(Value::Bool(_)) => 1,
            Some(Value::Number(_)) => 2,
            Some(Value::String(_)) => 3,
            Some(_) => 4,
        }
    }

    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records() -> Vec<Value> {
        vec![
            json!({"id": "1", "status": "draft", "number": "R-3", "volume": 10}),
            json!({"id": "2", "status": "confirmed", "number": "R-1", "volume": 30}),
            json!({"id": "3", "status": "draft", "number": "R-2", "volume": null}),
            json!({"id": "4", "status": "delivered", "number": "R-4", "volume": 30}),
        ]
    }

    fn ids(data: &[Value]) -> Vec<&str> {
        data.iter().map(|r| r["id"].as_str().unwrap()).collect()
    }

    const SORTABLE: &[&str] = &["id", "status", "number", "volume"];

    #[test]
    fn test_filter_or_within_field_and_across_fields() {
        let query = ListQuery::new()
            .filter("status", "draft")
            .filter("status", "confirmed");
        let (data, page) = apply_list_query(records(), &query, SORTABLE).unwrap();
        assert_eq!(ids(&data), vec!["1", "2", "3"]);
        assert_eq!(page.total, 3);

        let query = query.filter("volume", "10");
        let (data, _) = apply_list_query(records(), &query, SORTABLE).unwrap();
        assert_eq!(ids(&data), vec!["1"]);
    }

    #[test]
    fn test_filter_on_missing_field_matches_nothing() {
        let query = ListQuery::new().filter("colour", "red");
        let (data, page) = apply_list_query(records(), &query, SORTABLE).unwrap();
        assert!(data.is_empty());
        assert_eq!(page.total, 0);
    }

    #[test]
    fn test_multi_key_sort_is_stable() {
        let query = ListQuery::new().sort("-volume,number");
        let (data, _) = apply_list_query(records(), &query, SORTABLE).unwrap();
        assert_eq!(ids(&data), vec!["2", "4", "1", "3"]);

        let query = ListQuery::new().sort("status");
        let (data, _) = apply_list_query(records(), &query, SORTABLE).unwrap();
        assert_eq!(ids(&data), vec!["2", "4", "1", "3"]);
    }

    #[test]
    fn test_unsupported_sort_field_is_rejected() {
        let query = ListQuery::new().sort("number,-secret");
        let error = apply_list_query(records(), &query, SORTABLE).unwrap_err();
        assert_eq!(error.status.as_deref(), Some("400"));
        assert_eq!(error.code.as_deref(), Some("invalid_sort"));
        assert_eq!(
            error.source.and_then(|s| s.parameter).as_deref(),
            Some("sort")
        );
    }

    #[test]
    fn test_pagination_windows() {
        let query = ListQuery::new().page(2).page_size(3);
        let (data, page) = apply_list_query(records(), &query, SORTABLE).unwrap();
        assert_eq!(ids(&data), vec!["4"]);
        assert_eq!(page.total, 4);
        assert_eq!(page.total_pages, 2);

        let query = ListQuery::new().page(9).page_size(3);
        let (data, page) = apply_list_query(records(), &query, SORTABLE).unwrap();
        assert!(data.is_empty());
        assert_eq!(page.page, 9);
        assert_eq!(page.total, 4);

        let query = ListQuery::new().page_size(1000);
        let (_, page) = apply_list_query(records(), &query, SORTABLE).unwrap();
        assert_eq!(page.page_size, MAX_PAGE_SIZE);
    }
}
