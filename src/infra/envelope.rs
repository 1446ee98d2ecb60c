//! JSON envelopes shared by the API client and the mock backend.

use serde::{Deserialize, Serialize};

use crate::domain::PageInfo;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl Pagination {
    pub fn new(page: u32, page_size: u32, total: u64) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total.div_ceil(u64::from(page_size)) as u32
        };
        Self {
            page,
            page_size,
            total,
            total_pages,
        }
    }
}

impl From<Pagination> for PageInfo {
    fn from(value: Pagination) -> Self {
        PageInfo {
            page: value.page,
            page_size: value.page_size,
            total: value.total,
            total_pages: value.total_pages,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListEnvelope<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ItemEnvelope<T> {
    pub data: T,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointer: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ErrorSource>,
}

impl ErrorObject {
    pub fn new(status: u16, code: &str, detail: impl Into<String>) -> Self {
        Self {
            status: Some(status.to_string()),
            code: Some(code.to_string()),
            detail: Some(detail.into()),
            source: None,
        }
    }

    pub fn with_parameter(mut self, parameter: &str) -> Self {
        self.source = Some(ErrorSource {
            parameter: Some(parameter.to_string()),
            pointer: None,
        });
        self
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub errors: Vec<ErrorObject>,
    /// Some endpoints answer with a bare `{"detail": "..."}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorEnvelope {
    pub fn single(error: ErrorObject) -> Self {
        Self {
            errors: vec![error],
            detail: None,
        }
    }

    pub fn message(&self) -> Option<String> {
        let details: Vec<&str> = self
            .errors
            .iter()
            .filter_map(|error| error.detail.as_deref().or(error.code.as_deref()))
            .collect();
        if !details.is_empty() {
            return Some(details.join("; "));
        }
        self.detail.clone()
    }
}
