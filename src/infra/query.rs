//! List query parameters: `page`, `page_size`, repeated `filter[field]`, and `sort=a,-b`.

use crate::domain::OrdersView;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub descending: bool,
}

impl SortKey {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }

    /// Parses `"a,-b"` into keys, skipping empty segments.
    pub fn parse_list(raw: &str) -> Vec<SortKey> {
        raw.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .filter_map(|part| match part.strip_prefix('-') {
                Some(field) if !field.trim().is_empty() => Some(SortKey::desc(field.trim())),
                Some(_) => None,
                None => Some(SortKey::asc(part)),
            })
            .collect()
    }

    fn as_param(&self) -> String {
        if self.descending {
            format!("-{}", self.field)
        } else {
            self.field.clone()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub filters: Vec<(String, String)>,
    pub sort: Vec<SortKey>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    pub fn sort(mut self, raw: &str) -> Self {
        self.sort.extend(SortKey::parse_list(raw));
        self
    }

    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            pairs.push(("page_size".to_string(), page_size.to_string()));
        }
        for (field, value) in &self.filters {
            pairs.push((format!("filter[{field}]"), value.clone()));
        }
        if !self.sort.is_empty() {
            let sort = self
                .sort
                .iter()
                .map(SortKey::as_param)
                .collect::<Vec<_>>()
                .join(",");
            pairs.push(("sort".to_string(), sort));
        }
        pairs
    }

    /// Lenient parse of raw query pairs. Non-numeric or zero paging values are left unset
    /// so the server default applies; unknown keys are ignored.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mut query = ListQuery::default();
        for (key, value) in pairs {
            match key.as_str() {
                "page" => query.page = parse_positive(value),
                "page_size" => query.page_size = parse_positive(value),
                "sort" => query.sort.extend(SortKey::parse_list(value)),
                other => {
                    if let Some(field) = other
                        .strip_prefix("filter[")
                        .and_then(|rest| rest.strip_suffix(']'))
                        .filter(|field| !field.is_empty())
                    {
                        query.filters.push((field.to_string(), value.clone()));
                    }
                }
            }
        }
        query
    }

    /// Filter values grouped by field, in first-seen field order.
    pub fn grouped_filters(&self) -> Vec<(&str, Vec<&str>)> {
        let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();
        for (field, value) in &self.filters {
            match groups.iter_mut().find(|(existing, _)| *existing == field.as_str()) {
                Some((_, values)) => values.push(value.as_str()),
                None => groups.push((field.as_str(), vec![value.as_str()])),
            }
        }
        groups
    }
}

impl From<&OrdersView> for ListQuery {
    fn from(view: &OrdersView) -> Self {
        let mut query = ListQuery::new()
            .page(view.page.max(1))
            .page_size(view.page_size)
            .sort(&view.sort);
        if let Some(status) = view.status {
            query = query.filter("status", status.as_str());
        }
        query
    }
}

fn parse_positive(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|value| *value > 0)
}
