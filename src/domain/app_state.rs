use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::delivery::TransportSelection;
use super::entities::{Order, OrderStatus};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const DEFAULT_ORDER_SORT: &str = "-created_at";

/// Sort choices offered on the order list, as `sort` parameter values.
pub const ORDER_SORT_OPTIONS: [(&str, &str); 4] = [
    ("-created_at", "Newest first"),
    ("created_at", "Oldest first"),
    ("event_date", "Event date"),
    ("number", "Order number"),
];

/// Filter, sort and paging state of the order list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrdersView {
    pub status: Option<OrderStatus>,
    pub sort: String,
    pub page: u32,
    pub page_size: u32,
}

impl Default for OrdersView {
    fn default() -> Self {
        Self {
            status: None,
            sort: DEFAULT_ORDER_SORT.to_string(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl PageInfo {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub orders: Vec<Order>,
    pub orders_page: PageInfo,
    pub orders_view: OrdersView,
    /// Unsaved vehicle selections keyed by order id.
    pub selection_drafts: HashMap<String, Vec<TransportSelection>>,
}

impl AppState {
    pub fn apply_persisted(&mut self, persisted: PersistedState) {
        if persisted.orders_page_size > 0 {
            self.orders_view.page_size = persisted.orders_page_size;
        }
        if !persisted.orders_sort.trim().is_empty() {
            self.orders_view.sort = persisted.orders_sort;
        }
        self.selection_drafts = persisted.selection_drafts;
    }

    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            orders_page_size: self.orders_view.page_size,
            orders_sort: self.orders_view.sort.clone(),
            selection_drafts: self.selection_drafts.clone(),
        }
    }

    /// Replaces a cached order after a save so the list shows fresh totals.
    pub fn upsert_order(&mut self, order: Order) {
        match self.orders.iter_mut().find(|existing| existing.id == order.id) {
            Some(existing) => *existing = order,
            None => self.orders.push(order),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub orders_page_size: u32,
    #[serde(default)]
    pub orders_sort: String,
    #[serde(default)]
    pub selection_drafts: HashMap<String, Vec<TransportSelection>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persisted_round_trip_keeps_view_and_drafts() {
        let mut state = AppState::default();
        state.orders_view.page_size = 50;
        state.orders_view.sort = "number".to_string();
        state
            .selection_drafts
            .insert("o-1".to_string(), vec![TransportSelection::new("van", 2)]);

        let mut restored = AppState::default();
        restored.apply_persisted(state.to_persisted());
        assert_eq!(restored.orders_view.page_size, 50);
        assert_eq!(restored.orders_view.sort, "number");
        assert_eq!(restored.selection_drafts.len(), 1);
    }

    #[test]
    fn test_empty_persisted_state_keeps_defaults() {
        let mut state = AppState::default();
        state.apply_persisted(PersistedState::default());
        assert_eq!(state.orders_view, OrdersView::default());
    }

    #[test]
    fn test_page_info_navigation() {
        let info = PageInfo {
            page: 2,
            page_size: 20,
            total: 45,
            total_pages: 3,
        };
        assert!(info.has_previous());
        assert!(info.has_next());
        assert!(!PageInfo::default().has_next());
    }
}
