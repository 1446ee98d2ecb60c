//! Staff dashboard for a furniture and decor rental business.
//!
//! - `domain`: orders, back-office records, and the delivery pricing evaluator.
//! - `infra`: typed API client over HTTP or the in-memory mock backend.
//! - `ui` and `app`: the Dioxus desktop front end.

pub mod app;
pub mod config;
pub mod domain;
pub mod infra;
pub mod logging;
pub mod ui;
pub mod util;
