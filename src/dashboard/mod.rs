//! Dashboard module
//!
//! Provides the landing page with running and daily totals and the record tables.

mod handlers;
mod totals;
mod view;

pub(crate) use handlers::{AddRecordError, render_dashboard};
pub use handlers::{DashboardState, get_dashboard_page};
