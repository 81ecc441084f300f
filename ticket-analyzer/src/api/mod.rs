//! HTTP API handlers for ticket-analyzer

pub mod analyze;
pub mod health;
pub mod ui;

pub use analyze::analyze_routes;
pub use health::health_routes;
pub use ui::ui_routes;
