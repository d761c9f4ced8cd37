//! HTTP API for the review dashboard

mod charts;
mod health;
mod reviews;
mod ui;

pub use charts::chart_routes;
pub use health::health_routes;
pub use reviews::review_routes;
pub use ui::ui_routes;
