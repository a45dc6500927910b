pub mod assistant_handler;
pub mod bookings_handler;
pub mod clients_handler;
pub mod health;
pub mod metrics;
pub mod shows_handler;
pub mod staff_handler;
pub mod uploads_handler;

pub use health::health_check;
pub use metrics::{setup_metrics_recorder, MetricsState};
