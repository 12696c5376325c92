mod health;
mod metrics;
mod card;

pub use health::health_handler;
pub use metrics::metrics_handler;
pub use card::card_handler;
