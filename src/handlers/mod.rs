pub mod health;
pub mod metrics;

pub use health::health;
pub use metrics::{landing, metrics};
