pub mod exposition;

pub use exposition::{MetricsError, PrometheusFormatter};
