use std::sync::Arc;

use prometheus::{Encoder, Registry, TextEncoder};
use thiserror::Error;

use crate::metrics::{MetricDescriptors, Sample, ScrapeCollector};

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("failed to build metric family: {0}")]
    Prometheus(#[from] prometheus::Error),

    #[error("exposition output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Renders scrape samples in the Prometheus text exposition format.
pub struct PrometheusFormatter;

impl PrometheusFormatter {
    pub fn content_type() -> String {
        TextEncoder::new().format_type().to_string()
    }

    /// Registers the scrape with a fresh registry and encodes what it
    /// gathers. Families without samples are left out.
    pub fn to_text_string(
        descriptors: &Arc<MetricDescriptors>,
        samples: Vec<Sample>,
    ) -> Result<String, MetricsError> {
        let registry = Registry::new();
        registry.register(Box::new(ScrapeCollector::new(Arc::clone(descriptors), samples)))?;

        let mut buffer = Vec::new();
        TextEncoder::new().encode(&registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
