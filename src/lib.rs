//! Prometheus exporter for the temperature and humidity sensors of APC
//! environmental monitoring units, polled over SNMPv2c.

pub mod collector;
pub mod config;
pub mod formatter;
pub mod handlers;
pub mod metrics;
pub mod routes;
pub mod snmp;

use std::sync::Arc;

pub use collector::{ScrapeOrchestrator, SensorRecord, SensorTable, TableWalker, TargetCollector};
pub use config::AppConfig;
pub use metrics::{MetricDescriptors, MetricKind, Sample};
pub use snmp::{Connector, SessionError, SnmpConnector, TableSession, TableValue, WalkError};

/// Wires a scrape orchestrator for the configured targets on top of `connector`.
pub fn build_orchestrator(config: &AppConfig, connector: Arc<dyn Connector>) -> ScrapeOrchestrator {
    let walker = TableWalker::new(Arc::new(config.profile.clone()), config.get_timeout());
    let collector = TargetCollector::new(connector, walker);
    ScrapeOrchestrator::new(config.get_targets(), collector)
}
