//! Metric descriptors and the samples produced by a scrape.

use std::collections::HashMap;
use std::sync::Arc;

use prometheus::core::{Collector, Desc};
use prometheus::proto::MetricFamily;
use prometheus::{GaugeVec, Opts};

use crate::collector::SensorRecord;

pub const PREFIX: &str = "apc_env_";

/// Which descriptor a sample belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Up,
    Temperature,
    Humidity,
}

impl MetricKind {
    pub const ALL: [MetricKind; 3] = [MetricKind::Up, MetricKind::Temperature, MetricKind::Humidity];

    pub fn name(&self) -> String {
        let suffix = match self {
            MetricKind::Up => "up",
            MetricKind::Temperature => "temp",
            MetricKind::Humidity => "humidity_percent",
        };
        format!("{}{}", PREFIX, suffix)
    }

    pub fn help(&self) -> &'static str {
        match self {
            MetricKind::Up => "Scrape of target was successful",
            MetricKind::Temperature => "Current temperature",
            MetricKind::Humidity => "Current humidity",
        }
    }

    pub fn label_names(&self) -> &'static [&'static str] {
        match self {
            MetricKind::Up => &["target"],
            MetricKind::Temperature | MetricKind::Humidity => &["target", "name", "location"],
        }
    }
}

/// One gauge value with label values in descriptor order.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub kind: MetricKind,
    pub labels: Vec<String>,
    pub value: f64,
}

impl Sample {
    pub fn up(target: &str, reachable: bool) -> Self {
        Self {
            kind: MetricKind::Up,
            labels: vec![target.to_string()],
            value: if reachable { 1.0 } else { 0.0 },
        }
    }

    pub fn temperature(target: &str, record: &SensorRecord) -> Self {
        Self::sensor(MetricKind::Temperature, target, record, record.temperature)
    }

    pub fn humidity(target: &str, record: &SensorRecord) -> Self {
        Self::sensor(MetricKind::Humidity, target, record, record.humidity)
    }

    fn sensor(kind: MetricKind, target: &str, record: &SensorRecord, value: f64) -> Self {
        Self {
            kind,
            labels: vec![
                target.to_string(),
                record.name.clone(),
                record.location.clone(),
            ],
            value,
        }
    }

    pub fn target(&self) -> &str {
        &self.labels[0]
    }
}

/// The fixed descriptor set, built once at startup and shared read-only.
#[derive(Debug)]
pub struct MetricDescriptors {
    up: Desc,
    temperature: Desc,
    humidity: Desc,
}

impl MetricDescriptors {
    pub fn new() -> prometheus::Result<Self> {
        Ok(Self {
            up: build_desc(MetricKind::Up)?,
            temperature: build_desc(MetricKind::Temperature)?,
            humidity: build_desc(MetricKind::Humidity)?,
        })
    }

    pub fn get(&self, kind: MetricKind) -> &Desc {
        match kind {
            MetricKind::Up => &self.up,
            MetricKind::Temperature => &self.temperature,
            MetricKind::Humidity => &self.humidity,
        }
    }

    pub fn describe(&self) -> Vec<&Desc> {
        MetricKind::ALL.iter().map(|kind| self.get(*kind)).collect()
    }
}

/// Exposes the samples of one scrape under the shared descriptors, so a
/// per-scrape `Registry` can validate and gather them.
pub struct ScrapeCollector {
    descriptors: Arc<MetricDescriptors>,
    samples: Vec<Sample>,
}

impl ScrapeCollector {
    pub fn new(descriptors: Arc<MetricDescriptors>, samples: Vec<Sample>) -> Self {
        Self {
            descriptors,
            samples,
        }
    }

    fn family(&self, kind: MetricKind) -> prometheus::Result<Vec<MetricFamily>> {
        let desc = self.descriptors.get(kind);
        let labels: Vec<&str> = desc.variable_labels.iter().map(String::as_str).collect();
        let gauges = GaugeVec::new(Opts::new(desc.fq_name.clone(), desc.help.clone()), &labels)?;

        for sample in self.samples.iter().filter(|s| s.kind == kind) {
            let values: Vec<&str> = sample.labels.iter().map(String::as_str).collect();
            gauges.get_metric_with_label_values(&values)?.set(sample.value);
        }

        Ok(gauges.collect())
    }
}

impl Collector for ScrapeCollector {
    fn desc(&self) -> Vec<&Desc> {
        self.descriptors.describe()
    }

    fn collect(&self) -> Vec<MetricFamily> {
        let mut families = Vec::new();
        for kind in MetricKind::ALL {
            match self.family(kind) {
                Ok(family) => families.extend(family),
                Err(e) => tracing::error!(metric = %kind.name(), error = %e, "dropping metric family"),
            }
        }
        families
    }
}

fn build_desc(kind: MetricKind) -> prometheus::Result<Desc> {
    Desc::new(
        kind.name(),
        kind.help().to_string(),
        kind.label_names().iter().map(|l| l.to_string()).collect(),
        HashMap::new(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptors_match_exported_names() {
        let descriptors = MetricDescriptors::new().unwrap();
        let names: Vec<&str> = descriptors
            .describe()
            .iter()
            .map(|d| d.fq_name.as_str())
            .collect();

        assert_eq!(names, vec!["apc_env_up", "apc_env_temp", "apc_env_humidity_percent"]);
        assert_eq!(
            descriptors.get(MetricKind::Temperature).variable_labels,
            vec!["target", "name", "location"]
        );
    }

    #[test]
    fn sensor_samples_carry_target_name_location() {
        let record = SensorRecord {
            name: "Sensor A".to_string(),
            location: "Rack1".to_string(),
            temperature: 22.0,
            humidity: 40.0,
        };

        let temp = Sample::temperature("10.0.0.1", &record);
        assert_eq!(temp.kind, MetricKind::Temperature);
        assert_eq!(temp.labels, vec!["10.0.0.1", "Sensor A", "Rack1"]);
        assert_eq!(temp.value, 22.0);

        let hum = Sample::humidity("10.0.0.1", &record);
        assert_eq!(hum.value, 40.0);
        assert_eq!(hum.target(), "10.0.0.1");
    }

    #[test]
    fn scrape_collector_reports_shared_descriptors() {
        let descriptors = Arc::new(MetricDescriptors::new().unwrap());
        let collector = ScrapeCollector::new(Arc::clone(&descriptors), Vec::new());

        let ids: Vec<u64> = collector.desc().iter().map(|d| d.id).collect();
        let expected: Vec<u64> = descriptors.describe().iter().map(|d| d.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn scrape_collector_groups_samples_by_kind() {
        let descriptors = Arc::new(MetricDescriptors::new().unwrap());
        let sensor = SensorRecord {
            name: "Sensor A".to_string(),
            location: "Rack1".to_string(),
            temperature: 22.0,
            humidity: 40.0,
        };
        let collector = ScrapeCollector::new(
            descriptors,
            vec![
                Sample::temperature("10.0.0.1", &sensor),
                Sample::up("10.0.0.1", true),
                Sample::up("10.0.0.2", false),
            ],
        );

        let families = collector.collect();
        let sizes: Vec<(&str, usize)> = families
            .iter()
            .map(|f| (f.get_name(), f.get_metric().len()))
            .collect();

        assert_eq!(
            sizes,
            vec![("apc_env_up", 2), ("apc_env_temp", 1), ("apc_env_humidity_percent", 0)]
        );
    }

    #[test]
    fn scrape_collector_registers_once_per_registry() {
        let descriptors = Arc::new(MetricDescriptors::new().unwrap());
        let registry = prometheus::Registry::new();

        registry
            .register(Box::new(ScrapeCollector::new(Arc::clone(&descriptors), Vec::new())))
            .unwrap();
        let duplicate =
            registry.register(Box::new(ScrapeCollector::new(descriptors, Vec::new())));

        assert!(duplicate.is_err());
    }

    #[test]
    fn up_sample_is_boolean_gauge() {
        assert_eq!(Sample::up("10.0.0.2", false).value, 0.0);
        assert_eq!(Sample::up("10.0.0.2", true).value, 1.0);
        assert_eq!(Sample::up("10.0.0.2", true).labels, vec!["10.0.0.2"]);
    }
}
