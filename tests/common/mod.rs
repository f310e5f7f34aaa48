//! Scripted SNMP agents for exercising the scrape without a network.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use apc_env_exporter::config::Profile;
use apc_env_exporter::{
    Connector, SensorTable, SessionError, TableSession, TableValue, WalkError,
};
use async_trait::async_trait;

/// What one fake device answers for each table.
#[derive(Clone, Default)]
pub struct FakeDevice {
    pub unreachable: bool,
    pub connect_delay: Duration,
    pub tables: HashMap<String, Result<Vec<TableValue>, String>>,
    pub slow_tables: HashMap<String, Duration>,
}

impl FakeDevice {
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    pub fn with_table(mut self, table: SensorTable, values: Vec<TableValue>) -> Self {
        self.tables
            .insert(Profile::default().oid(table).to_string(), Ok(values));
        self
    }

    pub fn with_failed_table(mut self, table: SensorTable) -> Self {
        self.tables.insert(
            Profile::default().oid(table).to_string(),
            Err("agent returned genErr".to_string()),
        );
        self
    }

    /// The agent answers `table` only after `delay`. Until then the reply
    /// stays queued on the session and is handed to whichever walk comes next.
    pub fn with_slow_table(mut self, table: SensorTable, delay: Duration) -> Self {
        self.slow_tables
            .insert(Profile::default().oid(table).to_string(), delay);
        self
    }

    pub fn with_connect_delay(mut self, delay: Duration) -> Self {
        self.connect_delay = delay;
        self
    }

    /// A device with one fully populated table set.
    pub fn sensors(names: &[&str], locations: &[&str], temps: &[i64], humidity: &[i64]) -> Self {
        Self::default()
            .with_table(SensorTable::Name, text(names))
            .with_table(SensorTable::Location, text(locations))
            .with_table(SensorTable::Temperature, ints(temps))
            .with_table(SensorTable::Humidity, ints(humidity))
    }
}

pub fn text(values: &[&str]) -> Vec<TableValue> {
    values
        .iter()
        .map(|v| TableValue::Text(v.to_string()))
        .collect()
}

pub fn ints(values: &[i64]) -> Vec<TableValue> {
    values.iter().map(|v| TableValue::Integer(*v)).collect()
}

#[derive(Default)]
pub struct SessionCounters {
    pub opened: AtomicUsize,
    pub closed: AtomicUsize,
    pub walks: AtomicUsize,
}

#[derive(Clone, Default)]
pub struct FakeConnector {
    pub devices: HashMap<String, FakeDevice>,
    pub counters: Arc<SessionCounters>,
}

impl FakeConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn device(mut self, target: &str, device: FakeDevice) -> Self {
        self.devices.insert(target.to_string(), device);
        self
    }
}

#[async_trait]
impl Connector for FakeConnector {
    async fn connect(&self, target: &str) -> Result<Box<dyn TableSession>, SessionError> {
        let device = self.devices.get(target).cloned().unwrap_or_else(FakeDevice::unreachable);
        tokio::time::sleep(device.connect_delay).await;

        if device.unreachable {
            return Err(SessionError::Io {
                target: target.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::HostUnreachable, "no route to host"),
            });
        }

        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeSession {
            device,
            counters: Arc::clone(&self.counters),
            late_reply: None,
        }))
    }
}

struct FakeSession {
    device: FakeDevice,
    counters: Arc<SessionCounters>,
    /// Reply of an abandoned slow walk that never got read.
    late_reply: Option<Vec<TableValue>>,
}

#[async_trait]
impl TableSession for FakeSession {
    async fn walk(&mut self, table_oid: &str) -> Result<Vec<TableValue>, WalkError> {
        self.counters.walks.fetch_add(1, Ordering::SeqCst);
        if let Some(stale) = self.late_reply.take() {
            return Ok(stale);
        }

        if let Some(delay) = self.device.slow_tables.get(table_oid).copied() {
            self.late_reply = match self.device.tables.get(table_oid) {
                Some(Ok(values)) => Some(values.clone()),
                _ => Some(Vec::new()),
            };
            tokio::time::sleep(delay).await;
            self.late_reply = None;
        }

        match self.device.tables.get(table_oid) {
            Some(Ok(values)) => Ok(values.clone()),
            Some(Err(reason)) => Err(WalkError::Protocol {
                oid: table_oid.to_string(),
                reason: reason.clone(),
            }),
            None => Ok(Vec::new()),
        }
    }
}

impl Drop for FakeSession {
    fn drop(&mut self) {
        self.counters.closed.fetch_add(1, Ordering::SeqCst);
    }
}
