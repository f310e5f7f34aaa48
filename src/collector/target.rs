use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::table_walker::TableWalker;
use super::types::{SensorRecord, SensorTable, assign_by_position};
use crate::metrics::Sample;
use crate::snmp::{Connector, TableSession, WalkError};

/// Collects the sensor readings of a single target.
pub struct TargetCollector {
    connector: Arc<dyn Connector>,
    walker: TableWalker,
}

impl TargetCollector {
    pub fn new(connector: Arc<dyn Connector>, walker: TableWalker) -> Self {
        Self { connector, walker }
    }

    /// Opens a session with `target`, walks the four sensor tables and sends
    /// the resulting samples to `sink`. The reachability sample is always
    /// sent last. Every session is dropped before returning.
    pub async fn collect(&self, target: &str, sink: &mpsc::Sender<Sample>) {
        let session = match self.connector.connect(target).await {
            Ok(session) => session,
            Err(e) => {
                info!(device = %target, error = %e, "session failed");
                let _ = sink.send(Sample::up(target, false)).await;
                return;
            }
        };

        let mut session = TargetSession {
            connector: &*self.connector,
            target,
            session: Some(session),
        };
        let sensors = self.read_sensors(&mut session).await;
        drop(session);

        for sensor in &sensors {
            if sink.send(Sample::temperature(target, sensor)).await.is_err()
                || sink.send(Sample::humidity(target, sensor)).await.is_err()
            {
                debug!(device = %target, "sample sink closed");
                return;
            }
        }

        let _ = sink.send(Sample::up(target, true)).await;
    }

    /// Builds one record per name row, then fills the other columns by
    /// position. Failed walks leave the affected column at its default.
    async fn read_sensors(&self, session: &mut TargetSession<'_>) -> Vec<SensorRecord> {
        let target = session.target;
        let walker = &self.walker;

        let mut sensors: Vec<SensorRecord> = match session.walk_text(walker, SensorTable::Name).await
        {
            Ok(names) => names.into_iter().map(SensorRecord::named).collect(),
            Err(e) => {
                warn!(device = %target, table = SensorTable::Name.as_str(), error = %e, "walk failed");
                Vec::new()
            }
        };

        let locations = session.walk_text(walker, SensorTable::Location).await;
        fill_column(target, SensorTable::Location, &mut sensors, locations, |s, v| {
            s.location = v
        });

        let temperatures = session.walk_numeric(walker, SensorTable::Temperature).await;
        fill_column(target, SensorTable::Temperature, &mut sensors, temperatures, |s, v| {
            s.temperature = v
        });

        let humidity = session.walk_numeric(walker, SensorTable::Humidity).await;
        fill_column(target, SensorTable::Humidity, &mut sensors, humidity, |s, v| {
            s.humidity = v
        });

        debug!(device = %target, sensors = sensors.len(), "sensor tables walked");
        sensors
    }
}

/// The session used by one collection. A walk that timed out may still have
/// its reply in flight, so that session is dropped and the next table is
/// walked over a freshly opened one.
struct TargetSession<'a> {
    connector: &'a dyn Connector,
    target: &'a str,
    session: Option<Box<dyn TableSession>>,
}

impl TargetSession<'_> {
    async fn current(&mut self) -> Result<&mut dyn TableSession, WalkError> {
        let session = match self.session.take() {
            Some(session) => session,
            None => {
                debug!(device = %self.target, "reopening session");
                self.connector.connect(self.target).await?
            }
        };
        Ok(&mut **self.session.insert(session))
    }

    async fn walk_text(
        &mut self,
        walker: &TableWalker,
        table: SensorTable,
    ) -> Result<Vec<String>, WalkError> {
        let result = walker.walk_text(self.current().await?, table).await;
        self.discard_after_timeout(table, &result);
        result
    }

    async fn walk_numeric(
        &mut self,
        walker: &TableWalker,
        table: SensorTable,
    ) -> Result<Vec<f64>, WalkError> {
        let result = walker.walk_numeric(self.current().await?, table).await;
        self.discard_after_timeout(table, &result);
        result
    }

    fn discard_after_timeout<T>(&mut self, table: SensorTable, result: &Result<T, WalkError>) {
        if let Err(WalkError::Timeout { .. }) = result {
            debug!(device = %self.target, table = table.as_str(), "dropping session after timeout");
            self.session = None;
        }
    }
}

fn fill_column<T>(
    target: &str,
    table: SensorTable,
    sensors: &mut [SensorRecord],
    walked: Result<Vec<T>, WalkError>,
    set: impl FnMut(&mut SensorRecord, T),
) {
    match walked {
        Ok(values) => {
            let discarded = assign_by_position(sensors, values, set);
            if discarded > 0 {
                debug!(
                    device = %target,
                    table = table.as_str(),
                    discarded,
                    "table has more rows than sensor names"
                );
            }
        }
        Err(e) => warn!(device = %target, table = table.as_str(), error = %e, "walk failed"),
    }
}
