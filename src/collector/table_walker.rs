use std::sync::Arc;

use tokio::time::{Duration, timeout};

use super::types::SensorTable;
use crate::config::Profile;
use crate::snmp::{TableSession, TableValue, WalkError};

/// Walks one sensor column over an open session, bounded by a fixed timeout.
/// Never retries.
#[derive(Clone)]
pub struct TableWalker {
    profile: Arc<Profile>,
    timeout: Duration,
}

impl TableWalker {
    pub fn new(profile: Arc<Profile>, timeout: Duration) -> Self {
        Self { profile, timeout }
    }

    pub async fn walk(
        &self,
        session: &mut dyn TableSession,
        table: SensorTable,
    ) -> Result<Vec<TableValue>, WalkError> {
        let oid = self.profile.oid(table);

        match timeout(self.timeout, session.walk(oid)).await {
            Ok(result) => result,
            Err(_) => Err(WalkError::Timeout {
                oid: oid.to_string(),
            }),
        }
    }

    /// Walks a string column. Any non-string cell fails the whole walk.
    pub async fn walk_text(
        &self,
        session: &mut dyn TableSession,
        table: SensorTable,
    ) -> Result<Vec<String>, WalkError> {
        let oid = self.profile.oid(table);
        self.walk(session, table)
            .await?
            .into_iter()
            .enumerate()
            .map(|(row, value)| match value {
                TableValue::Text(s) => Ok(s),
                other => Err(type_mismatch(oid, row, "OCTET STRING", &other)),
            })
            .collect()
    }

    /// Walks a numeric column. Any non-integer cell fails the whole walk.
    pub async fn walk_numeric(
        &self,
        session: &mut dyn TableSession,
        table: SensorTable,
    ) -> Result<Vec<f64>, WalkError> {
        let oid = self.profile.oid(table);
        self.walk(session, table)
            .await?
            .into_iter()
            .enumerate()
            .map(|(row, value)| match value {
                TableValue::Integer(i) => Ok(i as f64),
                other => Err(type_mismatch(oid, row, "INTEGER", &other)),
            })
            .collect()
    }
}

fn type_mismatch(oid: &str, row: usize, expected: &'static str, found: &TableValue) -> WalkError {
    WalkError::TypeMismatch {
        oid: oid.to_string(),
        row,
        expected,
        found: found.type_name(),
    }
}
