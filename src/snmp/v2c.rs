use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use snmp2::{AsyncSession, Oid, Value};
use tokio::time::timeout;

use super::{Connector, SessionError, TableSession, TableValue, WalkError, format_arcs, parse_arcs};

/// Rows requested per GETBULK round trip.
const MAX_REPETITIONS: u32 = 10;

/// One GETBULK response, detached from the session buffer. A `None` cell
/// marks endOfMibView / noSuchObject / noSuchInstance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkPage {
    pub error_status: u32,
    pub varbinds: Vec<(Vec<u64>, Option<TableValue>)>,
}

/// Sends a single GETBULK starting after `from`.
#[async_trait]
pub trait BulkTransport: Send {
    async fn getbulk(&mut self, from: &[u64], max_repetitions: u32)
    -> Result<BulkPage, WalkError>;
}

/// Walks the subtree under `root` until the agent leaves it, reports the end
/// of the MIB view or sends an empty page. Every returned OID must be greater
/// than the previous one, otherwise the walk fails instead of looping.
pub async fn walk_subtree<T: BulkTransport + ?Sized>(
    transport: &mut T,
    root: &[u64],
    max_repetitions: u32,
) -> Result<Vec<TableValue>, WalkError> {
    let mut results = Vec::new();
    let mut current = root.to_vec();

    loop {
        let page = transport.getbulk(&current, max_repetitions).await?;

        if page.error_status != 0 {
            return Err(WalkError::Protocol {
                oid: format_arcs(root),
                reason: format!("agent returned error status {}", page.error_status),
            });
        }
        if page.varbinds.is_empty() {
            return Ok(results);
        }

        for (oid, value) in page.varbinds {
            if !oid.starts_with(root) {
                return Ok(results);
            }
            let Some(value) = value else {
                return Ok(results);
            };
            if oid <= current {
                return Err(WalkError::Protocol {
                    oid: format_arcs(root),
                    reason: format!(
                        "OID not increasing: {} after {}",
                        format_arcs(&oid),
                        format_arcs(&current)
                    ),
                });
            }

            results.push(value);
            current = oid;
        }
    }
}

pub struct SnmpClientV2c {
    session: AsyncSession,
}

impl SnmpClientV2c {
    pub async fn new(target: &str, community: &[u8]) -> std::io::Result<Self> {
        let session = AsyncSession::new_v2c(target, community, 2).await?;

        Ok(Self { session })
    }

    pub async fn walk_bulk(
        &mut self,
        root: &[u64],
        max_repetitions: u32,
    ) -> Result<Vec<TableValue>, WalkError> {
        walk_subtree(self, root, max_repetitions).await
    }
}

#[async_trait]
impl BulkTransport for SnmpClientV2c {
    async fn getbulk(
        &mut self,
        from: &[u64],
        max_repetitions: u32,
    ) -> Result<BulkPage, WalkError> {
        let request = Oid::from(from).map_err(|e| WalkError::InvalidOid {
            oid: format_arcs(from),
            reason: format!("{:?}", e),
        })?;

        let resp = self
            .session
            .getbulk(&[&request], 0, max_repetitions)
            .await
            .map_err(|e| WalkError::Protocol {
                oid: format_arcs(from),
                reason: format!("{:?}", e),
            })?;

        let mut page = BulkPage {
            error_status: resp.error_status,
            varbinds: Vec::new(),
        };
        for (oid, value) in resp.varbinds {
            let arcs = oid
                .iter()
                .map(|arcs| arcs.collect::<Vec<u64>>())
                .ok_or_else(|| WalkError::Protocol {
                    oid: format_arcs(from),
                    reason: format!("agent returned unrepresentable OID {}", oid),
                })?;
            page.varbinds.push((arcs, convert_value(&value)));
        }

        Ok(page)
    }
}

#[async_trait]
impl TableSession for SnmpClientV2c {
    async fn walk(&mut self, table_oid: &str) -> Result<Vec<TableValue>, WalkError> {
        let root = parse_arcs(table_oid)?;
        self.walk_bulk(&root, MAX_REPETITIONS).await
    }
}

/// Maps an SNMP value to a detached cell. `None` marks the end of the walk.
fn convert_value(value: &Value<'_>) -> Option<TableValue> {
    let converted = match value {
        Value::EndOfMibView | Value::NoSuchObject | Value::NoSuchInstance => return None,
        Value::OctetString(bytes) => TableValue::Text(
            String::from_utf8_lossy(bytes)
                .trim_end_matches('\0')
                .to_string(),
        ),
        Value::Integer(i) => TableValue::Integer(*i),
        Value::Unsigned32(u) | Value::Counter32(u) => TableValue::Integer(i64::from(*u)),
        other => TableValue::Other(format!("{:?}", other)),
    };
    Some(converted)
}

/// Appends the default SNMP port unless the target already carries one.
pub fn target_address(target: &str, port: u16) -> String {
    if target.parse::<SocketAddr>().is_ok() {
        return target.to_string();
    }
    if let Ok(ip) = target.parse::<IpAddr>() {
        return SocketAddr::new(ip, port).to_string();
    }
    if target.contains(':') {
        target.to_string()
    } else {
        format!("{}:{}", target, port)
    }
}

/// Opens SNMPv2c sessions with a shared community string.
#[derive(Clone)]
pub struct SnmpConnector {
    community: Vec<u8>,
    port: u16,
    timeout: Duration,
}

impl SnmpConnector {
    pub fn new(community: impl Into<Vec<u8>>, port: u16, timeout: Duration) -> Self {
        Self {
            community: community.into(),
            port,
            timeout,
        }
    }
}

#[async_trait]
impl Connector for SnmpConnector {
    async fn connect(&self, target: &str) -> Result<Box<dyn TableSession>, SessionError> {
        let address = target_address(target, self.port);

        match timeout(self.timeout, SnmpClientV2c::new(&address, &self.community)).await {
            Ok(Ok(client)) => Ok(Box::new(client)),
            Ok(Err(source)) => Err(SessionError::Io {
                target: target.to_string(),
                source,
            }),
            Err(_) => Err(SessionError::Timeout {
                target: target.to_string(),
            }),
        }
    }
}
