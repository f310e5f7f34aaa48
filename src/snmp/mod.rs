use async_trait::async_trait;

pub mod error;
pub mod oid;
pub mod v2c;

pub use error::{SessionError, WalkError};
pub use oid::{format_arcs, parse_arcs, parse_oid};
pub use v2c::{BulkPage, BulkTransport, SnmpClientV2c, SnmpConnector, walk_subtree};

/// A single cell returned by a table walk, detached from the response buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum TableValue {
    Text(String),
    Integer(i64),
    /// Anything else the agent returned, kept as its debug rendering.
    Other(String),
}

impl TableValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            TableValue::Text(_) => "OCTET STRING",
            TableValue::Integer(_) => "INTEGER",
            TableValue::Other(_) => "OTHER",
        }
    }
}

/// Opens sessions against targets. One session is opened per collection
/// attempt and dropped when the collection finishes.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, target: &str) -> Result<Box<dyn TableSession>, SessionError>;
}

/// An open session with one target.
#[async_trait]
pub trait TableSession: Send {
    /// Walks the subtree rooted at `table_oid` and returns the values in the
    /// order the agent sent them.
    async fn walk(&mut self, table_oid: &str) -> Result<Vec<TableValue>, WalkError>;
}
