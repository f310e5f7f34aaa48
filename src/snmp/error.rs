use thiserror::Error;

/// The target could not be reached at all.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to open SNMP session with {target}: {source}")]
    Io {
        target: String,
        #[source]
        source: std::io::Error,
    },

    #[error("timed out opening SNMP session with {target}")]
    Timeout { target: String },
}

/// A single table walk failed. Never fatal for the target.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("invalid OID '{oid}': {reason}")]
    InvalidOid { oid: String, reason: String },

    #[error("SNMP GETBULK on {oid} failed: {reason}")]
    Protocol { oid: String, reason: String },

    #[error("walk of {oid} timed out")]
    Timeout { oid: String },

    #[error("could not reopen session after timeout: {0}")]
    Reconnect(#[from] SessionError),

    #[error("walk of {oid} returned {found} at row {row}, expected {expected}")]
    TypeMismatch {
        oid: String,
        row: usize,
        expected: &'static str,
        found: &'static str,
    },
}
