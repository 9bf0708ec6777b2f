//! Failure taxonomy for the order pipeline.
//!
//! Every error is raised by the stage that detects it and travels unmodified
//! to the CLI, which maps [`OrderError::exit_code`] onto the process exit
//! status. No stage reinterprets an error from a lower stage.

use std::fmt;
use std::time::Duration;

/// Stable classification used for exit codes and log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Validation,
    Network,
    Timeout,
    ConnectionLost,
    Api,
    Mapping,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Config => "CONFIG",
            ErrorKind::Validation => "VALIDATION",
            ErrorKind::Network => "NETWORK",
            ErrorKind::Timeout => "TIMEOUT",
            ErrorKind::ConnectionLost => "CONNECTION_LOST",
            ErrorKind::Api => "EXCHANGE_API",
            ErrorKind::Mapping => "MAPPING",
        }
    }
}

/// Normalized failure of any pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// Unusable client configuration (e.g. signing key setup). Exit 1.
    Config(String),
    /// Malformed or contradictory order intent, detected before any I/O. Exit 2.
    Validation(String),
    /// Failure before the request was dispatched (URL, DNS, connect, TLS):
    /// the exchange never saw it. Exit 4.
    Network(String),
    /// Deadline exceeded. The order may or may not exist on the exchange. Exit 4.
    Timeout { after: Duration },
    /// Connection failed after the request was dispatched, before a complete
    /// response arrived. The order may or may not exist on the exchange. Exit 4.
    ConnectionLost(String),
    /// The exchange answered and rejected or flagged the request. Exit 3.
    Api {
        code: i64,
        msg: String,
        http_status: u16,
    },
    /// A 2xx body did not have the expected shape (protocol drift). Exit 5.
    Mapping(String),
}

impl OrderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::Config(_) => ErrorKind::Config,
            OrderError::Validation(_) => ErrorKind::Validation,
            OrderError::Network(_) => ErrorKind::Network,
            OrderError::Timeout { .. } => ErrorKind::Timeout,
            OrderError::ConnectionLost(_) => ErrorKind::ConnectionLost,
            OrderError::Api { .. } => ErrorKind::Api,
            OrderError::Mapping(_) => ErrorKind::Mapping,
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self.kind() {
            ErrorKind::Config => 1,
            ErrorKind::Validation => 2,
            ErrorKind::Api => 3,
            ErrorKind::Network | ErrorKind::Timeout | ErrorKind::ConnectionLost => 4,
            ErrorKind::Mapping => 5,
        }
    }

    /// `true` when the request may have been executed by the exchange even
    /// though no usable confirmation came back.
    pub fn is_ambiguous(&self) -> bool {
        matches!(
            self,
            OrderError::Timeout { .. } | OrderError::ConnectionLost(_) | OrderError::Mapping(_)
        )
    }

    /// Upstream exchange code, when there is one.
    pub fn exchange_code(&self) -> Option<i64> {
        match self {
            OrderError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl fmt::Display for OrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderError::Config(msg) => write!(f, "configuration error: {msg}"),
            OrderError::Validation(msg) => write!(f, "validation error: {msg}"),
            OrderError::Network(msg) => write!(f, "network error: {msg}"),
            OrderError::Timeout { after } => write!(
                f,
                "request timed out after {} ms; the order may still have been placed",
                after.as_millis()
            ),
            OrderError::ConnectionLost(msg) => write!(
                f,
                "connection lost after the request was sent ({msg}); \
                 the order may still have been placed"
            ),
            OrderError::Api { code, msg, .. } => write!(f, "Binance API error [{code}]: {msg}"),
            OrderError::Mapping(msg) => write!(f, "unexpected response shape: {msg}"),
        }
    }
}

impl std::error::Error for OrderError {}

// ---------------------------------------------------------------------------
// TransportError
// ---------------------------------------------------------------------------

/// The only ways a [`crate::Transport`] may fail. A received HTTP response,
/// whatever its status, is never a transport failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Nothing was dispatched.
    Network(String),
    Timeout { after: Duration },
    /// Dispatched, then the connection failed before a full response.
    ConnectionLost(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Network(msg) => write!(f, "network error: {msg}"),
            TransportError::Timeout { after } => {
                write!(f, "timed out after {} ms", after.as_millis())
            }
            TransportError::ConnectionLost(msg) => write!(f, "connection lost: {msg}"),
        }
    }
}

impl std::error::Error for TransportError {}

impl From<TransportError> for OrderError {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::Network(msg) => OrderError::Network(msg),
            TransportError::Timeout { after } => OrderError::Timeout { after },
            TransportError::ConnectionLost(msg) => OrderError::ConnectionLost(msg),
        }
    }
}
