//! Error types for the client engine.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Connection-fatal errors raised by the engine.
///
/// Every variant other than [`ProtocolError::Closed`] is produced at most
/// once per connection: the engine closes the connection before returning
/// it, after which all further operations report `Closed`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The connection is not active (never opened, or already closed).
    #[error("connection is closed")]
    Closed,

    /// The server's first registration reply did not acknowledge us.
    #[error("registration rejected by server: {reply:?}")]
    Rejected {
        /// The reply line that was inspected (may be empty if the server
        /// stayed silent past the receive deadline).
        reply: String,
    },

    /// An unterminated inbound line exceeded the safety bound.
    #[error("line too long: {actual} bytes without a terminator (limit: {limit})")]
    LineTooLong {
        /// Bytes accumulated so far.
        actual: usize,
        /// Maximum allowed unterminated line length.
        limit: usize,
    },
}
