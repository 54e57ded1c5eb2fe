//! CRLF line framing.
//!
//! The server does not announce message sizes; bytes are pulled one at a
//! time and accumulated until the buffer ends in `\r\n`. The reader is a
//! small state machine: an empty buffer is idle, a non-empty buffer is
//! mid-line, and each [`LineReader::read_line`] call ends in exactly one of
//! complete / timed out / failed. A timeout mid-line keeps the partial
//! buffer, so a line split across polling steps reassembles intact.

use bytes::{BufMut, BytesMut};

use crate::error::{ProtocolError, Result};
use crate::message::RawLine;
use crate::transport::{ByteStream, RecvOutcome};

/// Safety bound on an unterminated line. A peer that streams more than
/// this without a `\r\n` is treated as broken or hostile.
pub const MAX_LINE_LEN: usize = 65535;

/// Outcome of driving the reader for one polling step.
#[derive(Debug)]
pub enum LineOutcome {
    /// A complete line, terminator included.
    Line(RawLine),
    /// No complete line within the receive timeout; partial input is kept.
    TimedOut,
    /// The peer shut the stream down.
    Closed,
}

/// Accumulates bytes from a [`ByteStream`] into CRLF-terminated lines.
#[derive(Debug, Default)]
pub struct LineReader {
    buf: BytesMut,
}

impl LineReader {
    /// Create an empty reader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of buffered bytes belonging to a not-yet-terminated line.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    /// Pull bytes from `source` until a full line, a timeout, or an error.
    ///
    /// Errors are definitive: an `Err` here means the transport is broken
    /// (or the peer exceeded [`MAX_LINE_LEN`]) and the connection must be
    /// closed by the caller.
    pub fn read_line<S: ByteStream>(&mut self, source: &mut S) -> Result<LineOutcome> {
        loop {
            match source.recv_byte()? {
                RecvOutcome::TimedOut => return Ok(LineOutcome::TimedOut),
                RecvOutcome::Closed => return Ok(LineOutcome::Closed),
                RecvOutcome::Byte(b) => {
                    self.buf.put_u8(b);

                    if self.buf.ends_with(b"\r\n") {
                        let line = self.buf.split().freeze();
                        return Ok(LineOutcome::Line(RawLine::new(line)));
                    }

                    if self.buf.len() > MAX_LINE_LEN {
                        return Err(ProtocolError::LineTooLong {
                            actual: self.buf.len(),
                            limit: MAX_LINE_LEN,
                        });
                    }
                }
            }
        }
    }
}
