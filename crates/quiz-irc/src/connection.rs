//! Connection lifecycle, outbound formatting, and the join handshake.

use tracing::{debug, info, warn};

use crate::error::{ProtocolError, Result};
use crate::line::{LineOutcome, LineReader};
use crate::message::RawLine;
use crate::transport::ByteStream;

/// Lifecycle state of the connection. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// No transport yet.
    #[default]
    Disconnected,
    /// Transport open, registration not started.
    Connecting,
    /// PASS/NICK/USER sent, awaiting the server's verdict.
    Authenticating,
    /// Registered and joined to the channel.
    Joined,
    /// Torn down; every further operation fails.
    Closed,
}

/// Identity used when registering with the server.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Nickname to register.
    pub nick: String,
    /// Username (ident); also used as the realname field.
    pub username: String,
    /// Connection password. `None` or empty means no PASS line is sent;
    /// an empty PASS is invalid on the wire.
    pub password: Option<String>,
    /// One chat message announced to the channel right after joining.
    pub greeting: String,
}

/// A single-channel client connection.
///
/// Owns the transport handle exclusively. All failures are connection-fatal:
/// the transport is dropped, the state moves to [`ConnectionState::Closed`],
/// and the caller decides what to do next (this engine never reconnects).
#[derive(Debug)]
pub struct Connection<S> {
    stream: Option<S>,
    channel: String,
    state: ConnectionState,
    reader: LineReader,
}

impl<S: ByteStream> Connection<S> {
    /// Wrap an open transport targeting `channel`.
    pub fn new(stream: S, channel: impl Into<String>) -> Self {
        Self {
            stream: Some(stream),
            channel: channel.into(),
            state: ConnectionState::Connecting,
            reader: LineReader::new(),
        }
    }

    /// Target channel name.
    #[must_use]
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// True only while the connection can still be used.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.stream.is_some()
            && !matches!(
                self.state,
                ConnectionState::Disconnected | ConnectionState::Closed
            )
    }

    /// Tear the connection down. Idempotent.
    pub fn close(&mut self) {
        if self.stream.take().is_some() {
            debug!(channel = %self.channel, "connection closed");
        }
        self.state = ConnectionState::Closed;
    }

    /// Receive at most one complete line.
    ///
    /// `Ok(None)` is a benign timeout: the server was idle, or a line is
    /// still mid-flight and its prefix stays buffered for the next call.
    /// Transport errors, peer shutdown, and oversized unterminated lines
    /// close the connection before the error is returned.
    pub fn recv_line(&mut self) -> Result<Option<RawLine>> {
        let Some(stream) = self.stream.as_mut() else {
            return Err(ProtocolError::Closed);
        };
        if matches!(
            self.state,
            ConnectionState::Disconnected | ConnectionState::Closed
        ) {
            return Err(ProtocolError::Closed);
        }

        match self.reader.read_line(stream) {
            Ok(LineOutcome::Line(line)) => Ok(Some(line)),
            Ok(LineOutcome::TimedOut) => Ok(None),
            Ok(LineOutcome::Closed) => {
                info!(channel = %self.channel, "server closed the connection");
                self.close();
                Err(ProtocolError::Closed)
            }
            Err(e) => {
                warn!(channel = %self.channel, error = %e, "receive failed");
                self.close();
                Err(e)
            }
        }
    }

    /// Write raw bytes; any failure closes the connection.
    fn transmit(&mut self, bytes: &[u8]) -> Result<()> {
        if !self.is_active() {
            return Err(ProtocolError::Closed);
        }
        let Some(stream) = self.stream.as_mut() else {
            return Err(ProtocolError::Closed);
        };

        if let Err(e) = stream.send(bytes) {
            warn!(channel = %self.channel, error = %e, "send failed");
            self.close();
            return Err(e.into());
        }
        Ok(())
    }

    /// Format and send one chat line to the channel.
    ///
    /// The caller must not retry on failure; the connection is already
    /// closed by the time the error is returned.
    pub fn send_chat(&mut self, text: &str) -> Result<()> {
        debug!(channel = %self.channel, text, "sending chat");
        let line = format!("PRIVMSG {} :{}\r\n", self.channel, text);
        self.transmit(line.as_bytes())
    }

    /// Answer a keep-alive challenge.
    pub fn pong(&mut self) -> Result<()> {
        let line = format!("PONG {}\r\n", self.channel);
        self.transmit(line.as_bytes())?;
        debug!(channel = %self.channel, "replied to a ping");
        Ok(())
    }

    /// Run the registration sequence: optional PASS, then NICK, USER, one
    /// reply inspected for `Welcome`, then JOIN.
    ///
    /// PASS must precede registration and registration must precede JOIN,
    /// so the sequence is strictly ordered and single-shot: a missing or
    /// unwelcoming first reply closes the connection immediately, with no
    /// retry and no JOIN ever sent.
    pub fn register(&mut self, nick: &str, username: &str, password: Option<&str>) -> Result<()> {
        self.state = ConnectionState::Authenticating;

        if let Some(pass) = password.filter(|p| !p.is_empty()) {
            self.transmit(format!("PASS {pass}\r\n").as_bytes())?;
        }
        self.transmit(format!("NICK {nick}\r\n").as_bytes())?;
        self.transmit(format!("USER {username} 0 * :{username}\r\n").as_bytes())?;

        match self.recv_line()? {
            Some(line) if contains(line.as_bytes(), b"Welcome") => {
                debug!(nick, "registration acknowledged");
            }
            other => {
                let reply = other.map(|l| l.to_text().into_owned()).unwrap_or_default();
                warn!(nick, reply = %reply, "registration rejected");
                self.close();
                return Err(ProtocolError::Rejected { reply });
            }
        }

        self.transmit(format!("JOIN {}\r\n", self.channel).as_bytes())?;
        self.state = ConnectionState::Joined;
        info!(channel = %self.channel, nick, "joined");
        Ok(())
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.len() >= needle.len() && haystack.windows(needle.len()).any(|w| w == needle)
}
