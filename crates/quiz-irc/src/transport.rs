//! Byte-level transport capability.
//!
//! The engine never touches a socket directly; it drives a [`ByteStream`],
//! which models the only two operations the protocol path needs: a bounded
//! single-byte receive and an all-or-nothing send. Production code uses
//! [`TcpByteStream`]; tests use scripted in-memory streams.

use std::io;

/// Outcome of a single bounded receive attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecvOutcome {
    /// One byte arrived.
    Byte(u8),
    /// No data arrived within the configured receive timeout. Benign.
    TimedOut,
    /// The peer performed an orderly shutdown.
    Closed,
}

/// A blocking byte transport with per-attempt timeout semantics.
///
/// `recv_byte` blocks for at most the receive timeout configured when the
/// stream was built. A timeout is reported as [`RecvOutcome::TimedOut`],
/// not as an error; an `Err` from either method means the transport is
/// unusable and the connection must be closed.
pub trait ByteStream {
    /// Receive a single byte, waiting at most the configured timeout.
    fn recv_byte(&mut self) -> io::Result<RecvOutcome>;

    /// Send the entire buffer.
    fn send(&mut self, bytes: &[u8]) -> io::Result<()>;
}

#[cfg(feature = "net")]
mod net {
    use std::io::{self, Read, Write};
    use std::net::{TcpStream, ToSocketAddrs};
    use std::time::Duration;

    use socket2::{Domain, Protocol, Socket, Type};
    use tracing::debug;

    use super::{ByteStream, RecvOutcome};

    /// Scoped handle for the process-wide network subsystem.
    ///
    /// Acquired once per engine instance and released on drop. On the
    /// platforms we target the standard library manages socket subsystem
    /// initialization internally, so acquisition cannot fail in practice;
    /// the handle exists so transport construction is explicitly tied to
    /// an acquired context instead of a hidden global.
    #[derive(Debug)]
    pub struct NetContext {
        _priv: (),
    }

    impl NetContext {
        /// Acquire the network context.
        pub fn acquire() -> io::Result<NetContext> {
            Ok(NetContext { _priv: () })
        }
    }

    /// A plain TCP [`ByteStream`] with a fixed receive timeout.
    #[derive(Debug)]
    pub struct TcpByteStream {
        stream: TcpStream,
    }

    impl TcpByteStream {
        /// Resolve `host:port`, connect, and configure the receive timeout.
        ///
        /// The timeout must be non-zero; it bounds every subsequent
        /// `recv_byte` attempt.
        pub fn connect(
            _net: &NetContext,
            host: &str,
            port: u16,
            recv_timeout: Duration,
        ) -> io::Result<Self> {
            let addr = (host, port).to_socket_addrs()?.next().ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::AddrNotAvailable,
                    format!("no addresses resolved for {host}:{port}"),
                )
            })?;

            let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;
            socket.connect(&addr.into())?;
            socket.set_nodelay(true)?;

            let stream: TcpStream = socket.into();
            stream.set_read_timeout(Some(recv_timeout))?;

            debug!(%addr, timeout_ms = recv_timeout.as_millis() as u64, "connected");
            Ok(TcpByteStream { stream })
        }
    }

    impl ByteStream for TcpByteStream {
        fn recv_byte(&mut self) -> io::Result<RecvOutcome> {
            let mut buf = [0u8; 1];
            match self.stream.read(&mut buf) {
                Ok(0) => Ok(RecvOutcome::Closed),
                Ok(_) => Ok(RecvOutcome::Byte(buf[0])),
                // Unix reports a read timeout as WouldBlock, Windows as TimedOut.
                Err(e)
                    if matches!(
                        e.kind(),
                        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
                    ) =>
                {
                    Ok(RecvOutcome::TimedOut)
                }
                Err(e) => Err(e),
            }
        }

        fn send(&mut self, bytes: &[u8]) -> io::Result<()> {
            self.stream.write_all(bytes)
        }
    }
}

#[cfg(feature = "net")]
pub use net::{NetContext, TcpByteStream};
