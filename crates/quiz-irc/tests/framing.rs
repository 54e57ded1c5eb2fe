//! Framing behavior against scripted byte streams.

mod common;

use common::ScriptedStream;
use proptest::prelude::*;
use quiz_irc::{Connection, LineOutcome, LineReader, ProtocolError, MAX_LINE_LEN};

#[test]
fn test_partial_line_survives_polling_steps() {
    let stream = ScriptedStream::new()
        .feed("PRIV")
        .timeout()
        .feed("MSG #c :hi\r\n");
    let mut conn = Connection::new(stream, "#c");

    // First step: only a prefix arrived, nothing to report.
    assert!(matches!(conn.recv_line(), Ok(None)));
    assert!(conn.is_active());

    // Second step: the rest arrives and the line reassembles intact.
    let line = conn.recv_line().unwrap().expect("complete line");
    assert_eq!(line.as_bytes(), b"PRIVMSG #c :hi\r\n");
}

#[test]
fn test_oversized_unterminated_line_kills_the_connection() {
    let long = "a".repeat(MAX_LINE_LEN + 1);
    let stream = ScriptedStream::new().feed(&long);
    let mut conn = Connection::new(stream, "#c");

    match conn.recv_line() {
        Err(ProtocolError::LineTooLong { limit, .. }) => assert_eq!(limit, MAX_LINE_LEN),
        other => panic!("expected LineTooLong, got {:?}", other),
    }
    assert!(!conn.is_active());
}

#[test]
fn test_receive_error_kills_the_connection() {
    let stream = ScriptedStream::new()
        .feed("PART")
        .recv_error(std::io::ErrorKind::ConnectionReset);
    let mut conn = Connection::new(stream, "#c");

    assert!(matches!(conn.recv_line(), Err(ProtocolError::Io(_))));
    assert!(!conn.is_active());
}

#[test]
fn test_peer_shutdown_kills_the_connection() {
    let stream = ScriptedStream::new().closed();
    let mut conn = Connection::new(stream, "#c");

    assert!(matches!(conn.recv_line(), Err(ProtocolError::Closed)));
    assert!(!conn.is_active());
}

/// Split `input` at every CRLF; the suffix after the last terminator stays
/// pending.
fn expected_lines(input: &[u8]) -> (Vec<Vec<u8>>, usize) {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i + 1 < input.len() {
        if input[i] == b'\r' && input[i + 1] == b'\n' {
            lines.push(input[start..i + 2].to_vec());
            start = i + 2;
            i = start;
        } else {
            i += 1;
        }
    }
    (lines, input.len() - start)
}

proptest! {
    /// A line is produced exactly when the accumulated bytes end in CRLF,
    /// and it contains exactly the bytes up to and including the
    /// terminator, regardless of how the stream is chunked.
    #[test]
    fn lines_are_exact_under_arbitrary_chunking(
        input in proptest::collection::vec(any::<u8>(), 0..512),
        timeout_every in 1usize..7,
    ) {
        let mut stream = ScriptedStream::new();
        for (i, chunk) in input.chunks(timeout_every).enumerate() {
            let text: Vec<u8> = chunk.to_vec();
            // interleave benign timeouts between chunks
            if i > 0 {
                stream = stream.timeout();
            }
            for b in text {
                stream = stream.feed_byte(b);
            }
        }

        let mut reader = LineReader::new();
        let mut produced: Vec<Vec<u8>> = Vec::new();
        loop {
            match reader.read_line(&mut stream) {
                Ok(LineOutcome::Line(line)) => produced.push(line.as_bytes().to_vec()),
                Ok(LineOutcome::TimedOut) => {
                    // script exhausted once timeouts repeat forever
                    if stream.is_drained() {
                        break;
                    }
                }
                Ok(LineOutcome::Closed) => break,
                Err(ProtocolError::LineTooLong { .. }) => unreachable!("inputs are short"),
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        let (want_lines, want_pending) = expected_lines(&input);
        prop_assert_eq!(produced, want_lines);
        prop_assert_eq!(reader.pending(), want_pending);
    }
}
