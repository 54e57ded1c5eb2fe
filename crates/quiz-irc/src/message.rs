//! Inbound line classification.
//!
//! Lines are kept as raw bytes rather than validated strings: a garbled or
//! non-UTF-8 line from the server must never fault the engine, so text
//! fields are extracted lossily and shape mismatches simply yield empty
//! fields. This is a best-effort classifier, not a grammar.

use std::borrow::Cow;

use bytes::Bytes;

/// One CRLF-terminated protocol line as received, terminator included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine(Bytes);

impl RawLine {
    /// Wrap received bytes. The framer guarantees the trailing `\r\n`.
    #[must_use]
    pub fn new(bytes: Bytes) -> Self {
        Self(bytes)
    }

    /// The full line, including the terminator.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The line with the trailing `\r\n` stripped.
    #[must_use]
    pub fn content(&self) -> &[u8] {
        match self.0.as_ref() {
            [head @ .., b'\r', b'\n'] => head,
            other => other,
        }
    }

    /// Lossy text view of the line content, for logging and error reports.
    #[must_use]
    pub fn to_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.content())
    }
}

impl From<&str> for RawLine {
    fn from(s: &str) -> Self {
        Self(Bytes::copy_from_slice(s.as_bytes()))
    }
}

/// A chat message extracted from a `PRIVMSG` line.
///
/// Either field may be empty when the line does not match the expected
/// `:<nick>!... PRIVMSG <channel> :<text>` shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Privmsg {
    /// Sender nick, taken from between the leading `:` and the first `!`.
    pub username: String,
    /// Message body, taken from after the `<channel> :` marker.
    pub message: String,
}

/// Classification of one inbound line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// A chat message addressed to the channel.
    Privmsg(Privmsg),
    /// A keep-alive challenge from the server.
    Ping {
        /// Whatever followed the `PING` token, informational only.
        token: String,
    },
    /// Anything else; ignored by the engine.
    Other,
}

/// Classify a complete line.
///
/// `PRIVMSG` is checked before `PING`, so a line carrying both tokens is a
/// chat message and never answered with a PONG. Long-standing behavior;
/// kept deliberately.
#[must_use]
pub fn classify(line: &RawLine, channel: &str) -> Inbound {
    let bytes = line.as_bytes();

    if find(bytes, b"PRIVMSG").is_some() {
        return Inbound::Privmsg(parse_privmsg(bytes, channel));
    }

    if let Some(pos) = find(bytes, b"PING") {
        return Inbound::Ping {
            token: ping_token(line.content(), pos),
        };
    }

    Inbound::Other
}

/// First occurrence of `needle` in `haystack`.
fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn parse_privmsg(bytes: &[u8], channel: &str) -> Privmsg {
    // :NAME!rest PRIVMSG <channel> :text\r\n
    let username = match (bytes.first(), find(bytes, b"!")) {
        (Some(b':'), Some(bang)) => String::from_utf8_lossy(&bytes[1..bang]).into_owned(),
        _ => String::new(),
    };

    let marker = format!("{channel} :");
    let message = match find(bytes, marker.as_bytes()) {
        Some(pos) => {
            let start = pos + marker.len();
            let end = bytes.len().saturating_sub(2);
            if start < end {
                String::from_utf8_lossy(&bytes[start..end]).into_owned()
            } else {
                String::new()
            }
        }
        None => String::new(),
    };

    Privmsg { username, message }
}

fn ping_token(content: &[u8], ping_at: usize) -> String {
    let rest = &content[(ping_at + 4).min(content.len())..];
    let text = String::from_utf8_lossy(rest);
    text.trim().trim_start_matches(':').to_string()
}
