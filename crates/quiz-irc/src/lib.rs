//! # quiz-irc
//!
//! A small synchronous IRC client engine for driving a single channel from
//! a cooperative polling loop (for example a game loop).
//!
//! The engine owns the connection handshake, CRLF line framing, inbound
//! command dispatch (PRIVMSG, PING) and outbound chat formatting. The quiz
//! logic that produces replies and the presentation layer that displays
//! them are injected through narrow traits, as is the raw byte transport,
//! so the whole protocol path is testable against scripted byte streams.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::time::Duration;
//! use quiz_irc::{Connection, Engine, NetContext, Registration, TcpByteStream};
//! # use quiz_irc::{Presenter, Quizmaster, QuizAction, SoundCue};
//! # struct NoQuiz;
//! # impl Quizmaster for NoQuiz {
//! #     fn queue_next_question(&mut self) -> Vec<QuizAction> { Vec::new() }
//! #     fn process_answer(&mut self, _: &str, _: &str) -> Vec<QuizAction> { Vec::new() }
//! #     fn update(&mut self) -> Vec<QuizAction> { Vec::new() }
//! #     fn current_question_reward(&self) -> u32 { 0 }
//! # }
//! # struct NoScreen;
//! # impl Presenter for NoScreen {
//! #     fn display_text(&mut self, _: &str) {}
//! #     fn play_sound(&mut self, _: SoundCue) {}
//! #     fn award_points(&mut self, _: u32) {}
//! # }
//!
//! # fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let net = NetContext::acquire()?;
//! let stream = TcpByteStream::connect(&net, "irc.chat.twitch.tv", 6667, Duration::from_secs(1))?;
//! let conn = Connection::new(stream, "#somechannel");
//! let mut engine = Engine::new(conn, NoQuiz, NoScreen);
//!
//! engine.join(&Registration {
//!     nick: "quizbot".into(),
//!     username: "quizbot".into(),
//!     password: Some("oauth:token".into()),
//!     greeting: "hello chat".into(),
//! })?;
//!
//! while engine.is_active() {
//!     engine.poll()?;
//! }
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod collab;
pub mod connection;
pub mod engine;
pub mod error;
pub mod event;
pub mod line;
pub mod message;
pub mod transport;

pub use self::collab::{Presenter, QuizAction, Quizmaster};
pub use self::connection::{Connection, ConnectionState, Registration};
pub use self::engine::Engine;
pub use self::error::{ProtocolError, Result};
pub use self::event::{ChatEvent, SoundCue};
pub use self::line::{LineOutcome, LineReader, MAX_LINE_LEN};
pub use self::message::{classify, Inbound, Privmsg, RawLine};
#[cfg(feature = "net")]
pub use self::transport::{NetContext, TcpByteStream};
pub use self::transport::{ByteStream, RecvOutcome};
