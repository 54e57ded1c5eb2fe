//! The polling engine: one `poll` call per driver tick.

use tracing::info;

use crate::collab::{Presenter, QuizAction, Quizmaster};
use crate::connection::{Connection, Registration};
use crate::error::Result;
use crate::event::ChatEvent;
use crate::message::{classify, Inbound};
use crate::transport::ByteStream;

/// Ties the connection to its collaborators and drives both.
///
/// Single-threaded by design: the external driver calls [`Engine::poll`]
/// repeatedly; each call performs at most one bounded receive attempt, at
/// most one classification and reaction, then gives the quizmaster its
/// per-step update. When any call returns an error the connection is
/// already closed; check [`Engine::is_active`] and stop driving.
pub struct Engine<S, Q, P> {
    conn: Connection<S>,
    quiz: Q,
    presenter: P,
}

impl<S, Q, P> Engine<S, Q, P>
where
    S: ByteStream,
    Q: Quizmaster,
    P: Presenter,
{
    /// Assemble an engine from an open connection and its collaborators.
    pub fn new(conn: Connection<S>, quiz: Q, presenter: P) -> Self {
        Self {
            conn,
            quiz,
            presenter,
        }
    }

    /// Whether the connection can still be driven.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.conn.is_active()
    }

    /// The underlying connection.
    #[must_use]
    pub fn connection(&self) -> &Connection<S> {
        &self.conn
    }

    /// The quizmaster collaborator.
    #[must_use]
    pub fn quizmaster(&self) -> &Q {
        &self.quiz
    }

    /// The presentation collaborator.
    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Register, join the channel, announce the greeting, and let the
    /// quizmaster open its first round.
    pub fn join(&mut self, reg: &Registration) -> Result<()> {
        self.conn
            .register(&reg.nick, &reg.username, reg.password.as_deref())?;

        self.say(&reg.greeting, None)?;
        let actions = self.quiz.queue_next_question();
        self.run_actions(actions)
    }

    /// One polling step.
    pub fn poll(&mut self) -> Result<()> {
        if let Some(line) = self.conn.recv_line()? {
            match classify(&line, self.conn.channel()) {
                Inbound::Privmsg(msg) => {
                    info!(username = %msg.username, message = %msg.message, "chat message");
                    let actions = self.quiz.process_answer(&msg.username, &msg.message);
                    self.run_actions(actions)?;
                }
                Inbound::Ping { .. } => {
                    self.conn.pong()?;
                }
                Inbound::Other => {}
            }
        }

        let actions = self.quiz.update();
        self.run_actions(actions)
    }

    /// Present and transmit one chat message.
    ///
    /// The presenter sees the verbatim text (and the event's side effects)
    /// before the transport write, mirroring what the channel is about to
    /// receive. An inactive connection fails fast with nothing presented
    /// and nothing written.
    fn say(&mut self, text: &str, event: Option<ChatEvent>) -> Result<()> {
        if !self.conn.is_active() {
            return Err(crate::error::ProtocolError::Closed);
        }

        self.presenter.display_text(text);
        if let Some(event) = event {
            if let Some(cue) = event.sound_cue() {
                self.presenter.play_sound(cue);
            }
            if event == ChatEvent::AnswerRewarded {
                self.presenter.award_points(self.quiz.current_question_reward());
            }
        }

        self.conn.send_chat(text)
    }

    fn run_actions(&mut self, actions: Vec<QuizAction>) -> Result<()> {
        for action in actions {
            match action {
                QuizAction::Say { text, event } => self.say(&text, event)?,
            }
        }
        Ok(())
    }
}
