//! Collaborator traits.
//!
//! The engine is deliberately ignorant of quiz rules and presentation.
//! Both are consumed through these traits; the quizmaster communicates by
//! returning actions for the engine to transmit, so there is a single
//! owner of the connection and no callback cycle.

use crate::event::{ChatEvent, SoundCue};

/// An action requested by the [`Quizmaster`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizAction {
    /// Send a chat line to the channel.
    Say {
        /// Message text, transmitted verbatim.
        text: String,
        /// What the message announces, if anything.
        event: Option<ChatEvent>,
    },
}

impl QuizAction {
    /// Convenience constructor for a plain chat line.
    #[must_use]
    pub fn say(text: impl Into<String>) -> Self {
        QuizAction::Say {
            text: text.into(),
            event: None,
        }
    }

    /// Convenience constructor for a chat line carrying an event.
    #[must_use]
    pub fn announce(text: impl Into<String>, event: ChatEvent) -> Self {
        QuizAction::Say {
            text: text.into(),
            event: Some(event),
        }
    }
}

/// The game logic driving the channel.
pub trait Quizmaster {
    /// Called once after the channel is joined. Returned actions are
    /// transmitted immediately.
    fn queue_next_question(&mut self) -> Vec<QuizAction>;

    /// Called once per dispatched chat message.
    fn process_answer(&mut self, username: &str, message: &str) -> Vec<QuizAction>;

    /// Called once per polling step, after any inbound dispatch.
    fn update(&mut self) -> Vec<QuizAction>;

    /// Reward of the question currently in play. Queried when a message
    /// carrying [`ChatEvent::AnswerRewarded`] is sent.
    fn current_question_reward(&self) -> u32;
}

/// The presentation sink: on-screen text, sound cues, score updates.
///
/// Notified with the verbatim outgoing text before transmission, so it can
/// mirror exactly what the channel is about to see.
pub trait Presenter {
    /// Show the outgoing chat text.
    fn display_text(&mut self, text: &str);

    /// Play a named sound cue.
    fn play_sound(&mut self, cue: SoundCue);

    /// Credit points for a correctly answered question.
    fn award_points(&mut self, points: u32);
}
