//! Placeholder collaborators.
//!
//! The real game (question selection, round timing, scoring, overlay and
//! audio) lives outside this repository and plugs in through the engine's
//! collaborator traits. These implementations keep the binary runnable as
//! a plain channel bot: the quizmaster has no question bank and the
//! presenter routes everything to the log.

use chrono::Local;
use quiz_irc::{Presenter, QuizAction, Quizmaster, SoundCue};
use tracing::{debug, info};

/// Greeting announced right after joining the channel.
pub fn greeting() -> String {
    format!(
        "It's {} and the quiz channel is open!",
        Local::now().format("%I:%M %p")
    )
}

/// A quizmaster with no question bank.
///
/// Announces chat-only mode when asked for a question and acknowledges
/// answers in the log.
#[derive(Debug, Default)]
pub struct IdleQuizmaster {
    answers_seen: u64,
}

impl Quizmaster for IdleQuizmaster {
    fn queue_next_question(&mut self) -> Vec<QuizAction> {
        vec![QuizAction::say(
            "No round is loaded, running in chat-only mode.",
        )]
    }

    fn process_answer(&mut self, username: &str, message: &str) -> Vec<QuizAction> {
        self.answers_seen += 1;
        debug!(
            username,
            message,
            total = self.answers_seen,
            "chat message with no question in play"
        );
        Vec::new()
    }

    fn update(&mut self) -> Vec<QuizAction> {
        Vec::new()
    }

    fn current_question_reward(&self) -> u32 {
        0
    }
}

/// Routes display text, sound cues, and score updates to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracePresenter;

impl Presenter for TracePresenter {
    fn display_text(&mut self, text: &str) {
        info!(text, "overlay");
    }

    fn play_sound(&mut self, cue: SoundCue) {
        info!(?cue, "sound cue");
    }

    fn award_points(&mut self, points: u32) {
        info!(points, "points awarded");
    }
}
