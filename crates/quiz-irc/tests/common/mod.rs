//! Scripted transport and recording collaborators shared by the
//! integration tests.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

use quiz_irc::{ByteStream, Presenter, QuizAction, Quizmaster, RecvOutcome, SoundCue};

/// One scripted receive step.
#[derive(Debug, Clone)]
pub enum Step {
    Byte(u8),
    TimedOut,
    Closed,
    RecvError(io::ErrorKind),
}

/// A [`ByteStream`] that replays a script and records every send into a
/// shared [`WireLog`].
///
/// Once the script is exhausted every receive times out, which models an
/// idle server. The log handle outlives the stream, so tests can inspect
/// traffic even after the connection tore the transport down.
#[derive(Debug, Default)]
pub struct ScriptedStream {
    steps: VecDeque<Step>,
    sent: Rc<RefCell<Vec<Vec<u8>>>>,
    send_error: Option<io::ErrorKind>,
}

/// Shared record of everything written to a [`ScriptedStream`].
#[derive(Debug, Clone, Default)]
pub struct WireLog(Rc<RefCell<Vec<Vec<u8>>>>);

impl WireLog {
    /// Everything sent so far, one string per write.
    pub fn lines(&self) -> Vec<String> {
        self.0
            .borrow()
            .iter()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

impl ScriptedStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle onto the send record.
    pub fn log(&self) -> WireLog {
        WireLog(Rc::clone(&self.sent))
    }

    /// Queue the bytes of `data` for delivery one at a time.
    pub fn feed(mut self, data: &str) -> Self {
        self.steps.extend(data.bytes().map(Step::Byte));
        self
    }

    /// Queue a single byte.
    pub fn feed_byte(mut self, byte: u8) -> Self {
        self.steps.push_back(Step::Byte(byte));
        self
    }

    /// Queue a benign timeout.
    pub fn timeout(mut self) -> Self {
        self.steps.push_back(Step::TimedOut);
        self
    }

    /// Queue an orderly peer shutdown.
    pub fn closed(mut self) -> Self {
        self.steps.push_back(Step::Closed);
        self
    }

    /// Queue a hard receive error.
    pub fn recv_error(mut self, kind: io::ErrorKind) -> Self {
        self.steps.push_back(Step::RecvError(kind));
        self
    }

    /// Make every subsequent send fail.
    pub fn fail_sends(mut self, kind: io::ErrorKind) -> Self {
        self.send_error = Some(kind);
        self
    }

    /// True once the script is exhausted.
    pub fn is_drained(&self) -> bool {
        self.steps.is_empty()
    }
}

impl ByteStream for ScriptedStream {
    fn recv_byte(&mut self) -> io::Result<RecvOutcome> {
        match self.steps.pop_front() {
            Some(Step::Byte(b)) => Ok(RecvOutcome::Byte(b)),
            Some(Step::TimedOut) | None => Ok(RecvOutcome::TimedOut),
            Some(Step::Closed) => Ok(RecvOutcome::Closed),
            Some(Step::RecvError(kind)) => Err(io::Error::new(kind, "scripted receive error")),
        }
    }

    fn send(&mut self, bytes: &[u8]) -> io::Result<()> {
        if let Some(kind) = self.send_error {
            return Err(io::Error::new(kind, "scripted send error"));
        }
        self.sent.borrow_mut().push(bytes.to_vec());
        Ok(())
    }
}

/// Records every call and plays back configured actions exactly once.
#[derive(Debug, Default)]
pub struct RecordingQuiz {
    pub queue_calls: usize,
    pub answers: Vec<(String, String)>,
    pub update_calls: usize,
    pub reward: u32,
    pub on_queue: Vec<QuizAction>,
    pub on_answer: Vec<QuizAction>,
    pub on_update: Vec<QuizAction>,
}

impl Quizmaster for RecordingQuiz {
    fn queue_next_question(&mut self) -> Vec<QuizAction> {
        self.queue_calls += 1;
        std::mem::take(&mut self.on_queue)
    }

    fn process_answer(&mut self, username: &str, message: &str) -> Vec<QuizAction> {
        self.answers
            .push((username.to_string(), message.to_string()));
        std::mem::take(&mut self.on_answer)
    }

    fn update(&mut self) -> Vec<QuizAction> {
        self.update_calls += 1;
        std::mem::take(&mut self.on_update)
    }

    fn current_question_reward(&self) -> u32 {
        self.reward
    }
}

/// Records everything the engine presents.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub displayed: Vec<String>,
    pub cues: Vec<SoundCue>,
    pub points: Vec<u32>,
}

impl Presenter for RecordingPresenter {
    fn display_text(&mut self, text: &str) {
        self.displayed.push(text.to_string());
    }

    fn play_sound(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }

    fn award_points(&mut self, points: u32) {
        self.points.push(points);
    }
}
