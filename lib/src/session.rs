use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::data::{QuestionData, QuizData};
use crate::score::{review, QuestionReview, Score};

pub const COUNTDOWN_START: u8 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    /// Seconds left before the first question; `0` is the "go" second.
    Countdown(u8),
    InProgress,
    StudyMaterial,
    Results,
}

impl Phase {
    /// Whether the remaining-time clock runs in this phase.
    pub fn is_timed(self) -> bool {
        matches!(self, Self::InProgress | Self::StudyMaterial)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub correct: bool,
    pub correct_option_id: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    Question(usize),
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerTick {
    Ignored,
    Remaining(u64),
    TimeUp,
}

/// Mutable state of one attempt at a quiz.
///
/// The quiz itself is shared and read-only; everything here is reset by
/// [`QuizSession::retry`].
#[derive(Clone, Debug)]
pub struct QuizSession {
    quiz: Arc<QuizData>,

    phase: Phase,
    current: usize,
    answers: BTreeMap<usize, u64>,
    is_answer_correct: Option<bool>,
    mistake_count: u32,
    remaining_seconds: u64,
    is_time_up: bool,
}

impl QuizSession {
    pub fn new(quiz: Arc<QuizData>) -> Self {
        let remaining_seconds = quiz.duration_seconds();

        Self {
            quiz,
            phase: Phase::NotStarted,
            current: 0,
            answers: BTreeMap::new(),
            is_answer_correct: None,
            mistake_count: 0,
            remaining_seconds,
            is_time_up: false,
        }
    }

    pub fn quiz(&self) -> &QuizData {
        &self.quiz
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&QuestionData> {
        self.quiz.questions.get(self.current)
    }

    pub fn answers(&self) -> &BTreeMap<usize, u64> {
        &self.answers
    }

    pub fn current_answer(&self) -> Option<u64> {
        self.answers.get(&self.current).copied()
    }

    pub fn is_answer_correct(&self) -> Option<bool> {
        self.is_answer_correct
    }

    pub fn mistake_count(&self) -> u32 {
        self.mistake_count
    }

    pub fn max_mistakes_reached(&self) -> bool {
        match self.quiz.max_mistake_count {
            Some(max) => self.mistake_count >= max,
            None => false,
        }
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.quiz.duration_seconds() - self.remaining_seconds
    }

    pub fn is_time_up(&self) -> bool {
        self.is_time_up
    }

    pub fn is_last_question(&self) -> bool {
        self.current + 1 >= self.quiz.questions.len()
    }

    pub fn can_skip(&self) -> bool {
        self.phase == Phase::InProgress
            && self.is_answer_correct.is_none()
            && self
                .current_question()
                .map_or(false, |question| !question.is_mandatory)
    }

    pub fn score(&self) -> Score {
        Score::calculate(&self.quiz, &self.answers)
    }

    pub fn review(&self) -> Vec<QuestionReview<'_>> {
        review(&self.quiz, &self.answers)
    }

    pub fn start(&mut self) -> bool {
        if self.phase != Phase::NotStarted {
            return false;
        }

        debug!("Starting countdown");
        self.phase = Phase::Countdown(COUNTDOWN_START);

        true
    }

    pub fn tick_countdown(&mut self) -> Phase {
        match self.phase {
            Phase::Countdown(0) if self.quiz.questions.is_empty() => self.finish(),
            Phase::Countdown(0) => {
                info!(quiz = %self.quiz.title, "Quiz started");
                self.phase = Phase::InProgress;
            }
            Phase::Countdown(seconds) => self.phase = Phase::Countdown(seconds - 1),
            _ => {}
        }

        self.phase
    }

    /// Records an answer for the current question.
    ///
    /// Returns `None` when no answer can be taken right now or the option
    /// does not belong to the current question.
    pub fn answer(&mut self, option_id: u64) -> Option<AnswerFeedback> {
        if self.phase != Phase::InProgress || self.is_answer_correct.is_some() {
            return None;
        }

        let question = self.quiz.questions.get(self.current)?;
        question.option(option_id)?;

        let correct_option_id = question.correct_option().id;
        let correct = option_id == correct_option_id;

        if !correct {
            self.mistake_count += 1;
        }

        debug!(
            question = self.current,
            option_id, correct, "Answer recorded"
        );

        self.answers.insert(self.current, option_id);
        self.is_answer_correct = Some(correct);
        self.phase = Phase::StudyMaterial;

        Some(AnswerFeedback {
            correct,
            correct_option_id,
        })
    }

    /// Leaves the study material of the current question.
    pub fn next(&mut self) -> Option<Advance> {
        if self.phase != Phase::StudyMaterial {
            return None;
        }

        Some(self.move_forward())
    }

    /// Moves past an unanswered optional question.
    pub fn skip(&mut self) -> Option<Advance> {
        if !self.can_skip() {
            return None;
        }

        debug!(question = self.current, "Question skipped");

        Some(self.move_forward())
    }

    pub fn tick_timer(&mut self) -> TimerTick {
        if !self.phase.is_timed() {
            return TimerTick::Ignored;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);

        if self.remaining_seconds == 0 {
            info!("Time is up");
            self.is_time_up = true;
            self.finish();

            return TimerTick::TimeUp;
        }

        TimerTick::Remaining(self.remaining_seconds)
    }

    pub fn retry(&mut self) -> bool {
        if self.phase != Phase::Results {
            return false;
        }

        debug!("Resetting session");

        self.phase = Phase::NotStarted;
        self.current = 0;
        self.answers.clear();
        self.is_answer_correct = None;
        self.mistake_count = 0;
        self.remaining_seconds = self.quiz.duration_seconds();
        self.is_time_up = false;

        true
    }

    fn move_forward(&mut self) -> Advance {
        if self.current + 1 < self.quiz.questions.len() {
            self.current += 1;
            self.is_answer_correct = None;
            self.phase = Phase::InProgress;

            Advance::Question(self.current)
        } else {
            self.finish();

            Advance::Finished
        }
    }

    fn finish(&mut self) {
        self.phase = Phase::Results;

        let score = self.score();
        info!(
            total = score.total,
            max = score.max,
            time_up = self.is_time_up,
            "Quiz finished"
        );
    }
}
