use std::future;
use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use quiz_player::{Phase, QuizData, QuizSession, TimerTick};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval_at, Duration, Instant, Interval};
use tracing::debug;

use crate::fetch::{load_quiz, QuizSource};
use crate::render;
use crate::sound::{Sound, SoundPlayer};

const TICK: Duration = Duration::from_secs(1);
/// Remaining-time marks at which a reminder is printed.
const REMINDERS: [u64; 3] = [300, 60, 10];

/// A line typed by the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    /// Empty line: start, or move on from the study material.
    Continue,
    /// One-based option number as displayed.
    Choose(usize),
    Skip,
    Retry,
    Quit,
    Unknown,
}

impl Input {
    pub fn parse(line: &str) -> Self {
        let line = line.trim().to_lowercase();

        match line.as_str() {
            "" | "start" | "n" | "next" => Self::Continue,
            "s" | "skip" => Self::Skip,
            "r" | "retry" => Self::Retry,
            "q" | "quit" | "exit" => Self::Quit,
            other => match other.parse::<usize>() {
                Ok(number) if number > 0 => Self::Choose(number),
                _ => Self::Unknown,
            },
        }
    }
}

/// What the terminal should do after an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reaction {
    Redraw,
    Notice(String),
    Nothing,
    Quit,
}

/// Which 1 Hz clock a phase needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Clock {
    Countdown,
    Remaining,
}

impl Clock {
    fn for_phase(phase: Phase) -> Option<Self> {
        match phase {
            Phase::Countdown(_) => Some(Self::Countdown),
            phase if phase.is_timed() => Some(Self::Remaining),
            _ => None,
        }
    }
}

pub struct Player {
    session: QuizSession,
    sound: SoundPlayer,
}

impl Player {
    pub fn new(quiz: Arc<QuizData>, sound: SoundPlayer) -> Self {
        Self {
            session: QuizSession::new(quiz),
            sound,
        }
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn screen(&self) -> String {
        render::screen(&self.session)
    }

    pub fn handle_input(&mut self, input: Input) -> Reaction {
        if input == Input::Quit {
            return Reaction::Quit;
        }

        match (self.session.phase(), input) {
            (Phase::NotStarted, Input::Continue) => {
                self.session.start();
                Reaction::Redraw
            }
            (Phase::Countdown(_), _) => Reaction::Nothing,
            (Phase::InProgress, Input::Choose(number)) => self.choose(number),
            (Phase::InProgress, Input::Skip) => match self.session.skip() {
                Some(_) => Reaction::Redraw,
                None => Reaction::Notice(
                    "This question is required and cannot be skipped.".to_owned(),
                ),
            },
            (Phase::StudyMaterial, Input::Continue) => {
                self.session.next();
                Reaction::Redraw
            }
            (Phase::Results, Input::Retry) => {
                self.session.retry();
                Reaction::Redraw
            }
            _ => Reaction::Notice("Unknown command.".to_owned()),
        }
    }

    fn choose(&mut self, number: usize) -> Reaction {
        let option_id = self
            .session
            .current_question()
            .zip(number.checked_sub(1))
            .and_then(|(question, index)| question.options.get(index))
            .map(|option| option.id);

        let feedback = match option_id.and_then(|id| self.session.answer(id)) {
            Some(feedback) => feedback,
            None => return Reaction::Notice(format!("There is no option {number}.")),
        };

        if feedback.correct {
            self.sound.play(Sound::Correct);
        } else {
            self.sound.play(Sound::Incorrect);
        }

        Reaction::Redraw
    }

    /// Handles one second of wall-clock time for the clock that is running.
    pub fn handle_tick(&mut self) -> Reaction {
        match self.session.phase() {
            Phase::Countdown(_) => {
                self.session.tick_countdown();
                Reaction::Redraw
            }
            phase if phase.is_timed() => match self.session.tick_timer() {
                TimerTick::TimeUp => Reaction::Redraw,
                TimerTick::Remaining(seconds) if REMINDERS.contains(&seconds) => {
                    Reaction::Notice(render::timer_line(seconds))
                }
                _ => Reaction::Nothing,
            },
            _ => Reaction::Nothing,
        }
    }
}

/// Ticks of the clock the current phase needs.
///
/// The running interval is dropped as soon as its phase ends, and a new one
/// only fires a full second after it is created.
struct Ticker {
    clock: Option<Clock>,
    interval: Option<Interval>,
}

impl Ticker {
    fn new() -> Self {
        Self {
            clock: None,
            interval: None,
        }
    }

    fn sync(&mut self, phase: Phase) {
        let clock = Clock::for_phase(phase);
        if clock == self.clock {
            return;
        }

        debug!(?clock, "Switching clock");
        self.clock = clock;
        self.interval = clock.map(|_| interval_at(Instant::now() + TICK, TICK));
    }

    async fn tick(&mut self) {
        match &mut self.interval {
            Some(interval) => {
                interval.tick().await;
            }
            None => future::pending().await,
        }
    }
}

fn print(text: &str) -> Result<()> {
    let mut stdout = io::stdout();

    writeln!(stdout, "\n{text}")
        .and_then(|_| stdout.flush())
        .context("Failed to write to the terminal")
}

pub async fn play(source: QuizSource, sound: SoundPlayer) -> Result<()> {
    let quiz = Arc::new(load_quiz(&source).await?);
    let mut player = Player::new(quiz, sound);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = Ticker::new();

    print(&player.screen())?;

    loop {
        ticker.sync(player.session().phase());

        let reaction = tokio::select! {
            line = lines.next_line() => match line.context("Failed to read from the terminal")? {
                Some(line) => player.handle_input(Input::parse(&line)),
                None => Reaction::Quit,
            },
            _ = ticker.tick() => player.handle_tick(),
        };

        match reaction {
            Reaction::Redraw => print(&player.screen())?,
            Reaction::Notice(notice) => print(&notice)?,
            Reaction::Nothing => {}
            Reaction::Quit => break,
        }
    }

    ticker.sync(Phase::NotStarted);

    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn player(mandatory: bool) -> Player {
        let value = json!({
            "title": "Cells",
            "duration": 1,
            "correct_answer_marks": 4,
            "negative_marks": 1,
            "questions": [
                {
                    "id": 1,
                    "description": "Powerhouse of the cell?",
                    "is_mandatory": mandatory,
                    "options": [
                        { "id": 10, "description": "Nucleus", "is_correct": false },
                        { "id": 11, "description": "Mitochondria", "is_correct": true }
                    ]
                },
                {
                    "id": 2,
                    "description": "Site of photosynthesis?",
                    "options": [
                        { "id": 20, "description": "Chloroplast", "is_correct": true },
                        { "id": 21, "description": "Ribosome", "is_correct": false }
                    ]
                }
            ]
        });

        Player::new(
            Arc::new(QuizData::from_value(value).unwrap()),
            SoundPlayer::muted(),
        )
    }

    fn started(mandatory: bool) -> Player {
        let mut player = player(mandatory);
        assert_eq!(player.handle_input(Input::Continue), Reaction::Redraw);
        for _ in 0..4 {
            player.handle_tick();
        }
        assert_eq!(player.session().phase(), Phase::InProgress);
        player
    }

    #[test]
    fn parses_commands() {
        assert_eq!(Input::parse(""), Input::Continue);
        assert_eq!(Input::parse(" Next "), Input::Continue);
        assert_eq!(Input::parse("2"), Input::Choose(2));
        assert_eq!(Input::parse("0"), Input::Unknown);
        assert_eq!(Input::parse("s"), Input::Skip);
        assert_eq!(Input::parse("R"), Input::Retry);
        assert_eq!(Input::parse("quit"), Input::Quit);
        assert_eq!(Input::parse("maybe"), Input::Unknown);
    }

    #[test]
    fn input_during_countdown_is_ignored() {
        let mut player = player(false);
        player.handle_input(Input::Continue);

        assert_eq!(player.handle_input(Input::Choose(1)), Reaction::Nothing);
        assert_eq!(player.session().phase(), Phase::Countdown(3));
    }

    #[test]
    fn choosing_maps_numbers_to_options() {
        let mut player = started(false);

        assert_eq!(player.handle_input(Input::Choose(2)), Reaction::Redraw);
        assert_eq!(player.session().current_answer(), Some(11));
        assert_eq!(player.session().phase(), Phase::StudyMaterial);
    }

    #[test]
    fn out_of_range_option_is_reported() {
        let mut player = started(false);

        assert_eq!(
            player.handle_input(Input::Choose(5)),
            Reaction::Notice("There is no option 5.".to_owned())
        );
        assert!(player.session().answers().is_empty());
    }

    #[test]
    fn required_question_refuses_skip() {
        let mut player = started(true);

        assert!(matches!(player.handle_input(Input::Skip), Reaction::Notice(_)));
        assert_eq!(player.session().current_index(), 0);
    }

    #[test]
    fn plays_through_to_results_and_retries() {
        let mut player = started(false);

        player.handle_input(Input::Choose(1));
        player.handle_input(Input::Continue);
        player.handle_input(Input::Skip);
        assert_eq!(player.session().phase(), Phase::Results);
        assert_eq!(player.session().score().total, -1.0);
        assert_eq!(player.session().mistake_count(), 1);

        assert_eq!(player.handle_input(Input::Retry), Reaction::Redraw);
        assert_eq!(player.session().phase(), Phase::NotStarted);
        assert_eq!(player.session().mistake_count(), 0);
    }

    #[test]
    fn ticks_remind_and_time_out() {
        let mut player = started(false);

        for _ in 0..49 {
            assert_eq!(player.handle_tick(), Reaction::Nothing);
        }
        assert_eq!(
            player.handle_tick(),
            Reaction::Notice("Time left: 0:10 (hurry!)".to_owned())
        );
        for _ in 0..9 {
            player.handle_tick();
        }
        assert_eq!(player.handle_tick(), Reaction::Redraw);
        assert!(player.session().is_time_up());
        assert_eq!(player.handle_tick(), Reaction::Nothing);
    }

    #[test]
    fn quit_is_always_available() {
        let mut player = started(false);

        assert_eq!(player.handle_input(Input::Quit), Reaction::Quit);
    }

    #[test]
    fn clock_follows_phase() {
        assert_eq!(Clock::for_phase(Phase::NotStarted), None);
        assert_eq!(Clock::for_phase(Phase::Countdown(2)), Some(Clock::Countdown));
        assert_eq!(Clock::for_phase(Phase::InProgress), Some(Clock::Remaining));
        assert_eq!(Clock::for_phase(Phase::StudyMaterial), Some(Clock::Remaining));
        assert_eq!(Clock::for_phase(Phase::Results), None);
    }

    #[tokio::test]
    async fn ticker_drops_interval_when_phase_ends() {
        let mut ticker = Ticker::new();

        ticker.sync(Phase::Countdown(3));
        assert!(ticker.interval.is_some());

        ticker.sync(Phase::InProgress);
        assert_eq!(ticker.clock, Some(Clock::Remaining));

        ticker.sync(Phase::Results);
        assert!(ticker.interval.is_none());
    }
}
