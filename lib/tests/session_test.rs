mod common;

use common::{correct_option, fixture_quiz, generated_quiz, started_session, wrong_option};
use quiz_player::{Advance, Phase, QuizSession, TimerTick, COUNTDOWN_START};

#[test]
fn countdown_reaches_first_question_after_four_ticks() {
    let mut session = QuizSession::new(generated_quiz(2, 4.0, 1.0, 1));
    session.start();

    assert_eq!(session.phase(), Phase::Countdown(COUNTDOWN_START));
    assert_eq!(session.tick_countdown(), Phase::Countdown(2));
    assert_eq!(session.tick_countdown(), Phase::Countdown(1));
    assert_eq!(session.tick_countdown(), Phase::Countdown(0));
    assert_eq!(session.tick_countdown(), Phase::InProgress);
    assert_eq!(session.current_index(), 0);
}

#[test]
fn countdown_on_empty_quiz_goes_to_results() {
    let mut session = QuizSession::new(generated_quiz(0, 4.0, 1.0, 1));
    session.start();
    for _ in 0..4 {
        session.tick_countdown();
    }

    assert_eq!(session.phase(), Phase::Results);
    assert_eq!(session.score().percentage(), 0.0);
}

#[test]
fn mistakes_count_wrong_answers_only() {
    let quiz = generated_quiz(4, 4.0, 1.0, 10);
    let mut session = started_session(quiz.clone());

    let feedback = session.answer(wrong_option(&quiz, 0)).unwrap();
    assert!(!feedback.correct);
    assert_eq!(feedback.correct_option_id, correct_option(&quiz, 0));
    assert_eq!(session.phase(), Phase::StudyMaterial);
    session.next();

    session.skip().unwrap();
    assert_eq!(session.mistake_count(), 1);

    assert!(session.answer(correct_option(&quiz, 2)).unwrap().correct);
    session.next();
    assert_eq!(session.mistake_count(), 1);

    session.answer(wrong_option(&quiz, 3));
    assert_eq!(session.mistake_count(), 2);
    assert_eq!(session.next(), Some(Advance::Finished));
}

#[test]
fn timer_counts_down_and_forces_results_mid_question() {
    let quiz = generated_quiz(3, 4.0, 1.0, 1);
    let mut session = started_session(quiz.clone());
    session.answer(correct_option(&quiz, 0));
    session.next();

    for expected in (1..60).rev() {
        assert_eq!(session.tick_timer(), TimerTick::Remaining(expected));
        assert_eq!(session.remaining_seconds(), expected);
    }
    assert_eq!(session.phase(), Phase::InProgress);

    assert_eq!(session.tick_timer(), TimerTick::TimeUp);
    assert_eq!(session.phase(), Phase::Results);
    assert!(session.is_time_up());
    assert_eq!(session.remaining_seconds(), 0);
    assert_eq!(session.elapsed_seconds(), 60);

    assert_eq!(session.tick_timer(), TimerTick::Ignored);
    assert_eq!(session.remaining_seconds(), 0);
    assert_eq!(session.score().total, 4.0);
}

#[test]
fn timer_keeps_running_during_study_material() {
    let quiz = generated_quiz(1, 4.0, 1.0, 1);
    let mut session = started_session(quiz.clone());
    session.answer(wrong_option(&quiz, 0));

    assert_eq!(session.tick_timer(), TimerTick::Remaining(59));
    assert_eq!(session.phase(), Phase::StudyMaterial);
}

#[test]
fn retry_resets_the_session() {
    let quiz = generated_quiz(2, 4.0, 1.0, 1);
    let mut session = started_session(quiz.clone());
    session.answer(wrong_option(&quiz, 0));
    for _ in 0..60 {
        session.tick_timer();
    }
    assert!(session.is_time_up());

    assert!(session.retry());

    assert_eq!(session.phase(), Phase::NotStarted);
    assert_eq!(session.current_index(), 0);
    assert!(session.answers().is_empty());
    assert_eq!(session.mistake_count(), 0);
    assert_eq!(session.remaining_seconds(), 60);
    assert!(!session.is_time_up());
    assert_eq!(session.is_answer_correct(), None);

    assert!(session.start());
}

#[test]
fn retry_is_only_allowed_from_results() {
    let mut session = started_session(generated_quiz(2, 4.0, 1.0, 1));

    assert!(!session.retry());
    assert_eq!(session.phase(), Phase::InProgress);
}

#[test]
fn mandatory_fixture_question_blocks_skipping() {
    let quiz = fixture_quiz();
    let mut session = started_session(quiz.clone());

    session.skip().unwrap();
    assert_eq!(session.current_index(), 1);
    assert!(!session.can_skip());
    assert_eq!(session.skip(), None);

    session.answer(correct_option(&quiz, 1));
    assert_eq!(session.next(), Some(Advance::Question(2)));
    assert!(session.answers().len() <= quiz.questions_count());
}
