#![allow(dead_code)]

use std::sync::Arc;

use quiz_player::{Phase, QuizData, QuizSession};
use serde_json::{json, Value};

pub const FIXTURE: &[u8] = include_bytes!("../fixtures/quiz.json");

pub fn fixture_quiz() -> Arc<QuizData> {
    Arc::new(QuizData::from_slice(FIXTURE).unwrap())
}

/// Builds a quiz of `count` two-option questions where option `2 * i + 1`
/// is the correct answer to question `i`.
pub fn generated_quiz(
    count: u64,
    correct_marks: f64,
    negative_marks: f64,
    duration: u64,
) -> Arc<QuizData> {
    let questions = (0..count)
        .map(|i| {
            json!({
                "id": 100 + i,
                "description": format!("Question {}", i + 1),
                "options": [
                    { "id": 2 * i, "description": format!("Wrong {}", i + 1), "is_correct": false },
                    { "id": 2 * i + 1, "description": format!("Right {}", i + 1), "is_correct": true }
                ]
            })
        })
        .collect::<Vec<Value>>();

    let value = json!({
        "title": "Generated",
        "duration": duration,
        "correct_answer_marks": correct_marks.to_string(),
        "negative_marks": negative_marks,
        "max_mistake_count": 3,
        "questions": questions
    });

    Arc::new(QuizData::from_value(value).unwrap())
}

pub fn correct_option(quiz: &QuizData, index: usize) -> u64 {
    quiz.questions[index].correct_option().id
}

pub fn wrong_option(quiz: &QuizData, index: usize) -> u64 {
    quiz.questions[index]
        .options
        .iter()
        .find(|option| !option.is_correct)
        .map(|option| option.id)
        .unwrap()
}

pub fn started_session(quiz: Arc<QuizData>) -> QuizSession {
    let mut session = QuizSession::new(quiz);
    assert!(session.start());
    for _ in 0..4 {
        session.tick_countdown();
    }
    assert_eq!(session.phase(), Phase::InProgress);
    session
}
