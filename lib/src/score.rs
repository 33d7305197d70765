use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::{QuestionData, QuizData};

/// Final tally of a session.
///
/// A question counts as answered when the answer map holds an entry for its
/// index, whatever the option id is.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Score {
    pub total: f64,
    pub max: f64,
    pub correct: usize,
    pub wrong: usize,
    pub unanswered: usize,
}

impl Score {
    pub fn calculate(quiz: &QuizData, answers: &BTreeMap<usize, u64>) -> Self {
        let mut score = Self {
            total: 0.0,
            max: quiz.max_score(),
            correct: 0,
            wrong: 0,
            unanswered: 0,
        };

        for (index, question) in quiz.questions.iter().enumerate() {
            match answers.get(&index) {
                Some(&option_id) if option_id == question.correct_option().id => {
                    score.correct += 1;
                    score.total += quiz.correct_answer_marks;
                }
                Some(_) => {
                    score.wrong += 1;
                    score.total -= quiz.negative_marks;
                }
                None => score.unanswered += 1,
            }
        }

        score
    }

    pub fn percentage(&self) -> f64 {
        if self.max > 0.0 {
            self.total / self.max * 100.0
        } else {
            0.0
        }
    }

    pub fn performance(&self) -> Performance {
        Performance::from_percentage(self.percentage())
    }
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Performance {
    Outstanding,
    Good,
    KeepPracticing,
}

impl Performance {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 80.0 {
            Self::Outstanding
        } else if percentage >= 60.0 {
            Self::Good
        } else {
            Self::KeepPracticing
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Outstanding => {
                "Outstanding! Like a perfectly replicated DNA strand, your understanding is nearly flawless!"
            }
            Self::Good => {
                "Good work! Like a cell in metaphase, you're right in the middle of mastering this!"
            }
            Self::KeepPracticing => {
                "Keep practicing! Like the process of mitosis, learning takes time and energy!"
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReviewStatus {
    Correct,
    Incorrect { chosen: u64 },
    Unanswered,
}

#[derive(Clone, Debug)]
pub struct QuestionReview<'a> {
    pub index: usize,
    pub question: &'a QuestionData,
    pub status: ReviewStatus,
}

pub fn review<'a>(quiz: &'a QuizData, answers: &BTreeMap<usize, u64>) -> Vec<QuestionReview<'a>> {
    quiz.questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let status = match answers.get(&index) {
                Some(&chosen) if chosen == question.correct_option().id => ReviewStatus::Correct,
                Some(&chosen) => ReviewStatus::Incorrect { chosen },
                None => ReviewStatus::Unanswered,
            };

            QuestionReview {
                index,
                question,
                status,
            }
        })
        .collect()
}
