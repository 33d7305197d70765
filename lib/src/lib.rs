//! Quiz records normalized from the remote payload, plus the state machine
//! and scoring used to play them.

mod data;
mod helpers;
mod raw_data;
mod score;
mod session;

pub use data::{OptionData, QuestionData, QuizData, ReadingMaterial};
pub use helpers::{decode_keywords, format_time};
pub use raw_data::{
    RawMarks, RawOptionData, RawPracticeMaterial, RawQuestionData, RawQuizData, RawReadingMaterial,
};
pub use score::{review, Performance, QuestionReview, ReviewStatus, Score};
pub use session::{AnswerFeedback, Advance, Phase, QuizSession, TimerTick, COUNTDOWN_START};
