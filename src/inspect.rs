use anyhow::Result;
use quiz_player::format_time;

use crate::fetch::{load_quiz, QuizSource};

pub async fn inspect(source: QuizSource, json: bool) -> Result<()> {
    let quiz = load_quiz(&source).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&quiz)?);
        return Ok(());
    }

    println!("{}", quiz.title);
    println!("hash: {}", quiz.hash);
    if let Some(updated_at) = quiz.updated_at {
        println!("updated: {}", updated_at.to_rfc3339());
    }
    println!(
        "{} questions, {} (+{} / -{})",
        quiz.questions_count(),
        format_time(quiz.duration_seconds()),
        quiz.correct_answer_marks,
        quiz.negative_marks
    );

    for (index, question) in quiz.questions.iter().enumerate() {
        let required = if question.is_mandatory { " *" } else { "" };

        println!(
            "{:>3}. [{}]{required} {}",
            index + 1,
            question.id,
            question.description
        );
        println!("     answer: {}", question.correct_option().description);
    }

    Ok(())
}
