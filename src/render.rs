use once_cell::sync::Lazy;
use quiz_player::{format_time, Phase, QuestionData, QuizData, QuizSession, ReviewStatus};
use regex::Regex;

const BAR_WIDTH: usize = 30;
const LOW_TIME_SECONDS: u64 = 60;

static LINE_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(p|div|h[1-6]|li|ul|ol|tr|table|blockquote)>")
        .expect("invalid line break pattern")
});
static LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<li(\s[^>]*)?>").expect("invalid list item pattern"));
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("invalid tag pattern"));
static BLANK_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[ \t]*(\n[ \t]*)+").expect("invalid blank line pattern"));

/// Reduces an HTML fragment to readable plain text.
pub fn html_to_text(html: &str) -> String {
    let text = LINE_BREAK.replace_all(html, "\n");
    let text = LIST_ITEM.replace_all(&text, "- ");
    let text = TAG.replace_all(&text, "");
    let text = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    BLANK_LINES.replace_all(text.trim(), "\n").into_owned()
}

pub fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;

    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

pub fn screen(session: &QuizSession) -> String {
    match session.phase() {
        Phase::NotStarted => start_screen(session.quiz()),
        Phase::Countdown(seconds) => countdown_screen(seconds),
        Phase::InProgress => question_screen(session),
        Phase::StudyMaterial => study_material_screen(session),
        Phase::Results => results_screen(session),
    }
}

pub fn start_screen(quiz: &QuizData) -> String {
    let mut lines = vec![
        format!("== {} ==", quiz.title),
        String::new(),
        "Quiz Overview".to_owned(),
        format!("  {} questions", quiz.questions_count()),
        format!("  {} minutes duration", quiz.duration),
        format!("  +{} marks for correct answer", quiz.correct_answer_marks),
        format!("  -{} marks for wrong answer", quiz.negative_marks),
        "  Immediate feedback after each answer".to_owned(),
        "  Study materials for incorrect answers".to_owned(),
    ];

    if let Some(topic) = quiz.topic.as_deref().filter(|topic| !topic.is_empty()) {
        lines.extend([String::new(), "Topic".to_owned(), format!("  {topic}")]);
    }

    if let Some(description) = quiz.description.as_deref().filter(|text| !text.is_empty()) {
        lines.extend([String::new(), description.to_owned()]);
    }

    lines.extend([
        String::new(),
        "Press Enter to start the quiz, or type q to quit.".to_owned(),
    ]);

    lines.join("\n")
}

pub fn countdown_screen(seconds: u8) -> String {
    if seconds == 0 {
        "GO!".to_owned()
    } else {
        seconds.to_string()
    }
}

pub fn timer_line(remaining_seconds: u64) -> String {
    if remaining_seconds < LOW_TIME_SECONDS {
        format!("Time left: {} (hurry!)", format_time(remaining_seconds))
    } else {
        format!("Time left: {}", format_time(remaining_seconds))
    }
}

fn header(session: &QuizSession) -> Vec<String> {
    let quiz = session.quiz();
    let total = quiz.questions_count();

    let mut mistakes = match quiz.max_mistake_count {
        Some(max) => format!("Mistakes: {}/{max}", session.mistake_count()),
        None => format!("Mistakes: {}", session.mistake_count()),
    };
    if session.max_mistakes_reached() {
        mistakes.push_str("  Maximum mistakes reached!");
    }

    vec![
        format!("== {} ==", quiz.title),
        timer_line(session.remaining_seconds()),
        mistakes,
        progress_bar(session.current_index() as f64 / total as f64, BAR_WIDTH),
        format!(
            "Question {} of {total}    +{} / -{}",
            session.current_index() + 1,
            quiz.correct_answer_marks,
            quiz.negative_marks
        ),
        String::new(),
    ]
}

fn required_marker(question: &QuestionData) -> &'static str {
    if question.is_mandatory {
        " *Required"
    } else {
        ""
    }
}

pub fn question_screen(session: &QuizSession) -> String {
    let question = match session.current_question() {
        Some(question) => question,
        None => return String::new(),
    };

    let mut lines = header(session);

    if let Some(topic) = question.topic.as_deref().filter(|topic| !topic.is_empty()) {
        lines.push(format!("Topic: {topic}"));
    }
    lines.push(format!("{}{}", question.description, required_marker(question)));
    lines.push(String::new());

    for (number, option) in question.options.iter().enumerate() {
        lines.push(format!("  {}) {}", number + 1, option.description));
    }

    lines.push(String::new());
    if session.can_skip() {
        lines.push("Type an option number to answer, s to skip, or q to quit.".to_owned());
    } else {
        lines.push("Type an option number to answer, or q to quit.".to_owned());
    }

    lines.join("\n")
}

pub fn study_material_screen(session: &QuizSession) -> String {
    let question = match session.current_question() {
        Some(question) => question,
        None => return String::new(),
    };

    let mut lines = header(session);

    lines.push(format!("Detailed Solution{}", required_marker(question)));
    if session.is_answer_correct() == Some(true) {
        lines.push("✓ Correct!".to_owned());
    } else {
        lines.push(format!(
            "✗ Incorrect. The correct answer was: {}",
            question.correct_option().description
        ));
    }
    if !question.detailed_solution.is_empty() {
        lines.push(question.detailed_solution.clone());
    }

    if let Some(material) = &question.reading_material {
        if !material.content_sections.is_empty() {
            lines.extend([String::new(), "Reading Material".to_owned()]);
            if !material.keywords.is_empty() {
                lines.push(format!("Keywords: {}", material.keywords.join(", ")));
            }
            lines.extend(material.content_sections.iter().map(|html| html_to_text(html)));
        }

        if !material.practice_material.is_empty() {
            lines.extend([String::new(), "Practice Material".to_owned()]);
            lines.extend(material.practice_material.iter().map(|html| html_to_text(html)));
        }
    }

    lines.push(String::new());
    if session.is_last_question() {
        lines.push("Press Enter to finish the quiz.".to_owned());
    } else {
        lines.push("Press Enter for the next question.".to_owned());
    }

    lines.join("\n")
}

pub fn results_screen(session: &QuizSession) -> String {
    let quiz = session.quiz();
    let score = session.score();

    let mut title = "Quiz Results".to_owned();
    if session.is_time_up() {
        title.push_str(" - Time's Up!");
    }

    let time_taken = if session.is_time_up() {
        "Time's up! Quiz submitted automatically.".to_owned()
    } else {
        format!("{} seconds", session.elapsed_seconds())
    };

    let mut lines = vec![
        format!("== {title} =="),
        format!("Final Score: {:.1}/{}", score.total, score.max),
        progress_bar(score.percentage() / 100.0, BAR_WIDTH),
        String::new(),
        "Time Taken".to_owned(),
        format!("  {time_taken}"),
        String::new(),
        "Scoring Breakdown".to_owned(),
        format!(
            "  Correct Answers: {} × +{} marks",
            score.correct, quiz.correct_answer_marks
        ),
        format!(
            "  Wrong Answers: {} × -{} marks",
            score.wrong, quiz.negative_marks
        ),
        format!("  Unanswered: {}", score.unanswered),
        String::new(),
        "Performance Analysis".to_owned(),
        format!("  {}", score.performance().message()),
        String::new(),
        "Question Review".to_owned(),
    ];

    for entry in session.review() {
        let correct = &entry.question.correct_option().description;
        let status = match entry.status {
            ReviewStatus::Correct => "✓ Correct".to_owned(),
            ReviewStatus::Incorrect { .. } => format!("✗ Incorrect (Correct: {correct})"),
            ReviewStatus::Unanswered => format!("- Unanswered (Correct: {correct})"),
        };

        lines.push(format!("  Q{}: {}", entry.index + 1, entry.question.description));
        lines.push(format!("      {status}"));
    }

    lines.extend([
        String::new(),
        "Type r to try again, or q to quit.".to_owned(),
    ]);

    lines.join("\n")
}
