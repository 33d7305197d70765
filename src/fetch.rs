use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use quiz_player::QuizData;
use serde_json::Value;
use tracing::info;
use url::Url;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizSource {
    Remote(Url),
    File(PathBuf),
}

/// Reads the quiz payload once and normalizes it.
pub async fn load_quiz(source: &QuizSource) -> Result<QuizData> {
    let payload = match source {
        QuizSource::Remote(url) => fetch_payload(url).await?,
        QuizSource::File(path) => read_payload(path).await?,
    };

    let quiz = QuizData::from_value(payload).context("Quiz payload has an unexpected shape")?;

    info!(
        title = %quiz.title,
        questions = quiz.questions_count(),
        hash = %quiz.hash,
        "Quiz loaded"
    );

    Ok(quiz)
}

async fn fetch_payload(url: &Url) -> Result<Value> {
    info!(%url, "Fetching quiz data");

    let response = reqwest::get(url.clone())
        .await
        .context("Failed to fetch quiz data")?
        .error_for_status()
        .context("Failed to fetch quiz data")?;

    response
        .json::<Value>()
        .await
        .context("Quiz data is not valid JSON")
}

async fn read_payload(path: &Path) -> Result<Value> {
    info!(path = %path.display(), "Reading quiz data");

    let raw_data = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    serde_json::from_slice(&raw_data).context("Quiz data is not valid JSON")
}
