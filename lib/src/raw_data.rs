use anyhow::{bail, Result};
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

/// Quiz payload as served by the remote endpoint.
///
/// Only the fields the player reads are modelled; everything else in the
/// payload is ignored.
#[derive(Deserialize, Debug)]
pub struct RawQuizData {
    pub id: Option<u64>,

    pub name: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub difficulty_level: Option<String>,
    pub topic: Option<String>,
    pub duration: u64,
    pub negative_marks: RawMarks,
    pub correct_answer_marks: RawMarks,
    pub questions_count: Option<u32>,
    pub max_mistake_count: Option<u32>,
    pub questions: Vec<RawQuestionData>,

    pub created_at: Option<DateTime<FixedOffset>>,
    pub updated_at: Option<DateTime<FixedOffset>>,
}

#[derive(Deserialize, Debug)]
pub struct RawQuestionData {
    pub id: u64,

    pub description: String,
    pub topic: Option<String>,
    pub difficulty_level: Option<String>,
    pub detailed_solution: Option<String>,
    pub is_mandatory: Option<bool>,
    pub options: Vec<RawOptionData>,
    pub reading_material: Option<RawReadingMaterial>,
}

#[derive(Deserialize, Debug)]
pub struct RawOptionData {
    pub id: u64,

    pub description: String,
    pub is_correct: bool,
}

#[derive(Deserialize, Debug)]
pub struct RawReadingMaterial {
    /// JSON-encoded list of strings, e.g. `"[\"cell\",\"mitosis\"]"`.
    pub keywords: Option<String>,
    pub content_sections: Option<Vec<String>>,
    pub practice_material: Option<RawPracticeMaterial>,
}

#[derive(Deserialize, Debug)]
pub struct RawPracticeMaterial {
    pub content: Option<Vec<String>>,
}

/// Marks arrive as decimal strings (`"4.0"`) but plain numbers are accepted
/// as well.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum RawMarks {
    Number(f64),
    Text(String),
}

impl RawMarks {
    pub fn value(&self) -> Result<f64> {
        let value = match self {
            Self::Number(value) => *value,
            Self::Text(text) => match text.trim().parse::<f64>() {
                Ok(value) => value,
                Err(_) => bail!("Invalid marks value {text:?}"),
            },
        };

        if !value.is_finite() || value < 0.0 {
            bail!("Invalid marks value {value}");
        }

        Ok(value)
    }
}
