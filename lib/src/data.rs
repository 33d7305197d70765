use anyhow::{bail, Context, Error, Result};
use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::helpers::decode_keywords;
use crate::raw_data::{
    RawOptionData, RawPracticeMaterial, RawQuestionData, RawQuizData, RawReadingMaterial,
};

/// A normalized quiz. Built once from the remote payload and never mutated.
#[derive(Serialize, Clone, Debug)]
pub struct QuizData {
    pub id: Option<u64>,

    pub name: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub difficulty_level: Option<String>,
    pub topic: Option<String>,
    /// Minutes.
    pub duration: u64,
    pub correct_answer_marks: f64,
    pub negative_marks: f64,
    pub max_mistake_count: Option<u32>,
    pub declared_questions_count: Option<u32>,
    pub questions: Vec<QuestionData>,
    pub updated_at: Option<DateTime<FixedOffset>>,

    pub hash: String,
}

impl QuizData {
    pub fn from_value(value: Value) -> Result<Self> {
        let raw: RawQuizData = serde_json::from_value(value)?;

        Self::try_from(raw)
    }

    pub fn from_slice(raw_data: &[u8]) -> Result<Self> {
        let raw: RawQuizData = serde_json::from_slice(raw_data)?;

        Self::try_from(raw)
    }

    pub fn duration_seconds(&self) -> u64 {
        self.duration * 60
    }

    pub fn questions_count(&self) -> usize {
        self.questions.len()
    }

    pub fn max_score(&self) -> f64 {
        self.questions.len() as f64 * self.correct_answer_marks
    }

    fn hash_data(title: &str, questions: &[QuestionData]) -> String {
        let mut hasher = blake3::Hasher::new();

        hasher.update(title.as_bytes());
        hasher.update(
            questions
                .iter()
                .map(|question| question.hash.clone())
                .collect::<Vec<_>>()
                .join("")
                .as_bytes(),
        );

        hasher.finalize().to_string()
    }
}

impl TryFrom<RawQuizData> for QuizData {
    type Error = Error;

    fn try_from(raw: RawQuizData) -> Result<Self> {
        let correct_answer_marks = raw
            .correct_answer_marks
            .value()
            .context("Invalid correct_answer_marks")?;
        let negative_marks = raw
            .negative_marks
            .value()
            .context("Invalid negative_marks")?;

        raw.duration
            .checked_mul(60)
            .with_context(|| format!("Invalid duration {}", raw.duration))?;

        let questions = raw
            .questions
            .into_iter()
            .map(QuestionData::try_from)
            .collect::<Result<Vec<_>>>()?;

        if let Some(declared) = raw.questions_count {
            if declared as usize != questions.len() {
                debug!(
                    declared,
                    actual = questions.len(),
                    "Quiz declares a different question count"
                );
            }
        }

        let hash = Self::hash_data(&raw.title, &questions[..]);

        Ok(Self {
            id: raw.id,
            name: raw.name,
            title: raw.title,
            description: raw.description,
            difficulty_level: raw.difficulty_level,
            topic: raw.topic,
            duration: raw.duration,
            correct_answer_marks,
            negative_marks,
            max_mistake_count: raw.max_mistake_count,
            declared_questions_count: raw.questions_count,
            questions,
            updated_at: raw.updated_at.or(raw.created_at),
            hash,
        })
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct QuestionData {
    pub id: u64,

    pub description: String,
    pub topic: Option<String>,
    pub difficulty_level: Option<String>,
    pub is_mandatory: bool,
    /// Markdown.
    pub detailed_solution: String,
    pub reading_material: Option<ReadingMaterial>,
    pub options: Vec<OptionData>,

    #[serde(skip)]
    correct_index: usize,

    pub hash: String,
}

impl QuestionData {
    pub fn new(
        id: u64,
        description: String,
        is_mandatory: bool,
        detailed_solution: String,
        options: Vec<OptionData>,
    ) -> Result<Self> {
        let correct_index = Self::check(id, &options[..])?;
        let hash = Self::hash_data(id, &description, &options[..], &detailed_solution);

        Ok(Self {
            id,
            description,
            topic: None,
            difficulty_level: None,
            is_mandatory,
            detailed_solution,
            reading_material: None,
            options,
            correct_index,
            hash,
        })
    }

    pub fn correct_option(&self) -> &OptionData {
        &self.options[self.correct_index]
    }

    pub fn option(&self, option_id: u64) -> Option<&OptionData> {
        self.options.iter().find(|option| option.id == option_id)
    }

    /// Returns the position of the single correct option.
    fn check(id: u64, options: &[OptionData]) -> Result<usize> {
        if options.is_empty() {
            bail!("Question {id} has no options");
        }

        let correct = options
            .iter()
            .enumerate()
            .filter(|(_, option)| option.is_correct)
            .map(|(index, _)| index)
            .collect::<Vec<_>>();

        match correct.as_slice() {
            [index] => Ok(*index),
            _ => bail!("Question {id} has {} correct options", correct.len()),
        }
    }

    fn hash_data(
        id: u64,
        description: &str,
        options: &[OptionData],
        detailed_solution: &str,
    ) -> String {
        let mut hasher = blake3::Hasher::new();

        hasher.update(&id.to_le_bytes());
        hasher.update(description.as_bytes());
        hasher.update(
            options
                .iter()
                .map(|option| option.hash.clone())
                .collect::<Vec<_>>()
                .join("")
                .as_bytes(),
        );
        hasher.update(detailed_solution.as_bytes());

        hasher.finalize().to_string()
    }
}

impl TryFrom<RawQuestionData> for QuestionData {
    type Error = Error;

    fn try_from(raw: RawQuestionData) -> Result<Self> {
        let options = raw.options.into_iter().map(Into::into).collect();
        let reading_material = raw
            .reading_material
            .map(ReadingMaterial::try_from)
            .transpose()
            .with_context(|| format!("Invalid reading material for question {}", raw.id))?;

        let mut question = Self::new(
            raw.id,
            raw.description,
            raw.is_mandatory.unwrap_or(false),
            raw.detailed_solution.unwrap_or_default(),
            options,
        )?;

        question.topic = raw.topic;
        question.difficulty_level = raw.difficulty_level;
        question.reading_material = reading_material;

        Ok(question)
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct OptionData {
    pub id: u64,

    pub description: String,
    pub is_correct: bool,

    pub hash: String,
}

impl OptionData {
    pub fn new(id: u64, description: String, is_correct: bool) -> Self {
        let hash = Self::hash_data(id, &description, is_correct);

        Self {
            id,
            description,
            is_correct,
            hash,
        }
    }

    fn hash_data(id: u64, description: &str, is_correct: bool) -> String {
        let mut hasher = blake3::Hasher::new();

        hasher.update(&id.to_le_bytes());
        hasher.update(description.as_bytes());
        hasher.update(&[is_correct as u8]);

        hasher.finalize().to_string()
    }
}

impl From<RawOptionData> for OptionData {
    fn from(raw: RawOptionData) -> Self {
        Self::new(raw.id, raw.description, raw.is_correct)
    }
}

#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct ReadingMaterial {
    /// HTML.
    pub content_sections: Vec<String>,
    pub keywords: Vec<String>,
    /// HTML.
    pub practice_material: Vec<String>,
}

impl ReadingMaterial {
    pub fn is_empty(&self) -> bool {
        self.content_sections.is_empty() && self.practice_material.is_empty()
    }
}

impl TryFrom<RawReadingMaterial> for ReadingMaterial {
    type Error = Error;

    fn try_from(raw: RawReadingMaterial) -> Result<Self> {
        let keywords = decode_keywords(raw.keywords.as_deref())?;
        let practice_material = raw
            .practice_material
            .and_then(|RawPracticeMaterial { content }| content)
            .unwrap_or_default();

        Ok(Self {
            content_sections: raw.content_sections.unwrap_or_default(),
            keywords,
            practice_material,
        })
    }
}
