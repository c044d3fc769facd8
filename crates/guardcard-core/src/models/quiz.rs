use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A multiple-choice practice question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub choices: Vec<String>,

    /// Index into `choices` of the correct answer
    pub answer: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// A group of questions covering one exam topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizCategory {
    pub id: String,
    pub title: String,
    pub description: String,
    pub estimated_minutes: u32,
    pub questions: Vec<Question>,
}

impl QuizCategory {
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

/// Result of one scored quiz attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizScore {
    pub category_id: String,
    pub correct: usize,
    pub total: usize,
    pub percent: f64,
    pub taken_at: DateTime<Utc>,

    /// Ids of the questions answered incorrectly
    #[serde(default)]
    pub missed: Vec<String>,
}

/// Session-wide quiz performance, kept in memory only
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizStats {
    pub quizzes_taken: usize,
    pub questions_answered: usize,
    pub average_score: f64,
    pub best_scores: BTreeMap<String, f64>,
}
