//! Practice quiz scoring and session statistics.

use crate::error::{GuardCardError, Result};
use crate::models::{QuizCategory, QuizScore, QuizStats};
use chrono::Utc;

/// Score a full set of answers against a quiz category.
///
/// `answers[i]` is the chosen choice index for `category.questions[i]`.
pub fn score_attempt(category: &QuizCategory, answers: &[usize]) -> Result<QuizScore> {
    if answers.len() != category.questions.len() {
        return Err(GuardCardError::AnswerCountMismatch {
            category: category.id.clone(),
            expected: category.questions.len(),
            actual: answers.len(),
        });
    }

    let mut correct = 0;
    let mut missed = Vec::new();

    for (question, &answer) in category.questions.iter().zip(answers) {
        if answer >= question.choices.len() {
            return Err(GuardCardError::AnswerOutOfRange {
                question: question.id.clone(),
                answer,
                choices: question.choices.len(),
            });
        }
        if answer == question.answer {
            correct += 1;
        } else {
            missed.push(question.id.clone());
        }
    }

    let total = category.questions.len();
    Ok(QuizScore {
        category_id: category.id.clone(),
        correct,
        total,
        percent: percent(correct, total),
        taken_at: Utc::now(),
        missed,
    })
}

fn percent(correct: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        correct as f64 / total as f64 * 100.0
    }
}

impl QuizStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a scored attempt into the session totals
    pub fn record(&mut self, score: &QuizScore) {
        let previous_sum = self.average_score * self.quizzes_taken as f64;
        self.quizzes_taken += 1;
        self.questions_answered += score.total;
        self.average_score = (previous_sum + score.percent) / self.quizzes_taken as f64;

        let best = self.best_scores.entry(score.category_id.clone()).or_insert(score.percent);
        if score.percent > *best {
            *best = score.percent;
        }
    }

    pub fn best_score(&self, category_id: &str) -> Option<f64> {
        self.best_scores.get(category_id).copied()
    }
}
