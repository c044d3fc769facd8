//! Quiz command implementations

use crate::cli::{Cli, TakeArgs};
use crate::config_loader::{load_catalog, load_config};
use crate::errors::{invalid_answers, quiz_not_found, CliError};
use crate::output::OutputWriter;
use crate::output_types::{QuizInfo, QuizTakeOutput};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Select};
use guardcard_core::config::CliConfigOverrides;
use guardcard_core::models::{QuizCategory, QuizStats};
use guardcard_core::quiz::score_attempt;

pub fn list(cli: &Cli, output: &OutputWriter) -> Result<()> {
    let config = load_config(cli, CliConfigOverrides::default())?;
    let catalog = load_catalog(&config)?;

    let quizzes: Vec<QuizInfo> = catalog
        .quizzes()
        .iter()
        .map(|q| QuizInfo {
            id: q.id.clone(),
            title: q.title.clone(),
            question_count: q.question_count(),
            estimated_minutes: q.estimated_minutes,
        })
        .collect();

    if output.is_json() {
        return output.result(quizzes);
    }

    output.section("Practice Quizzes");
    output.table(quizzes);
    output.info("Start one with: guardcard quiz take <id>");
    Ok(())
}

pub fn take(cli: &Cli, args: &TakeArgs, output: &OutputWriter) -> Result<()> {
    let config = load_config(cli, CliConfigOverrides::default())?;
    let catalog = load_catalog(&config)?;

    let available: Vec<&str> = catalog.quizzes().iter().map(|q| q.id.as_str()).collect();
    let categories = args
        .categories
        .iter()
        .map(|id| catalog.quiz(id).map_err(|_| quiz_not_found(id, &available)))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    if !args.answers.is_empty() && args.answers.len() != categories.len() {
        return Err(invalid_answers(
            &args.categories.join(", "),
            format!(
                "{} quizzes selected but {} --answers lists given",
                categories.len(),
                args.answers.len()
            ),
        )
        .into());
    }
    if args.answers.is_empty() && output.is_json() {
        return Err(CliError::new("--answers is required with --json")
            .with_suggestion("Pass one --answers list per quiz")
            .into());
    }

    let mut stats = QuizStats::new();
    let mut scores = Vec::with_capacity(categories.len());

    for (i, category) in categories.iter().enumerate() {
        let answers = match args.answers.get(i) {
            Some(list) => {
                parse_answer_list(list).map_err(|reason| invalid_answers(&category.id, reason))?
            }
            None => prompt_answers(category)?,
        };

        let score =
            score_attempt(category, &answers).map_err(|e| invalid_answers(&category.id, e))?;
        stats.record(&score);

        if !output.is_json() {
            output.section(&category.title);
            output.success(format!(
                "{}/{} correct ({:.0}%)",
                score.correct, score.total, score.percent
            ));
            for question in category.questions.iter().filter(|q| score.missed.contains(&q.id)) {
                output.kv(&question.prompt, &question.choices[question.answer]);
                if let Some(explanation) = &question.explanation {
                    output.info(explanation);
                }
            }
        }

        scores.push(score);
    }

    if output.is_json() {
        return output.result(QuizTakeOutput { scores, stats });
    }

    output.section("Session Statistics");
    output.kv("Quizzes Taken", stats.quizzes_taken);
    output.kv("Average Score", format!("{:.0}%", stats.average_score));
    output.kv("Questions Answered", stats.questions_answered);
    for (category, best) in &stats.best_scores {
        output.kv(format!("Best: {}", category), format!("{:.0}%", best));
    }

    Ok(())
}

/// Parse "2,1,4" (choices numbered from 1) into zero-based choice indexes
fn parse_answer_list(list: &str) -> std::result::Result<Vec<usize>, String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| match s.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(n - 1),
            _ => Err(format!("'{}' is not a choice number (choices start at 1)", s)),
        })
        .collect()
}

fn prompt_answers(category: &QuizCategory) -> Result<Vec<usize>> {
    let theme = ColorfulTheme::default();
    let total = category.questions.len();

    category
        .questions
        .iter()
        .enumerate()
        .map(|(i, question)| -> Result<usize> {
            let selection = Select::with_theme(&theme)
                .with_prompt(format!("[{}/{}] {}", i + 1, total, question.prompt))
                .items(&question.choices)
                .default(0)
                .interact()?;
            Ok(selection)
        })
        .collect()
}
