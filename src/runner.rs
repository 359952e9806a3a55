//! The analysis pipeline: describe, generate questions, optionally answer
//! them, then emit the report.

use std::io::Write;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::cli::AnalysisOptions;
use crate::clients::LanguageModel;
use crate::config::{LlmConfig, Settings};
use crate::error::{AnalystError, Result};
use crate::prompts;
use crate::questions::{parse_questions, render_question_file};
use crate::report::Report;
use crate::smart_table::{DataSource, SmartTable};

/// Outcome of a completed run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub questions: Vec<String>,
    pub answered: usize,
    pub failed: usize,
    pub report_path: Option<PathBuf>,
}

/// Check the credential, connect the model, load the CSV and analyze it.
///
/// Nothing is read from disk and `connect` is never called when `api_key`
/// is missing.
pub fn run_analysis<W, C>(
    options: &AnalysisOptions,
    settings: &Settings,
    api_key: Option<String>,
    connect: C,
    out: &mut W,
) -> Result<RunSummary>
where
    W: Write,
    C: FnOnce(&LlmConfig, String) -> Result<Box<dyn LanguageModel>>,
{
    let api_key = api_key.ok_or_else(|| AnalystError::MissingCredential {
        var: settings.llm.api_key_env.clone(),
    })?;
    let model = connect(&settings.llm, api_key)?;

    writeln!(out, "-> Loading data from '{}'...", options.csv_path.display())?;
    let table = SmartTable::load(&options.csv_path, model.as_ref(), &settings.table)?;

    analyze(options, &table, model.as_ref(), out)
}

/// Everything after loading. `data` answers questions about the table,
/// `model` generates the questions.
pub fn analyze<W: Write>(
    options: &AnalysisOptions,
    data: &dyn DataSource,
    model: &dyn LanguageModel,
    out: &mut W,
) -> Result<RunSummary> {
    let mut report = Report::new();

    writeln!(out, "-> Getting initial data description...")?;
    let description = data.describe()?;
    report.push_description(&description);
    writeln!(out, "{description}")?;

    writeln!(
        out,
        "-> Asking {} to generate {} questions...",
        model.model_name(),
        options.question_count
    )?;
    let prompt =
        prompts::question_generation(&options.role, options.question_count, &description);
    let raw = model.complete(&prompt)?;
    writeln!(out, "{raw}")?;

    let questions = parse_questions(&raw);
    if questions.len() != options.question_count {
        warn!(
            "Requested {} questions, model produced {} lines",
            options.question_count,
            questions.len()
        );
    }
    report.push_questions(&options.role, &questions);

    if let Some(path) = &options.questions_path {
        writeln!(out, "-> Saving generated questions to '{}'...", path.display())?;
        std::fs::write(path, render_question_file(&questions))?;
        writeln!(out, "   Successfully saved questions.")?;
    }

    let mut summary = RunSummary {
        questions,
        ..RunSummary::default()
    };

    if options.execute {
        let total = summary.questions.len();
        writeln!(out, "-> Executing {total} questions...")?;
        report.begin_answers();
        for (i, question) in summary.questions.iter().enumerate() {
            writeln!(out, "   Executing question {}/{}: \"{}\"", i + 1, total, question)?;
            match data.chat(question) {
                Ok(answer) => {
                    report.push_answer(question, Ok(answer.as_str()));
                    summary.answered += 1;
                }
                Err(err) => {
                    warn!("Question {} failed: {}", i + 1, err);
                    report.push_answer(question, Err(err.to_string()));
                    summary.failed += 1;
                }
            }
        }
    }

    match &options.report_path {
        Some(path) => {
            writeln!(out, "-> Writing full report to '{}'...", path.display())?;
            report.write_to(path)?;
            writeln!(out, "-> Done.")?;
            summary.report_path = Some(path.clone());
        }
        None => report.print_to(out)?,
    }

    info!(
        "Run complete: {} questions, {} answered, {} failed",
        summary.questions.len(),
        summary.answered,
        summary.failed
    );
    Ok(summary)
}
