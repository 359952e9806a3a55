use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "csv-analyst")]
#[command(about = "A CLI tool to analyze CSV data with a hosted LLM")]
#[command(version)]
pub struct Cli {
    /// Path to the CSV file to be analyzed
    pub csv_file: PathBuf,

    /// Persona used when generating questions (e.g. 'a financial analyst', 'a marketing director')
    #[arg(long, default_value = "a curious data analyst")]
    pub role: String,

    /// Number of questions to generate about the data
    #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u32).range(1..))]
    pub questions: u32,

    /// Save the full report to this file instead of printing it
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Save only the generated questions to this file
    #[arg(long)]
    pub qfile: Option<PathBuf>,

    /// Run each generated question against the data
    #[arg(long)]
    pub execute: bool,

    /// Model as provider/name, e.g. gemini/gemini-2.5-flash or openai/gpt-4o-mini
    #[arg(long)]
    pub model: Option<String>,

    /// CSV field delimiter
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// What one run should do, independent of how it was requested.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub csv_path: PathBuf,
    pub role: String,
    pub question_count: usize,
    pub report_path: Option<PathBuf>,
    pub questions_path: Option<PathBuf>,
    pub execute: bool,
}

impl AnalysisOptions {
    pub fn new(csv_path: impl Into<PathBuf>) -> Self {
        Self {
            csv_path: csv_path.into(),
            role: "a curious data analyst".to_string(),
            question_count: 6,
            report_path: None,
            questions_path: None,
            execute: false,
        }
    }
}

impl From<&Cli> for AnalysisOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            csv_path: cli.csv_file.clone(),
            role: cli.role.clone(),
            question_count: cli.questions as usize,
            report_path: cli.report.clone(),
            questions_path: cli.qfile.clone(),
            execute: cli.execute,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["csv-analyst", "data.csv"]).unwrap();
        let opts = AnalysisOptions::from(&cli);
        assert_eq!(opts.csv_path, PathBuf::from("data.csv"));
        assert_eq!(opts.role, "a curious data analyst");
        assert_eq!(opts.question_count, 6);
        assert!(opts.report_path.is_none());
        assert!(opts.questions_path.is_none());
        assert!(!opts.execute);
        assert!(cli.model.is_none());
    }

    #[test]
    fn all_flags() {
        let cli = Cli::try_parse_from([
            "csv-analyst",
            "sales.csv",
            "--role",
            "a marketing director",
            "--questions",
            "3",
            "--report",
            "out/report.txt",
            "--qfile",
            "out/q.txt",
            "--execute",
            "--model",
            "openai/gpt-4o-mini",
            "--delimiter",
            ";",
        ])
        .unwrap();
        let opts = AnalysisOptions::from(&cli);
        assert_eq!(opts.role, "a marketing director");
        assert_eq!(opts.question_count, 3);
        assert_eq!(opts.report_path, Some(PathBuf::from("out/report.txt")));
        assert_eq!(opts.questions_path, Some(PathBuf::from("out/q.txt")));
        assert!(opts.execute);
        assert_eq!(cli.delimiter, Some(';'));
    }

    #[test]
    fn zero_questions_rejected() {
        assert!(Cli::try_parse_from(["csv-analyst", "a.csv", "--questions", "0"]).is_err());
    }

    #[test]
    fn file_is_required() {
        assert!(Cli::try_parse_from(["csv-analyst"]).is_err());
    }
}
