//! The report buffer and its two sinks

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::Result;

pub const RULE_WIDTH: usize = 50;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Ordered text entries accumulated over a run. Entries carry their own
/// line breaks; the file sink concatenates them as-is.
#[derive(Debug, Default, Clone)]
pub struct Report {
    entries: Vec<String>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    pub fn push_description(&mut self, description: &str) {
        self.push("--- DATA DESCRIPTION --- \n\n");
        self.push(description);
        self.push(format!("\n{}\n", rule()));
    }

    pub fn push_questions(&mut self, role: &str, questions: &[String]) {
        self.push(format!(
            "--- GENERATED QUESTIONS (as {}) ---\n",
            role.to_uppercase()
        ));
        for (i, question) in questions.iter().enumerate() {
            self.push(format!("{}: {} \n", i + 1, question));
        }
    }

    pub fn begin_answers(&mut self) {
        self.push(format!("\n{}\n", rule()));
        self.push("--- ANSWERS ---");
    }

    pub fn push_answer(&mut self, question: &str, outcome: std::result::Result<&str, String>) {
        self.push(format!("\nQ: {question}"));
        match outcome {
            Ok(answer) => self.push(format!("\nA: \n {answer} \n")),
            Err(reason) => self.push(format!(
                "\nA: ERROR - Could not execute this question. Reason: {reason}"
            )),
        }
    }

    /// Concatenated entries, exactly as the file sink writes them.
    pub fn render(&self) -> String {
        self.entries.concat()
    }

    /// Overwrites `path` with the rendered report.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render())?;
        Ok(())
    }

    /// Console sink: one line per entry between banner rules.
    pub fn print_to<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "\n{}", rule())?;
        writeln!(out, "--- FINAL REPORT ---")?;
        for entry in &self.entries {
            writeln!(out, "{entry}")?;
        }
        writeln!(out, "{}", rule())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Report {
        let mut report = Report::new();
        report.push_description("Two columns.");
        report.push_questions("a curious data analyst", &["Q1".to_string(), "Q2".to_string()]);
        report
    }

    #[test]
    fn layout_matches_sections() {
        let text = sample().render();
        let rule = "=".repeat(50);
        assert_eq!(
            text,
            format!(
                "--- DATA DESCRIPTION --- \n\nTwo columns.\n{rule}\n\
                 --- GENERATED QUESTIONS (as A CURIOUS DATA ANALYST) ---\n\
                 1: Q1 \n2: Q2 \n"
            )
        );
    }

    #[test]
    fn answers_and_errors_have_the_same_shape() {
        let mut report = Report::new();
        report.begin_answers();
        report.push_answer("Q1", Ok("42"));
        report.push_answer("Q2", Err("timeout".to_string()));

        let text = report.render();
        assert!(text.contains("--- ANSWERS ---"));
        assert!(text.contains("\nQ: Q1\nA: \n 42 \n"));
        assert!(text.ends_with(
            "\nQ: Q2\nA: ERROR - Could not execute this question. Reason: timeout"
        ));
    }

    #[test]
    fn console_sink_wraps_entries_in_banners() {
        let report = sample();
        let mut out = Vec::new();
        report.print_to(&mut out).unwrap();
        let printed = String::from_utf8(out).unwrap();

        let rule = "=".repeat(50);
        assert!(printed.starts_with(&format!("\n{rule}\n--- FINAL REPORT ---\n")));
        assert!(printed.ends_with(&format!("{rule}\n")));
        assert!(printed.contains("1: Q1 \n\n"));
    }

    #[test]
    fn file_sink_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        std::fs::write(&path, "stale content that is longer than the report itself").unwrap();

        let mut report = Report::new();
        report.push("fresh");
        report.write_to(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fresh");
    }
}
