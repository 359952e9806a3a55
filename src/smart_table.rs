//! The data handle: a loaded table that answers natural-language questions
//! by handing its profile and rows to a language model.

use std::path::Path;

use tracing::{debug, info};

use crate::clients::LanguageModel;
use crate::config::TableConfig;
use crate::error::{AnalystError, Result};
use crate::prompts::{self, TableContext};
use crate::table::DataTable;

/// Anything the runner can ask questions of.
pub trait DataSource {
    fn chat(&self, question: &str) -> Result<String>;

    fn describe(&self) -> Result<String> {
        self.chat(prompts::DESCRIBE_DATA)
    }
}

pub struct SmartTable<'m> {
    table: DataTable,
    model: &'m dyn LanguageModel,
    config: TableConfig,
    profile: String,
}

impl<'m> SmartTable<'m> {
    pub fn new(table: DataTable, model: &'m dyn LanguageModel, config: &TableConfig) -> Self {
        let profile = table.render_profile();
        Self {
            table,
            model,
            config: config.clone(),
            profile,
        }
    }

    pub fn load(path: &Path, model: &'m dyn LanguageModel, config: &TableConfig) -> Result<Self> {
        let table = DataTable::from_path(path, config)?;
        info!(
            "Loaded {} ({} rows, {} columns)",
            table.name(),
            table.row_count(),
            table.column_count()
        );
        Ok(Self::new(table, model, config))
    }

    fn build_prompt(&self, question: &str) -> Result<String> {
        let rows = self.table.row_count();
        let truncated_to =
            (rows > self.config.max_context_rows).then_some(self.config.preview_rows.min(rows));
        let data = self.table.render_rows(truncated_to.unwrap_or(rows))?;

        let ctx = TableContext {
            name: self.table.name(),
            rows,
            columns: self.table.column_count(),
            profile: &self.profile,
            data: &data,
            truncated_to,
        };
        Ok(prompts::table_question(&ctx, question))
    }
}

impl DataSource for SmartTable<'_> {
    fn chat(&self, question: &str) -> Result<String> {
        let prompt = self.build_prompt(question)?;
        debug!(
            "Asking {} about {} ({} prompt chars)",
            self.model.model_name(),
            self.table.name(),
            prompt.len()
        );
        let answer = self.model.complete(&prompt)?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(AnalystError::EmptyAnswer {
                question: question.to_string(),
            });
        }
        Ok(answer.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::LlmError;
    use std::cell::RefCell;

    struct Recorder {
        reply: &'static str,
        prompts: RefCell<Vec<String>>,
    }

    impl LanguageModel for Recorder {
        fn model_name(&self) -> &str {
            "recorder"
        }

        fn complete(&self, prompt: &str) -> std::result::Result<String, LlmError> {
            self.prompts.borrow_mut().push(prompt.to_string());
            Ok(self.reply.to_string())
        }
    }

    fn table(rows: usize) -> DataTable {
        let mut csv = String::from("id,score\n");
        for i in 0..rows {
            csv.push_str(&format!("{i},{}\n", i * 2));
        }
        DataTable::from_reader("scores.csv", csv.as_bytes(), &TableConfig::default()).unwrap()
    }

    #[test]
    fn small_tables_are_sent_whole() {
        let model = Recorder {
            reply: "  42  ",
            prompts: RefCell::new(Vec::new()),
        };
        let handle = SmartTable::new(table(3), &model, &TableConfig::default());

        assert_eq!(handle.chat("max score?").unwrap(), "42");
        let prompt = &model.prompts.borrow()[0];
        assert!(prompt.contains("All 3 rows are shown below."));
        assert!(prompt.contains("2,4\n"));
        assert!(prompt.contains("- score (integer)"));
        assert!(prompt.ends_with("Question: max score?"));
    }

    #[test]
    fn large_tables_are_previewed() {
        let model = Recorder {
            reply: "ok",
            prompts: RefCell::new(Vec::new()),
        };
        let config = TableConfig {
            preview_rows: 2,
            max_context_rows: 5,
            ..TableConfig::default()
        };
        let handle = SmartTable::new(table(10), &model, &config);
        handle.chat("q").unwrap();

        let prompt = &model.prompts.borrow()[0];
        assert!(prompt.contains("The first 2 of 10 rows"));
        assert!(prompt.contains("1,2\n"));
        assert!(!prompt.contains("\n2,4\n"));
    }

    #[test]
    fn describe_uses_the_description_prompt() {
        let model = Recorder {
            reply: "A table of scores.",
            prompts: RefCell::new(Vec::new()),
        };
        let handle = SmartTable::new(table(1), &model, &TableConfig::default());
        assert_eq!(handle.describe().unwrap(), "A table of scores.");
        assert!(model.prompts.borrow()[0].ends_with(prompts::DESCRIBE_DATA));
    }

    #[test]
    fn blank_answer_is_an_error() {
        let model = Recorder {
            reply: " \n",
            prompts: RefCell::new(Vec::new()),
        };
        let handle = SmartTable::new(table(1), &model, &TableConfig::default());
        let err = handle.chat("anything?").unwrap_err();
        assert!(matches!(err, AnalystError::EmptyAnswer { .. }));
    }
}
