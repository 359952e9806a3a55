//! Prompt templates sent to the model

/// Asked of the data handle to obtain the dataset description.
pub const DESCRIBE_DATA: &str =
    "Give a concise description of the data, including column names and a brief summary.";

/// Question-generation prompt. The model is told to emit bare questions,
/// one per line; nothing downstream repairs output that ignores this.
pub fn question_generation(role: &str, count: usize, description: &str) -> String {
    format!(
        "You are {role}. Based on the data description below, \
         generate exactly {count} insightful questions to ask about the data. \
         Output only the questions, one per line, without any numbering, commentary, or introduction.\n\n\
         Data Description:\n{description}"
    )
}

/// Context handed to the model when a question is asked of a table.
pub struct TableContext<'a> {
    pub name: &'a str,
    pub rows: usize,
    pub columns: usize,
    pub profile: &'a str,
    pub data: &'a str,
    /// Rows included in `data` when fewer than `rows`
    pub truncated_to: Option<usize>,
}

pub fn table_question(ctx: &TableContext<'_>, question: &str) -> String {
    let coverage = match ctx.truncated_to {
        Some(shown) => format!(
            "The first {shown} of {} rows are shown below. Use the column summary for whole-table figures \
             and say so when an answer needs rows that are not shown.",
            ctx.rows
        ),
        None => format!("All {} rows are shown below.", ctx.rows),
    };

    format!(
        "You are a careful data analyst answering questions about the table \"{name}\" \
         ({rows} rows, {columns} columns).\n\n\
         Column summary:\n{profile}\n\
         {coverage}\n\n\
         Data (CSV):\n{data}\n\
         Answer the question using only this data. Be concise and show the figures you relied on.\n\n\
         Question: {question}",
        name = ctx.name,
        rows = ctx.rows,
        columns = ctx.columns,
        profile = ctx.profile,
        data = ctx.data,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_prompt_embeds_role_count_and_description() {
        let prompt = question_generation("a financial analyst", 4, "Sales by region.");
        assert!(prompt.starts_with("You are a financial analyst. Based on the data description below, "));
        assert!(prompt.contains("generate exactly 4 insightful questions"));
        assert!(prompt.contains("one per line, without any numbering"));
        assert!(prompt.ends_with("Data Description:\nSales by region."));
    }

    #[test]
    fn table_prompt_mentions_truncation() {
        let ctx = TableContext {
            name: "sales.csv",
            rows: 500,
            columns: 3,
            profile: "- a (integer)\n",
            data: "a\n1\n",
            truncated_to: Some(20),
        };
        let prompt = table_question(&ctx, "What is the total?");
        assert!(prompt.contains("\"sales.csv\" (500 rows, 3 columns)"));
        assert!(prompt.contains("The first 20 of 500 rows"));
        assert!(prompt.ends_with("Question: What is the total?"));

        let full = TableContext {
            truncated_to: None,
            ..ctx
        };
        assert!(table_question(&full, "q").contains("All 500 rows are shown below."));
    }
}
