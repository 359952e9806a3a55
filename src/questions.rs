/// Split a model response into questions: one per non-blank line, trimmed,
/// in the order given. Numbering or bullets the model adds anyway are kept.
pub fn parse_questions(raw: &str) -> Vec<String> {
    raw.trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// File form of the question list: newline-joined, no trailing newline.
pub fn render_question_file(questions: &[String]) -> String {
    questions.join("\n")
}
