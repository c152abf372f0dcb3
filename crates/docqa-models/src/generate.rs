use async_trait::async_trait;
use std::fmt::Write;

use docqa_core::traits::AnswerGenerator;

/// Answer returned when retrieval produced no supporting text. A query
/// that legitimately matches nothing is a normal outcome, not an error.
pub const NO_RELEVANT_CONTENT: &str =
    "No relevant content was found in the indexed document for this question.";

/// Quotes the reranked supporting passages verbatim instead of calling a
/// generative model. Deterministic, which the pipeline tests rely on.
pub struct ExtractiveGenerator;

#[async_trait]
impl AnswerGenerator for ExtractiveGenerator {
    async fn generate(&self, question: &str, contexts: &[String]) -> anyhow::Result<String> {
        if contexts.is_empty() {
            return Ok(NO_RELEVANT_CONTENT.to_string());
        }
        let mut answer = format!("Passages relevant to \"{}\":\n", question.trim());
        for (i, context) in contexts.iter().enumerate() {
            let _ = writeln!(answer, "[{}] {}", i + 1, context.trim());
        }
        Ok(answer)
    }
}
