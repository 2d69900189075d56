use chrono::Utc;
use prepcoach_schema::{Category, EvaluationResult, Question};

use crate::completion::CompletionClient;
use crate::score::parse_score;

/// Scores an answer by asking the completion service to grade it.
///
/// Always yields a result: a failed or malformed completion produces the
/// default score with the failure text as feedback. There is no retry.
pub struct Evaluator<'a> {
    client: &'a CompletionClient,
}

impl<'a> Evaluator<'a> {
    pub fn new(client: &'a CompletionClient) -> Self {
        Self { client }
    }

    pub fn build_prompt(question: &Question, answer_text: &str, category: Category) -> String {
        format!(
            "Evaluate this {category} interview answer for Amazon SDE II position:\n\
             \n\
             Question: {question}\n\
             Answer: {answer_text}\n\
             \n\
             Provide evaluation in this format:\n\
             Score: X/10\n\
             Strengths: [list strengths]\n\
             Weaknesses: [list areas for improvement]\n\
             Suggestions: [specific suggestions]\n",
            category = category.display_name(),
            question = question.prompt_text,
        )
    }

    pub async fn evaluate(
        &self,
        question: &Question,
        answer_text: &str,
        category: Category,
    ) -> EvaluationResult {
        let prompt = Self::build_prompt(question, answer_text, category);
        let feedback_text = self.client.complete_or_message(&prompt, "").await;
        let score = parse_score(&feedback_text);
        tracing::info!(
            category = category.slug(),
            question_id = question.id,
            score,
            "answer evaluated"
        );

        EvaluationResult {
            score,
            feedback_text,
            timestamp: Utc::now(),
        }
    }
}
