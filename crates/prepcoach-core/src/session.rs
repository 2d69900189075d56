use chrono::{DateTime, Local, TimeDelta, Utc};
use prepcoach_schema::{question_at, Category, ChatRole, ChatTurn, EvaluationResult, Question};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::answer::AnswerPayload;
use crate::evaluator::Evaluator;
use crate::ledger::{CategoryAverages, PerformanceLedger};

/// How `request_question` picks the next catalog entry.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RotationPolicy {
    /// Index by the current chat-history length. Chat activity advances the
    /// rotation for every category, and repeated requests with no chat in
    /// between return the same question.
    #[default]
    HistoryLength,
    /// Independent counter per category, advanced on every request.
    PerCategory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveQuestion {
    pub question: &'static Question,
    pub category: Category,
    pub start_time: DateTime<Utc>,
    /// Correlates the request and submit log lines of one attempt.
    pub attempt_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct Submission {
    pub question: &'static Question,
    pub category: Category,
    pub result: EvaluationResult,
    pub elapsed: TimeDelta,
}

/// In-memory state for one user's practice session.
///
/// Owned by exactly one front end and mutated only through `&mut self`;
/// nothing here is meant to be shared between users.
#[derive(Debug)]
pub struct InterviewSession {
    session_id: String,
    started_at: DateTime<Utc>,
    rotation: RotationPolicy,
    rotation_counters: [usize; 3],
    chat_history: Vec<ChatTurn>,
    active: Option<ActiveQuestion>,
    ledger: PerformanceLedger,
    total_study_time: TimeDelta,
}

impl Default for InterviewSession {
    fn default() -> Self {
        Self::new(RotationPolicy::default())
    }
}

impl InterviewSession {
    pub fn new(rotation: RotationPolicy) -> Self {
        let mut session = Self {
            session_id: String::new(),
            started_at: Utc::now(),
            rotation,
            rotation_counters: [0; 3],
            chat_history: Vec::new(),
            active: None,
            ledger: PerformanceLedger::new(),
            total_study_time: TimeDelta::zero(),
        };
        session.start_new_session();
        session
    }

    /// Reset all state and label the session with the current local time.
    pub fn start_new_session(&mut self) {
        self.session_id = Local::now().format("%Y%m%d_%H%M%S").to_string();
        self.started_at = Utc::now();
        self.rotation_counters = [0; 3];
        self.chat_history.clear();
        self.active = None;
        self.ledger = PerformanceLedger::new();
        self.total_study_time = TimeDelta::zero();
        tracing::info!(session_id = %self.session_id, rotation = ?self.rotation, "session started");
    }

    /// Select the next question for `category` and make it the active one.
    /// Any previously active question is replaced.
    pub fn request_question(&mut self, category: Category) -> &ActiveQuestion {
        let index = match self.rotation {
            RotationPolicy::HistoryLength => self.chat_history.len(),
            RotationPolicy::PerCategory => {
                let counter = &mut self.rotation_counters[category_slot(category)];
                let index = *counter;
                *counter += 1;
                index
            }
        };
        let question = question_at(category, index);

        if let Some(previous) = &self.active {
            tracing::debug!(
                replaced_attempt = %previous.attempt_id,
                "active question replaced"
            );
        }

        let active = ActiveQuestion {
            question,
            category,
            start_time: Utc::now(),
            attempt_id: Uuid::new_v4(),
        };
        tracing::info!(
            attempt_id = %active.attempt_id,
            category = category.slug(),
            question_id = question.id,
            "question selected"
        );
        self.active.insert(active)
    }

    /// Evaluate `payload` against the active question and record the result.
    ///
    /// Returns `None` without touching any state when no question is active
    /// or the payload belongs to a different category. Otherwise the active
    /// question is cleared whatever the score.
    pub async fn submit_answer(
        &mut self,
        evaluator: &Evaluator<'_>,
        payload: &AnswerPayload,
    ) -> Option<Submission> {
        let Some(active) = self.active.clone() else {
            tracing::warn!("submission ignored: no active question");
            return None;
        };
        if payload.category() != active.category {
            tracing::warn!(
                attempt_id = %active.attempt_id,
                active = active.category.slug(),
                submitted = payload.category().slug(),
                "submission ignored: category mismatch"
            );
            return None;
        }

        let answer_text = payload.render();
        let result = evaluator
            .evaluate(active.question, &answer_text, active.category)
            .await;

        let elapsed = (result.timestamp - active.start_time).max(TimeDelta::zero());
        self.total_study_time += elapsed;
        self.ledger.record(active.category, result.clone());
        self.active = None;

        tracing::info!(
            attempt_id = %active.attempt_id,
            score = result.score,
            elapsed_secs = elapsed.num_seconds(),
            "submission recorded"
        );

        Some(Submission {
            question: active.question,
            category: active.category,
            result,
            elapsed,
        })
    }

    pub fn append_chat_turn(&mut self, role: ChatRole, content: impl Into<String>) {
        self.chat_history.push(ChatTurn::new(role, content));
    }

    pub fn compute_averages(&self) -> CategoryAverages {
        self.ledger.compute_averages()
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn rotation(&self) -> RotationPolicy {
        self.rotation
    }

    pub fn chat_history(&self) -> &[ChatTurn] {
        &self.chat_history
    }

    pub fn active_question(&self) -> Option<&ActiveQuestion> {
        self.active.as_ref()
    }

    pub fn ledger(&self) -> &PerformanceLedger {
        &self.ledger
    }

    pub fn total_study_time(&self) -> TimeDelta {
        self.total_study_time
    }
}

fn category_slot(category: Category) -> usize {
    match category {
        Category::Dsa => 0,
        Category::SystemDesign => 1,
        Category::Behavioral => 2,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::completion::CompletionClient;
    use crate::testing::{FailProvider, ScriptedProvider};
    use prepcoach_schema::{questions_for, DEFAULT_SCORE};

    fn scripted_client<I, S>(replies: I) -> CompletionClient
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CompletionClient::new("m", 100).with_provider(Arc::new(ScriptedProvider::new(replies)))
    }

    fn dsa_answer() -> AnswerPayload {
        AnswerPayload::Dsa {
            language: "Rust".into(),
            code: "fn two_sum() {}".into(),
            explanation: "hash map, O(n)".into(),
        }
    }

    fn star_answer() -> AnswerPayload {
        AnswerPayload::Behavioral {
            situation: "S".into(),
            task: "T".into(),
            action: "A".into(),
            result: "R".into(),
        }
    }

    #[test]
    fn new_session_is_empty() {
        let session = InterviewSession::default();
        assert_eq!(session.session_id().len(), "20240101_120000".len());
        assert!(session.chat_history().is_empty());
        assert!(session.active_question().is_none());
        assert!(session.ledger().is_empty());
        assert_eq!(session.total_study_time(), TimeDelta::zero());
        assert_eq!(session.rotation(), RotationPolicy::HistoryLength);
    }

    #[test]
    fn request_sets_active_question_from_category_bank() {
        let mut session = InterviewSession::default();
        for category in Category::ALL {
            let active = session.request_question(category).clone();
            assert_eq!(active.category, category);
            assert!(questions_for(category).contains(active.question));
        }
        assert_eq!(
            session.active_question().map(|a| a.category),
            Some(Category::Behavioral)
        );
    }

    #[test]
    fn history_rotation_repeats_without_chat_growth() {
        let mut session = InterviewSession::default();
        let ids: Vec<u32> = (0..3)
            .map(|_| session.request_question(Category::Dsa).question.id)
            .collect();
        assert_eq!(ids, vec![1, 1, 1]);
    }

    #[test]
    fn history_rotation_follows_chat_length_across_categories() {
        let mut session = InterviewSession::default();
        session.append_chat_turn(ChatRole::User, "hi");
        session.append_chat_turn(ChatRole::Assistant, "hello");

        // two turns: 2 % 3 for DSA, 2 % 4 for behavioral
        assert_eq!(session.request_question(Category::Dsa).question.id, 3);
        assert_eq!(session.request_question(Category::Behavioral).question.id, 3);

        session.append_chat_turn(ChatRole::User, "again");
        session.append_chat_turn(ChatRole::Assistant, "sure");
        assert_eq!(session.request_question(Category::Dsa).question.id, 2);
        assert_eq!(
            session.request_question(Category::SystemDesign).question.id,
            2
        );
    }

    #[test]
    fn per_category_rotation_cycles_independently() {
        let mut session = InterviewSession::new(RotationPolicy::PerCategory);
        let dsa: Vec<u32> = (0..4)
            .map(|_| session.request_question(Category::Dsa).question.id)
            .collect();
        assert_eq!(dsa, vec![1, 2, 3, 1]);

        session.append_chat_turn(ChatRole::User, "does not matter");
        assert_eq!(session.request_question(Category::Behavioral).question.id, 1);
        assert_eq!(session.request_question(Category::Dsa).question.id, 2);
    }

    #[test]
    fn request_replaces_active_question() {
        let mut session = InterviewSession::default();
        let first = session.request_question(Category::Dsa).attempt_id;
        let second = session.request_question(Category::SystemDesign).clone();
        assert_ne!(first, second.attempt_id);
        assert_eq!(session.active_question(), Some(&second));
    }

    #[tokio::test]
    async fn submit_without_active_question_is_noop() {
        let client = scripted_client(["Score: 9"]);
        let evaluator = Evaluator::new(&client);
        let mut session = InterviewSession::default();

        assert!(session.submit_answer(&evaluator, &dsa_answer()).await.is_none());
        assert!(session.ledger().is_empty());
    }

    #[tokio::test]
    async fn submit_with_other_category_is_noop() {
        let client = scripted_client(["Score: 9"]);
        let evaluator = Evaluator::new(&client);
        let mut session = InterviewSession::default();
        session.request_question(Category::Dsa);

        assert!(session.submit_answer(&evaluator, &star_answer()).await.is_none());
        assert!(session.ledger().is_empty());
        assert_eq!(
            session.active_question().map(|a| a.category),
            Some(Category::Dsa)
        );
    }

    #[tokio::test]
    async fn submit_records_score_and_clears_active_question() {
        let client = scripted_client(["Score: 9\nStrengths: ..."]);
        let evaluator = Evaluator::new(&client);
        let mut session = InterviewSession::default();

        assert_eq!(session.request_question(Category::Dsa).question.id, 1);
        let submission = session
            .submit_answer(&evaluator, &dsa_answer())
            .await
            .unwrap();

        assert_eq!(submission.result.score, 9);
        assert_eq!(submission.question.id, 1);
        assert_eq!(submission.result.feedback_text, "Score: 9\nStrengths: ...");
        assert_eq!(session.ledger().scores(Category::Dsa), vec![9]);
        assert_eq!(session.ledger().timestamps().len(), 1);
        assert!(session.active_question().is_none());
        assert!(session.total_study_time() >= TimeDelta::zero());
    }

    #[tokio::test]
    async fn low_score_and_failures_still_clear_active_question() {
        let client = CompletionClient::new("m", 10).with_provider(Arc::new(FailProvider));
        let evaluator = Evaluator::new(&client);
        let mut session = InterviewSession::default();

        session.request_question(Category::Behavioral);
        let submission = session
            .submit_answer(&evaluator, &star_answer())
            .await
            .unwrap();

        assert_eq!(submission.result.score, DEFAULT_SCORE);
        assert!(session.active_question().is_none());
        assert_eq!(session.ledger().scores(Category::Behavioral), vec![5]);
    }

    #[tokio::test]
    async fn ledger_counts_match_submissions_per_category() {
        let client = scripted_client(["Score: 4", "Score: 7", "no score", "Score: 10"]);
        let evaluator = Evaluator::new(&client);
        let mut session = InterviewSession::default();

        session.request_question(Category::Dsa);
        session.submit_answer(&evaluator, &dsa_answer()).await;
        session.request_question(Category::Behavioral);
        session.submit_answer(&evaluator, &star_answer()).await;
        session.request_question(Category::Dsa);
        session.submit_answer(&evaluator, &dsa_answer()).await;
        // no active question: ignored, consumes no reply
        session.submit_answer(&evaluator, &dsa_answer()).await;

        let ledger = session.ledger();
        assert_eq!(ledger.timestamps().len(), 3);
        assert_eq!(ledger.scores(Category::Dsa), vec![4, 5]);
        assert_eq!(ledger.scores(Category::Behavioral), vec![7]);
        assert!(ledger.scores(Category::SystemDesign).is_empty());

        let averages = session.compute_averages();
        assert_eq!(averages.dsa, Some(4.5));
        assert_eq!(averages.behavioral, Some(7.0));
        assert_eq!(averages.system_design, None);
    }

    #[tokio::test]
    async fn start_new_session_resets_everything() {
        let client = scripted_client(["Score: 8"]);
        let evaluator = Evaluator::new(&client);
        let mut session = InterviewSession::new(RotationPolicy::PerCategory);
        session.append_chat_turn(ChatRole::User, "hello");
        session.request_question(Category::Dsa);
        session.submit_answer(&evaluator, &dsa_answer()).await;
        session.request_question(Category::Dsa);
        let first_start = session.started_at();

        session.start_new_session();

        assert!(session.started_at() >= first_start);
        assert!(session.started_at() <= Utc::now());
        assert!(session.chat_history().is_empty());
        assert!(session.active_question().is_none());
        assert!(session.ledger().is_empty());
        assert_eq!(session.total_study_time(), TimeDelta::zero());
        assert_eq!(session.request_question(Category::Dsa).question.id, 1);
    }
}
