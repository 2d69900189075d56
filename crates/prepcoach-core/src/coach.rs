use prepcoach_schema::ChatRole;

use crate::completion::CompletionClient;
use crate::session::InterviewSession;

pub fn coach_context(days_until_interview: u32) -> String {
    format!(
        "Amazon SDE II interview preparation. User has been practicing for the interview in {days_until_interview} days."
    )
}

/// Free-form coaching turn: records the user message, asks the completion
/// service and records its reply. Adds two entries to the chat history.
pub async fn ask_coach(
    session: &mut InterviewSession,
    client: &CompletionClient,
    message: &str,
    days_until_interview: u32,
) -> String {
    session.append_chat_turn(ChatRole::User, message);
    let reply = client
        .complete_or_message(message, &coach_context(days_until_interview))
        .await;
    session.append_chat_turn(ChatRole::Assistant, reply.clone());
    tracing::debug!(
        history_len = session.chat_history().len(),
        "coach turn recorded"
    );
    reply
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::completion::NOT_CONFIGURED_MESSAGE;
    use crate::testing::RecordingProvider;
    use prepcoach_schema::Category;

    #[tokio::test]
    async fn coach_turn_appends_user_and_assistant() {
        let provider = Arc::new(RecordingProvider::new("Practice STAR stories."));
        let client = CompletionClient::new("m", 100).with_provider(provider.clone());
        let mut session = InterviewSession::default();

        let reply = ask_coach(&mut session, &client, "How do I prep LPs?", 3).await;

        assert_eq!(reply, "Practice STAR stories.");
        let history = session.chat_history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, ChatRole::User);
        assert_eq!(history[0].content, "How do I prep LPs?");
        assert_eq!(history[1].role, ChatRole::Assistant);
        assert_eq!(history[1].content, "Practice STAR stories.");

        let sent = provider.requests()[0].last_text().to_string();
        assert!(sent.contains("practicing for the interview in 3 days"));
        assert!(sent.contains("User: How do I prep LPs?"));
    }

    #[tokio::test]
    async fn unconfigured_coach_still_records_reply() {
        let client = CompletionClient::new("m", 100);
        let mut session = InterviewSession::default();

        let reply = ask_coach(&mut session, &client, "hello", 3).await;

        assert_eq!(reply, NOT_CONFIGURED_MESSAGE);
        assert_eq!(session.chat_history().len(), 2);
    }

    #[tokio::test]
    async fn coach_chat_advances_question_rotation() {
        let client = CompletionClient::new("m", 100);
        let mut session = InterviewSession::default();
        assert_eq!(session.request_question(Category::Dsa).question.id, 1);

        ask_coach(&mut session, &client, "hi", 3).await;

        assert_eq!(session.request_question(Category::Dsa).question.id, 3);
    }

    #[test]
    fn context_mentions_days() {
        assert!(coach_context(5).ends_with("in 5 days."));
    }
}
