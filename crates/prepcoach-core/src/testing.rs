//! Provider doubles shared by the unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use prepcoach_provider::{LlmProvider, LlmRequest, LlmResponse};

pub(crate) struct FailProvider;

#[async_trait]
impl LlmProvider for FailProvider {
    async fn chat(&self, _request: LlmRequest) -> anyhow::Result<LlmResponse> {
        Err(anyhow!("forced failure"))
    }
}

pub(crate) struct SlowProvider(pub Duration);

#[async_trait]
impl LlmProvider for SlowProvider {
    async fn chat(&self, _request: LlmRequest) -> anyhow::Result<LlmResponse> {
        tokio::time::sleep(self.0).await;
        Ok(LlmResponse::text("too late"))
    }
}

/// Replies with a fixed text and keeps every request it saw.
pub(crate) struct RecordingProvider {
    reply: String,
    seen: Mutex<Vec<LlmRequest>>,
}

impl RecordingProvider {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<LlmRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for RecordingProvider {
    async fn chat(&self, request: LlmRequest) -> anyhow::Result<LlmResponse> {
        self.seen.lock().unwrap().push(request);
        Ok(LlmResponse::text(self.reply.clone()))
    }
}

/// Pops replies in order; falls back to an empty text once drained.
pub(crate) struct ScriptedProvider {
    replies: Mutex<VecDeque<String>>,
}

impl ScriptedProvider {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
        }
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn chat(&self, _request: LlmRequest) -> anyhow::Result<LlmResponse> {
        let next = self.replies.lock().unwrap().pop_front().unwrap_or_default();
        Ok(LlmResponse::text(next))
    }
}
