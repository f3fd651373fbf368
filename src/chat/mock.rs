use anyhow::Result;
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{ChatMessage, ChatModel};

/// A scripted chat model for tests. Returns pre-defined replies in order.
pub struct MockChat {
    replies: Vec<Result<String, String>>,
    index: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockChat {
    pub fn new(replies: Vec<String>) -> Self {
        Self::scripted(replies.into_iter().map(Ok).collect())
    }

    /// Replies that are `Err` make `complete` fail with that message.
    pub fn scripted(replies: Vec<Result<String, String>>) -> Self {
        Self {
            replies,
            index: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self::scripted(vec![Err(message.to_string())])
    }

    /// How many times `complete` has been called.
    pub fn calls(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }

    /// The last user message of every call, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ChatModel for MockChat {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        if let (Ok(mut prompts), Some(last)) = (self.prompts.lock(), messages.last()) {
            prompts.push(last.content.clone());
        }

        let i = self.index.fetch_add(1, Ordering::SeqCst);
        match self.replies.get(i) {
            Some(Ok(text)) => Ok(text.clone()),
            Some(Err(message)) => Err(anyhow::anyhow!("{}", message)),
            None => Err(anyhow::anyhow!(
                "MockChat: no more replies (called {} times)",
                i + 1
            )),
        }
    }
}
