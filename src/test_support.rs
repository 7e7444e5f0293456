//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::inference::{AnswerFetcher, ProviderError};

/// A fetcher that must never be called.
pub struct NoopFetcher;

#[async_trait]
impl AnswerFetcher for NoopFetcher {
    fn name(&self) -> &str {
        "noop"
    }

    async fn fetch_answer(&self, _prompt: &str) -> Result<String, ProviderError> {
        Ok(String::new())
    }
}

/// What a [`ScriptedFetcher`] does when called.
pub enum Script {
    Answer(&'static str),
    Fail,
    Panic,
}

/// A fetcher with a fixed behavior, an optional delay, and a call counter.
pub struct ScriptedFetcher {
    script: Script,
    delay: Duration,
    calls: AtomicUsize,
}

impl ScriptedFetcher {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnswerFetcher for ScriptedFetcher {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn fetch_answer(&self, _prompt: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match self.script {
            Script::Answer(text) => Ok(text.to_string()),
            Script::Fail => Err(ProviderError::Network("scripted failure".to_string())),
            Script::Panic => panic!("scripted panic"),
        }
    }
}

/// Creates a test App with a NoopFetcher.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(NoopFetcher), "test-model".to_string())
}
