//! Scripted `ChatCompletion` implementation for tests.
//!
//! Every call is recorded; the response is decided by a closure over
//! `(model, prompt)`, so a test can fail exactly the call it cares about.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{ChatCompletion, LlmError};

type Responder = Box<dyn Fn(&str, &str) -> Result<String, LlmError> + Send + Sync>;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub model: String,
    pub prompt: String,
    pub max_tokens: u32,
}

pub struct ScriptedClient {
    responder: Responder,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedClient {
    pub fn new(
        responder: impl Fn(&str, &str) -> Result<String, LlmError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Succeeds on every call with the same text.
    pub fn always(text: &str) -> Self {
        let text = text.to_string();
        Self::new(move |_, _| Ok(text.clone()))
    }

    /// Fails on every call.
    pub fn failing() -> Self {
        Self::new(|_, _| {
            Err(LlmError::Api {
                status: 503,
                message: "service unavailable".to_string(),
            })
        })
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatCompletion for ScriptedClient {
    async fn complete(
        &self,
        model: &str,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            model: model.to_string(),
            prompt: prompt.to_string(),
            max_tokens,
        });
        (self.responder)(model, prompt)
    }
}
