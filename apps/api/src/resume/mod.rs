//! Resume generation pipeline: prompt building, optional summarization, and
//! the schema-validated generation retry loop.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod schema;
pub mod summarizer;

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted completion backend shared by the pipeline tests.

    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::llm_client::{CompletionBackend, LlmError};

    /// Replays a fixed list of responses and records every call it receives.
    pub struct ScriptedBackend {
        responses: Mutex<Vec<Result<String, LlmError>>>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedBackend {
        pub fn new(responses: Vec<Result<String, LlmError>>) -> Self {
            Self {
                responses: Mutex::new(responses),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn replies(texts: &[&str]) -> Self {
            Self::new(texts.iter().map(|t| Ok((*t).to_string())).collect())
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        /// System prompts in call order.
        pub fn systems(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|(system, _)| system.clone())
                .collect()
        }

        /// User contents in call order.
        pub fn user_contents(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|(_, user)| user.clone())
                .collect()
        }
    }

    #[async_trait]
    impl CompletionBackend for ScriptedBackend {
        async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
            self.calls
                .lock()
                .unwrap()
                .push((system.to_string(), user.to_string()));
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() {
                return Err(LlmError::Api {
                    status: 500,
                    body: "script exhausted".to_string(),
                });
            }
            responses.remove(0)
        }
    }
}
