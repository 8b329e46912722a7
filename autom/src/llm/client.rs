//! LlmClient trait definition

use async_trait::async_trait;

use super::{CompletionRequest, CompletionResponse, LlmError};

/// The remote model boundary
///
/// Each call carries the whole conversation; clients keep no state between
/// calls and never retry.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send one completion request and wait for the full response
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing::debug;

    /// Scripted LLM client for unit tests
    ///
    /// Returns `responses` in order and records every request it receives.
    pub struct MockLlmClient {
        responses: Vec<CompletionResponse>,
        repeat_last: bool,
        call_count: AtomicUsize,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl MockLlmClient {
        pub fn new(responses: Vec<CompletionResponse>) -> Self {
            debug!(response_count = %responses.len(), "MockLlmClient::new: called");
            Self {
                responses,
                repeat_last: false,
                call_count: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            }
        }

        /// Answer every call with the same response
        pub fn repeating(response: CompletionResponse) -> Self {
            Self {
                repeat_last: true,
                ..Self::new(vec![response])
            }
        }

        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }

        pub fn requests(&self) -> Vec<CompletionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmClient for MockLlmClient {
        async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
            debug!("MockLlmClient::complete: called");
            self.requests.lock().unwrap().push(request);
            let idx = self.call_count.fetch_add(1, Ordering::SeqCst);

            let response = if self.repeat_last {
                self.responses.get(idx).or_else(|| self.responses.last())
            } else {
                self.responses.get(idx)
            };

            response.cloned().ok_or_else(|| {
                debug!("MockLlmClient::complete: no more mock responses");
                LlmError::InvalidResponse("No more mock responses".to_string())
            })
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::llm::OutputItem;

        fn request() -> CompletionRequest {
            CompletionRequest {
                model: "test-model".to_string(),
                system_prompt: "Test".to_string(),
                messages: vec![],
                tools: vec![],
            }
        }

        #[tokio::test]
        async fn test_mock_client_returns_responses_in_order() {
            let client = MockLlmClient::new(vec![
                CompletionResponse::new(vec![OutputItem::message("Response 1")]),
                CompletionResponse::new(vec![OutputItem::message("Response 2")]),
            ]);

            let resp1 = client.complete(request()).await.unwrap();
            assert_eq!(resp1.output, vec![OutputItem::message("Response 1")]);

            let resp2 = client.complete(request()).await.unwrap();
            assert_eq!(resp2.output, vec![OutputItem::message("Response 2")]);

            assert_eq!(client.call_count(), 2);
            assert_eq!(client.requests().len(), 2);
        }

        #[tokio::test]
        async fn test_mock_client_errors_when_exhausted() {
            let client = MockLlmClient::new(vec![]);
            assert!(client.complete(request()).await.is_err());
        }

        #[tokio::test]
        async fn test_repeating_mock_never_runs_out() {
            let client = MockLlmClient::repeating(CompletionResponse::new(vec![OutputItem::message("again")]));

            for _ in 0..3 {
                assert!(client.complete(request()).await.is_ok());
            }
            assert_eq!(client.call_count(), 3);
        }
    }
}
