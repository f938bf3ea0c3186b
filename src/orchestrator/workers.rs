// src/orchestrator/workers.rs — Document-analysis workers
//
// Four independent workers over one scientific-paper document. Each issues
// exactly one completion call; three expect fenced-JSON output, while the
// methodology summary is free prose wrapped as a JSON string so every
// worker yields a structured value.

use std::sync::Arc;

use async_trait::async_trait;

use super::{Orchestrator, Worker};
use crate::extract::extract_json;
use crate::infra::errors::DraftmillError;
use crate::provider::{CompletionClient, CompletionRequest};
use crate::util::excerpt;

/// Prompts embed only the head of large documents.
const DOCUMENT_EXCERPT_LEN: usize = 1000;

/// Build the standard document-analysis orchestrator: info, topics,
/// methodology, and findings workers sharing one completion client.
pub fn document_analysis(
    client: Arc<dyn CompletionClient>,
    pool_size: usize,
) -> Orchestrator {
    Orchestrator::new(pool_size)
        .register(Arc::new(KeyInfoWorker {
            client: client.clone(),
        }))
        .register(Arc::new(TopicsWorker {
            client: client.clone(),
        }))
        .register(Arc::new(MethodologyWorker {
            client: client.clone(),
        }))
        .register(Arc::new(FindingsWorker { client }))
}

pub struct KeyInfoWorker {
    pub client: Arc<dyn CompletionClient>,
}

#[async_trait]
impl Worker for KeyInfoWorker {
    fn name(&self) -> &str {
        "info"
    }

    async fn run(&self, document: &str) -> Result<serde_json::Value, DraftmillError> {
        let prompt = format!(
            "Extract the following key information from the given scientific paper content:\n\
             1. Title\n\
             2. Authors (as a list)\n\
             3. Abstract\n\n\
             Return the result as a JSON object with keys 'title', 'authors', and 'abstract'.\n\n\
             Paper content:\n{}",
            excerpt(document, DOCUMENT_EXCERPT_LEN)
        );
        let response = self.client.complete(CompletionRequest::text(prompt)).await?;
        extract_json(&response.text)
    }
}

pub struct TopicsWorker {
    pub client: Arc<dyn CompletionClient>,
}

#[async_trait]
impl Worker for TopicsWorker {
    fn name(&self) -> &str {
        "topics"
    }

    async fn run(&self, document: &str) -> Result<serde_json::Value, DraftmillError> {
        let prompt = format!(
            "Identify the main topics and keywords from the given scientific paper content.\n\
             Return the result as a JSON object with keys 'main_topics' (list) and 'keywords' (list).\n\n\
             Paper content:\n{}",
            excerpt(document, DOCUMENT_EXCERPT_LEN)
        );
        let response = self.client.complete(CompletionRequest::text(prompt)).await?;
        extract_json(&response.text)
    }
}

pub struct MethodologyWorker {
    pub client: Arc<dyn CompletionClient>,
}

#[async_trait]
impl Worker for MethodologyWorker {
    fn name(&self) -> &str {
        "methodology"
    }

    async fn run(&self, document: &str) -> Result<serde_json::Value, DraftmillError> {
        let prompt = format!(
            "Summarize the methodology described in the given scientific paper content.\n\
             Provide a concise summary in 2-3 sentences.\n\n\
             Paper content:\n{}",
            excerpt(document, DOCUMENT_EXCERPT_LEN)
        );
        let response = self.client.complete(CompletionRequest::text(prompt)).await?;
        Ok(serde_json::Value::String(response.text))
    }
}

pub struct FindingsWorker {
    pub client: Arc<dyn CompletionClient>,
}

#[async_trait]
impl Worker for FindingsWorker {
    fn name(&self) -> &str {
        "findings"
    }

    async fn run(&self, document: &str) -> Result<serde_json::Value, DraftmillError> {
        let prompt = format!(
            "Highlight the key findings from the given scientific paper content.\n\
             Return the result as a JSON array of strings, with each string representing a key finding.\n\n\
             Paper content:\n{}",
            excerpt(document, DOCUMENT_EXCERPT_LEN)
        );
        let response = self.client.complete(CompletionRequest::text(prompt)).await?;
        extract_json(&response.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_analysis_registers_workers_in_order() {
        struct NoopClient;

        #[async_trait]
        impl CompletionClient for NoopClient {
            fn id(&self) -> &str {
                "noop"
            }

            async fn complete(
                &self,
                _request: CompletionRequest,
            ) -> Result<crate::provider::CompletionResponse, DraftmillError> {
                Err(DraftmillError::EmptyResponse {
                    provider: "noop".into(),
                })
            }

            async fn complete_stream(
                &self,
                _request: CompletionRequest,
            ) -> Result<crate::provider::ChunkStream, DraftmillError> {
                Err(DraftmillError::EmptyResponse {
                    provider: "noop".into(),
                })
            }
        }

        let orchestrator = document_analysis(Arc::new(NoopClient), 4);
        // Registration order is the order analyze output is printed in
        assert_eq!(
            orchestrator.worker_names(),
            vec!["info", "topics", "methodology", "findings"]
        );
    }
}
