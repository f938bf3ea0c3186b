// tests/orchestrator_test.rs — Integration tests: fan-out/fan-in with a mock client

use std::sync::Arc;

use async_trait::async_trait;

use draftmill::infra::errors::DraftmillError;
use draftmill::orchestrator::workers::document_analysis;
use draftmill::orchestrator::{Orchestrator, Worker, WorkerOutcome};
use draftmill::provider::{
    ChunkStream, CompletionClient, CompletionRequest, CompletionResponse, ContentBlock, TextChunk,
    TokenUsage,
};

const SAMPLE_PAPER: &str = "Title: Advanced ML Techniques\n\
    Authors: John Doe, Jane Smith\n\
    Abstract: This paper explores...\n\
    Methodology: We used a novel approach...\n\
    Findings: Our results show significant improvements...";

/// Canned responses keyed off prompt content; no network calls.
struct MockClient {
    /// Prompts containing this marker fail with a transport error.
    fail_on: Option<&'static str>,
}

impl MockClient {
    fn new() -> Self {
        Self { fail_on: None }
    }

    fn failing_on(marker: &'static str) -> Self {
        Self {
            fail_on: Some(marker),
        }
    }
}

fn first_text(request: &CompletionRequest) -> &str {
    request
        .messages
        .iter()
        .flat_map(|m| m.content.iter())
        .find_map(|block| match block {
            ContentBlock::Text(text) => Some(text.as_str()),
            _ => None,
        })
        .unwrap_or("")
}

fn canned_response(prompt: &str) -> &'static str {
    if prompt.contains("key information") {
        "```json\n{\"title\": \"Advanced ML Techniques\", \
         \"authors\": [\"John Doe\", \"Jane Smith\"], \
         \"abstract\": \"This paper explores...\"}\n```"
    } else if prompt.contains("main topics") {
        "```json\n{\"main_topics\": [\"machine learning\"], \"keywords\": [\"ML\", \"novel\"]}\n```"
    } else if prompt.contains("methodology") {
        "The study used a novel approach over a two-year period."
    } else if prompt.contains("key findings") {
        "```json\n[\"Significant improvements over baselines\"]\n```"
    } else {
        "OK"
    }
}

#[async_trait]
impl CompletionClient for MockClient {
    fn id(&self) -> &str {
        "mock"
    }

    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, DraftmillError> {
        let prompt = first_text(&request);
        if let Some(marker) = self.fail_on {
            if prompt.contains(marker) {
                return Err(DraftmillError::Provider {
                    provider: "mock".into(),
                    message: "simulated outage".into(),
                    retriable: false,
                });
            }
        }

        Ok(CompletionResponse {
            text: canned_response(prompt).to_string(),
            usage: TokenUsage {
                input_tokens: 100,
                output_tokens: 50,
            },
        })
    }

    async fn complete_stream(
        &self,
        request: CompletionRequest,
    ) -> Result<ChunkStream, DraftmillError> {
        // Deliver the canned response in two deltas.
        let text = canned_response(first_text(&request)).to_string();
        let mid = text.len() / 2;
        let chunks = vec![
            Ok(TextChunk {
                delta: text[..mid].to_string(),
            }),
            Ok(TextChunk {
                delta: text[mid..].to_string(),
            }),
        ];
        Ok(Box::pin(futures::stream::iter(chunks)))
    }
}

#[tokio::test]
async fn test_all_workers_succeed() {
    let client: Arc<dyn CompletionClient> = Arc::new(MockClient::new());
    let orchestrator = document_analysis(client, 4);

    let results = orchestrator.process_document(SAMPLE_PAPER).await.unwrap();

    assert_eq!(results.len(), 4);
    for name in ["info", "topics", "methodology", "findings"] {
        assert!(results[name].is_success(), "{name} should succeed");
    }
    assert_eq!(
        results["info"].value().unwrap()["title"],
        "Advanced ML Techniques"
    );
    assert!(results["methodology"].value().unwrap().is_string());
}

#[tokio::test]
async fn test_partial_failure_isolation() {
    // methodology's completion call always fails; siblings are untouched
    let client: Arc<dyn CompletionClient> = Arc::new(MockClient::failing_on("methodology"));
    let orchestrator = document_analysis(client, 4);

    let results = orchestrator.process_document(SAMPLE_PAPER).await.unwrap();

    assert_eq!(results.len(), 4);
    assert!(!results["methodology"].is_success());
    assert!(results["methodology"].value().is_none());
    for name in ["info", "topics", "findings"] {
        assert!(results[name].is_success(), "{name} should still succeed");
    }
}

#[tokio::test]
async fn test_result_count_invariant_when_everything_fails() {
    // Every prompt mentions "the given scientific paper content"
    let client: Arc<dyn CompletionClient> = Arc::new(MockClient::failing_on("scientific paper"));
    let orchestrator = document_analysis(client, 4);

    let results = orchestrator.process_document(SAMPLE_PAPER).await.unwrap();

    assert_eq!(results.len(), 4);
    assert!(results.values().all(|outcome| !outcome.is_success()));
}

#[tokio::test]
async fn test_orchestrator_reusable_across_documents() {
    let client: Arc<dyn CompletionClient> = Arc::new(MockClient::new());
    let orchestrator = document_analysis(client, 4);

    let first = orchestrator.process_document(SAMPLE_PAPER).await.unwrap();
    let second = orchestrator
        .process_document("Title: Climate Change Effects\nAuthors: Alice Johnson")
        .await
        .unwrap();

    assert_eq!(first.len(), 4);
    assert_eq!(second.len(), 4);
}

#[tokio::test]
async fn test_slow_worker_does_not_block_fast_results() {
    struct SlowWorker;

    #[async_trait]
    impl Worker for SlowWorker {
        fn name(&self) -> &str {
            "slow"
        }

        async fn run(&self, _document: &str) -> Result<serde_json::Value, DraftmillError> {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            Ok(serde_json::json!("eventually"))
        }
    }

    struct FastFailingWorker;

    #[async_trait]
    impl Worker for FastFailingWorker {
        fn name(&self) -> &str {
            "fast"
        }

        async fn run(&self, _document: &str) -> Result<serde_json::Value, DraftmillError> {
            Err(DraftmillError::NoJsonPayload)
        }
    }

    let orchestrator = Orchestrator::new(4)
        .register(Arc::new(SlowWorker))
        .register(Arc::new(FastFailingWorker));

    let results = orchestrator.process_document("doc").await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(
        results["slow"],
        WorkerOutcome::Success(serde_json::json!("eventually"))
    );
    assert!(!results["fast"].is_success());
}

#[tokio::test]
async fn test_streaming_callback_receives_ordered_chunks() {
    let client = MockClient::new();
    let mut seen: Vec<String> = Vec::new();

    let full = client
        .stream_with_callback(
            CompletionRequest::text("Summarize the methodology of this paper"),
            &mut |chunk| seen.push(chunk.to_string()),
        )
        .await
        .unwrap();

    assert_eq!(full, "The study used a novel approach over a two-year period.");
    assert!(seen.len() >= 2);
    assert_eq!(seen.concat(), full);
}
