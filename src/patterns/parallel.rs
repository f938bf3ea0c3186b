// src/patterns/parallel.rs — Parallelization: concurrent review summarization
//
// Every review is submitted before any result is awaited; summaries are
// collected in completion order. One failing review is recorded as a
// failed outcome and never blocks the others.

use std::sync::Arc;

use tokio::task::JoinSet;

use crate::infra::errors::DraftmillError;
use crate::provider::{CompletionClient, CompletionRequest};
use crate::util::excerpt;

/// Review text shown in logs and CLI output.
const REVIEW_EXCERPT_LEN: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub enum SummaryOutcome {
    Summarized(String),
    Failed(String),
}

impl SummaryOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SummaryOutcome::Summarized(_))
    }

    pub fn summary(&self) -> Option<&str> {
        match self {
            SummaryOutcome::Summarized(summary) => Some(summary),
            SummaryOutcome::Failed(_) => None,
        }
    }
}

/// One per-review entry of the aggregate, carrying the review it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewSummary {
    pub review: String,
    pub outcome: SummaryOutcome,
}

pub struct ReviewSummarizer {
    client: Arc<dyn CompletionClient>,
}

impl ReviewSummarizer {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Summarize every review concurrently, one completion call each.
    ///
    /// Returns exactly one entry per input review, in completion order
    /// (which is non-deterministic and carries no meaning).
    pub async fn summarize_reviews(
        &self,
        reviews: &[String],
    ) -> Result<Vec<ReviewSummary>, DraftmillError> {
        let mut tasks = JoinSet::new();
        for review in reviews {
            let client = self.client.clone();
            let review = review.clone();

            tasks.spawn(async move {
                let outcome = match summarize_one(client.as_ref(), &review).await {
                    Ok(summary) => {
                        tracing::info!(
                            review = %excerpt(&review, REVIEW_EXCERPT_LEN),
                            "review summarized"
                        );
                        SummaryOutcome::Summarized(summary)
                    }
                    Err(e) => {
                        tracing::warn!(
                            review = %excerpt(&review, REVIEW_EXCERPT_LEN),
                            error = %e,
                            "review summarization failed"
                        );
                        SummaryOutcome::Failed(e.to_string())
                    }
                };
                ReviewSummary { review, outcome }
            });
        }

        let mut summaries = Vec::with_capacity(reviews.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(summary) => summaries.push(summary),
                Err(e) => tracing::error!(error = %e, "summarization task join failed"),
            }
        }

        Ok(summaries)
    }
}

async fn summarize_one(
    client: &dyn CompletionClient,
    review: &str,
) -> Result<String, DraftmillError> {
    let prompt = format!(
        "Summarize the following product review in one sentence:\n\"{review}\""
    );
    let response = client.complete(CompletionRequest::text(prompt)).await?;
    Ok(response.text)
}
