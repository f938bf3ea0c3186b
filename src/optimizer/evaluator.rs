// src/optimizer/evaluator.rs — Rubric scoring of candidates

use std::sync::Arc;

use serde::Deserialize;

use crate::extract::extract_json;
use crate::infra::errors::DraftmillError;
use crate::provider::{CompletionClient, CompletionRequest};

use super::SYSTEM_PROMPT;

/// Maximum score per rubric dimension.
const DIMENSION_MAX: u8 = 10;

/// Scores on the four fixed rubric dimensions, each 0-10.
///
/// `total_score` is the evaluator model's stated sum and is authoritative:
/// the optimizer never recomputes it from the dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RubricScores {
    #[serde(default)]
    pub relevance: u8,
    #[serde(default)]
    pub catchiness: u8,
    #[serde(default)]
    pub clarity: u8,
    #[serde(default)]
    pub urgency: u8,
    #[serde(default)]
    pub total_score: u32,
}

impl RubricScores {
    /// Sentinel used when evaluator output cannot be parsed: the loop
    /// continues deterministically instead of aborting the round.
    pub fn zero() -> Self {
        Self {
            relevance: 0,
            catchiness: 0,
            clarity: 0,
            urgency: 0,
            total_score: 0,
        }
    }

    /// Clamp each dimension into its 0-10 range. The stated total is left
    /// untouched.
    pub fn clamped(mut self) -> Self {
        self.relevance = self.relevance.min(DIMENSION_MAX);
        self.catchiness = self.catchiness.min(DIMENSION_MAX);
        self.clarity = self.clarity.min(DIMENSION_MAX);
        self.urgency = self.urgency.min(DIMENSION_MAX);
        self
    }
}

/// Scores one candidate per completion call against the fixed rubric.
pub struct Evaluator {
    client: Arc<dyn CompletionClient>,
}

impl Evaluator {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Evaluate `candidate` against `content`.
    ///
    /// Transport errors propagate (a broken completion channel is fatal to
    /// the optimization run); unparseable or empty evaluator output
    /// downgrades to the zero-score sentinel.
    pub async fn evaluate(
        &self,
        candidate: &str,
        content: &str,
    ) -> Result<RubricScores, DraftmillError> {
        let prompt = format!(
            "Evaluate the following email subject line based on these criteria:\n\
             1. Relevance to content (0-10)\n\
             2. Catchiness (0-10)\n\
             3. Clarity (0-10)\n\
             4. Urgency (0-10)\n\n\
             Subject line: \"{candidate}\"\n\
             Email content: \"{content}\"\n\n\
             Return the result as a JSON object with keys 'relevance', 'catchiness', \
             'clarity', 'urgency', and 'total_score'.\n\
             The 'total_score' should be the sum of all other scores."
        );

        let text = match self
            .client
            .complete(CompletionRequest::text(prompt).with_system(SYSTEM_PROMPT))
            .await
        {
            Ok(response) => response.text,
            Err(DraftmillError::EmptyResponse { .. }) => String::new(),
            Err(e) => return Err(e),
        };

        match parse_scores(&text) {
            Ok(scores) => Ok(scores.clamped()),
            Err(e) => {
                tracing::warn!(candidate, error = %e, "unparseable evaluation, scoring zero");
                Ok(RubricScores::zero())
            }
        }
    }
}

fn parse_scores(text: &str) -> Result<RubricScores, DraftmillError> {
    let value = extract_json(text)?;
    Ok(serde_json::from_value(value)?)
}
