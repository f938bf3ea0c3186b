// src/optimizer/mod.rs — Evaluator-optimizer feedback loop
//
// Closed loop of generate -> evaluate -> select -> feed back, repeated for
// a fixed number of rounds. Strictly sequential: each round's generation
// depends on the previous round's feedback, so there is no concurrency
// opportunity inside the loop.

pub mod evaluator;
pub mod generator;

use std::sync::Arc;

use evaluator::Evaluator;
use generator::Generator;

use crate::infra::errors::DraftmillError;
use crate::provider::{CompletionClient, CompletionRequest};

pub(crate) const SYSTEM_PROMPT: &str = "\
You are an AI assistant helping with email marketing optimization.
When asked for JSON output, always format properly within ```json code blocks.
Focus on creating compelling, concise, and effective email subject lines.";

#[derive(Debug, Clone, Copy)]
pub struct OptimizeParams {
    /// Generate-evaluate-refine rounds.
    pub iterations: usize,
    /// Candidates generated per round.
    pub options_per_iteration: usize,
}

impl Default for OptimizeParams {
    fn default() -> Self {
        Self {
            iterations: 3,
            options_per_iteration: 5,
        }
    }
}

impl OptimizeParams {
    fn validate(&self) -> Result<(), DraftmillError> {
        if self.iterations == 0 {
            return Err(DraftmillError::InvalidParameter {
                name: "iterations",
                message: "must be at least 1".into(),
            });
        }
        if self.options_per_iteration == 0 {
            return Err(DraftmillError::InvalidParameter {
                name: "options_per_iteration",
                message: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

/// Final state of one optimize run.
#[derive(Debug, Clone, PartialEq)]
pub struct Optimized {
    pub candidate: String,
    pub score: u32,
    pub rounds: usize,
}

/// Iteratively improves a generated artifact by scoring candidate batches
/// and carrying qualitative feedback into the next round's seed content.
pub struct Optimizer {
    generator: Generator,
    evaluator: Evaluator,
    client: Arc<dyn CompletionClient>,
}

impl Optimizer {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            generator: Generator::new(client.clone()),
            evaluator: Evaluator::new(client.clone()),
            client,
        }
    }

    /// Run the full loop over `content`.
    ///
    /// Selection is strict-greater: a candidate replaces the incumbent only
    /// when its total score exceeds the best seen so far, so ties keep the
    /// earliest winner (scan order is generation order, rounds
    /// earliest-first). Feedback runs only when more rounds remain and is
    /// appended to the seed content, which grows monotonically.
    pub async fn optimize(
        &self,
        content: &str,
        params: OptimizeParams,
    ) -> Result<Optimized, DraftmillError> {
        params.validate()?;

        let mut best = String::new();
        let mut best_score: u32 = 0;
        let mut seed = content.to_string();

        for round in 0..params.iterations {
            tracing::info!(round = round + 1, iterations = params.iterations, "optimizer round");

            let candidates = self
                .generator
                .generate(&seed, params.options_per_iteration)
                .await?;

            for candidate in &candidates {
                let scores = self.evaluator.evaluate(candidate, &seed).await?;
                tracing::debug!(candidate, total = scores.total_score, "candidate scored");

                if scores.total_score > best_score {
                    best = candidate.clone();
                    best_score = scores.total_score;
                }
            }

            // Feedback only helps rounds that follow.
            if round + 1 < params.iterations {
                let feedback = self.request_feedback(&best, best_score).await?;
                tracing::debug!(round = round + 1, feedback, "carrying feedback forward");
                seed.push_str(&format!("\nImprovement feedback: {feedback}"));
            }
        }

        Ok(Optimized {
            candidate: best,
            score: best_score,
            rounds: params.iterations,
        })
    }

    async fn request_feedback(
        &self,
        best: &str,
        best_score: u32,
    ) -> Result<String, DraftmillError> {
        let prompt = format!(
            "Based on the best subject line so far: \"{best}\" with score {best_score},\n\
             provide brief feedback on how to improve for the next iteration."
        );
        let response = self
            .client
            .complete(CompletionRequest::text(prompt).with_system(SYSTEM_PROMPT))
            .await?;
        Ok(response.text)
    }
}
