// src/optimizer/generator.rs — Candidate generation

use std::sync::Arc;

use crate::extract::extract_json;
use crate::infra::errors::DraftmillError;
use crate::provider::{CompletionClient, CompletionRequest};

/// Forces the continuation to open a JSON array, so the combined
/// prefill + continuation always extracts cleanly.
pub(crate) const GENERATION_PREFILL: &str = "```json\n[\n  ";

/// Generates a batch of candidate subject lines with one combined
/// completion call per round (not one call per candidate).
pub struct Generator {
    client: Arc<dyn CompletionClient>,
}

impl Generator {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    pub async fn generate(
        &self,
        content: &str,
        count: usize,
    ) -> Result<Vec<String>, DraftmillError> {
        let prompt = format!(
            "Generate {count} engaging email subject lines for the following email content.\n\
             Each subject line should be unique and compelling.\n\
             Return the result as a JSON array of strings.\n\n\
             Email content:\n{content}"
        );

        let full = self
            .client
            .complete_with_prefill(
                CompletionRequest::text(prompt).with_prefill(GENERATION_PREFILL),
            )
            .await?;

        let value = extract_json(&full)?;
        let items = value.as_array().ok_or_else(|| DraftmillError::PayloadShape {
            expected: "array of strings".into(),
        })?;

        Ok(items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect())
    }
}
