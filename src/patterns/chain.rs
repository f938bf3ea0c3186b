// src/patterns/chain.rs — Prompt chaining: customer-support email pipeline
//
// analyze inquiry (JSON) -> derive response points (JSON array) -> craft
// email (prose). Transport and extraction errors propagate; there is no
// partial-result contract for a broken chain.

use std::sync::Arc;

use crate::extract::extract_json;
use crate::infra::errors::DraftmillError;
use crate::provider::{CompletionClient, CompletionRequest};

pub struct SupportEmailChain {
    client: Arc<dyn CompletionClient>,
}

impl SupportEmailChain {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    pub async fn run(&self, inquiry: &str) -> Result<String, DraftmillError> {
        let analysis = self.analyze_inquiry(inquiry).await?;
        tracing::debug!(%analysis, "inquiry analyzed");

        let points = self.response_points(&analysis).await?;
        tracing::debug!(?points, "response points derived");

        self.craft_email(&analysis, &points).await
    }

    async fn analyze_inquiry(&self, inquiry: &str) -> Result<serde_json::Value, DraftmillError> {
        let prompt = format!(
            "Analyze the following customer inquiry. Identify the main issue and the \
             customer's sentiment.\n\
             Return the result as a JSON object with keys 'main_issue' and 'sentiment'.\n\n\
             Customer Inquiry: \"{inquiry}\""
        );
        let response = self.client.complete(CompletionRequest::text(prompt)).await?;
        extract_json(&response.text)
    }

    async fn response_points(
        &self,
        analysis: &serde_json::Value,
    ) -> Result<Vec<String>, DraftmillError> {
        let prompt = format!(
            "Based on the following analysis of a customer inquiry, generate a list of 3-5 \
             key points to address in the response.\n\
             Return the result as a JSON array of strings.\n\n\
             Analysis: {analysis}"
        );
        let response = self.client.complete(CompletionRequest::text(prompt)).await?;
        let value = extract_json(&response.text)?;
        let items = value.as_array().ok_or_else(|| DraftmillError::PayloadShape {
            expected: "array of strings".into(),
        })?;
        Ok(items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect())
    }

    async fn craft_email(
        &self,
        analysis: &serde_json::Value,
        points: &[String],
    ) -> Result<String, DraftmillError> {
        let prompt = format!(
            "Craft a personalized customer support email based on the following analysis \
             and key points.\n\
             The email should address the customer's concerns, match their sentiment, and \
             provide helpful information.\n\n\
             Analysis: {analysis}\n\
             Key Points: {points:?}\n\n\
             Begin the email with 'Dear Customer,' and end it with \
             'Best regards, Customer Support Team'."
        );
        let response = self.client.complete(CompletionRequest::text(prompt)).await?;
        Ok(response.text)
    }
}
