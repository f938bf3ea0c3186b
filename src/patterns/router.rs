// src/patterns/router.rs — Classify-and-route: customer inquiry dispatch

use std::sync::Arc;

use serde::Deserialize;

use crate::extract::extract_json;
use crate::infra::errors::DraftmillError;
use crate::provider::{CompletionClient, CompletionRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Category {
    Technical,
    Billing,
    Product,
    /// Anything outside the fixed vocabulary routes here.
    #[serde(other)]
    General,
}

impl Category {
    fn response_kind(&self) -> &'static str {
        match self {
            Category::Technical => "technical support",
            Category::Billing => "billing-related",
            Category::Product => "product information",
            Category::General => "general",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Classification {
    #[serde(default = "default_language")]
    pub language: String,
    pub category: Category,
}

fn default_language() -> String {
    "English".into()
}

pub struct InquiryRouter {
    client: Arc<dyn CompletionClient>,
}

impl InquiryRouter {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Classify the inquiry, then generate a response with the handler
    /// prompt matching its category, in the detected language.
    pub async fn route(&self, inquiry: &str) -> Result<(Classification, String), DraftmillError> {
        let classification = self.classify(inquiry).await?;
        tracing::info!(
            language = %classification.language,
            category = ?classification.category,
            "inquiry classified"
        );

        let prompt = format!(
            "Generate a {} response in {} for the following inquiry:\n\"{}\"",
            classification.category.response_kind(),
            classification.language,
            inquiry
        );
        let response = self.client.complete(CompletionRequest::text(prompt)).await?;
        Ok((classification, response.text))
    }

    async fn classify(&self, inquiry: &str) -> Result<Classification, DraftmillError> {
        let prompt = format!(
            "Analyze the following customer inquiry. Identify the language and the main \
             topic category.\n\
             Return the result as a JSON object with keys 'language' and 'category'.\n\
             Language should be one of: 'English', 'Spanish', 'French', 'German', or 'Other'.\n\
             Category should be one of: 'Technical', 'Billing', 'Product', or 'General'.\n\n\
             Customer Inquiry: \"{inquiry}\""
        );
        let response = self.client.complete(CompletionRequest::text(prompt)).await?;
        let value = extract_json(&response.text)?;
        Ok(serde_json::from_value(value)?)
    }
}
