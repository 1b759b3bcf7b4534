use super::client::GeminiHttpClient;
use super::types::{Content, GenerateContentResponse, Part};
use crate::ai::TextGenerationService;
use crate::request::TextRequest;
use crate::{Error, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct StructuredTextRequest<'a> {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: StructuredGenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StructuredGenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a serde_json::Value,
}

/// Gemini `generateContent` client that asks for JSON output matching the
/// request's schema.
pub struct GeminiTextClient {
    http: GeminiHttpClient,
}

impl GeminiTextClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(
                api_key,
                model,
                Duration::from_secs(30),
                client,
            ),
        }
    }

    /// Concatenate the text parts of the first candidate.
    fn extract_text(response: &GenerateContentResponse) -> Option<String> {
        let content = response.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| match p {
                Part::Text { text } => Some(text.as_str()),
                Part::InlineData { .. } => None,
            })
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    fn describe_empty(response: &GenerateContentResponse) -> String {
        if let Some(reason) = response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return format!("Gemini blocked the prompt ({})", reason);
        }
        match response
            .candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
        {
            Some(reason) => format!("No text in Gemini response (finish reason {})", reason),
            None => "No text in Gemini response".to_string(),
        }
    }
}

#[cfg(test)]
super::impl_with_gemini_base_url!(GeminiTextClient);

#[async_trait]
impl TextGenerationService for GeminiTextClient {
    async fn generate_text(&self, request: &TextRequest) -> Result<String> {
        let body = StructuredTextRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part::Text {
                    text: request.prompt.clone(),
                }],
            }],
            generation_config: StructuredGenerationConfig {
                response_mime_type: "application/json",
                response_schema: &request.response_schema,
            },
        };

        tracing::debug!("Requesting structured content from {}", self.http.model());
        let response: GenerateContentResponse = self.http.generate_content(&body).await?;

        let text = Self::extract_text(&response)
            .ok_or_else(|| Error::AiProvider(Self::describe_empty(&response)))?;
        tracing::debug!("Gemini returned {} chars of structured content", text.len());
        Ok(text)
    }
}
