use super::client::GeminiHttpClient;
use super::types::{
    OutputOptions, PredictInstance, PredictParameters, PredictRequest, PredictResponse,
};
use crate::ai::ImageGenerationService;
use crate::models::GeneratedImage;
use crate::request::ImageRequest;
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Imagen client using the Gemini API `predict` endpoint.
pub struct GeminiImagenClient {
    http: GeminiHttpClient,
}

impl GeminiImagenClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(
                api_key,
                model,
                Duration::from_secs(120),
                client,
            ),
        }
    }
}

#[cfg(test)]
super::impl_with_gemini_base_url!(GeminiImagenClient);

#[async_trait]
impl ImageGenerationService for GeminiImagenClient {
    async fn generate_images(&self, request: &ImageRequest) -> Result<Vec<GeneratedImage>> {
        let body = PredictRequest {
            instances: vec![PredictInstance {
                prompt: request.prompt.clone(),
            }],
            parameters: PredictParameters {
                sample_count: request.number_of_images,
                aspect_ratio: request.aspect_ratio.clone(),
                output_options: OutputOptions {
                    mime_type: request.output_mime_type.clone(),
                },
            },
        };

        let response: PredictResponse = self.http.predict(&body).await?;

        use base64::Engine as _;
        let mut images = Vec::with_capacity(response.predictions.len());
        for prediction in response.predictions {
            let Some(encoded) = prediction.bytes_base64_encoded else {
                tracing::warn!(
                    "Imagen prediction carried no image ({})",
                    prediction
                        .rai_filtered_reason
                        .as_deref()
                        .unwrap_or("no reason given")
                );
                continue;
            };
            let data = base64::engine::general_purpose::STANDARD
                .decode(&encoded)
                .map_err(|e| {
                    Error::AiProvider(format!("Failed to decode Imagen base64 image: {}", e))
                })?;
            let mime_type = prediction
                .mime_type
                .unwrap_or_else(|| request.output_mime_type.clone());
            tracing::debug!("Imagen returned {} bytes of {}", data.len(), mime_type);
            images.push(GeneratedImage { mime_type, data });
        }

        Ok(images)
    }
}
