//! AI service integration for caption and poster generation
//!
//! The generator talks to two services: a text model that returns the
//! captions and content calendar as JSON, and an image model that renders the
//! poster. Both sit behind traits so tests can swap in mocks.

pub mod gemini;
pub mod mime;
pub mod mock;

pub use gemini::{GeminiImagenClient, GeminiTextClient};
pub use mock::{MockImageGenerationClient, MockTextGenerationClient};

use crate::models::GeneratedImage;
use crate::request::{ImageRequest, TextRequest};
use crate::Result;
use async_trait::async_trait;

/// Structured text generation. Returns the model's raw JSON text.
#[async_trait]
pub trait TextGenerationService: Send + Sync {
    async fn generate_text(&self, request: &TextRequest) -> Result<String>;
}

/// Image generation. May return zero images when the provider filters them.
#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    async fn generate_images(&self, request: &ImageRequest) -> Result<Vec<GeneratedImage>>;
}
