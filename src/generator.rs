//! Generation orchestration.
//!
//! Issues the caption/calendar request and the poster request concurrently,
//! waits for both, and assembles a [`GenerationResult`]. Either both halves
//! succeed or the whole call fails; there is no partial result and no retry.

use crate::ai::{ImageGenerationService, TextGenerationService};
use crate::models::{
    GeneratedContent, GeneratedImage, GenerationResult, ProductInfo, CALENDAR_DAYS,
};
use crate::request::build_requests;
use crate::theme::Theme;
use crate::{Error, Result};
use tracing::{error, info};

/// Stateless front door to the two generation services.
///
/// Holds no per-call state, so one instance can serve any number of
/// concurrent `generate` calls.
pub struct ContentGenerator {
    text: Box<dyn TextGenerationService>,
    image: Box<dyn ImageGenerationService>,
}

impl ContentGenerator {
    pub fn new(
        text: Box<dyn TextGenerationService>,
        image: Box<dyn ImageGenerationService>,
    ) -> Self {
        Self { text, image }
    }

    /// Produce captions, a content calendar and a poster for `product`.
    ///
    /// Expects `product` to have passed [`ProductInfo::validate`]. Failures
    /// are logged with full detail and returned as `MalformedResponse`,
    /// `EmptyImageResult` or `GenerationFailed`; all three map to the same
    /// [`Error::user_message`].
    pub async fn generate(
        &self,
        product: &ProductInfo,
        theme: Theme,
    ) -> Result<GenerationResult> {
        info!(
            "Generating promotional content for '{}' (theme: {})",
            product.product_name, theme
        );

        self.generate_inner(product, theme).await.map_err(|e| {
            error!(
                "Error generating promotional content for '{}': {}",
                product.product_name, e
            );
            e
        })
    }

    async fn generate_inner(
        &self,
        product: &ProductInfo,
        theme: Theme,
    ) -> Result<GenerationResult> {
        let (text_request, image_request) = build_requests(product, theme);

        let (text, images) = tokio::join!(
            self.text.generate_text(&text_request),
            self.image.generate_images(&image_request)
        );

        // Either branch failing discards the other's result.
        let text = text.map_err(into_generation_failure)?;
        let images = images.map_err(into_generation_failure)?;

        let content = parse_generated_content(&text)?;
        let image = first_image(images)?;
        info!(
            "Generated {} calendar entries and a {} byte poster",
            content.calendar.len(),
            image.data.len()
        );

        Ok(GenerationResult {
            content,
            image_url: image.to_data_uri(),
        })
    }
}

/// Fold provider and transport errors into `GenerationFailed`, keeping the
/// already-classified generation errors as they are.
fn into_generation_failure(err: Error) -> Error {
    if err.is_generation_failure() {
        err
    } else {
        Error::GenerationFailed(Box::new(err))
    }
}

/// Parse the model's JSON output into [`GeneratedContent`].
///
/// Every caption key must be present and the calendar must hold exactly
/// [`CALENDAR_DAYS`] entries.
pub fn parse_generated_content(raw: &str) -> Result<GeneratedContent> {
    let content: GeneratedContent = serde_json::from_str(raw.trim())
        .map_err(|e| Error::MalformedResponse(e.to_string()))?;

    if content.calendar.len() != CALENDAR_DAYS {
        return Err(Error::MalformedResponse(format!(
            "expected {} calendar entries, got {}",
            CALENDAR_DAYS,
            content.calendar.len()
        )));
    }

    Ok(content)
}

fn first_image(images: Vec<GeneratedImage>) -> Result<GeneratedImage> {
    images
        .into_iter()
        .next()
        .filter(|image| !image.data.is_empty())
        .ok_or(Error::EmptyImageResult)
}
