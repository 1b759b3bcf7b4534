//! Application wiring: builds the provider clients from configuration, runs a
//! generation for one product and saves the poster for download.

use crate::ai::{
    GeminiImagenClient, GeminiTextClient, ImageGenerationService, TextGenerationService,
};
use crate::generator::ContentGenerator;
use crate::models::{Config, GenerationResult, ProductInfo};
use crate::theme::Theme;
use crate::view::ShopLinks;
use crate::Result;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Runs generations and writes posters into `output_dir`.
pub struct App {
    generator: ContentGenerator,
    output_dir: PathBuf,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub text: Box<dyn TextGenerationService>,
    pub image: Box<dyn ImageGenerationService>,
}

/// Everything produced for one product.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub result: GenerationResult,
    pub links: ShopLinks,
    pub poster_path: PathBuf,
}

impl App {
    /// Build an app from concrete service dependencies.
    ///
    /// This is primarily useful for integration tests and local harnesses that
    /// need to inject mocks.
    pub fn with_services(services: AppServices, output_dir: PathBuf) -> Self {
        Self {
            generator: ContentGenerator::new(services.text, services.image),
            output_dir,
        }
    }

    /// Construct an app talking to Gemini with the given configuration.
    pub fn new(config: &Config, output_dir: PathBuf) -> Self {
        // Reuse one HTTP connection pool across provider clients.
        let http_client = reqwest::Client::new();
        let api_key = config.gemini_api_key.clone().unwrap_or_default();

        info!("Text provider: Gemini (model: {})", config.text_model);
        let text = GeminiTextClient::new_with_client(
            api_key.clone(),
            config.text_model.clone(),
            http_client.clone(),
        );

        info!("Image provider: Imagen (model: {})", config.image_model);
        let image =
            GeminiImagenClient::new_with_client(api_key, config.image_model.clone(), http_client);

        Self::with_services(
            AppServices {
                text: Box::new(text),
                image: Box::new(image),
            },
            output_dir,
        )
    }

    /// Validate the form input, generate content and save the poster.
    pub async fn run(&self, product: &ProductInfo, theme: Theme) -> Result<GenerationOutcome> {
        product.validate()?;

        let result = self.generator.generate(product, theme).await?;
        let links = ShopLinks::for_product(product);

        fs::create_dir_all(&self.output_dir)?;
        let poster_path = self.output_dir.join(&links.download_filename);
        fs::write(&poster_path, result.image_bytes()?)?;
        info!("Saved poster at: {}", poster_path.display());

        Ok(GenerationOutcome {
            result,
            links,
            poster_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{App, AppServices};
    use crate::ai::{MockImageGenerationClient, MockTextGenerationClient};
    use crate::models::{ProductImage, ProductInfo};
    use crate::theme::Theme;
    use crate::Error;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    const POSTER_BYTES: [u8; 6] = [0xFF, 0xD8, 0xFF, 0xE0, 0x12, 0x34];

    fn build_test_app(
        output_dir: &Path,
        text: MockTextGenerationClient,
        image: MockImageGenerationClient,
    ) -> App {
        App::with_services(
            AppServices {
                text: Box::new(text),
                image: Box::new(image),
            },
            output_dir.to_path_buf(),
        )
    }

    fn complete_product() -> ProductInfo {
        ProductInfo {
            product_name: "Es Kopi Susu!!".to_string(),
            description: "Kopi susu gula aren".to_string(),
            shop_name: "Kopi Kita".to_string(),
            whatsapp_number: "081234567890".to_string(),
            product_image: Some(ProductImage {
                file_name: "kopi.jpg".to_string(),
                data: vec![0xFF, 0xD8, 0xFF],
            }),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_run_writes_poster_under_download_filename() {
        let dir = tempdir().unwrap();
        let output_dir = dir.path().join("output");
        let app = build_test_app(
            &output_dir,
            MockTextGenerationClient::new(),
            MockImageGenerationClient::new().with_image_response(POSTER_BYTES.to_vec()),
        );

        let outcome = app.run(&complete_product(), Theme::Modern).await.unwrap();

        assert_eq!(
            outcome.poster_path,
            output_dir.join("poster_Es_Kopi_Susu.jpeg")
        );
        assert_eq!(fs::read(&outcome.poster_path).unwrap(), POSTER_BYTES.to_vec());
        assert!(outcome
            .links
            .whatsapp_url
            .starts_with("https://wa.me/6281234567890"));
        assert_eq!(outcome.result.content.calendar.len(), 7);
    }

    #[tokio::test]
    async fn test_run_rejects_incomplete_form_without_calling_providers() {
        let dir = tempdir().unwrap();
        let text = MockTextGenerationClient::new();
        let image = MockImageGenerationClient::new();
        let text_probe = text.clone();
        let image_probe = image.clone();
        let app = build_test_app(dir.path(), text, image);

        let mut product = complete_product();
        product.product_image = None;

        let err = app.run(&product, Theme::Modern).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(text_probe.get_call_count(), 0);
        assert_eq!(image_probe.get_call_count(), 0);
    }

    #[tokio::test]
    async fn test_run_failure_writes_nothing() {
        let dir = tempdir().unwrap();
        let output_dir = dir.path().join("output");
        let app = build_test_app(
            &output_dir,
            MockTextGenerationClient::new().with_error("status 503"),
            MockImageGenerationClient::new(),
        );

        let err = app.run(&complete_product(), Theme::Modern).await.unwrap_err();
        assert!(err.is_generation_failure());
        assert!(!output_dir.exists());
    }
}
