//! Request building for the two generation calls.
//!
//! Turns validated product input and a theme into the text request (prompt
//! plus structured-output schema) and the poster image request. Building is
//! pure: the same input always yields byte-identical requests.

use crate::models::{Platform, ProductInfo, CALENDAR_DAYS};
use crate::prompts;
use crate::theme::Theme;
use serde_json::{json, Value};

/// Instruction prompt and output schema for caption/calendar generation.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRequest {
    pub prompt: String,
    pub response_schema: Value,
}

/// Prompt and parameters for poster generation.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRequest {
    pub prompt: String,
    pub number_of_images: u32,
    pub aspect_ratio: String,
    pub output_mime_type: String,
}

pub fn build_requests(product: &ProductInfo, theme: Theme) -> (TextRequest, ImageRequest) {
    (build_text_request(product), build_image_request(product, theme))
}

pub fn build_text_request(product: &ProductInfo) -> TextRequest {
    let platform_names = Platform::ALL
        .iter()
        .map(|p| p.display_name())
        .collect::<Vec<_>>();
    let platform_names = match platform_names.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{}, dan {}", rest.join(", "), last),
        _ => platform_names.join(""),
    };

    let platform_instructions = Platform::ALL
        .iter()
        .map(|p| format!("   - **{}:** {}", p.display_name(), p.authoring_instruction()))
        .collect::<Vec<_>>()
        .join("\n");

    let calendar_days = CALENDAR_DAYS.to_string();
    let prompt = prompts::render(
        prompts::CONTENT_REQUEST,
        &[
            ("product_name", &product.product_name),
            ("description", &product.description),
            ("target_audience", &product.target_audience),
            ("promo", &product.promo),
            ("platform_names", &platform_names),
            ("platform_instructions", &platform_instructions),
            ("calendar_days", &calendar_days),
        ],
    );

    TextRequest {
        prompt,
        response_schema: content_response_schema(),
    }
}

pub fn build_image_request(product: &ProductInfo, theme: Theme) -> ImageRequest {
    let prompt = prompts::render(
        prompts::POSTER_IMAGE,
        &[
            ("product_name", &product.product_name),
            ("description", &product.description),
            ("style", theme.style_descriptor()),
        ],
    );

    ImageRequest {
        prompt,
        number_of_images: 1,
        aspect_ratio: "1:1".to_string(),
        output_mime_type: "image/jpeg".to_string(),
    }
}

/// Gemini response schema for `GeneratedContent`.
///
/// Uses the OpenAPI subset accepted by `generationConfig.responseSchema`.
pub fn content_response_schema() -> Value {
    let mut caption_properties = serde_json::Map::new();
    for platform in Platform::ALL {
        caption_properties.insert(
            platform.key().to_string(),
            json!({ "type": "STRING", "description": platform.schema_description() }),
        );
    }
    let caption_keys: Vec<&str> = Platform::ALL.iter().map(|p| p.key()).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "captions": {
                "type": "OBJECT",
                "properties": caption_properties,
                "required": caption_keys,
                "propertyOrdering": caption_keys,
            },
            "calendar": {
                "type": "ARRAY",
                "minItems": CALENDAR_DAYS,
                "maxItems": CALENDAR_DAYS,
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "day": { "type": "STRING", "description": "Hari ke- (e.g., 'Hari 1')" },
                        "idea": { "type": "STRING", "description": "Ide konten untuk hari itu" },
                    },
                    "required": ["day", "idea"],
                    "propertyOrdering": ["day", "idea"],
                },
            },
        },
        "required": ["captions", "calendar"],
        "propertyOrdering": ["captions", "calendar"],
    })
}
