//! Data models and structures
//!
//! Defines the merchant input, the generated marketing content, and the
//! runtime configuration used to reach the Gemini APIs.

use crate::ai::mime::detect_image_mime;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Product photo uploaded by the merchant.
#[derive(Debug, Clone)]
pub struct ProductImage {
    pub file_name: String,
    pub data: Vec<u8>,
}

impl ProductImage {
    /// Read a photo from disk, rejecting files that are not a supported raster image.
    pub fn from_path(path: &Path) -> Result<Self> {
        let data = fs::read(path)?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("product")
            .to_string();
        Self::from_bytes(file_name, data)
    }

    pub fn from_bytes(file_name: String, data: Vec<u8>) -> Result<Self> {
        let format = image::guess_format(&data)?;
        match format {
            image::ImageFormat::Jpeg
            | image::ImageFormat::Png
            | image::ImageFormat::WebP
            | image::ImageFormat::Gif => Ok(Self { file_name, data }),
            other => Err(Error::Validation(format!(
                "unsupported product photo format: {:?}",
                other
            ))),
        }
    }
}

/// Everything the merchant fills in on the product form.
#[derive(Debug, Clone, Default)]
pub struct ProductInfo {
    pub product_name: String,
    pub description: String,
    pub target_audience: String,
    pub promo: String,
    pub shop_name: String,
    pub maps_link: String,
    pub whatsapp_number: String,
    pub product_image: Option<ProductImage>,
}

impl ProductInfo {
    /// Check the fields the form marks as required.
    ///
    /// Blank or whitespace-only values count as missing. The generator itself
    /// never re-validates, so callers run this before generating.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        let required = [
            ("product name", &self.product_name),
            ("description", &self.description),
            ("shop name", &self.shop_name),
            ("WhatsApp number", &self.whatsapp_number),
        ];
        for (label, value) in required {
            if value.trim().is_empty() {
                missing.push(label);
            }
        }
        if self.product_image.is_none() {
            missing.push("product photo");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Social platforms that receive a tailored caption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    WhatsApp,
    Instagram,
    Facebook,
    Threads,
    Marketplace,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::WhatsApp,
        Platform::Instagram,
        Platform::Facebook,
        Platform::Threads,
        Platform::Marketplace,
    ];

    /// JSON key used in the generated `captions` object.
    pub fn key(self) -> &'static str {
        match self {
            Platform::WhatsApp => "whatsapp",
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
            Platform::Threads => "threads",
            Platform::Marketplace => "marketplace",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Platform::WhatsApp => "WhatsApp",
            Platform::Instagram => "Instagram",
            Platform::Facebook => "Facebook",
            Platform::Threads => "Threads",
            Platform::Marketplace => "Marketplace",
        }
    }

    /// Field description sent in the response schema.
    pub fn schema_description(self) -> &'static str {
        match self {
            Platform::WhatsApp => "Caption untuk WhatsApp",
            Platform::Instagram => "Caption untuk Instagram dengan hashtags",
            Platform::Facebook => "Caption untuk Facebook",
            Platform::Threads => "Caption untuk Threads dalam bentuk utas",
            Platform::Marketplace => "Caption untuk Marketplace",
        }
    }

    /// Tone and format guidance given to the model for this platform.
    pub fn authoring_instruction(self) -> &'static str {
        match self {
            Platform::WhatsApp => "Buat pesan yang personal, ramah, dan langsung ke poin, diakhiri dengan ajakan untuk bertanya atau memesan.",
            Platform::Instagram => "Fokus pada visual, gunakan emoji, storytelling singkat, dan sertakan 5-7 hashtag yang relevan dan populer.",
            Platform::Facebook => "Buat caption yang sedikit lebih detail, bisa menyertakan cerita di balik produk, dan ajak audiens berdiskusi.",
            Platform::Threads => "Buat utas singkat (2-3 post) yang engaging, ringan, dan memancing percakapan. Mulai dengan hook yang kuat.",
            Platform::Marketplace => "Fokus pada keunggulan produk (USP), detail teknis/spesifikasi, dan gunakan format daftar (list) agar mudah dibaca.",
        }
    }
}

/// One caption per platform. Every field is required when deserializing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratedCaptions {
    pub whatsapp: String,
    pub instagram: String,
    pub facebook: String,
    pub threads: String,
    pub marketplace: String,
}

impl GeneratedCaptions {
    pub fn get(&self, platform: Platform) -> &str {
        match platform {
            Platform::WhatsApp => &self.whatsapp,
            Platform::Instagram => &self.instagram,
            Platform::Facebook => &self.facebook,
            Platform::Threads => &self.threads,
            Platform::Marketplace => &self.marketplace,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarEntry {
    pub day: String,
    pub idea: String,
}

/// Number of entries in a content calendar.
pub const CALENDAR_DAYS: usize = 7;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratedContent {
    pub captions: GeneratedCaptions,
    pub calendar: Vec<CalendarEntry>,
}

/// Raw image returned by the image provider.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl GeneratedImage {
    /// Encode as a `data:` URI that can be displayed directly.
    ///
    /// Falls back to magic-byte sniffing when the provider gave no mime type.
    pub fn to_data_uri(&self) -> String {
        use base64::Engine as _;
        let mime = if self.mime_type.trim().is_empty() {
            detect_image_mime(&self.data)
        } else {
            self.mime_type.as_str()
        };
        format!(
            "data:{};base64,{}",
            mime,
            base64::engine::general_purpose::STANDARD.encode(&self.data)
        )
    }
}

/// Captions, calendar and poster produced by one generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    pub content: GeneratedContent,
    pub image_url: String,
}

impl GenerationResult {
    /// Mime type declared in the poster's data URI.
    pub fn image_mime_type(&self) -> Option<&str> {
        self.image_url
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(";base64,"))
            .map(|(mime, _)| mime)
    }

    /// Decode the poster bytes back out of the data URI.
    pub fn image_bytes(&self) -> Result<Vec<u8>> {
        use base64::Engine as _;
        let payload = self
            .image_url
            .split_once(";base64,")
            .map(|(_, payload)| payload)
            .ok_or_else(|| Error::Invariant("Poster is not a base64 data URI".to_string()))?;
        base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| Error::Invariant(format!("Failed to decode poster data URI: {}", e)))
    }
}

// Configuration
const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_IMAGE_MODEL: &str = "imagen-4.0-generate-001";

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub text_model: String,
    pub image_model: String,
}

impl Config {
    /// Load `.env` if present, then read the process environment.
    ///
    /// A missing `.env` is fine; an unreadable or malformed one is an error.
    pub fn from_env() -> Result<Self> {
        ignore_missing_dotenv(dotenvy::dotenv())?;
        Ok(Self::from_lookup(|key| std::env::var(key).ok()))
    }

    /// Build a config from an arbitrary variable source.
    ///
    /// A missing API key is only warned about here; requests made without it
    /// fail at the provider.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let gemini_api_key = non_empty("GEMINI_API_KEY");
        if gemini_api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY is not set; generation requests will be rejected by the provider");
        }

        Self {
            gemini_api_key,
            text_model: non_empty("TEXT_MODEL").unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string()),
            image_model: non_empty("IMAGE_MODEL")
                .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
        }
    }
}

fn ignore_missing_dotenv<T>(result: dotenvy::Result<T>) -> Result<()> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    const PNG_HEADER: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    fn complete_product() -> ProductInfo {
        ProductInfo {
            product_name: "Es Kopi Susu".to_string(),
            description: "Kopi robusta dengan susu segar".to_string(),
            shop_name: "Kopi Kita".to_string(),
            whatsapp_number: "081234567890".to_string(),
            product_image: Some(
                ProductImage::from_bytes("kopi.png".to_string(), PNG_HEADER.to_vec()).unwrap(),
            ),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_accepts_complete_product() {
        assert!(complete_product().validate().is_ok());
    }

    #[test]
    fn test_validate_reports_every_missing_field() {
        let product = ProductInfo {
            product_name: "   ".to_string(),
            ..Default::default()
        };

        let err = product.validate().unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, Error::Validation(_)));
        for label in [
            "product name",
            "description",
            "shop name",
            "WhatsApp number",
            "product photo",
        ] {
            assert!(message.contains(label), "{} not in {}", label, message);
        }
    }

    #[test]
    fn test_optional_fields_are_not_required() {
        let product = complete_product();
        assert!(product.target_audience.is_empty());
        assert!(product.promo.is_empty());
        assert!(product.maps_link.is_empty());
        assert!(product.validate().is_ok());
    }

    #[test]
    fn test_product_image_rejects_non_image_bytes() {
        assert!(ProductImage::from_bytes("notes.txt".to_string(), b"hello".to_vec()).is_err());
    }

    #[test]
    fn test_product_image_from_path_keeps_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("foto.png");
        fs::write(&path, PNG_HEADER).unwrap();

        let image = ProductImage::from_path(&path).unwrap();
        assert_eq!(image.file_name, "foto.png");
        assert_eq!(image.data, PNG_HEADER.to_vec());
    }

    #[test]
    fn test_captions_require_all_platforms() {
        let json = r#"{"whatsapp":"a","instagram":"b","facebook":"c","threads":"d"}"#;
        assert!(serde_json::from_str::<GeneratedCaptions>(json).is_err());
    }

    #[test]
    fn test_captions_lookup_by_platform() {
        let captions = GeneratedCaptions {
            whatsapp: "wa".to_string(),
            instagram: "ig".to_string(),
            facebook: "fb".to_string(),
            threads: "th".to_string(),
            marketplace: "mp".to_string(),
        };

        let keys: Vec<&str> = Platform::ALL.iter().map(|p| p.key()).collect();
        assert_eq!(
            keys,
            vec!["whatsapp", "instagram", "facebook", "threads", "marketplace"]
        );
        assert_eq!(captions.get(Platform::Threads), "th");
        assert_eq!(captions.get(Platform::Marketplace), "mp");
    }

    #[test]
    fn test_data_uri_uses_provider_mime_type() {
        let image = GeneratedImage {
            mime_type: "image/jpeg".to_string(),
            data: vec![1, 2, 3],
        };
        assert_eq!(image.to_data_uri(), "data:image/jpeg;base64,AQID");
    }

    #[test]
    fn test_data_uri_sniffs_missing_mime_type() {
        let image = GeneratedImage {
            mime_type: String::new(),
            data: vec![0xFF, 0xD8, 0xFF, 0xE0],
        };
        assert!(image.to_data_uri().starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn test_generation_result_decodes_poster() {
        let image = GeneratedImage {
            mime_type: "image/jpeg".to_string(),
            data: vec![0xFF, 0xD8, 0xFF, 0x00],
        };
        let result = GenerationResult {
            content: GeneratedContent {
                captions: GeneratedCaptions {
                    whatsapp: String::new(),
                    instagram: String::new(),
                    facebook: String::new(),
                    threads: String::new(),
                    marketplace: String::new(),
                },
                calendar: Vec::new(),
            },
            image_url: image.to_data_uri(),
        };

        assert_eq!(result.image_mime_type(), Some("image/jpeg"));
        assert_eq!(result.image_bytes().unwrap(), image.data);
    }

    #[test]
    fn test_config_defaults_and_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([("GEMINI_API_KEY", "secret")]);
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.gemini_api_key.as_deref(), Some("secret"));
        assert_eq!(config.text_model, "gemini-2.5-flash");
        assert_eq!(config.image_model, "imagen-4.0-generate-001");

        let vars: HashMap<&str, &str> = HashMap::from([
            ("GEMINI_API_KEY", ""),
            ("TEXT_MODEL", "gemini-2.5-pro"),
            ("IMAGE_MODEL", "imagen-4.0-fast-generate-001"),
        ]);
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.gemini_api_key, None);
        assert_eq!(config.text_model, "gemini-2.5-pro");
        assert_eq!(config.image_model, "imagen-4.0-fast-generate-001");
    }

    #[test]
    fn test_missing_dotenv_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let result = ignore_missing_dotenv(dotenvy::from_path(dir.path().join(".env")));
        assert!(result.is_ok());
    }

    #[test]
    fn test_malformed_dotenv_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "GEMINI API KEY=secret\n").unwrap();

        let err = ignore_missing_dotenv(dotenvy::from_path(&path)).unwrap_err();
        assert!(matches!(err, Error::EnvVar(_)), "{:?}", err);
        assert!(!err.is_generation_failure());
    }
}
