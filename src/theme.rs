//! Visual style presets for the promotional poster.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    #[default]
    Modern,
    Cheerful,
    Elegant,
    Natural,
    Retro,
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::Modern,
        Theme::Cheerful,
        Theme::Elegant,
        Theme::Natural,
        Theme::Retro,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Theme::Modern => "modern",
            Theme::Cheerful => "cheerful",
            Theme::Elegant => "elegant",
            Theme::Natural => "natural",
            Theme::Retro => "retro",
        }
    }

    /// Name shown to the merchant.
    pub fn display_name(self) -> &'static str {
        match self {
            Theme::Modern => "Modern & Bersih",
            Theme::Cheerful => "Ceria & Menarik",
            Theme::Elegant => "Elegan & Mewah",
            Theme::Natural => "Alami & Organik",
            Theme::Retro => "Retro & Funky",
        }
    }

    /// Style phrase inserted verbatim into the image prompt.
    pub fn style_descriptor(self) -> &'static str {
        match self {
            Theme::Modern => {
                "Modern, clean, minimalist, high-end product photography, bright lighting"
            }
            Theme::Cheerful => {
                "Cheerful, colorful, vibrant, playful, eye-catching, dynamic composition"
            }
            Theme::Elegant => "Elegant, luxurious, premium, sophisticated, dark background, soft lighting, premium feel",
            Theme::Natural => {
                "Natural, organic, earthy tones, rustic, with natural elements like leaves and wood"
            }
            Theme::Retro => "Retro, vintage, 70s style, funky patterns, bold colors, nostalgic vibe",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Theme {
    type Err = String;

    /// Accepts the English ids plus the Indonesian ones used by the web form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "modern" => Ok(Theme::Modern),
            "cheerful" | "ceria" => Ok(Theme::Cheerful),
            "elegant" | "elegan" => Ok(Theme::Elegant),
            "natural" | "alami" => Ok(Theme::Natural),
            "retro" => Ok(Theme::Retro),
            other => {
                let valid: Vec<&str> = Theme::ALL.iter().map(|t| t.id()).collect();
                Err(format!(
                    "Unknown theme '{}'. Expected one of: {}",
                    other,
                    valid.join(", ")
                ))
            }
        }
    }
}
