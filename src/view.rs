//! Values derived from a generation result for display: the WhatsApp order
//! link, the poster download filename, and a plain-text report.

use crate::models::{GenerationResult, Platform, ProductInfo};
use serde::Serialize;
use std::fmt::Write as _;

/// Indonesian country calling code.
const COUNTRY_CODE: &str = "62";

/// Strip everything but digits and rewrite a leading trunk `0` to `62`.
pub fn normalize_whatsapp_number(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    match digits.strip_prefix('0') {
        Some(rest) => format!("{}{}", COUNTRY_CODE, rest),
        None => digits,
    }
}

/// Greeting a customer sends when tapping the order link.
pub fn whatsapp_greeting(shop_name: &str, product_name: &str) -> String {
    format!(
        "Halo {}, saya tertarik dengan produk {}.",
        shop_name, product_name
    )
}

/// `wa.me` deep link that opens a chat with the shop, greeting prefilled.
pub fn whatsapp_link(shop_name: &str, product_name: &str, whatsapp_number: &str) -> String {
    format!(
        "https://wa.me/{}?text={}",
        normalize_whatsapp_number(whatsapp_number),
        encode_uri_component(&whatsapp_greeting(shop_name, product_name))
    )
}

/// Percent-encode like a browser's `encodeURIComponent`, which leaves
/// `!'()*` alone. A literal `%` is always encoded as `%25`, so the undo below
/// only ever touches escapes of those five characters.
fn encode_uri_component(value: &str) -> String {
    let mut encoded = urlencoding::encode(value).into_owned();
    for (escaped, raw) in [
        ("%21", "!"),
        ("%27", "'"),
        ("%28", "("),
        ("%29", ")"),
        ("%2A", "*"),
    ] {
        encoded = encoded.replace(escaped, raw);
    }
    encoded
}

/// Filename offered when downloading the poster.
///
/// Keeps ASCII letters, digits and whitespace, then turns each whitespace
/// run into `_`. Falls back to `produk` if nothing is left.
pub fn download_filename(product_name: &str) -> String {
    let kept: String = product_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();

    let mut sanitized = String::with_capacity(kept.len());
    let mut in_whitespace = false;
    for c in kept.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                sanitized.push('_');
            }
            in_whitespace = true;
        } else {
            sanitized.push(c);
            in_whitespace = false;
        }
    }

    // A name made only of symbols would otherwise give `poster_.jpeg`.
    if sanitized.is_empty() {
        sanitized.push_str("produk");
    }
    format!("poster_{}.jpeg", sanitized)
}

/// Links shown to the merchant next to the generated content.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ShopLinks {
    pub whatsapp_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maps_url: Option<String>,
    pub download_filename: String,
}

impl ShopLinks {
    pub fn for_product(product: &ProductInfo) -> Self {
        let maps_link = product.maps_link.trim();
        Self {
            whatsapp_url: whatsapp_link(
                &product.shop_name,
                &product.product_name,
                &product.whatsapp_number,
            ),
            maps_url: (!maps_link.is_empty()).then(|| maps_link.to_string()),
            download_filename: download_filename(&product.product_name),
        }
    }
}

/// Plain-text rendering of a result for terminal output.
pub fn render_report(result: &GenerationResult, links: &ShopLinks) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "== Caption Siap Pakai ==");
    for platform in Platform::ALL {
        let _ = writeln!(out, "\n[{}]", platform.display_name());
        let _ = writeln!(out, "{}", result.content.captions.get(platform));
    }

    let _ = writeln!(
        out,
        "\n== Kalender Konten {} Hari ==",
        result.content.calendar.len()
    );
    for (index, entry) in result.content.calendar.iter().enumerate() {
        let _ = writeln!(out, "{}. {}: {}", index + 1, entry.day, entry.idea);
    }

    let _ = writeln!(out, "\n== Link Penting untuk Pelanggan ==");
    let _ = writeln!(out, "Link Order WhatsApp: {}", links.whatsapp_url);
    if let Some(maps_url) = &links.maps_url {
        let _ = writeln!(out, "Lokasi Google Maps: {}", maps_url);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CalendarEntry, GeneratedCaptions, GeneratedContent};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_leading_zero() {
        assert_eq!(normalize_whatsapp_number("081234567890"), "6281234567890");
    }

    #[test]
    fn test_normalize_keeps_country_code_and_strips_punctuation() {
        assert_eq!(normalize_whatsapp_number("+62 812-3456-7890"), "6281234567890");
        assert_eq!(normalize_whatsapp_number("6281234567890"), "6281234567890");
    }

    #[test]
    fn test_normalize_strips_before_checking_leading_zero() {
        assert_eq!(normalize_whatsapp_number("(0812) 3456"), "628123456");
    }

    #[test]
    fn test_whatsapp_link_keeps_uri_component_marks() {
        assert_eq!(
            whatsapp_link("Toko (Bu) Sri's", "Kripik*Pedas!", "62812"),
            "https://wa.me/62812?text=Halo%20Toko%20(Bu)%20Sri's%2C%20saya%20tertarik%20dengan%20produk%20Kripik*Pedas!."
        );
        assert_eq!(encode_uri_component("100% asli"), "100%25%20asli");
        assert_eq!(encode_uri_component("%21"), "%2521");
    }

    #[test]
    fn test_whatsapp_link_encodes_greeting() {
        assert_eq!(
            whatsapp_link("Kopi Kita", "Es Kopi Susu", "0812-3456"),
            "https://wa.me/628123456?text=Halo%20Kopi%20Kita%2C%20saya%20tertarik%20dengan%20produk%20Es%20Kopi%20Susu."
        );
    }

    #[test]
    fn test_download_filename_strips_symbols() {
        assert_eq!(download_filename("Es Kopi Susu!!"), "poster_Es_Kopi_Susu.jpeg");
    }

    #[test]
    fn test_download_filename_collapses_whitespace_runs() {
        assert_eq!(
            download_filename("Nasi  Goreng\t& Teh"),
            "poster_Nasi_Goreng_Teh.jpeg"
        );
    }

    #[test]
    fn test_download_filename_falls_back_when_empty() {
        assert_eq!(download_filename("!!!"), "poster_produk.jpeg");
        assert_eq!(download_filename(""), "poster_produk.jpeg");
    }

    #[test]
    fn test_shop_links_hide_blank_maps_link() {
        let product = ProductInfo {
            product_name: "Es Kopi Susu!!".to_string(),
            shop_name: "Kopi Kita".to_string(),
            whatsapp_number: "081234567890".to_string(),
            maps_link: "   ".to_string(),
            ..Default::default()
        };

        let links = ShopLinks::for_product(&product);
        assert!(links.whatsapp_url.starts_with("https://wa.me/6281234567890?text="));
        assert_eq!(links.maps_url, None);
        assert_eq!(links.download_filename, "poster_Es_Kopi_Susu.jpeg");
    }

    #[test]
    fn test_render_report_lists_captions_calendar_and_links() {
        let result = GenerationResult {
            content: GeneratedContent {
                captions: GeneratedCaptions {
                    whatsapp: "wa caption".to_string(),
                    instagram: "ig caption".to_string(),
                    facebook: "fb caption".to_string(),
                    threads: "threads caption".to_string(),
                    marketplace: "marketplace caption".to_string(),
                },
                calendar: vec![CalendarEntry {
                    day: "Senin".to_string(),
                    idea: "Foto produk".to_string(),
                }],
            },
            image_url: "data:image/jpeg;base64,AA==".to_string(),
        };
        let links = ShopLinks {
            whatsapp_url: "https://wa.me/62812".to_string(),
            maps_url: Some("https://maps.app.goo.gl/x".to_string()),
            download_filename: "poster_x.jpeg".to_string(),
        };

        let report = render_report(&result, &links);
        assert!(report.contains("[Threads]\nthreads caption"));
        assert!(report.contains("1. Senin: Foto produk"));
        assert!(report.contains("Link Order WhatsApp: https://wa.me/62812"));
        assert!(report.contains("Lokasi Google Maps: https://maps.app.goo.gl/x"));
    }
}
