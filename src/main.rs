use anyhow::Result;
use bikinlaris_generator::app::App;
use bikinlaris_generator::models::{Config, ProductImage, ProductInfo};
use bikinlaris_generator::theme::Theme;
use bikinlaris_generator::view::render_report;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "bikinlaris")]
#[command(about = "Generate captions, a content calendar and a promo poster for a product")]
struct CliArgs {
    /// Product name.
    #[arg(long)]
    product_name: Option<String>,

    /// Short product description.
    #[arg(long)]
    description: Option<String>,

    /// Who the product is for.
    #[arg(long, default_value = "")]
    target_audience: String,

    /// Current promotion, if any.
    #[arg(long, default_value = "")]
    promo: String,

    /// Shop name used in the WhatsApp greeting.
    #[arg(long)]
    shop_name: Option<String>,

    /// Google Maps link to the shop.
    #[arg(long, default_value = "")]
    maps_link: String,

    /// WhatsApp number, local (08...) or international (62...).
    #[arg(long)]
    whatsapp: Option<String>,

    /// Product photo (JPEG, PNG, WebP or GIF).
    #[arg(long, value_name = "PATH")]
    image: Option<PathBuf>,

    /// Poster style.
    #[arg(long, default_value_t = Theme::Modern)]
    theme: Theme,

    /// Directory the poster is saved into.
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Print the result as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// List available themes and exit.
    #[arg(long)]
    list_themes: bool,
}

impl CliArgs {
    fn product_info(&self) -> bikinlaris_generator::Result<ProductInfo> {
        let product_image = self
            .image
            .as_deref()
            .map(ProductImage::from_path)
            .transpose()?;

        Ok(ProductInfo {
            product_name: self.product_name.clone().unwrap_or_default(),
            description: self.description.clone().unwrap_or_default(),
            target_audience: self.target_audience.clone(),
            promo: self.promo.clone(),
            shop_name: self.shop_name.clone().unwrap_or_default(),
            maps_link: self.maps_link.clone(),
            whatsapp_number: self.whatsapp.clone().unwrap_or_default(),
            product_image,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bikinlaris_generator=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    if args.list_themes {
        for theme in Theme::ALL {
            println!("{:<10} {}", theme.id(), theme.display_name());
        }
        return Ok(());
    }

    let product = match args.product_info() {
        Ok(product) => product,
        Err(e) => {
            error!("Could not read product input: {}", e);
            eprintln!("{}", e.user_message());
            std::process::exit(2);
        }
    };

    let config = Config::from_env()?;
    let app = App::new(&config, args.output_dir.clone());

    match app.run(&product, args.theme).await {
        Ok(outcome) => {
            if args.json {
                let report = serde_json::json!({
                    "content": outcome.result.content,
                    "links": outcome.links,
                    "poster_path": outcome.poster_path,
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render_report(&outcome.result, &outcome.links));
                println!("Poster: {}", outcome.poster_path.display());
            }
            info!("Generation completed successfully");
            Ok(())
        }
        Err(e) => {
            error!("Generation failed: {}", e);
            eprintln!("{}", e.user_message());
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let args = CliArgs::parse_from(["bikinlaris", "--product-name", "Bakpia"]);
        assert_eq!(args.theme, Theme::Modern);
        assert_eq!(args.output_dir, PathBuf::from("output"));
        assert!(!args.json);

        let product = args.product_info().unwrap();
        assert_eq!(product.product_name, "Bakpia");
        assert!(product.product_image.is_none());
        assert!(product.validate().is_err());
    }

    #[test]
    fn test_cli_accepts_indonesian_theme_id() {
        let args = CliArgs::parse_from(["bikinlaris", "--theme", "elegan"]);
        assert_eq!(args.theme, Theme::Elegant);
    }

    #[test]
    fn test_cli_rejects_unknown_theme() {
        assert!(CliArgs::try_parse_from(["bikinlaris", "--theme", "gothic"]).is_err());
    }
}
