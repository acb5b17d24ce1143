use std::io::IsTerminal;
use std::path::Path;
use std::time::Duration;

use aura_threads::{cli, config, error, export, photo, pipeline, recommender, retry, search};
use aura_threads_common::{render, RecommendationRequest};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use error::AuraError;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("❌ An error occurred: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("aura_threads=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    match cli.command {
        Commands::Recommend { image, brand, html, json, max_attempts, model } => {
            println!("✨ Aura & Threads - AI-Powered Personal Styling\n");

            if let Some(model) = model {
                config.model = model;
            }
            if let Some(n) = max_attempts {
                config.search_max_attempts = n;
            }

            // 資格情報が無ければ送信しない
            let api_key = match config.get_api_key() {
                Ok(key) => key,
                Err(AuraError::MissingApiKey) if std::io::stdin().is_terminal() => {
                    prompt_api_key()?
                }
                Err(e) => return Err(e.into()),
            };

            let brand = match brand {
                Some(b) => b,
                None => dialoguer::Input::<String>::new()
                    .with_prompt("Preferred Brand (e.g., Zara, Uniqlo, Gucci)")
                    .allow_empty(true)
                    .interact_text()?,
            };
            let brand = brand.trim().to_string();
            if brand.is_empty() {
                return Err(AuraError::EmptyBrand.into());
            }

            println!("[1/3] Loading photo...");
            let payload = photo::load_photo(&image, config.max_image_size)?;
            println!("✔ {} ({} bytes)\n", image.display(), payload.bytes.len());

            let backend = recommender::OpenAiClient::from_config(&config, api_key)?;
            let images = search::DuckDuckGoImages::new(Duration::from_secs(config.timeout_seconds))?;
            let delay = retry::TokioDelay::from_millis(config.search_backoff_unit_ms);
            let options = pipeline::PipelineOptions {
                search_max_attempts: config.search_max_attempts,
                inference_retries: config.inference_retries,
            };
            let request = RecommendationRequest { image: payload, brand: brand.clone() };

            println!("[2/3] Asking the stylist ({})...", backend.model());
            let spinner = spinner(format!(
                "Analyzing your features and browsing {}'s catalog...",
                brand
            ));

            let result = pipeline::generate_lookbook(
                &backend,
                &images,
                &delay,
                &request,
                options,
                |recommendation| {
                    spinner.suspend(|| {
                        println!("\n🧐 The Stylist's Take");
                        println!("{}\n", recommendation.analysis);
                        println!("[3/3] Finding products...");
                        println!("✨ Recommended {} Look", brand);
                    });
                },
                |idx, total, slot| {
                    let card = render::Card::from_slot(slot);
                    spinner.suspend(|| print!("{}", render::render_card_text(idx, &card)));
                    spinner.set_message(format!("Searching products {}/{}", idx + 1, total));
                },
            )
            .await;
            spinner.finish_and_clear();

            let lookbook = result?;
            println!(
                "\n✔ {}/{} items matched",
                lookbook.resolved_count(),
                lookbook.slots.len()
            );

            export::export_lookbook(&lookbook, html.as_deref(), json.as_deref())?;
            println!("\n✅ Done");
        }

        Commands::Search { query, max_attempts } => {
            let images = search::DuckDuckGoImages::new(Duration::from_secs(config.timeout_seconds))?;
            let delay = retry::TokioDelay::from_millis(config.search_backoff_unit_ms);
            let attempts = max_attempts.unwrap_or(config.search_max_attempts);

            let spinner = spinner(format!("Searching {}...", query));
            let product = search::resolve_product(&images, &delay, &query, attempts).await;
            spinner.finish_and_clear();

            match product {
                Some(p) => {
                    println!("{}", render::truncate_title(&p.title, render::TITLE_MAX_CHARS));
                    println!("  image: {}", p.image_url);
                    println!("  Shop Now ↗ {}", p.source_url);
                }
                None => println!("⚠ {}", render::not_found_message(&query)),
            }
        }

        Commands::Config { set_api_key, clear_api_key, show } => {
            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ API key saved");
            }

            if clear_api_key {
                config.clear_api_key()?;
                println!("✔ API key removed");
            }

            if show {
                print_config(&config, &Config::config_path()?);
            }
        }
    }

    Ok(())
}

/// セッション限りのAPIキー入力（保存はしない）
fn prompt_api_key() -> anyhow::Result<String> {
    let key = dialoguer::Password::new()
        .with_prompt("Enter OpenAI API Key")
        .interact()?;
    if key.trim().is_empty() {
        return Err(AuraError::MissingApiKey.into());
    }
    println!("✔ API Key accepted!");
    Ok(key.trim().to_string())
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

fn print_config(config: &Config, path: &Path) {
    let api_key = match config.get_api_key() {
        Ok(key) => config::mask_api_key(&key),
        Err(_) => "not set".to_string(),
    };

    println!("Settings ({}):", path.display());
    println!("  model: {}", config.model);
    println!("  API base URL: {}", config.api_base_url);
    println!("  max image size: {}px", config.max_image_size);
    println!("  search attempts: {}", config.search_max_attempts);
    println!("  backoff unit: {}ms", config.search_backoff_unit_ms);
    println!("  inference retries: {}", config.inference_retries);
    println!("  timeout: {}s", config.timeout_seconds);
    println!("  API key: {}", api_key);
}
