use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use modgate::config::{Config, ProviderKind};
use modgate::moderation::{
    MistralModerationModel, ModerationProvider, ModerationResult, Moderator,
    OpenAiModerationModel,
};

/// modgate: check text against OpenAI or Mistral content moderation.
///
/// Credentials are read from `openai.json` / `mistralai.json` in the
/// credentials directory (MODGATE_CREDENTIALS_DIR).
#[derive(Parser)]
#[command(name = "modgate", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check one or more texts; several texts go out as a single batch request
    Check {
        /// Texts to classify
        #[arg(required = true)]
        texts: Vec<String>,

        /// Provider to use (openai or mistral); overrides MODGATE_PROVIDER
        #[arg(long)]
        provider: Option<String>,

        /// Model identifier for the chosen provider (see `modgate models`)
        #[arg(long)]
        model: Option<String>,

        /// Print normalized results as JSON instead of a colored summary
        #[arg(long)]
        json: bool,
    },

    /// List the known moderation models for each provider
    Models,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("modgate=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            texts,
            provider,
            model,
            json,
        } => {
            let mut config = Config::load()?;
            if let Some(provider) = provider {
                config.provider = provider.parse::<ProviderKind>()?;
            }
            if let Some(model) = model {
                apply_model(&mut config, &model)?;
            }

            let moderator = Moderator::from_config(&config).with_context(|| {
                format!(
                    "Failed to set up {} moderation (credentials dir: {})",
                    config.provider,
                    config.credentials_dir.display()
                )
            })?;
            info!(
                provider = moderator.name(),
                model = moderator.model_id(),
                texts = texts.len(),
                "Checking content"
            );

            let results = run_check(&moderator, &texts).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                modgate::output::terminal::display_results(
                    moderator.name(),
                    moderator.model_id(),
                    &texts,
                    &results,
                );
            }
        }

        Commands::Models => {
            modgate::output::terminal::display_models();
        }
    }

    Ok(())
}

/// One text uses the single-check path, several go out as one batch.
async fn run_check(moderator: &Moderator, texts: &[String]) -> Result<Vec<ModerationResult>> {
    let results = match texts {
        [text] => vec![moderator
            .check_content(text)
            .await
            .context("Moderation request failed")?],
        _ => moderator
            .batch_check_content(texts)
            .await
            .context("Batch moderation request failed")?,
    };
    Ok(results)
}

/// Parse `--model` against the selected provider's closed model set.
fn apply_model(config: &mut Config, model: &str) -> Result<()> {
    match config.provider {
        ProviderKind::OpenAi => {
            config.openai_model = model.parse::<OpenAiModerationModel>()?;
        }
        ProviderKind::Mistral => {
            config.mistral_model = model.parse::<MistralModerationModel>()?;
        }
    }
    Ok(())
}
