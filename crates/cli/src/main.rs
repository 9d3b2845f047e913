use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use giftwise_core::config::Settings;
use giftwise_core::domain::profile::RecipientProfile;
use giftwise_core::image::search::{HttpImageProbe, HttpImageSearchClient, NoProbe};
use giftwise_core::image::ImageResolver;
use giftwise_core::llm::anthropic::AnthropicClient;
use giftwise_core::llm::GiftIdeaClient;
use giftwise_core::orchestrator::RecommendationOrchestrator;

#[derive(Debug, Parser)]
#[command(name = "giftwise")]
struct Args {
    /// Path to a RecipientProfile JSON file; overrides the inline flags.
    #[arg(long)]
    profile: Option<std::path::PathBuf>,

    /// Recipient name (inline profile).
    #[arg(long)]
    name: Option<String>,

    /// Budget in the given currency (inline profile).
    #[arg(long)]
    budget: Option<f64>,

    #[arg(long, default_value = "USD")]
    currency: String,

    #[arg(long, default_value = "United States")]
    country: String,

    /// Personality trait; repeatable.
    #[arg(long = "trait", value_name = "TRAIT")]
    traits: Vec<String>,

    /// Interest; repeatable.
    #[arg(long = "interest", value_name = "INTEREST")]
    interests: Vec<String>,

    #[arg(long)]
    notes: Option<String>,

    #[arg(long)]
    gender: Option<String>,

    #[arg(long)]
    age_range: Option<String>,

    /// Skip the generative backend and use the template fallback only.
    #[arg(long)]
    offline: bool,

    /// Pin shop pricing for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let settings = Settings::from_env()?;
    let profile = resolve_profile(&args)?;

    let llm: Option<Arc<dyn GiftIdeaClient>> = if args.offline {
        None
    } else {
        match AnthropicClient::from_settings(&settings) {
            Ok(client) => Some(Arc::new(client)),
            Err(err) => {
                tracing::warn!(error = %err, "no generative backend; running in template-only mode");
                None
            }
        }
    };

    let images = match HttpImageSearchClient::from_settings(&settings) {
        Ok(search) => ImageResolver::new(Some(Arc::new(search)), Arc::new(HttpImageProbe::new()?)),
        Err(err) => {
            tracing::warn!(error = %err, "no image search backend; using stock images only");
            ImageResolver::new(None, Arc::new(NoProbe))
        }
    };

    let mut orchestrator = RecommendationOrchestrator::new(llm, images);
    if let Some(seed) = args.seed {
        orchestrator = orchestrator.with_seed(seed);
    }

    match orchestrator.recommend(&profile).await {
        Ok(recommendations) => {
            tracing::info!(
                recipient = %profile.name,
                count = recommendations.len(),
                "recommendations ready"
            );
            println!("{}", serde_json::to_string_pretty(&recommendations)?);
            Ok(())
        }
        Err(err) => {
            tracing::error!(recipient = %profile.name, error = %err, "recommendation run failed");
            Err(err.into())
        }
    }
}

fn resolve_profile(args: &Args) -> anyhow::Result<RecipientProfile> {
    if let Some(path) = &args.profile {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read profile file {}", path.display()))?;
        return serde_json::from_str(&raw)
            .with_context(|| format!("invalid profile JSON in {}", path.display()));
    }

    let name = args
        .name
        .clone()
        .context("--name is required without --profile")?;
    let budget = args
        .budget
        .context("--budget is required without --profile")?;

    Ok(RecipientProfile {
        name,
        traits: args.traits.iter().cloned().collect(),
        interests: args.interests.iter().cloned().collect(),
        budget,
        currency: args.currency.clone(),
        country: args.country.clone(),
        notes: args.notes.clone(),
        gender: args.gender.clone(),
        age_range: args.age_range.clone(),
    })
}
