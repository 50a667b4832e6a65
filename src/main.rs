use anyhow::{bail, Context, Result};
use hive_translations::config::Config;
use hive_translations::observer::{Observers, TracingObserver, TranslationMetrics};
use hive_translations::{
    DisabledGenerator, OpenAiGenerator, PgTranslationStore, Resolver, TextGenerator,
    TranslationRequest,
};
use std::io::Read;
use std::sync::Arc;
use tracing::info;

const USAGE: &str = "Usage:
  hive-translations resolve              Resolve a JSON array of requests read from stdin
  hive-translations plural-rules <lang>  Print the plural categories for a language";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hive_translations=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str);
    if matches!(command, None | Some("-h") | Some("--help")) {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = Config::from_env()?;
    let metrics = Arc::new(TranslationMetrics::new());
    let resolver = build_resolver(&config, metrics.clone()).await?;

    match (command, args.get(1)) {
        (Some("resolve"), None) => resolve(&resolver).await?,
        (Some("plural-rules"), Some(lang)) => {
            let rules = resolver.plural_rules(lang).await?;
            println!("{}", serde_json::to_string(&rules)?);
        }
        _ => bail!("Unrecognized arguments: {}\n{}", args.join(" "), USAGE),
    }

    info!(
        "Translation metrics: {}",
        serde_json::to_string(&metrics.report())?
    );
    Ok(())
}

async fn build_resolver(config: &Config, metrics: Arc<TranslationMetrics>) -> Result<Resolver> {
    let store = PgTranslationStore::connect(&config.database_url)
        .await
        .context("Failed to connect to the translation database")?;

    let generator: Arc<dyn TextGenerator> = if config.generation_enabled {
        let generator = OpenAiGenerator::new(config.openai_settings()?)
            .context("Failed to build the generation client")?;
        info!("Generation mode enabled (model: {})", generator.model());
        Arc::new(generator)
    } else {
        info!("Generation mode disabled, resolving from the store only");
        Arc::new(DisabledGenerator)
    };

    let observers = Observers::new()
        .with(Arc::new(TracingObserver))
        .with(metrics);

    Ok(Resolver::new(Arc::new(store), generator, config.resolver_config())
        .with_observer(Arc::new(observers)))
}

async fn resolve(resolver: &Resolver) -> Result<()> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read requests from stdin")?;

    let requests: Vec<TranslationRequest> = serde_json::from_str(&input)
        .context("Requests must be a JSON array of {key?, en, tc?, isPlural?}")?;
    info!("Resolving {} translation requests", requests.len());

    let resolved = resolver.resolve_batch(&requests).await?;
    info!("Resolved {} of {} requests", resolved.len(), requests.len());

    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}
