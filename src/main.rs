use anime_enricher::{
    config::{LoggingSettings, Settings},
    enricher::create_enricher,
    services::CatalogStore,
};
use anyhow::{Context, Result};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_NAME: &str = "anime-enricher.log";

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load().context("failed to load settings")?;
    let _guard = setup_tracing(&settings.logging);

    let enricher = create_enricher(&settings).context("failed to set up the TMDB client")?;

    let input = CatalogStore::new(&settings.input);
    let records = input
        .load()
        .await
        .with_context(|| format!("failed to read {}", settings.input.display()))?;

    let (records, summary) = enricher.run(records).await;

    let output = CatalogStore::new(settings.output_path());
    output
        .save(&records)
        .await
        .with_context(|| format!("failed to write {}", output.path().display()))?;

    info!(
        "Summary: {}",
        serde_json::to_string(&summary).context("failed to serialize summary")?
    );
    Ok(())
}

/// Console output (text or JSON) plus an optional log file. The returned
/// guard flushes the file writer on drop.
fn setup_tracing(logging: &LoggingSettings) -> Option<WorkerGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    let (file_layer, guard) = match &logging.directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(logging.json.then(|| fmt::layer().json()))
        .with((!logging.json).then(fmt::layer))
        .with(file_layer)
        .init();

    guard
}
