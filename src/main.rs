use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use clonewatch::data::{Sampler, SeriesStore};
use clonewatch::server;
use clonewatch::source::{CounterSource, FileSource, MongoSource};
use clonewatch::Settings;

#[derive(Parser, Debug)]
#[command(name = "clonewatch")]
#[command(about = "Web dashboard for monitoring clone-detection pipeline activity")]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// MongoDB connection string
    #[arg(long, conflicts_with = "file")]
    mongo_uri: Option<String>,

    /// Database holding the pipeline collections
    #[arg(long)]
    database: Option<String>,

    /// Sample totals from a JSON file instead of MongoDB
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Address to serve the dashboard on
    #[arg(short, long)]
    listen: Option<String>,

    /// Seconds between background sampling ticks
    #[arg(short, long)]
    interval: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(uri) = args.mongo_uri {
        settings.mongo_uri = uri;
    }
    if let Some(database) = args.database {
        settings.database = database;
    }
    if let Some(listen) = args.listen {
        settings.listen_addr = listen;
    }
    if let Some(interval) = args.interval {
        settings.interval_secs = interval;
    }
    if let Some(file) = args.file {
        settings.totals_file = Some(file);
    }

    let source: Box<dyn CounterSource> = match &settings.totals_file {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(
            MongoSource::builder()
                .uri(settings.mongo_uri.as_str())
                .database(settings.database.as_str())
                .connect()
                .await?,
        ),
    };
    info!(source = source.description(), "sampling source ready");

    let store = Arc::new(SeriesStore::new());
    let sampler = Arc::new(Sampler::new(source, store));

    // Background cadence; the first tick establishes the baseline.
    let _ticker = sampler.clone().start(settings.interval());

    server::run_server(&settings.listen_addr, sampler).await
}
