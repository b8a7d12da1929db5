use std::{path::PathBuf, process::ExitCode, time::Duration};

use clap::{Parser, Subcommand};
use trend_pulse::{
    parser::MAX_VIDEOS,
    source::{
        local::LocalPage,
        scraper::{PageScraper, DEFAULT_USER_AGENT},
        PageFetcher,
    },
    tracing::init_tracing_subscriber,
    TrendingProcessorBuilder, WorkflowState,
};

#[derive(Parser)]
#[command(name = "trend-pulse", about = "Trending videos extractor")]
struct Cli {
    /// Trending page URL, also the base for relative video links
    #[arg(long, env = "TRENDING_PAGE_URL")]
    url: String,

    /// Request timeout in seconds
    #[arg(long, env = "TRENDING_FETCH_TIMEOUT_SECS", default_value = "10")]
    timeout_secs: u64,

    /// User-Agent header sent with the request
    #[arg(long, env = "TRENDING_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Maximum videos to extract
    #[arg(long, env = "TRENDING_MAX_VIDEOS", default_value_t = MAX_VIDEOS)]
    max_videos: usize,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch the live page and extract its trending videos
    Fetch,
    /// Extract trending videos from a saved copy of the page
    Extract {
        /// Path to the saved HTML page
        #[arg(long)]
        file: PathBuf,
    },
}

async fn run_pipeline<F>(cli: &Cli, fetcher: F) -> WorkflowState
where
    F: PageFetcher + Send + Sync + 'static,
{
    TrendingProcessorBuilder::new(&cli.url)
        .fetcher(fetcher)
        .max_videos(cli.max_videos)
        .build()
        .run()
        .await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let _ = dotenvy::dotenv();

    let _guard = sentry::init((
        std::env::var("SENTRY_DSN").unwrap_or_default(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    ));

    let cli = Cli::parse();
    init_tracing_subscriber()?;

    let state = match &cli.command {
        Command::Fetch => {
            tracing::info!(url = %cli.url, "Fetching trending page...");
            let scraper =
                PageScraper::new(Duration::from_secs(cli.timeout_secs), &cli.user_agent)?;
            run_pipeline(&cli, scraper).await
        }
        Command::Extract { file } => {
            tracing::info!(file = %file.display(), "Extracting from saved page...");
            run_pipeline(&cli, LocalPage::new(file)).await
        }
    };

    let output = if cli.pretty {
        serde_json::to_string_pretty(&state)?
    } else {
        serde_json::to_string(&state)?
    };
    println!("{output}");

    Ok(if state.is_failed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
