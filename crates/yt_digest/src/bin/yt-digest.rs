use std::net::SocketAddr;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use yt_digest::{
    gemini::GeminiClient,
    server::{cors_layer, create_router, AppState, DEFAULT_ALLOWED_ORIGINS},
    tracing::init_tracing_subscriber,
    SummaryGenerator, SummaryPipeline, SummaryPipelineBuilder,
};
use yt_transcript::{WebshareProxyConfig, YouTubeTranscriptClient};

#[derive(Parser)]
#[command(name = "yt-digest", about = "YouTube transcript summarization service")]
struct Cli {
    /// Gemini API key
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    google_api_key: String,

    /// Gemini model used for summaries
    #[arg(long, env = "GEMINI_MODEL", default_value = GeminiClient::DEFAULT_MODEL)]
    gemini_model: String,

    /// Webshare proxy username; transcripts are fetched directly when unset
    #[arg(long, env = "WEBSHARE_PROXY_USERNAME")]
    proxy_username: Option<String>,

    /// Webshare proxy password
    #[arg(long, env = "WEBSHARE_PROXY_PASSWORD", hide_env_values = true)]
    proxy_password: Option<String>,

    /// Country codes proxy exit nodes are restricted to
    #[arg(
        long,
        env = "WEBSHARE_PROXY_LOCATIONS",
        value_delimiter = ',',
        default_value = "de,us"
    )]
    proxy_locations: Vec<String>,

    /// Caption languages in order of preference
    #[arg(
        long,
        env = "TRANSCRIPT_LANGUAGES",
        value_delimiter = ',',
        default_value = "ko,en"
    )]
    languages: Vec<String>,

    /// Additional summary attempts after a failed one
    #[arg(long, env = "SUMMARY_MAX_RETRIES", default_value_t = 2)]
    max_retries: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API
    Serve {
        #[arg(long, env = "HOST", default_value = "0.0.0.0")]
        host: String,

        #[arg(long, env = "PORT", default_value_t = 8000)]
        port: u16,

        /// Origins allowed to call the API from a browser
        #[arg(long, env = "CORS_ALLOWED_ORIGINS", value_delimiter = ',')]
        allowed_origins: Vec<String>,
    },
    /// Summarize a single video and print the response
    Summarize {
        #[arg(long)]
        url: String,
    },
}

fn build_pipeline(cli: &Cli) -> anyhow::Result<SummaryPipeline<YouTubeTranscriptClient, GeminiClient>> {
    let transcript_client = match (&cli.proxy_username, &cli.proxy_password) {
        (Some(username), Some(password)) => {
            let proxy = WebshareProxyConfig::new(username, password)
                .with_locations(cli.proxy_locations.iter().cloned());
            YouTubeTranscriptClient::with_proxy(&proxy)
                .context("Failed to configure proxied transcript client")?
        }
        _ => {
            tracing::warn!("No proxy credentials configured, fetching transcripts directly");
            YouTubeTranscriptClient::new()
        }
    };

    let gemini = GeminiClient::new(&cli.google_api_key).with_model(&cli.gemini_model);

    Ok(SummaryPipelineBuilder::new()
        .transcript_source(transcript_client)
        .summarizer(gemini)
        .languages(cli.languages.iter().cloned())
        .with_retries(
            cli.max_retries,
            SummaryGenerator::<GeminiClient>::DEFAULT_RETRY_DELAY,
        )
        .build())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "Failed to listen for SIGTERM"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let _guard = sentry::init((
        std::env::var("SENTRY_DSN").unwrap_or_default(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            traces_sample_rate: 0.0,
            ..Default::default()
        },
    ));

    let cli = Cli::parse();
    init_tracing_subscriber()?;

    let pipeline = build_pipeline(&cli)?;
    tracing::info!(
        model = %cli.gemini_model,
        languages = ?pipeline.extractor().languages(),
        max_retries = cli.max_retries,
        "Summary pipeline ready"
    );

    match cli.command {
        Command::Serve {
            host,
            port,
            allowed_origins,
        } => {
            let cors = if allowed_origins.is_empty() {
                cors_layer(DEFAULT_ALLOWED_ORIGINS)?
            } else {
                cors_layer(&allowed_origins)?
            };

            let router = create_router(AppState::new(pipeline), cors);

            let addr: SocketAddr = format!("{host}:{port}")
                .parse()
                .with_context(|| format!("Invalid listen address {host}:{port}"))?;
            let listener = TcpListener::bind(addr).await?;
            tracing::info!(%addr, "Listening");

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
        }
        Command::Summarize { url } => {
            let response = pipeline.run(&url).await;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
