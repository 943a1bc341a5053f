//! blogcast-post - Promote a blog post on Facebook or LinkedIn

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use libblogcast::logging::{LogFormat, LoggingConfig};
use libblogcast::transport::ReqwestTransport;
use libblogcast::{Config, PlatformKind, Pipeline, PublishRequest, Result};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "blogcast-post")]
#[command(version)]
#[command(about = "Generate and publish a social post promoting a blog article", long_about = None)]
struct Cli {
    /// Path to the markdown blog post
    #[arg(long, value_name = "PATH")]
    post: PathBuf,

    /// Platform to publish to (facebook or linkedin)
    #[arg(short, long)]
    platform: PlatformKind,

    /// Log the post instead of publishing it
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Log output format (text, json or pretty)
    #[arg(long, value_name = "FORMAT")]
    log_format: Option<LogFormat>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    LoggingConfig::from_env(cli.log_format, cli.verbose).init();

    if let Err(e) = run(cli).await {
        error!("Failed to publish: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let transport = Arc::new(ReqwestTransport::new()?);
    let pipeline = Pipeline::new(config, transport);

    let request = PublishRequest {
        post_path: cli.post,
        platform: cli.platform,
        dry_run: cli.dry_run,
    };

    let report = pipeline.run(&request).await?;

    match report.result.remote_id {
        Some(id) => info!("Done. {} post ID: {}", request.platform.display_name(), id),
        None => info!("Done."),
    }

    Ok(())
}
