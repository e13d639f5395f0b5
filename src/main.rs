mod app;
mod cache;
mod error;
mod github;
mod scope;
mod settings;
mod stats;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = app::Args::parse();
    if let Err(err) = app::run(args).await {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
