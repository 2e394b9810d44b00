//! skyrating - Load and submit item ratings from the command line
//!
//! Prints loaded ratings as JSON on stdout. A failed submission prints the
//! normalized error object on stderr and exits with status 1.

use std::collections::BTreeMap;
use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use skyrating::cli::{Cli, Command};
use skyrating::error::ApiError;
use skyrating::rating::RatingClient;

/// Sets up logging to stderr, filtered by `RUST_LOG` (default `skyrating=info`)
fn setup_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("skyrating=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    setup_tracing();

    let client = RatingClient::with_config(cli.rating_config());

    match cli.command {
        Command::Load {
            collection,
            ids,
            proxy_ttl,
        } => {
            let ratings = client.load_ratings(&collection, ids.as_slice(), proxy_ttl).await;
            // Sorted for stable output
            let ratings: BTreeMap<_, _> = ratings.into_iter().collect();
            println!("{}", serde_json::to_string_pretty(&ratings)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Rate {
            collection,
            id,
            rating,
        } => match client.post_rating(&collection, &id, rating).await {
            Ok(response) => {
                println!("{}", serde_json::to_string_pretty(&response.data)?);
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                let api_error = ApiError::from_transport("Failed to post rating", &e);
                eprintln!("{}", serde_json::to_string_pretty(&api_error.to_obj())?);
                Ok(ExitCode::FAILURE)
            }
        },
    }
}
