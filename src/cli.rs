//! Command-line interface parsing for skyrating
//!
//! This module handles parsing of CLI arguments using clap. Connection
//! settings come from flags, then from the `SKYRATING_*` environment
//! variables, then from the `RatingConfig` defaults.

use std::time::Duration;

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::config::{
    RatingConfig, DEFAULT_API_URL, DEFAULT_LOCAL_CACHE_TTL, DEFAULT_PROXY_URL, ENV_API_URL,
    ENV_CACHE_TTL, ENV_PROXY_URL, ENV_TIMEOUT_SECS,
};
use crate::rating::DEFAULT_PROXY_TTL;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The rating is not a finite, non-negative number
    #[error("Invalid rating: '{0}'. Expected a non-negative number, e.g. 4 or 3.5")]
    InvalidRating(String),
}

/// skyrating - Load and submit item ratings
#[derive(Parser, Debug)]
#[command(name = "skyrating")]
#[command(about = "Load and submit ratings from the skywise rating API")]
#[command(version)]
pub struct Cli {
    /// Direct rating API base URL
    #[arg(long, env = ENV_API_URL, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Caching proxy base URL
    #[arg(long, env = ENV_PROXY_URL, default_value = DEFAULT_PROXY_URL)]
    pub proxy_url: String,

    /// Seconds a loaded response is served from the local cache
    #[arg(long, env = ENV_CACHE_TTL, default_value_t = DEFAULT_LOCAL_CACHE_TTL)]
    pub cache_ttl: u64,

    /// Request timeout in seconds
    #[arg(long, env = ENV_TIMEOUT_SECS)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Load ratings for a set of ids
    ///
    /// Examples:
    ///   skyrating load --collection movies --ids a,b
    ///   skyrating load --collection movies --ids a --proxy-ttl 0
    Load {
        /// Collection the ids belong to
        #[arg(long)]
        collection: String,

        /// Comma-separated item ids
        #[arg(long, value_delimiter = ',', required = true)]
        ids: Vec<String>,

        /// Upstream proxy TTL in seconds; 0 queries the API directly
        #[arg(long, default_value_t = DEFAULT_PROXY_TTL)]
        proxy_ttl: u64,
    },

    /// Submit a rating for one id
    Rate {
        /// Collection the id belongs to
        #[arg(long)]
        collection: String,

        /// Item id
        #[arg(long)]
        id: String,

        /// Rating value
        #[arg(long, value_parser = parse_rating_arg)]
        rating: f64,
    },
}

/// Parses a rating argument
///
/// # Returns
/// * `Ok(f64)` if the string is a finite, non-negative number
/// * `Err(CliError::InvalidRating)` otherwise
pub fn parse_rating_arg(s: &str) -> Result<f64, CliError> {
    match s.trim().parse::<f64>() {
        Ok(rating) if rating.is_finite() && rating >= 0.0 => Ok(rating),
        _ => Err(CliError::InvalidRating(s.to_string())),
    }
}

impl Cli {
    /// Builds the client configuration from the parsed arguments
    pub fn rating_config(&self) -> RatingConfig {
        RatingConfig {
            api_url: self.api_url.clone(),
            proxy_url: self.proxy_url.clone(),
            local_cache_ttl: self.cache_ttl,
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}
