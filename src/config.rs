//! Configuration management for movieboard.
//!
//! Configuration comes from command-line arguments via clap, with every
//! option also readable from a `MOVIEBOARD_` environment variable.
//!
//! # Example
//!
//! ```ignore
//! use clap::Parser;
//! use movieboard::config::{Cli, Command};
//!
//! match Cli::parse().into_command() {
//!     Command::Serve(config) => println!("Listening on {}", config.bind_address()),
//!     Command::Check(config) => println!("Checking database {}", config.database),
//! }
//! ```
//!
//! # Environment Variables
//!
//! - `MOVIEBOARD_HOST` - Server bind address (default: 0.0.0.0)
//! - `MOVIEBOARD_PORT` - Server port (default: 5000)
//! - `MOVIEBOARD_MONGO_URI` - MongoDB connection string (serve: optional, falls back to an in-memory store)
//! - `MOVIEBOARD_DATABASE` - Database name (default: sample_mflix)
//! - `MOVIEBOARD_TRUSTED_ORIGIN` - Frontend origin allowed to call the data routes (required)
//! - `MOVIEBOARD_STATIC_DIR` - Directory served under /static (default: static)

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use url::Url;

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default database name.
pub const DEFAULT_DATABASE: &str = "sample_mflix";

/// Default static asset directory.
pub const DEFAULT_STATIC_DIR: &str = "static";

// =============================================================================
// CLI Arguments
// =============================================================================

/// Movieboard - a movie and comments API with trusted-origin access control.
#[derive(Parser, Debug, Clone)]
#[command(name = "movieboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn into_command(self) -> Command {
        self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP server.
    Serve(ServeConfig),

    /// Check connectivity to the document store and exit.
    Check(CheckConfig),
}

/// Options for `movieboard serve`.
#[derive(Args, Debug, Clone)]
pub struct ServeConfig {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "MOVIEBOARD_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "MOVIEBOARD_PORT")]
    pub port: u16,

    /// Directory whose files are served under /static.
    #[arg(long, default_value = DEFAULT_STATIC_DIR, env = "MOVIEBOARD_STATIC_DIR")]
    pub static_dir: PathBuf,

    // =========================================================================
    // Store Configuration
    // =========================================================================
    /// MongoDB connection string.
    ///
    /// If not specified, an empty in-memory store is used.
    #[arg(long, env = "MOVIEBOARD_MONGO_URI")]
    pub mongo_uri: Option<String>,

    /// Database holding the `movies` and `comments` collections.
    #[arg(long, default_value = DEFAULT_DATABASE, env = "MOVIEBOARD_DATABASE")]
    pub database: String,

    // =========================================================================
    // Access Control
    // =========================================================================
    /// The single frontend origin allowed to call the data routes.
    ///
    /// Compared literally against the Origin header (exact match) and the
    /// Referer header (prefix match). Also the only origin allowed by CORS
    /// on those routes.
    #[arg(long, env = "MOVIEBOARD_TRUSTED_ORIGIN")]
    pub trusted_origin: String,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl ServeConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        validate_trusted_origin(&self.trusted_origin)?;

        if let Some(uri) = &self.mongo_uri {
            if uri.trim().is_empty() {
                return Err(
                    "MongoDB URI is empty. Set --mongo-uri or MOVIEBOARD_MONGO_URI, or omit it \
                     to use the in-memory store"
                        .to_string(),
                );
            }
        }

        validate_database(&self.database)
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Options for `movieboard check`.
#[derive(Args, Debug, Clone)]
pub struct CheckConfig {
    /// MongoDB connection string.
    #[arg(long, env = "MOVIEBOARD_MONGO_URI")]
    pub mongo_uri: String,

    /// Database holding the `movies` and `comments` collections.
    #[arg(long, default_value = DEFAULT_DATABASE, env = "MOVIEBOARD_DATABASE")]
    pub database: String,

    /// Enable verbose logging.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl CheckConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.mongo_uri.trim().is_empty() {
            return Err(
                "MongoDB URI is required. Set --mongo-uri or MOVIEBOARD_MONGO_URI".to_string(),
            );
        }
        validate_database(&self.database)
    }
}

fn validate_trusted_origin(origin: &str) -> Result<(), String> {
    if origin.is_empty() {
        return Err(
            "Trusted origin is required. Set --trusted-origin or MOVIEBOARD_TRUSTED_ORIGIN"
                .to_string(),
        );
    }

    // Only checked for sanity; the raw string is what gets compared
    let url = Url::parse(origin)
        .map_err(|e| format!("Trusted origin '{}' is not a URL: {}", origin, e))?;
    if !url.has_host() {
        return Err(format!("Trusted origin '{}' has no host", origin));
    }

    Ok(())
}

fn validate_database(database: &str) -> Result<(), String> {
    if database.is_empty() {
        return Err(
            "Database name is required. Set --database or MOVIEBOARD_DATABASE".to_string(),
        );
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
