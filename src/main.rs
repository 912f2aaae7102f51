//! Movieboard - a movie and comments API.
//!
//! This binary starts the HTTP server and configures all components.

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use movieboard::{
    catalog::{CatalogService, COMMENTS_COLLECTION, MOVIES_COLLECTION, PAGE_LIMIT},
    config::{CheckConfig, Cli, Command, ServeConfig},
    server::{create_router, RouterConfig},
    store::{DocumentStore, FindQuery, MemoryStore, MongoStore},
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.into_command() {
        Command::Serve(config) => run_serve(config).await,
        Command::Check(config) => run_check(config).await,
    }
}

// =============================================================================
// Serve Command
// =============================================================================

async fn run_serve(config: ServeConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    print_banner();

    info!("Configuration:");
    info!("  Trusted origin: {}", config.trusted_origin);
    info!("  Database: {}", config.database);
    info!("  Static assets: {}", config.static_dir.display());
    if !config.static_dir.is_dir() {
        warn!("  Static directory does not exist; /static will return 404");
    }

    let router_config = build_router_config(&config);

    let router = match config.mongo_uri.as_deref() {
        Some(uri) => {
            let store = match MongoStore::connect(uri, &config.database).await {
                Ok(store) => store,
                Err(e) => {
                    error!("Invalid MongoDB configuration: {}", e);
                    return ExitCode::FAILURE;
                }
            };
            report_store(&store).await;
            create_router(CatalogService::new(store), router_config)
        }
        None => {
            warn!("  Store: in-memory (no --mongo-uri given, data is lost on exit)");
            let store = MemoryStore::new();
            report_store(&store).await;
            create_router(CatalogService::new(store), router_config)
        }
    };

    let addr = config.bind_address();

    info!("");
    info!("────────────────────────────────────────────────────────────────");
    info!("  Server listening on: http://{}", addr);
    info!("");
    info!("  Try these endpoints:");
    info!("    curl http://{}/api/status", addr);
    info!(
        "    curl -H 'Origin: {}' http://{}/api/getMoviesData",
        config.trusted_origin, addr
    );
    info!("────────────────────────────────────────────────────────────────");
    info!("");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Server stopped");
    ExitCode::SUCCESS
}

/// Ping the store once at startup. Failure is logged, not fatal.
async fn report_store<S: DocumentStore>(store: &S) {
    info!("");
    info!("Connecting to {}...", store.describe());
    match store.ping().await {
        Ok(()) => info!("  Connected successfully"),
        Err(e) => {
            error!("  Failed to reach the document store: {}", e);
            error!("  Data routes will return errors until it becomes reachable");
        }
    }
}

/// Print the startup banner.
fn print_banner() {
    let version = env!("CARGO_PKG_VERSION");
    info!("");
    info!("  __  __            _      _                         _ ");
    info!(" |  \\/  | _____   _(_) ___| |__   ___   __ _ _ __ __| |");
    info!(" | |\\/| |/ _ \\ \\ / / |/ _ \\ '_ \\ / _ \\ / _` | '__/ _` |");
    info!(" | |  | | (_) \\ V /| |  __/ |_) | (_) | (_| | | | (_| |");
    info!(" |_|  |_|\\___/ \\_/ |_|\\___|_.__/ \\___/ \\__,_|_|  \\__,_|");
    info!("");
    info!("                        v{}", version);
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "movieboard=debug,tower_http=debug"
    } else {
        "movieboard=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build RouterConfig from the application ServeConfig.
fn build_router_config(config: &ServeConfig) -> RouterConfig {
    RouterConfig::new(config.trusted_origin.clone())
        .with_static_dir(config.static_dir.clone())
        .with_tracing(!config.no_tracing)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

// =============================================================================
// Check Command
// =============================================================================

async fn run_check(config: CheckConfig) -> ExitCode {
    if config.verbose {
        init_logging(true);
    }

    println!("Movieboard Store Check");
    println!("══════════════════════");
    println!();

    if let Err(e) = config.validate() {
        println!("✗ Configuration: {}", e);
        return ExitCode::FAILURE;
    }
    println!("✓ Database: {}", config.database);

    let store = match MongoStore::connect(&config.mongo_uri, &config.database).await {
        Ok(store) => store,
        Err(e) => {
            println!("✗ Connection string: {}", e);
            return ExitCode::FAILURE;
        }
    };

    print!("Pinging MongoDB... ");
    if let Err(e) = store.ping().await {
        println!("✗ failed");
        println!();
        println!("Error: {}", e);
        println!();
        println!("Please check:");
        println!("  - The connection string is correct");
        println!("  - The server is reachable from this machine");
        println!("  - Your credentials have access to '{}'", config.database);
        return ExitCode::FAILURE;
    }
    println!("✓ success");

    for collection in [MOVIES_COLLECTION, COMMENTS_COLLECTION] {
        print!("Reading '{}'... ", collection);
        match store
            .find(collection, FindQuery::new().limit(PAGE_LIMIT))
            .await
        {
            Ok(documents) => println!("✓ {} document(s) in first page", documents.len()),
            Err(e) => {
                println!("✗ failed");
                println!("  Error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    println!();
    println!("══════════════════════");
    println!("✓ All checks passed!");

    ExitCode::SUCCESS
}
