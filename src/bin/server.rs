use anyhow::Context;
use clap::Parser;
use coinmill::config::{self, CliArgs, Config};
use coinmill::{create_app, db, run_migrations};
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Filter directives used when `RUST_LOG` is not set
fn default_directives(debug: bool) -> String {
    let level = if debug { "debug" } else { "info" };
    format!("coinmill={level},tower_http={level}")
}

fn env_filter(debug: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(debug)))
}

/// Resolves the configuration with console logging active for the duration
///
/// The global subscriber depends on the resolved `log_dir`, so config file
/// problems are reported through this scoped one.
fn load_config(args: &CliArgs) -> Config {
    let startup = fmt().with_env_filter(env_filter(args.debug)).finish();
    tracing::subscriber::with_default(startup, || config::get_config(args))
}

/// Sets up console logging, plus a daily JSON log file when `log_dir` is set
///
/// The returned guard flushes the file writer and must be held until exit.
fn init_tracing(debug: bool, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = env_filter(debug);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "coinmill.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_writer(writer).boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    guard
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let args = CliArgs::parse();
    let config = load_config(&args);
    let _guard = init_tracing(args.debug, config.log_dir.as_deref());

    let pool = db::init_pool(&config.database_url)
        .with_context(|| format!("Failed to open database at {}", config.database_url))?;

    {
        let mut conn = pool.get().context("Failed to get a database connection")?;
        run_migrations(&mut conn)?;
    }

    let app = create_app(Arc::new(pool));

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}
