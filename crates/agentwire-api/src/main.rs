//! agentwire CLI and HTTP server entry point.
//!
//! Binary name: `awire`
//!
//! Parses CLI arguments, initializes tracing and config, then dispatches to
//! the offline tools or starts the streaming HTTP server.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use agentwire_core::sanitize::Sanitizer;
use agentwire_core::stream::TransducerOptions;
use agentwire_infra::config::load_global_config;
use agentwire_infra::filesystem::resolve_data_dir;
use agentwire_observe::tracing_setup::{init_tracing, shutdown_tracing, verbosity_filter};

use cli::{Cli, Commands, ServeArgs};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(verbosity_filter(cli.verbose, cli.quiet), cli.otel)
        .map_err(|e| anyhow::anyhow!(e))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Shell completions don't need config
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "awire", &mut std::io::stdout());
        return Ok(());
    }

    let data_dir = resolve_data_dir();
    let mut config = load_global_config(&data_dir).await;

    match cli.command {
        Commands::Serve(args) => {
            args.apply(&mut config);
            serve(config, &data_dir, &args).await?;
        }

        Commands::Replay {
            file,
            trace_model_input,
            thread_id,
        } => {
            let options = TransducerOptions::new(thread_id)
                .with_trace_model_input(trace_model_input || config.stream.trace_model_input)
                .with_sanitizer(Sanitizer::new(&config.stream.tool_output_tag)?);
            cli::replay::replay(&file, options).await?;
        }

        Commands::Sanitize { file, tag } => {
            let tag = tag.unwrap_or(config.stream.tool_output_tag);
            cli::sanitize::sanitize(file.as_deref(), &tag).await?;
        }

        Commands::Truncate { file, max, system } => {
            let max = max.unwrap_or(config.stream.max_history);
            cli::truncate::truncate(&file, max, system.as_deref()).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

async fn serve(
    config: agentwire_types::config::GlobalConfig,
    data_dir: &std::path::Path,
    args: &ServeArgs,
) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::init(config, data_dir)?;
    let runtime_name = state.runtime.name().to_string();

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::debug!(?args, "Serve flags");

    println!(
        "  {} agentwire listening on {} (runtime: {})",
        console::style("⚡").bold(),
        console::style(format!("http://{addr}")).cyan(),
        console::style(runtime_name).green()
    );
    println!("  {}", console::style("Press Ctrl+C to stop").dim());

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    println!("\n  Server stopped.");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    tracing::info!("Shutdown signal received");
}
