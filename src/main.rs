use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use salary_engine::api::{AppState, create_router};
use salary_engine::calculation::{calculate_net, parse_amount, solve_gross};
use salary_engine::config::ScheduleLoader;
use salary_engine::models::CalculationResult;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Gross/net salary calculator.
///
/// Computes net pay from gross pay, searches for the gross pay that yields a
/// desired net, or serves both calculations over HTTP.
#[derive(Debug, Parser)]
struct Cli {
    /// Directory holding schedule.yaml, contribution.yaml and withholding.yaml.
    /// The built-in schedule is used when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute net pay for a gross amount.
    Net {
        /// Gross pay, e.g. `3000.00`.
        gross: String,
    },
    /// Find the gross pay that yields a net amount.
    Gross {
        /// Desired net pay, e.g. `3000.00`.
        net: String,
    },
    /// Run the HTTP API.
    Serve {
        /// Address to listen on.
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<ScheduleLoader> {
    match path {
        Some(dir) => ScheduleLoader::load(dir)
            .with_context(|| format!("loading schedule from {}", dir.display())),
        None => {
            debug!("using built-in schedule");
            Ok(ScheduleLoader::default())
        }
    }
}

fn print_result(result: &CalculationResult) {
    let rounded = result.rounded();
    println!("gross:        {}", money(rounded.gross));
    println!("contribution: {}", money(rounded.contribution));
    println!("withholding:  {}", money(rounded.withholding));
    println!("net:          {}", money(rounded.net));
}

fn money(amount: Decimal) -> String {
    format!("{:.2}", amount)
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Command::Net { gross } => {
            let gross = parse_amount("gross", &gross)?;
            let calculation = calculate_net(gross, config.schedule(), 1);
            print_result(&calculation.result);
        }
        Command::Gross { net } => {
            let net = parse_amount("net", &net)?;
            let solution = solve_gross(net, config.schedule(), config.solver())?;
            print_result(&solution.result);
            println!("iterations:   {}", solution.iterations);
        }
        Command::Serve { addr } => {
            let app = create_router(AppState::new(config));
            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .with_context(|| format!("binding {}", addr))?;
            info!(%addr, "salary engine listening");
            axum::serve(listener, app).await.context("serving HTTP")?;
        }
    }

    Ok(())
}
