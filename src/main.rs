use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use loadout_rs::{
    availability::AvailabilityMask,
    bar_standard::BarStandard,
    calculator::PlateCalculator,
    config::Config,
    load_request::parse_kg,
    one_rep_max::{estimate_one_rep_max, percentage_table},
    server::{self, AppState},
    waitlist::{
        mailer::{LogMailer, Mailer, SmtpMailer},
        service::WaitlistService,
        store::{SqliteStore, WaitlistStore},
    },
};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "loadout", about = "Barbell plate and strength calculators")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Work out which plates to load for a total, e.g. `plates 102.5kg`.
    Plates {
        #[arg(value_parser = parse_kg)]
        total: f64,
        #[arg(short, long, default_value = "standard")]
        standard: BarStandard,
        /// Denominations you don't have, may repeat.
        #[arg(short, long, value_parser = parse_kg)]
        without: Vec<f64>,
    },
    /// Estimate a one-rep max from a set.
    OneRepMax {
        #[arg(value_parser = parse_kg)]
        weight: f64,
        reps: u32,
    },
    /// Run the HTTP API.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,loadout_rs=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let args = Args::parse();

    match args.command {
        Command::Plates {
            total,
            standard,
            without,
        } => {
            let calculator = PlateCalculator::with_availability(standard, AvailabilityMask::without(&without));
            let result = calculator.resolve(total);

            println!("{standard} bar ({}kg)", standard.bar_kg());
            for (plate, count) in result.loaded() {
                println!("  - {plate}: {count} per side");
            }
            println!("{result}");
            if !result.is_exact() {
                println!("{:.2}kg per side, {:.2}kg short", result.per_side_kg(), result.remainder_kg());
            }
            if calculator.exceeds_ceiling(total) {
                warn!(total, ceiling = standard.ceiling_kg(), "total exceeds what this bar is meant to hold");
            }
        }
        Command::OneRepMax { weight, reps } => {
            let estimate = estimate_one_rep_max(weight, reps);
            println!("Estimated 1RM: {estimate}kg");
            for row in percentage_table(estimate) {
                println!("  {:>3}%: {}kg", row.percent, row.kg);
            }
        }
        Command::Serve => serve().await?,
    }

    Ok(())
}

async fn serve() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    let store = SqliteStore::open(&config.db_path)
        .with_context(|| format!("opening {}", config.db_path.display()))?;
    info!(signups = store.count()?, path = %config.db_path.display(), "waitlist ready");

    let mailer: Arc<dyn Mailer> = match &config.smtp {
        Some(smtp) => Arc::new(SmtpMailer::new(smtp, &config.from_email)?),
        None => {
            warn!("SMTP_SERVER not set, welcome emails will only be logged");
            Arc::new(LogMailer)
        }
    };

    let state = AppState {
        waitlist: Arc::new(WaitlistService::new(Arc::new(store), mailer)),
    };

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    info!("Starting server on {}", config.bind_addr);
    axum::serve(listener, server::router(state)).await?;

    Ok(())
}
