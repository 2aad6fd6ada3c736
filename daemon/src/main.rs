//! Aerosure daemon — entry point for running a pool with its oracle relay.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::RwLock;

use aerosure_app::{init_logging, AppConfig, LogFormat, SuretyApp};
use aerosure_relay::{OracleRelay, RelayConfig};
use aerosure_types::{AccountId, Amount, FlightCode, PoolParams, Timestamp};

/// Seed for deterministic oracle index derivation on the dev deployment.
const DEV_ORACLE_SEED: [u8; 32] = [7u8; 32];

#[derive(Parser)]
#[command(name = "aerosure-daemon", about = "Aerosure flight-delay insurance pool daemon")]
struct Cli {
    /// Port for the relay's HTTP API.
    #[arg(long, env = "AEROSURE_HTTP_PORT")]
    http_port: Option<u16>,

    /// Number of reporter identities the relay bootstraps.
    #[arg(long, env = "AEROSURE_REPORTERS")]
    reporters: Option<usize>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "info", env = "AEROSURE_LOG_LEVEL")]
    log_level: String,

    /// Log format: "human" or "json".
    #[arg(long, default_value = "human", env = "AEROSURE_LOG_FORMAT")]
    log_format: String,

    /// Path to a TOML configuration file. If provided, file settings are
    /// used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Run the pool and serve the relay API.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file_config: Option<AppConfig> = match cli.config.as_ref() {
        Some(path) => match AppConfig::from_toml_file(&path.display().to_string()) {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                eprintln!("failed to load config {}: {e} — using CLI defaults", path.display());
                None
            }
        },
        None => None,
    };

    let base = file_config.unwrap_or_default();
    let config = AppConfig {
        http_port: cli.http_port.unwrap_or(base.http_port),
        reporter_count: cli.reporters.unwrap_or(base.reporter_count),
        log_level: cli.log_level,
        log_format: cli.log_format,
        ..base
    };

    init_logging(LogFormat::from_config(&config.log_format), &config.log_level);

    match cli.command {
        Command::Serve => {
            tracing::info!(
                port = config.http_port,
                reporters = config.reporter_count,
                "starting Aerosure pool"
            );

            let app = Arc::new(RwLock::new(dev_pool(&config.params)?));
            let relay = OracleRelay::bootstrap(
                Arc::clone(&app),
                &owner(),
                RelayConfig {
                    reporter_count: config.reporter_count,
                    quorum_deadline: Duration::from_secs(config.quorum_deadline_secs),
                },
            )
            .await?;

            let relay = Arc::new(relay);
            tokio::spawn(Arc::clone(&relay).supervise());
            aerosure_relay::serve(relay, config.http_port).await?;
            tracing::info!("Aerosure daemon exited cleanly");
        }
    }

    Ok(())
}

fn owner() -> AccountId {
    AccountId::new("aero_owner")
}

/// Build the dev deployment: four funded airlines with one demo flight
/// each, plus ten seeded passenger accounts.
fn dev_pool(params: &PoolParams) -> anyhow::Result<SuretyApp> {
    let airlines = [
        ("aero_jt_air", "JT Air", "ND1309"),
        ("aero_rac_air", "Rac Air", "AB123"),
        ("aero_uda_air", "Uda Air", "BC234"),
        ("aero_v_air", "V Air", "CD345"),
    ];
    let departure = Timestamp::new(1_637_415_493);

    let founding = AccountId::new(airlines[0].0);
    let mut app = SuretyApp::new(
        owner(),
        founding.clone(),
        airlines[0].1,
        DEV_ORACLE_SEED,
        params.clone(),
    );

    for (id, _, _) in &airlines {
        app.seed_account(AccountId::new(*id), Amount::from_aero(100), &owner())?;
    }
    app.fund_airline(&founding, Amount::from_aero(30))?;

    let mut previous = founding;
    for (id, name, _) in airlines.iter().skip(1) {
        let airline = AccountId::new(*id);
        app.register_airline(airline.clone(), *name, &previous)?;
        app.fund_airline(&airline, Amount::from_aero(30))?;
        previous = airline;
    }

    for (id, _, code) in &airlines {
        app.register_flight(
            FlightCode::new(*code),
            departure,
            Amount::from_aero(20),
            &AccountId::new(*id),
        )?;
    }

    for i in 0..10 {
        app.seed_account(
            AccountId::new(format!("aero_passenger_{i}")),
            Amount::from_aero(50),
            &owner(),
        )?;
    }

    tracing::info!("dev pool seeded: 4 funded airlines, 4 flights, 10 passengers");
    Ok(app)
}
