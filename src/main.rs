//! P/L Calculator
//!
//! Values a set of open positions on one pair at a hypothetical close,
//! either in one shot or through an interactive form session.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use plcalc::form::format_value;
use plcalc::session::Session;
use plcalc::{
    report, validate_request, CalculatorConfig, CalculatorForm, PositionInput, RequestInput,
    Valuation,
};

/// P/L calculator CLI.
#[derive(Parser)]
#[command(name = "plcalc")]
#[command(about = "Calculate the total value of open positions at a closing price", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, env = "PLCALC_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the total value of the given positions
    Calc {
        /// Pair to value against (defaults to PLCALC_DEFAULT_PAIR)
        #[arg(long)]
        pair: Option<String>,

        /// Close price without decimal, e.g. 90800 for 0.90800
        #[arg(short, long, allow_hyphen_values = true)]
        close: Option<String>,

        /// Position as DIRECTION:LOT:OPEN, e.g. buy:1.5:90400 (repeatable)
        #[arg(short = 'p', long = "position", value_name = "DIR:LOT:OPEN")]
        positions: Vec<String>,

        /// Read the whole request from a JSON file instead (a missing pair
        /// still falls back to PLCALC_DEFAULT_PAIR)
        #[arg(short, long, conflicts_with_all = ["pair", "close", "positions"])]
        file: Option<PathBuf>,

        /// Print the valuation as JSON
        #[arg(long)]
        json: bool,

        /// Show the value of each position
        #[arg(short, long)]
        breakdown: bool,
    },

    /// List tradeable pairs and their spread factors
    Pairs,

    /// Start an interactive calculator session
    Session,

    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Setup logging
    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = CalculatorConfig::from_env()?;

    match cli.command {
        Commands::Calc {
            pair,
            close,
            positions,
            file,
            json,
            breakdown,
        } => {
            let input = match file {
                Some(path) => read_request(&path)?,
                None => RequestInput {
                    pair,
                    close,
                    positions: positions
                        .iter()
                        .map(|p| p.parse::<PositionInput>().unwrap_or_default())
                        .collect(),
                },
            }
            .with_default_pair(config.default_pair);

            let request = validate_request(&input)?;
            let valuation = Valuation::of(&request);
            info!(
                pair = %valuation.pair,
                close = %valuation.close,
                positions = valuation.positions.len(),
                total = %valuation.total,
                "Total value calculated"
            );

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&valuation).context("Failed to encode valuation")?
                );
            } else if breakdown {
                print!("{}", report::valuation_table(&valuation, config.precision));
            } else {
                let count = valuation.positions.len();
                println!(
                    "Total value: {} ({} position{})",
                    format_value(valuation.total, config.precision),
                    count,
                    if count == 1 { "" } else { "s" }
                );
            }
        }

        Commands::Pairs => {
            print!("{}", report::pairs_table());
        }

        Commands::Session => {
            let mut session = Session::new(CalculatorForm::new(config));
            let stdin = io::stdin();
            session.run(stdin.lock(), io::stdout())?;
        }

        Commands::Config => {
            println!("\n=== Calculator Configuration ===\n");
            println!("  Default Pair:         {}", config.default_pair);
            println!("  Display Precision:    {}", config.precision);
        }
    }

    Ok(())
}

/// Load a request from a JSON file.
fn read_request(path: &Path) -> Result<RequestInput> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}
