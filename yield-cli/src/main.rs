use std::io;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use yield_cli::calculate::{CalculateArgs, render_errors, render_result};
use yield_cli::export::{ListFormat, render_table, write_csv};
use yield_core::SimulationSummary;
use yield_core::calculations::YieldCalculator;
use yield_core::db::DbConfig;
use yield_core::presentation::present;
use yield_core::validation::validate_form;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Rental yield calculator.
///
/// Projects the three-year net rental yield of a property and manages the
/// stored simulations.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Database backend to use.
    #[arg(long, global = true, default_value = "sqlite")]
    backend: String,

    /// Database connection string.
    /// For SQLite this is a sqlx URL, a file path or `:memory:`.
    #[arg(long, global = true, default_value = "sqlite:simulations.db?mode=rwc")]
    db: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate the inputs and print the projected yield.
    Calculate(CalculateArgs),

    /// List stored simulations, newest first.
    List {
        #[arg(long, value_enum, default_value_t = ListFormat::Table)]
        format: ListFormat,
    },
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `warn` so command output stays readable.
/// * Logs go to stderr, without timestamps or targets.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let db_config = DbConfig {
        backend: cli.backend,
        connection_string: cli.db,
    };

    match cli.command {
        Command::Calculate(args) => {
            let input = match validate_form(&args.to_form()) {
                Ok(input) => input,
                Err(errors) => {
                    eprint!("{}", render_errors(&errors));
                    bail!("{} invalid option(s)", errors.len());
                }
            };

            let result = YieldCalculator::default().calculate(&input);
            print!("{}", render_result(&present(&result)));

            if args.save {
                debug!("connecting to {} backend", db_config.backend);
                let repo = yield_db_sqlite::registry().create(&db_config).await?;
                let saved = repo
                    .store(input.to_new_simulation())
                    .await
                    .context("Failed to save simulation")?;
                info!(id = saved.id, "simulation saved");
                println!("Saved as simulation #{}", saved.id);
            }
        }
        Command::List { format } => {
            debug!("connecting to {} backend", db_config.backend);
            let repo = yield_db_sqlite::registry().create(&db_config).await?;
            let summaries: Vec<SimulationSummary> = repo
                .list_all()
                .await
                .context("Failed to load simulations")?
                .into_iter()
                .map(SimulationSummary::from)
                .collect();

            match format {
                ListFormat::Table => print!("{}", render_table(&summaries)),
                ListFormat::Csv => write_csv(io::stdout().lock(), &summaries)?,
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn list_accepts_csv_and_global_db() {
        let cli = Cli::try_parse_from(["yield", "list", "--format", "csv", "--db", ":memory:"])
            .unwrap();

        assert_eq!(cli.db, ":memory:");
        assert_eq!(cli.backend, "sqlite");
        assert!(matches!(
            cli.command,
            Command::List {
                format: ListFormat::Csv
            }
        ));
    }

    #[test]
    fn calculate_requires_base_inputs() {
        let result = Cli::try_parse_from(["yield", "calculate", "--purchase-price", "200000"]);

        assert!(result.is_err());
    }

    #[test]
    fn calculate_parses_optional_inputs() {
        let cli = Cli::try_parse_from([
            "yield",
            "calculate",
            "--purchase-price",
            "200000",
            "--monthly-rent",
            "1200",
            "--annual-fee",
            "500",
            "--email",
            "owner@example.com",
            "--bedrooms",
            "2",
            "--save",
        ])
        .unwrap();

        let Command::Calculate(args) = cli.command else {
            panic!("expected calculate");
        };
        assert_eq!(args.bedrooms.as_deref(), Some("2"));
        assert_eq!(args.surface, None);
        assert!(args.save);
    }
}
