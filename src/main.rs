use budget_ledger::args::{Args, Command, Common};
use budget_ledger::model::{AmountFormat, TransactionKind};
use budget_ledger::{commands, Config, JsonFileStore, Result, Session};
use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let common = args.common();
    let home = common.budget_home().path();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init(init_args) => commands::init(
            home,
            init_args.currency_symbol(),
            init_args.thousands_separator(),
        )?
        .print(),

        Command::Income(add_args) => {
            let (mut session, format) = open(common)?;
            commands::add_transaction(
                &mut session,
                TransactionKind::Income,
                add_args.amount(),
                add_args.description(),
                add_args.category(),
                &format,
            )?
            .print()
        }

        Command::Expense(add_args) => {
            let (mut session, format) = open(common)?;
            commands::add_transaction(
                &mut session,
                TransactionKind::Expense,
                add_args.amount(),
                add_args.description(),
                add_args.category(),
                &format,
            )?
            .print()
        }

        Command::Delete(delete_args) => {
            let (mut session, format) = open(common)?;
            commands::delete_transaction(&mut session, delete_args.position(), &format)?.print()
        }

        Command::Summary => {
            let (session, format) = open(common)?;
            commands::summary(&session, &format)?.print()
        }

        Command::Chart(chart_args) => {
            let (session, format) = open(common)?;
            commands::chart(&session, &format, chart_args.width())?.print()
        }

        Command::Menu(menu_args) => {
            let (mut session, format) = open(common)?;
            commands::menu(&mut session, &format, menu_args.chart_width())?.print()
        }
    };
    Ok(())
}

/// Loads the config and the ledger it points to.
fn open(common: &Common) -> Result<(Session<JsonFileStore>, AmountFormat)> {
    let config =
        Config::load(common.budget_home().path())?.with_data_file(common.data_file().cloned());
    let session = Session::open(config.store())?;
    Ok((session, config.amount_format()))
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for the library and binary only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
