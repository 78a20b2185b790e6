use clap::Parser;
use std::process::ExitCode;
use teller_dash::args::{
    Args, CategoriesSubcommand, Command, InstitutionsSubcommand, MappingsSubcommand,
    TransactionsSubcommand,
};
use teller_dash::{commands, Config, Result};
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().dash_home().path();

    // Route to appropriate command handler. Every command other than `init` loads the config
    // first. The API client itself is built inside the handlers, where TDASH_IN_TEST_MODE can
    // swap in the in-memory test backend.
    let _: () = match args.command() {
        Command::Init(init_args) => commands::init(home, init_args).await?.print(),

        Command::Link(link_args) => {
            let config = Config::load(home).await?;
            commands::link(config, link_args).await?.print()
        }

        Command::Institutions(institutions_args) => {
            let config = Config::load(home).await?;
            match institutions_args.command() {
                InstitutionsSubcommand::List => commands::list_institutions(config).await?.print(),
                InstitutionsSubcommand::Disconnect(disconnect_args) => {
                    commands::disconnect(config, disconnect_args).await?.print()
                }
            }
        }

        Command::Accounts(accounts_args) => {
            let config = Config::load(home).await?;
            commands::accounts(config, accounts_args).await?.print()
        }

        Command::Balance(balance_args) => {
            let config = Config::load(home).await?;
            commands::balance(config, balance_args).await?.print()
        }

        Command::Transactions(transactions_args) => {
            let config = Config::load(home).await?;
            match transactions_args.command() {
                TransactionsSubcommand::List(list_args) => {
                    commands::list_transactions(config, list_args).await?.print()
                }
                TransactionsSubcommand::Categorize(categorize_args) => {
                    commands::categorize(config, categorize_args).await?.print()
                }
            }
        }

        Command::Summary(summary_args) => {
            let config = Config::load(home).await?;
            commands::summary(config, summary_args).await?.print()
        }

        Command::Export(export_args) => {
            let config = Config::load(home).await?;
            commands::export(config, export_args).await?.print()
        }

        Command::Categories(categories_args) => {
            let config = Config::load(home).await?;
            match categories_args.command() {
                CategoriesSubcommand::List => commands::list_categories(config).await?.print(),
                CategoriesSubcommand::Add(add_args) => {
                    commands::add_category(config, add_args).await?.print()
                }
                CategoriesSubcommand::Update(update_args) => {
                    commands::update_category(config, update_args).await?.print()
                }
                CategoriesSubcommand::Delete(delete_args) => {
                    commands::delete_category(config, delete_args).await?.print()
                }
            }
        }

        Command::Mappings(mappings_args) => {
            let config = Config::load(home).await?;
            match mappings_args.command() {
                MappingsSubcommand::List => commands::list_mappings(config).await?.print(),
                MappingsSubcommand::Add(add_args) => {
                    commands::add_mapping(config, add_args).await?.print()
                }
                MappingsSubcommand::Delete(delete_args) => {
                    commands::delete_mapping(config, delete_args).await?.print()
                }
            }
        }
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "teller_dash={},{}={}",
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
