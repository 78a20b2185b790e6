//! These structs provide the CLI interface for the tdash CLI.

use crate::connect::TellerEnvironment;
use crate::model::YearMonth;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// tdash: A command-line dashboard for a Teller-backed budget API.
///
/// The purpose of this program is to browse the bank accounts and transactions served by your
/// budget backend, assign spending categories, and export a month of transactions to the
/// external spreadsheet the backend is connected to.
///
/// Linking a bank happens through the Teller Connect widget in a browser; the `link` command
/// accepts the enrollment payload the widget produced and forwards it to the backend.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and initialize the configuration file.
    ///
    /// This is the first command you should run. Decide what directory you want configuration
    /// stored in and pass it as --dash-home (default $HOME/teller-dash), and pass the base URL
    /// of your budget backend as --api-url.
    Init(InitArgs),
    /// Forward a Teller Connect enrollment payload to the backend, linking a bank.
    Link(LinkArgs),
    /// List or disconnect linked institutions.
    Institutions(InstitutionsArgs),
    /// List the accounts for one institution.
    Accounts(AccountsArgs),
    /// Show a balance snapshot for one account.
    Balance(BalanceArgs),
    /// List, search or categorize transactions.
    Transactions(TransactionsArgs),
    /// Show monthly totals and spending by category.
    Summary(SummaryArgs),
    /// Export a month of transactions to the external spreadsheet.
    Export(ExportArgs),
    /// Manage spending categories.
    Categories(CategoriesArgs),
    /// Manage auto-categorization mappings.
    Mappings(MappingsArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where tdash configuration is held. Defaults to ~/teller-dash
    #[arg(long, env = "TDASH_HOME", default_value_t = default_dash_home())]
    dash_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, dash_home: PathBuf) -> Self {
        Self {
            log_level,
            dash_home: dash_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn dash_home(&self) -> &DisplayPath {
        &self.dash_home
    }
}

/// Args for the `tdash init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The base URL of the budget backend's REST API.
    #[arg(long, default_value = "http://localhost:8000/api")]
    api_url: String,

    /// Your Teller Connect application id, e.g. app_pb2s7s7kc4918jnrms000
    #[arg(long)]
    application_id: String,

    /// The Teller environment: sandbox, development or production.
    #[arg(long, default_value_t = TellerEnvironment::Sandbox)]
    environment: TellerEnvironment,
}

impl InitArgs {
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    pub fn environment(&self) -> TellerEnvironment {
        self.environment
    }
}

/// Args for the `tdash link` command.
#[derive(Debug, Parser, Clone)]
pub struct LinkArgs {
    /// The path to a JSON file holding the enrollment payload produced by Teller Connect.
    #[arg(long)]
    enrollment: PathBuf,
}

impl LinkArgs {
    pub fn enrollment(&self) -> &Path {
        &self.enrollment
    }
}

#[derive(Debug, Parser, Clone)]
pub struct InstitutionsArgs {
    #[command(subcommand)]
    command: InstitutionsSubcommand,
}

impl InstitutionsArgs {
    pub fn command(&self) -> &InstitutionsSubcommand {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum InstitutionsSubcommand {
    /// List the institutions the user has linked.
    List,
    /// Unlink an institution, deleting its stored token.
    Disconnect(DisconnectArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct DisconnectArgs {
    /// The institution name, as shown by `institutions list`.
    #[arg(long)]
    name: String,
}

impl DisconnectArgs {
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Parser, Clone)]
pub struct AccountsArgs {
    /// The institution to list accounts for.
    #[arg(long)]
    institution: String,
}

impl AccountsArgs {
    pub fn institution(&self) -> &str {
        &self.institution
    }
}

#[derive(Debug, Parser, Clone)]
pub struct BalanceArgs {
    /// The account id.
    #[arg(long)]
    account: String,

    /// The institution the account belongs to.
    #[arg(long)]
    institution: Option<String>,
}

impl BalanceArgs {
    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn institution(&self) -> Option<&str> {
        self.institution.as_deref()
    }
}

#[derive(Debug, Parser, Clone)]
pub struct TransactionsArgs {
    #[command(subcommand)]
    command: TransactionsSubcommand,
}

impl TransactionsArgs {
    pub fn command(&self) -> &TransactionsSubcommand {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum TransactionsSubcommand {
    /// List the transactions for one account, optionally scoped to a month or filtered by a
    /// search string.
    List(ListTransactionsArgs),
    /// Assign a category to one transaction.
    Categorize(CategorizeArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct ListTransactionsArgs {
    /// The account id.
    #[arg(long)]
    account: String,

    /// The institution the account belongs to.
    #[arg(long)]
    institution: Option<String>,

    /// Only show transactions in this month, e.g. 2025-03.
    #[arg(long)]
    month: Option<YearMonth>,

    /// Case-insensitive substring to match against description and category.
    #[arg(long)]
    search: Option<String>,
}

impl ListTransactionsArgs {
    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn institution(&self) -> Option<&str> {
        self.institution.as_deref()
    }

    pub fn month(&self) -> Option<YearMonth> {
        self.month
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }
}

#[derive(Debug, Parser, Clone)]
pub struct CategorizeArgs {
    /// The account id the transaction belongs to.
    #[arg(long)]
    account: String,

    /// The institution the account belongs to.
    #[arg(long)]
    institution: Option<String>,

    /// The transaction id.
    #[arg(long)]
    id: String,

    /// The category name to assign.
    #[arg(long)]
    category: String,
}

impl CategorizeArgs {
    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn institution(&self) -> Option<&str> {
        self.institution.as_deref()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

#[derive(Debug, Parser, Clone)]
pub struct SummaryArgs {
    /// An account id to include. Repeat to include several accounts.
    #[arg(long = "account", required = true)]
    accounts: Vec<String>,

    /// The institution the accounts belong to.
    #[arg(long)]
    institution: Option<String>,

    /// The month to summarize, e.g. 2025-03. Defaults to the current month.
    #[arg(long)]
    month: Option<YearMonth>,
}

impl SummaryArgs {
    pub fn accounts(&self) -> &[String] {
        &self.accounts
    }

    pub fn institution(&self) -> Option<&str> {
        self.institution.as_deref()
    }

    pub fn month(&self) -> Option<YearMonth> {
        self.month
    }
}

#[derive(Debug, Parser, Clone)]
pub struct ExportArgs {
    /// An account id to include. Repeat to include several accounts.
    #[arg(long = "account", required = true)]
    accounts: Vec<String>,

    /// The institution the accounts belong to.
    #[arg(long)]
    institution: Option<String>,

    /// The month to export, e.g. 2025-03. Defaults to the current month.
    #[arg(long)]
    month: Option<YearMonth>,
}

impl ExportArgs {
    pub fn accounts(&self) -> &[String] {
        &self.accounts
    }

    pub fn institution(&self) -> Option<&str> {
        self.institution.as_deref()
    }

    pub fn month(&self) -> Option<YearMonth> {
        self.month
    }
}

#[derive(Debug, Parser, Clone)]
pub struct CategoriesArgs {
    #[command(subcommand)]
    command: CategoriesSubcommand,
}

impl CategoriesArgs {
    pub fn command(&self) -> &CategoriesSubcommand {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum CategoriesSubcommand {
    /// List the spending categories.
    List,
    /// Add a spending category.
    Add(AddCategoryArgs),
    /// Rename or recolor a spending category.
    Update(UpdateCategoryArgs),
    /// Delete a spending category.
    Delete(DeleteCategoryArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct AddCategoryArgs {
    /// The category name.
    #[arg(long)]
    name: String,

    /// The chart color, e.g. #10B981.
    #[arg(long)]
    color: Option<String>,
}

impl AddCategoryArgs {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }
}

#[derive(Debug, Parser, Clone)]
pub struct UpdateCategoryArgs {
    /// The category id.
    #[arg(long)]
    id: String,

    /// The new category name.
    #[arg(long)]
    name: Option<String>,

    /// The new chart color.
    #[arg(long)]
    color: Option<String>,
}

impl UpdateCategoryArgs {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }
}

#[derive(Debug, Parser, Clone)]
pub struct DeleteCategoryArgs {
    /// The category id.
    #[arg(long)]
    id: String,
}

impl DeleteCategoryArgs {
    pub fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Parser, Clone)]
pub struct MappingsArgs {
    #[command(subcommand)]
    command: MappingsSubcommand,
}

impl MappingsArgs {
    pub fn command(&self) -> &MappingsSubcommand {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum MappingsSubcommand {
    /// List the auto-categorization mappings.
    List,
    /// Add an auto-categorization mapping.
    Add(AddMappingArgs),
    /// Delete an auto-categorization mapping.
    Delete(DeleteMappingArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct AddMappingArgs {
    /// The description pattern to match.
    #[arg(long)]
    pattern: String,

    /// The category id to assign on a match.
    #[arg(long)]
    category_id: String,
}

impl AddMappingArgs {
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn category_id(&self) -> &str {
        &self.category_id
    }
}

#[derive(Debug, Parser, Clone)]
pub struct DeleteMappingArgs {
    /// The description pattern to delete.
    #[arg(long)]
    pattern: String,
}

impl DeleteMappingArgs {
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

fn default_dash_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("teller-dash"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --dash-home or TDASH_HOME instead of relying on the default \
                dash home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("teller-dash")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}
