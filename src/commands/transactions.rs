//! Transaction command handlers: listing, categorizing, exporting and the monthly summary.

use crate::args::{CategorizeArgs, ExportArgs, ListTransactionsArgs, SummaryArgs};
use crate::commands::{bail_on_store_error, Out};
use crate::model::{Amount, CategorySpending, ExportOutcome, Transaction, YearMonth};
use crate::store::{BankStore, TransactionStore};
use crate::{client, Config, Mode, Result};
use anyhow::bail;
use serde::Serialize;

/// Lists the transactions for one account, optionally scoped to a month or filtered by a
/// search string.
pub async fn list_transactions(
    config: Config,
    args: &ListTransactionsArgs,
) -> Result<Out<Vec<Transaction>>> {
    let api = client(&config, Mode::from_env())?;
    let mut store = TransactionStore::new(api);
    store.fetch_transactions(args.account(), args.institution()).await;
    bail_on_store_error(store.error())?;

    if let Some(search) = args.search() {
        store.filter_transactions(search);
    }
    let transactions: Vec<Transaction> = match args.month() {
        Some(month) => store
            .filtered_transactions()
            .iter()
            .filter(|t| month.contains(t.date))
            .cloned()
            .collect(),
        None => store.filtered_transactions().to_vec(),
    };

    let message = format!(
        "{} transaction{} for '{}'",
        transactions.len(),
        if transactions.len() == 1 { "" } else { "s" },
        args.account()
    );
    Ok(Out::new(message, transactions))
}

/// Assigns a category to one transaction.
///
/// The store applies the category locally before the backend confirms it and rolls it back if
/// the backend rejects it. For a one-shot CLI invocation the optimistic phase is invisible;
/// what matters is that a rejection surfaces as an error.
pub async fn categorize(config: Config, args: &CategorizeArgs) -> Result<Out<Transaction>> {
    let api = client(&config, Mode::from_env())?;
    let mut bank = BankStore::new(api.clone());
    bank.fetch_institutions().await;
    bail_on_store_error(bank.error())?;
    if let Some(institution) = args.institution() {
        bank.fetch_accounts(institution).await;
        bail_on_store_error(bank.error())?;
    }

    let mut store = TransactionStore::new(api);
    store.fetch_transactions(args.account(), args.institution()).await;
    bail_on_store_error(store.error())?;
    if !store.transactions().iter().any(|t| t.id == args.id()) {
        bail!(
            "No transaction with id '{}' in account '{}'",
            args.id(),
            args.account()
        );
    }

    store.categorize_transaction(args.id(), args.category(), &bank).await;
    bail_on_store_error(store.error())?;

    let updated = store
        .transactions()
        .iter()
        .find(|t| t.id == args.id())
        .cloned()
        .unwrap_or_default();
    Ok(Out::new(
        format!("Categorized '{}' as '{}'", args.id(), args.category()),
        updated,
    ))
}

/// Exports a month of transactions to the external spreadsheet.
pub async fn export(config: Config, args: &ExportArgs) -> Result<Out<ExportOutcome>> {
    let api = client(&config, Mode::from_env())?;
    let (bank, mut store) =
        load_accounts(api, args.accounts(), args.institution(), args.month()).await?;

    let count = store.current_month_transactions().len();
    if count == 0 {
        return Ok(format!(
            "No transactions in {}, nothing to export",
            store.current_month().label()
        )
        .into());
    }

    let outcome = store.export_transactions(&bank).await?;
    let message = match &outcome.updated_range {
        Some(range) => format!(
            "Exported {} transaction{} from {} to '{range}'",
            count,
            if count == 1 { "" } else { "s" },
            store.current_month().label()
        ),
        None => format!(
            "Exported {} transaction{} from {}",
            count,
            if count == 1 { "" } else { "s" },
            store.current_month().label()
        ),
    };
    Ok(Out::new(message, outcome))
}

/// The monthly totals and per-category spending shown by `tdash summary`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MonthSummary {
    pub month: YearMonth,
    pub label: String,
    pub income: Amount,
    pub expenses: Amount,
    pub net: Amount,
    pub spending_by_category: Vec<CategorySpending>,
    pub uncategorized_count: usize,
    /// The distinct months present in the fetched data, most recent first.
    pub available_months: Vec<YearMonth>,
}

/// Shows monthly totals and spending by category for a set of accounts.
pub async fn summary(config: Config, args: &SummaryArgs) -> Result<Out<MonthSummary>> {
    let api = client(&config, Mode::from_env())?;
    let (_, mut store) =
        load_accounts(api, args.accounts(), args.institution(), args.month()).await?;
    store.fetch_categories().await;
    bail_on_store_error(store.error())?;

    let income = store.total_income();
    let expenses = store.total_expenses();
    let net = Amount::new(income.value() - expenses.value());
    let summary = MonthSummary {
        month: store.current_month(),
        label: store.current_month().label(),
        income,
        expenses,
        net,
        spending_by_category: store.spending_by_category(),
        uncategorized_count: store.uncategorized_transactions().len(),
        available_months: store.available_months(),
    };

    let message = format!(
        "{}: income {}, expenses {}, net {}",
        summary.label, summary.income, summary.expenses, summary.net
    );
    Ok(Out::new(message, summary))
}

/// Fetches the given accounts' transactions into a fresh pair of stores and selects the month
/// to operate on.
async fn load_accounts(
    api: std::sync::Arc<dyn crate::BudgetApi>,
    accounts: &[String],
    institution: Option<&str>,
    month: Option<YearMonth>,
) -> Result<(BankStore, TransactionStore)> {
    let mut bank = BankStore::new(api.clone());
    bank.fetch_institutions().await;
    bail_on_store_error(bank.error())?;
    if let Some(institution) = institution {
        bank.fetch_accounts(institution).await;
        bail_on_store_error(bank.error())?;
    }

    let mut store = TransactionStore::new(api);
    for account in accounts {
        store.fetch_transactions(account, institution).await;
        bail_on_store_error(store.error())?;
    }
    if let Some(month) = month {
        store.set_month(month);
    }
    Ok((bank, store))
}
