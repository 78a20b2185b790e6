//! Account command handlers: the account list and balance snapshots.

use crate::args::{AccountsArgs, BalanceArgs};
use crate::commands::{bail_on_store_error, Out};
use crate::model::{Account, Balance};
use crate::store::BankStore;
use crate::{client, Config, Mode, Result};

/// Lists the accounts for one institution.
pub async fn accounts(config: Config, args: &AccountsArgs) -> Result<Out<Vec<Account>>> {
    let api = client(&config, Mode::from_env())?;
    let mut bank = BankStore::new(api);
    bank.fetch_institutions().await;
    bail_on_store_error(bank.error())?;
    bank.fetch_accounts(args.institution()).await;
    bail_on_store_error(bank.error())?;

    let accounts = bank.accounts().to_vec();
    let message = format!(
        "{} account{} at '{}'",
        accounts.len(),
        if accounts.len() == 1 { "" } else { "s" },
        args.institution()
    );
    Ok(Out::new(message, accounts))
}

/// Shows a balance snapshot for one account.
pub async fn balance(config: Config, args: &BalanceArgs) -> Result<Out<Balance>> {
    let api = client(&config, Mode::from_env())?;
    let balance = api.get_balance(args.account(), args.institution()).await?;

    let mut parts = Vec::new();
    if let Some(available) = &balance.available {
        parts.push(format!("available {available}"));
    }
    if let Some(ledger) = &balance.ledger {
        parts.push(format!("ledger {ledger}"));
    }
    let message = if parts.is_empty() {
        format!("No balance reported for '{}'", args.account())
    } else {
        format!("Balance for '{}': {}", args.account(), parts.join(", "))
    };
    Ok(Out::new(message, balance))
}
