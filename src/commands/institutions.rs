//! Institution command handlers: listing, linking and disconnecting banks.

use crate::args::{DisconnectArgs, LinkArgs};
use crate::commands::{bail_on_store_error, Out};
use crate::model::{Enrollment, Institution};
use crate::store::BankStore;
use crate::{client, utils, Config, Connect, Mode, Result};
use anyhow::Context;

/// Lists the institutions the user has linked.
pub async fn list_institutions(config: Config) -> Result<Out<Vec<Institution>>> {
    let api = client(&config, Mode::from_env())?;
    let mut bank = BankStore::new(api);
    bank.fetch_institutions().await;
    bail_on_store_error(bank.error())?;

    let institutions = bank.institutions().to_vec();
    let message = if institutions.is_empty() {
        "No institutions are linked".to_string()
    } else {
        let names: Vec<&str> = institutions
            .iter()
            .map(|i| i.institution_name.as_str())
            .collect();
        format!(
            "{} linked institution{}: {}",
            institutions.len(),
            if institutions.len() == 1 { "" } else { "s" },
            names.join(", ")
        )
    };
    Ok(Out::new(message, institutions))
}

/// Unlinks an institution by deleting its stored token.
pub async fn disconnect(config: Config, args: &DisconnectArgs) -> Result<Out<()>> {
    let api = client(&config, Mode::from_env())?;
    let mut bank = BankStore::new(api);
    bank.fetch_institutions().await;
    bail_on_store_error(bank.error())?;
    bank.disconnect_institution(args.name()).await;
    bail_on_store_error(bank.error())?;
    Ok(format!("Disconnected '{}'", args.name()).into())
}

/// Forwards a Teller Connect enrollment payload to the backend, linking a bank.
///
/// The browser half of the flow has already happened: the user ran the Teller Connect widget
/// and saved the enrollment payload it produced to a JSON file. This is the `onSuccess` half,
/// carried out against that file.
pub async fn link(config: Config, args: &LinkArgs) -> Result<Out<Vec<Institution>>> {
    let enrollment: Enrollment = utils::deserialize(args.enrollment())
        .await
        .context("Unable to read the enrollment payload")?;
    let institution = enrollment
        .institution_name()
        .unwrap_or("unknown institution")
        .to_string();

    let api = client(&config, Mode::from_env())?;
    let connect = Connect::new(&config);
    let mut bank = BankStore::new(api);
    connect.on_success(&mut bank, &enrollment).await?;

    Ok(Out::new(
        format!("Linked '{institution}'"),
        bank.institutions().to_vec(),
    ))
}
