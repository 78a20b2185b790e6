use crate::args::InitArgs;
use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the data directory and an initial `config.json` file holding the backend API URL and
/// the Teller Connect parameters.
///
/// # Arguments
/// - `dash_home` - The directory that will be the root of the data directory, e.g.
///   `$HOME/teller-dash`
/// - `args` - The backend API URL, Teller application id and Teller environment.
///
/// # Errors
/// - Returns an error if any file operations fail.
pub async fn init(dash_home: &Path, args: &InitArgs) -> Result<Out<()>> {
    let config = Config::create(
        dash_home,
        args.api_url(),
        args.application_id(),
        args.environment(),
    )
    .await
    .context("Unable to create the data directory and config")?;
    Ok(format!(
        "Successfully created the teller-dash directory and config at '{}'",
        config.config_path().display()
    )
    .into())
}
