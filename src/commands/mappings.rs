//! Auto-categorization mapping command handlers.

use crate::args::{AddMappingArgs, DeleteMappingArgs};
use crate::commands::Out;
use crate::model::{MappingRule, MappingSet, Mappings};
use crate::{client, Config, Mode, Result};

/// Lists the auto-categorization mappings, pattern -> category id.
pub async fn list_mappings(config: Config) -> Result<Out<Mappings>> {
    let api = client(&config, Mode::from_env())?;
    let mappings = api.get_mappings().await?;
    let message = format!(
        "{} mapping{}",
        mappings.len(),
        if mappings.len() == 1 { "" } else { "s" }
    );
    Ok(Out::new(message, mappings))
}

/// Adds an auto-categorization mapping.
pub async fn add_mapping(config: Config, args: &AddMappingArgs) -> Result<Out<MappingSet>> {
    let api = client(&config, Mode::from_env())?;
    let rule = MappingRule {
        pattern: args.pattern().to_string(),
        category_id: args.category_id().to_string(),
    };
    let set = api.add_mapping(&rule).await?;
    Ok(Out::new(
        format!(
            "Mapped '{}' to category '{}'",
            args.pattern(),
            args.category_id()
        ),
        set,
    ))
}

/// Deletes an auto-categorization mapping.
pub async fn delete_mapping(config: Config, args: &DeleteMappingArgs) -> Result<Out<MappingSet>> {
    let api = client(&config, Mode::from_env())?;
    let set = api.delete_mapping(args.pattern()).await?;
    Ok(Out::new(
        format!("Deleted mapping '{}'", args.pattern()),
        set,
    ))
}
