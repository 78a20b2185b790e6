//! Category command handlers.

use crate::args::{AddCategoryArgs, DeleteCategoryArgs, UpdateCategoryArgs};
use crate::commands::Out;
use crate::model::{Category, CategorySet, CategoryUpdate};
use crate::{client, Config, Mode, Result};

/// Lists the spending categories.
pub async fn list_categories(config: Config) -> Result<Out<Vec<Category>>> {
    let api = client(&config, Mode::from_env())?;
    let categories = api.get_categories().await?;
    let message = format!(
        "{} categor{}",
        categories.len(),
        if categories.len() == 1 { "y" } else { "ies" }
    );
    Ok(Out::new(message, categories))
}

/// Adds a spending category.
pub async fn add_category(config: Config, args: &AddCategoryArgs) -> Result<Out<CategorySet>> {
    let api = client(&config, Mode::from_env())?;
    let category = Category {
        id: None,
        name: args.name().to_string(),
        color: args.color().map(str::to_string),
    };
    let set = api.add_category(&category).await?;
    Ok(Out::new(format!("Added category '{}'", args.name()), set))
}

/// Renames or recolors a spending category.
pub async fn update_category(
    config: Config,
    args: &UpdateCategoryArgs,
) -> Result<Out<CategorySet>> {
    let api = client(&config, Mode::from_env())?;
    let update = CategoryUpdate {
        name: args.name().map(str::to_string),
        color: args.color().map(str::to_string),
    };
    let set = api.update_category(args.id(), &update).await?;
    Ok(Out::new(format!("Updated category '{}'", args.id()), set))
}

/// Deletes a spending category.
pub async fn delete_category(
    config: Config,
    args: &DeleteCategoryArgs,
) -> Result<Out<CategorySet>> {
    let api = client(&config, Mode::from_env())?;
    let set = api.delete_category(args.id()).await?;
    Ok(Out::new(format!("Deleted category '{}'", args.id()), set))
}
