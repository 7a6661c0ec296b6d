//! Tag command handlers.

use anyhow::{Context, Result};
use studybuddy_core::api::ApiClient;
use studybuddy_core::config::Config;
use studybuddy_core::tags::TagCatalog;

pub async fn list(config: &Config) -> Result<()> {
    let api = ApiClient::from_config(config)?;
    let tags = api.list_tags().await.context("fetch tags")?;

    if tags.is_empty() {
        println!("No tags.");
        return Ok(());
    }

    for tag in &tags {
        println!("{}\t{}", tag.id, tag.name);
    }
    Ok(())
}

/// Creates `name` unless the catalog already has it.
pub async fn add(config: &Config, name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("Tag name must not be empty");
    }

    let api = ApiClient::from_config(config)?;
    let catalog = TagCatalog::from_tags(api.list_tags().await.context("fetch tags")?);

    if let Some(id) = catalog.id_of(name) {
        println!("Tag '{name}' already exists ({id})");
        return Ok(());
    }

    let tag = api
        .create_tag(name)
        .await
        .with_context(|| format!("create tag '{name}'"))?;
    println!("✓ Created tag '{}' ({})", tag.name, tag.id);
    Ok(())
}
