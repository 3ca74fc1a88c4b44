use std::{collections::HashSet, path::PathBuf};

use anyhow::Context;
use async_trait::async_trait;

use crate::models::Item;

/// Read-only provider of rentable items, in source order.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_items(&self) -> anyhow::Result<Vec<Item>>;
}

/// Catalog exported from the content source as a JSON array of car documents.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for JsonFileCatalog {
    async fn fetch_items(&self) -> anyhow::Result<Vec<Item>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("reading catalog {}", self.path.display()))?;
        let items = serde_json::from_str(&raw)
            .with_context(|| format!("parsing catalog {}", self.path.display()))?;
        Ok(items)
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    items: Vec<Item>,
}

impl StaticCatalog {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn fetch_items(&self) -> anyhow::Result<Vec<Item>> {
        Ok(self.items.clone())
    }
}

/// Drops items whose (name, image) pair was already seen, keeping the first.
/// The upstream data set contains duplicated documents.
pub fn dedupe_items(items: Vec<Item>) -> Vec<Item> {
    let mut seen: HashSet<(String, Option<String>)> = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert((item.name.clone(), item.image_url.clone())))
        .collect()
}
