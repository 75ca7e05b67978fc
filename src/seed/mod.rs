use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{SetData, Theme};
use crate::store::traits::SeedStore;

const CATALOG_JSON: &str = include_str!("catalog.json");

#[derive(Debug, Deserialize)]
pub struct Catalog {
    pub themes: Vec<Theme>,
    pub sets: Vec<SetData>,
}

/// The theme and set catalog bundled with the binary.
pub fn bundled_catalog() -> Result<Catalog> {
    serde_json::from_str(CATALOG_JSON).context("Bundled seed catalog is malformed")
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub themes_inserted: usize,
    pub sets_inserted: usize,
}

/// Insert the catalog, leaving rows whose keys already exist untouched.
/// Themes go first so every set's foreign key resolves.
pub async fn load_seed_data<S: SeedStore + ?Sized>(
    store: &S,
    catalog: &Catalog,
) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    for theme in &catalog.themes {
        if store
            .insert_theme_if_absent(theme)
            .await
            .with_context(|| format!("Failed to seed theme {}", theme.id))?
        {
            report.themes_inserted += 1;
        }
    }

    for set in &catalog.sets {
        if store
            .insert_set_if_absent(set)
            .await
            .with_context(|| format!("Failed to seed set {}", set.set_num))?
        {
            report.sets_inserted += 1;
        }
    }

    log::info!(
        "Seed data loaded: {} themes and {} sets inserted",
        report.themes_inserted,
        report.sets_inserted
    );
    Ok(report)
}
