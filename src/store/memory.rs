use std::collections::BTreeMap;

use itertools::Itertools;
use parking_lot::RwLock;

use crate::model::{LegoSet, SetData, Theme, ThemeId};
use crate::store::traits::{SeedStore, SetStore, Store, ThemeStore};
use crate::store::{StoreError, StoreResult};

#[derive(Debug, Default)]
struct Tables {
    themes: BTreeMap<ThemeId, Theme>,
    sets: BTreeMap<String, SetData>,
}

/// In-process store with the same constraints and error kinds as the
/// PostgreSQL schema: non-empty text, unique `set_num` and a theme foreign key.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with the given themes.
    pub fn with_themes(themes: impl IntoIterator<Item = Theme>) -> Self {
        let store = Self::new();
        {
            let mut tables = store.tables.write();
            for theme in themes {
                tables.themes.insert(theme.id, theme);
            }
        }
        store
    }

    fn check_row(tables: &Tables, data: &SetData) -> StoreResult<()> {
        for (column, value) in [
            ("set_num", &data.set_num),
            ("name", &data.name),
            ("img_url", &data.img_url),
        ] {
            if value.is_empty() {
                return Err(StoreError::validation(format!(
                    "new row for relation \"set\" violates check constraint \"set_{column}_check\""
                )));
            }
        }

        if !tables.themes.contains_key(&data.theme_id) {
            return Err(StoreError::validation(
                "insert or update on table \"set\" violates foreign key constraint \"set_theme_id_fkey\"",
            ));
        }
        Ok(())
    }

    fn duplicate_key() -> StoreError {
        StoreError::validation("duplicate key value violates unique constraint \"set_pkey\"")
    }

    fn joined(tables: &Tables, data: &SetData) -> Option<LegoSet> {
        tables
            .themes
            .get(&data.theme_id)
            .map(|theme| LegoSet::from_parts(data.clone(), theme.clone()))
    }
}

#[async_trait::async_trait]
impl ThemeStore for MemoryStore {
    async fn get_all_themes(&self) -> StoreResult<Vec<Theme>> {
        let tables = self.tables.read();
        Ok(tables
            .themes
            .values()
            .sorted_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)))
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl SetStore for MemoryStore {
    async fn get_all_sets(&self) -> StoreResult<Vec<LegoSet>> {
        let tables = self.tables.read();
        let sets: Vec<LegoSet> = tables
            .sets
            .values()
            .filter_map(|data| Self::joined(&tables, data))
            .collect();

        if sets.is_empty() {
            return Err(StoreError::not_found("No sets available"));
        }
        Ok(sets)
    }

    async fn get_set_by_num(&self, set_num: &str) -> StoreResult<LegoSet> {
        let tables = self.tables.read();
        tables
            .sets
            .get(set_num)
            .and_then(|data| Self::joined(&tables, data))
            .ok_or_else(|| StoreError::not_found("Unable to find requested set"))
    }

    async fn get_sets_by_theme(&self, theme: &str) -> StoreResult<Vec<LegoSet>> {
        let needle = theme.to_lowercase();
        let tables = self.tables.read();
        let sets: Vec<LegoSet> = tables
            .sets
            .values()
            .filter_map(|data| Self::joined(&tables, data))
            .filter(|set| set.theme.name.to_lowercase().contains(&needle))
            .collect();

        if sets.is_empty() {
            return Err(StoreError::not_found("Unable to find requested sets"));
        }
        Ok(sets)
    }

    async fn add_set(&self, data: &SetData) -> StoreResult<()> {
        let mut tables = self.tables.write();
        Self::check_row(&tables, data)?;
        if tables.sets.contains_key(&data.set_num) {
            return Err(Self::duplicate_key());
        }

        tables.sets.insert(data.set_num.clone(), data.clone());
        Ok(())
    }

    async fn edit_set(&self, set_num: &str, data: &SetData) -> StoreResult<u64> {
        let mut tables = self.tables.write();
        if !tables.sets.contains_key(set_num) {
            return Ok(0);
        }
        Self::check_row(&tables, data)?;
        if data.set_num != set_num && tables.sets.contains_key(&data.set_num) {
            return Err(Self::duplicate_key());
        }

        tables.sets.remove(set_num);
        tables.sets.insert(data.set_num.clone(), data.clone());
        Ok(1)
    }

    async fn delete_set(&self, set_num: &str) -> StoreResult<u64> {
        let mut tables = self.tables.write();
        Ok(tables.sets.remove(set_num).map_or(0, |_| 1))
    }
}

#[async_trait::async_trait]
impl SeedStore for MemoryStore {
    async fn insert_theme_if_absent(&self, theme: &Theme) -> StoreResult<bool> {
        if theme.name.is_empty() {
            return Err(StoreError::validation(
                "new row for relation \"theme\" violates check constraint \"theme_name_check\"",
            ));
        }

        let mut tables = self.tables.write();
        if tables.themes.contains_key(&theme.id) {
            return Ok(false);
        }
        tables.themes.insert(theme.id, theme.clone());
        Ok(true)
    }

    async fn insert_set_if_absent(&self, data: &SetData) -> StoreResult<bool> {
        let mut tables = self.tables.write();
        if tables.sets.contains_key(&data.set_num) {
            return Ok(false);
        }
        Self::check_row(&tables, data)?;
        tables.sets.insert(data.set_num.clone(), data.clone());
        Ok(true)
    }
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    async fn initialize(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn close(&self) {}
}
