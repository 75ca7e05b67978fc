use crate::model::{LegoSet, SetData, Theme};
use crate::store::StoreResult;

#[async_trait::async_trait]
pub trait ThemeStore: Send + Sync {
    /// All themes ordered by name ascending.
    async fn get_all_themes(&self) -> StoreResult<Vec<Theme>>;
}

#[async_trait::async_trait]
pub trait SetStore: Send + Sync {
    /// Every set joined with its theme. Fails with `NotFound` when there are none.
    async fn get_all_sets(&self) -> StoreResult<Vec<LegoSet>>;
    /// The set whose `set_num` equals the input.
    async fn get_set_by_num(&self, set_num: &str) -> StoreResult<LegoSet>;
    /// Sets whose theme name contains `theme`, ignoring case.
    async fn get_sets_by_theme(&self, theme: &str) -> StoreResult<Vec<LegoSet>>;
    async fn add_set(&self, data: &SetData) -> StoreResult<()>;
    /// Update the set matching `set_num`. Returns the number of rows changed,
    /// which is zero (not an error) when nothing matches.
    async fn edit_set(&self, set_num: &str, data: &SetData) -> StoreResult<u64>;
    /// Remove the set matching `set_num`. Zero rows removed is not an error.
    async fn delete_set(&self, set_num: &str) -> StoreResult<u64>;
}

/// Out-of-band writes used to load the bundled catalog.
#[async_trait::async_trait]
pub trait SeedStore: Send + Sync {
    /// Insert a theme with a fixed id, skipping it if the id is taken.
    async fn insert_theme_if_absent(&self, theme: &Theme) -> StoreResult<bool>;
    /// Insert a set, skipping it if its `set_num` is taken.
    async fn insert_set_if_absent(&self, data: &SetData) -> StoreResult<bool>;
}

#[async_trait::async_trait]
pub trait Store: ThemeStore + SetStore + SeedStore + Send + Sync {
    /// Ensure the theme and set tables exist.
    async fn initialize(&self) -> StoreResult<()>;
    /// Release pooled connections.
    async fn close(&self);
}
