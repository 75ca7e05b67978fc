use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;

use crate::model::{LegoSet, SetData, Theme};
use crate::store::traits::{SeedStore, SetStore, Store, ThemeStore};
use crate::store::{StoreError, StoreResult};

const CREATE_THEME_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS theme (
        id SERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL CHECK (name <> '')
    )
"#;

const CREATE_SET_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS "set" (
        set_num VARCHAR(255) PRIMARY KEY CHECK (set_num <> ''),
        name VARCHAR(255) NOT NULL CHECK (name <> ''),
        year INTEGER NOT NULL,
        num_parts INTEGER NOT NULL,
        theme_id INTEGER NOT NULL REFERENCES theme (id),
        img_url VARCHAR(255) NOT NULL CHECK (img_url <> '')
    )
"#;

const SELECT_SETS: &str = r#"
    SELECT s.set_num, s.name, s.year, s.num_parts, s.theme_id, s.img_url,
           t.name AS theme_name
    FROM "set" s
    JOIN theme t ON t.id = s.theme_id
"#;

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a store whose pool connects on first use. Each query waits at
    /// most `acquire_timeout` for a connection before failing as unavailable.
    pub fn new(
        options: PgConnectOptions,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Self {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect_lazy_with(options);

        Self { pool }
    }

    /// Create a store from an already-built pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn set_from_row(row: &PgRow) -> Result<LegoSet, sqlx::Error> {
    let theme_id: i32 = row.try_get("theme_id")?;

    Ok(LegoSet {
        set_num: row.try_get("set_num")?,
        name: row.try_get("name")?,
        year: row.try_get("year")?,
        num_parts: row.try_get("num_parts")?,
        theme_id,
        img_url: row.try_get("img_url")?,
        theme: Theme {
            id: theme_id,
            name: row.try_get("theme_name")?,
        },
    })
}

fn sets_from_rows(rows: &[PgRow]) -> StoreResult<Vec<LegoSet>> {
    rows.iter()
        .map(|row| set_from_row(row).map_err(StoreError::from))
        .collect()
}

#[async_trait::async_trait]
impl ThemeStore for PostgresStore {
    async fn get_all_themes(&self) -> StoreResult<Vec<Theme>> {
        let rows = sqlx::query("SELECT id, name FROM theme ORDER BY name ASC, id ASC")
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| -> StoreResult<Theme> {
                Ok(Theme {
                    id: row.try_get("id")?,
                    name: row.try_get("name")?,
                })
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl SetStore for PostgresStore {
    async fn get_all_sets(&self) -> StoreResult<Vec<LegoSet>> {
        let rows = sqlx::query(&format!("{SELECT_SETS} ORDER BY s.set_num"))
            .fetch_all(&self.pool)
            .await?;

        if rows.is_empty() {
            return Err(StoreError::not_found("No sets available"));
        }
        sets_from_rows(&rows)
    }

    async fn get_set_by_num(&self, set_num: &str) -> StoreResult<LegoSet> {
        let row = sqlx::query(&format!("{SELECT_SETS} WHERE s.set_num = $1"))
            .bind(set_num)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Err(StoreError::not_found("Unable to find requested set"));
        };
        Ok(set_from_row(&row)?)
    }

    async fn get_sets_by_theme(&self, theme: &str) -> StoreResult<Vec<LegoSet>> {
        // Containment via POSITION so `%` and `_` in the input are literal.
        let rows = sqlx::query(&format!(
            "{SELECT_SETS} WHERE POSITION(LOWER($1) IN LOWER(t.name)) > 0 ORDER BY s.set_num"
        ))
        .bind(theme)
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            return Err(StoreError::not_found("Unable to find requested sets"));
        }
        sets_from_rows(&rows)
    }

    async fn add_set(&self, data: &SetData) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO "set" (set_num, name, year, num_parts, theme_id, img_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&data.set_num)
        .bind(&data.name)
        .bind(data.year)
        .bind(data.num_parts)
        .bind(data.theme_id)
        .bind(&data.img_url)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn edit_set(&self, set_num: &str, data: &SetData) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE "set"
            SET set_num = $2, name = $3, year = $4, num_parts = $5, theme_id = $6, img_url = $7
            WHERE set_num = $1
            "#,
        )
        .bind(set_num)
        .bind(&data.set_num)
        .bind(&data.name)
        .bind(data.year)
        .bind(data.num_parts)
        .bind(data.theme_id)
        .bind(&data.img_url)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_set(&self, set_num: &str) -> StoreResult<u64> {
        let result = sqlx::query(r#"DELETE FROM "set" WHERE set_num = $1"#)
            .bind(set_num)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait::async_trait]
impl SeedStore for PostgresStore {
    async fn insert_theme_if_absent(&self, theme: &Theme) -> StoreResult<bool> {
        let result =
            sqlx::query("INSERT INTO theme (id, name) VALUES ($1, $2) ON CONFLICT (id) DO NOTHING")
                .bind(theme.id)
                .bind(&theme.name)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() > 0 {
            // Explicit ids bypass the serial sequence; move it past the largest id.
            sqlx::query(
                "SELECT setval(pg_get_serial_sequence('theme', 'id'), (SELECT MAX(id) FROM theme))",
            )
            .execute(&self.pool)
            .await?;
        }

        Ok(result.rows_affected() > 0)
    }

    async fn insert_set_if_absent(&self, data: &SetData) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO "set" (set_num, name, year, num_parts, theme_id, img_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (set_num) DO NOTHING
            "#,
        )
        .bind(&data.set_num)
        .bind(&data.name)
        .bind(data.year)
        .bind(data.num_parts)
        .bind(data.theme_id)
        .bind(&data.img_url)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl Store for PostgresStore {
    async fn initialize(&self) -> StoreResult<()> {
        for statement in [CREATE_THEME_TABLE, CREATE_SET_TABLE] {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|err| {
                    StoreError::Initialization(StoreError::from(err).message().to_string())
                })?;
        }

        log::info!("Database synchronized successfully");
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
