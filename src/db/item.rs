//! Item database operations

use crate::item::model::Item;
use crate::store::{ItemStore, StoreError};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PgItemStore {
    pool: PgPool,
}

impl PgItemStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS items (
                icode INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                price BIGINT NOT NULL,
                package_date DATE NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_items_title ON items(title)")
            .execute(&self.pool)
            .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_items_package_date ON items(package_date)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl ItemStore for PgItemStore {
    async fn save(&self, item: &Item) -> Result<Item, StoreError> {
        let saved = sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (icode, title, price, package_date)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (icode) DO UPDATE
            SET title = EXCLUDED.title, price = EXCLUDED.price, package_date = EXCLUDED.package_date
            RETURNING icode, title, price, package_date
            "#,
        )
        .bind(item.icode)
        .bind(&item.title)
        .bind(item.price)
        .bind(item.package_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    async fn insert(&self, item: &Item) -> Result<Option<Item>, StoreError> {
        let inserted = sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (icode, title, price, package_date)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (icode) DO NOTHING
            RETURNING icode, title, price, package_date
            "#,
        )
        .bind(item.icode)
        .bind(&item.title)
        .bind(item.price)
        .bind(item.package_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(inserted)
    }

    async fn update(&self, item: &Item) -> Result<Option<Item>, StoreError> {
        let updated = sqlx::query_as::<_, Item>(
            r#"
            UPDATE items
            SET title = $2, price = $3, package_date = $4
            WHERE icode = $1
            RETURNING icode, title, price, package_date
            "#,
        )
        .bind(item.icode)
        .bind(&item.title)
        .bind(item.price)
        .bind(item.package_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM items")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn find_all(&self) -> Result<Vec<Item>, StoreError> {
        let items = sqlx::query_as::<_, Item>(
            "SELECT icode, title, price, package_date FROM items ORDER BY icode",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn find_by_id(&self, icode: i32) -> Result<Option<Item>, StoreError> {
        let item = sqlx::query_as::<_, Item>(
            "SELECT icode, title, price, package_date FROM items WHERE icode = $1",
        )
        .bind(icode)
        .fetch_optional(&self.pool)
        .await?;
        Ok(item)
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Item>, StoreError> {
        let item = sqlx::query_as::<_, Item>(
            "SELECT icode, title, price, package_date FROM items WHERE title = $1 ORDER BY icode LIMIT 1",
        )
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;
        Ok(item)
    }

    async fn find_by_package_date(&self, date: NaiveDate) -> Result<Vec<Item>, StoreError> {
        let items = sqlx::query_as::<_, Item>(
            "SELECT icode, title, price, package_date FROM items WHERE package_date = $1 ORDER BY icode",
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn find_by_price_between(&self, low: i64, high: i64) -> Result<Vec<Item>, StoreError> {
        let items = sqlx::query_as::<_, Item>(
            "SELECT icode, title, price, package_date FROM items WHERE price BETWEEN $1 AND $2 ORDER BY icode",
        )
        .bind(low)
        .bind(high)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn exists_by_id(&self, icode: i32) -> Result<bool, StoreError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM items WHERE icode = $1)")
                .bind(icode)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn delete_by_id(&self, icode: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM items WHERE icode = $1")
            .bind(icode)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
