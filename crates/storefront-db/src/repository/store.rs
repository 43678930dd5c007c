//! # Store Repository
//!
//! Database operations for stores.
//!
//! Store ids are UUID v4 strings generated here on insert. The
//! `manager_id` column is exposed as `manager` on [`Store`].

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use storefront_core::{Store, StoreDraft};

const STORE_COLUMNS: &str = "id, name, locations, manager_id AS manager";

/// Repository for store database operations.
#[derive(Debug, Clone)]
pub struct StoreRepository {
    pool: SqlitePool,
}

impl StoreRepository {
    /// Creates a new StoreRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StoreRepository { pool }
    }

    /// Lists all stores ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Store>> {
        let stores = sqlx::query_as::<_, Store>(&format!(
            "SELECT {STORE_COLUMNS} FROM stores ORDER BY name, id"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = stores.len(), "Listed stores");
        Ok(stores)
    }

    /// Gets a store by its UUID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Store>> {
        let store = sqlx::query_as::<_, Store>(&format!(
            "SELECT {STORE_COLUMNS} FROM stores WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(store)
    }

    /// Whether a store with this id exists.
    pub async fn exists(&self, id: &str) -> DbResult<bool> {
        let found: Option<String> = sqlx::query_scalar("SELECT id FROM stores WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }

    /// Inserts a new store under a freshly generated UUID.
    ///
    /// ## Returns
    /// * `Ok(Store)` - Inserted store
    /// * `Err(DbError::ForeignKeyViolation)` - Manager doesn't exist
    pub async fn insert(&self, draft: &StoreDraft) -> DbResult<Store> {
        let id = generate_store_id();
        debug!(id = %id, manager = %draft.manager, "Inserting store");

        let store = sqlx::query_as::<_, Store>(&format!(
            r#"
            INSERT INTO stores (id, name, locations, manager_id)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING {STORE_COLUMNS}
            "#
        ))
        .bind(&id)
        .bind(&draft.name)
        .bind(&draft.locations)
        .bind(draft.manager)
        .fetch_one(&self.pool)
        .await?;

        Ok(store)
    }

    /// Replaces a store's fields.
    ///
    /// ## Returns
    /// * `Ok(Store)` - Updated store
    /// * `Err(DbError::NotFound)` - Store doesn't exist
    pub async fn update(&self, id: &str, draft: &StoreDraft) -> DbResult<Store> {
        debug!(id = %id, "Updating store");

        let store = sqlx::query_as::<_, Store>(&format!(
            r#"
            UPDATE stores SET
                name = ?2,
                locations = ?3,
                manager_id = ?4
            WHERE id = ?1
            RETURNING {STORE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&draft.name)
        .bind(&draft.locations)
        .bind(draft.manager)
        .fetch_optional(&self.pool)
        .await?;

        store.ok_or_else(|| DbError::not_found("Store", id))
    }

    /// Deletes a store together with its products.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting store");

        let result = sqlx::query("DELETE FROM stores WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Store", id));
        }

        Ok(())
    }

    /// Counts stores (for diagnostics and seeding).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM stores")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Generates a new store id.
pub fn generate_store_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fixtures::{store_draft, test_db, user_draft};

    #[tokio::test]
    async fn test_insert_generates_uuid() {
        let db = test_db().await;
        let manager = db.users().insert(&user_draft("m@shop.io"), "!").await.unwrap();

        let store = db.stores().insert(&store_draft(manager.id)).await.unwrap();
        assert!(Uuid::parse_str(&store.id).is_ok());
        assert_eq!(store.manager, manager.id);
        assert_eq!(store.name, "Corner Shop");

        assert!(db.stores().exists(&store.id).await.unwrap());
        assert_eq!(db.stores().get_by_id(&store.id).await.unwrap(), Some(store));
    }

    #[tokio::test]
    async fn test_unknown_manager_is_foreign_key_violation() {
        let db = test_db().await;

        let err = db.stores().insert(&store_draft(404)).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_update_store() {
        let db = test_db().await;
        let manager = db.users().insert(&user_draft("m@shop.io"), "!").await.unwrap();
        let other = db.users().insert(&user_draft("o@shop.io"), "!").await.unwrap();
        let store = db.stores().insert(&store_draft(manager.id)).await.unwrap();

        let mut draft = store_draft(other.id);
        draft.name = "Harbour Shop".to_string();
        let updated = db.stores().update(&store.id, &draft).await.unwrap();
        assert_eq!(updated.id, store.id);
        assert_eq!(updated.name, "Harbour Shop");
        assert_eq!(updated.manager, other.id);

        let err = db
            .stores()
            .update(&generate_store_id(), &draft)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_deleting_manager_cascades_to_stores() {
        let db = test_db().await;
        let manager = db.users().insert(&user_draft("m@shop.io"), "!").await.unwrap();
        db.stores().insert(&store_draft(manager.id)).await.unwrap();
        db.stores().insert(&store_draft(manager.id)).await.unwrap();
        assert_eq!(db.stores().count().await.unwrap(), 2);

        db.users().delete(manager.id).await.unwrap();
        assert_eq!(db.stores().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_missing_store() {
        let db = test_db().await;
        let err = db.stores().delete(&generate_store_id()).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
