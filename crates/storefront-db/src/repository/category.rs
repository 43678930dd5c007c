//! # Category Repository
//!
//! Database operations for product categories.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use storefront_core::{Category, CategoryDraft};

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Lists all categories ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = categories.len(), "Listed categories");
        Ok(categories)
    }

    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Returns the ids from `ids` that match no category, in input order.
    ///
    /// ## Usage
    /// Product writes call this to report every unknown category at once.
    pub async fn missing_ids(&self, ids: &[i64]) -> DbResult<Vec<i64>> {
        let mut missing = Vec::new();

        for &id in ids {
            let found: Option<i64> = sqlx::query_scalar("SELECT id FROM categories WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

            if found.is_none() {
                missing.push(id);
            }
        }

        Ok(missing)
    }

    pub async fn insert(&self, draft: &CategoryDraft) -> DbResult<Category> {
        debug!(name = %draft.name, "Inserting category");

        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description)
            VALUES (?1, ?2)
            RETURNING id, name, description
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    /// Replaces a category's fields.
    ///
    /// ## Returns
    /// * `Ok(Category)` - Updated category
    /// * `Err(DbError::NotFound)` - Category doesn't exist
    pub async fn update(&self, id: i64, draft: &CategoryDraft) -> DbResult<Category> {
        debug!(id = %id, "Updating category");

        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories SET name = ?2, description = ?3
            WHERE id = ?1
            RETURNING id, name, description
            "#,
        )
        .bind(id)
        .bind(&draft.name)
        .bind(&draft.description)
        .fetch_optional(&self.pool)
        .await?;

        category.ok_or_else(|| DbError::not_found("Category", id))
    }

    /// Deletes a category. Products lose the tag but are kept.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting category");

        let result = sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fixtures::{category_draft, test_db};

    #[tokio::test]
    async fn test_crud_cycle() {
        let db = test_db().await;
        let repo = db.categories();

        let tea = repo.insert(&category_draft("Tea")).await.unwrap();
        assert_eq!(tea.description, "All things Tea");

        let renamed = repo.update(tea.id, &category_draft("Herbal")).await.unwrap();
        assert_eq!(renamed.name, "Herbal");
        assert_eq!(repo.get_by_id(tea.id).await.unwrap(), Some(renamed));

        repo.delete(tea.id).await.unwrap();
        assert!(repo.list().await.unwrap().is_empty());
        assert!(repo.delete(tea.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_names_need_not_be_unique() {
        let db = test_db().await;
        let repo = db.categories();

        repo.insert(&category_draft("Tea")).await.unwrap();
        repo.insert(&category_draft("Tea")).await.unwrap();
        assert_eq!(repo.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_ids() {
        let db = test_db().await;
        let repo = db.categories();

        let tea = repo.insert(&category_draft("Tea")).await.unwrap();
        let missing = repo.missing_ids(&[77, tea.id, 78]).await.unwrap();
        assert_eq!(missing, vec![77, 78]);
        assert!(repo.missing_ids(&[]).await.unwrap().is_empty());
    }
}
