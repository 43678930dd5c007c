//! # Product Repository
//!
//! Database operations for products and their category links.
//!
//! ## Storage Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Storage                                      │
//! │                                                                         │
//! │  products                       product_categories       categories    │
//! │  ┌──────────────────────┐       ┌──────────────────┐    ┌──────────┐   │
//! │  │ id  name  price_cents│◄──────│ product_id       │    │ id       │   │
//! │  │ ...        store_id ─┼──►    │ category_id ─────┼───►│ name     │   │
//! │  └──────────────────────┘stores │ position         │    │ desc.    │   │
//! │                                 └──────────────────┘    └──────────┘   │
//! │                                                                         │
//! │  Reads:  product rows + one join query → Product { categories: [...] } │
//! │  Writes: row + link rows in ONE transaction                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `position` keeps categories in the order the client sent them.

use std::collections::HashMap;

use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;

use crate::error::{DbError, DbResult};
use storefront_core::{Category, Price, Product, ProductDraft};

const PRODUCT_COLUMNS: &str = r#"
    id,
    name,
    description,
    price_cents AS price,
    quantity_in_stock,
    availability_status,
    store_id AS store
"#;

/// A `products` row before its categories are attached.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    description: String,
    price: Price,
    quantity_in_stock: i64,
    availability_status: bool,
    store: String,
}

impl ProductRow {
    fn into_product(self, categories: Vec<Category>) -> Product {
        Product {
            id: self.id,
            name: self.name,
            description: self.description,
            price: self.price,
            quantity_in_stock: self.quantity_in_stock,
            availability_status: self.availability_status,
            categories,
            store: self.store,
        }
    }
}

/// One category linked to one product.
#[derive(Debug, sqlx::FromRow)]
struct CategoryLink {
    product_id: i64,
    id: i64,
    name: String,
    description: String,
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let created = repo.insert(&draft).await?;
/// let product = repo.get_by_id(created.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists all products with their categories, ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        let links = sqlx::query_as::<_, CategoryLink>(
            r#"
            SELECT pc.product_id, c.id, c.name, c.description
            FROM product_categories pc
            INNER JOIN categories c ON c.id = pc.category_id
            ORDER BY pc.product_id, pc.position
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut by_product: HashMap<i64, Vec<Category>> = HashMap::new();
        for link in links {
            by_product.entry(link.product_id).or_default().push(Category {
                id: link.id,
                name: link.name,
                description: link.description,
            });
        }

        let products: Vec<Product> = rows
            .into_iter()
            .map(|row| {
                let categories = by_product.remove(&row.id).unwrap_or_default();
                row.into_product(categories)
            })
            .collect();

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by id with its categories.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let categories = self.categories_of(row.id).await?;
        Ok(Some(row.into_product(categories)))
    }

    /// Categories linked to one product, in link order.
    pub async fn categories_of(&self, product_id: i64) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT c.id, c.name, c.description
            FROM product_categories pc
            INNER JOIN categories c ON c.id = pc.category_id
            WHERE pc.product_id = ?1
            ORDER BY pc.position
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Inserts a product and its category links atomically.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Inserted product with resolved categories
    /// * `Err(DbError::ForeignKeyViolation)` - Store or a category doesn't exist
    pub async fn insert(&self, draft: &ProductDraft) -> DbResult<Product> {
        debug!(name = %draft.name, store = %draft.store, "Inserting product");

        let mut tx = self.pool.begin().await?;

        let id = sqlx::query(
            r#"
            INSERT INTO products (
                name, description, price_cents,
                quantity_in_stock, availability_status, store_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.price)
        .bind(draft.quantity_in_stock)
        .bind(draft.availability_status)
        .bind(&draft.store)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        link_categories(&mut tx, id, &draft.categories).await?;
        tx.commit().await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Replaces a product's fields and its full category set atomically.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Updated product
    /// * `Err(DbError::NotFound)` - Product doesn't exist (nothing is changed)
    pub async fn update(&self, id: i64, draft: &ProductDraft) -> DbResult<Product> {
        debug!(id = %id, categories = draft.categories.len(), "Updating product");

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                description = ?3,
                price_cents = ?4,
                quantity_in_stock = ?5,
                availability_status = ?6,
                store_id = ?7
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.price)
        .bind(draft.quantity_in_stock)
        .bind(draft.availability_status)
        .bind(&draft.store)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            // Dropping the transaction rolls it back
            return Err(DbError::not_found("Product", id));
        }

        sqlx::query("DELETE FROM product_categories WHERE product_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        link_categories(&mut tx, id, &draft.categories).await?;
        tx.commit().await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Deletes a product and its category links.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts products, optionally within one store.
    pub async fn count(&self, store_id: Option<&str>) -> DbResult<i64> {
        let count: i64 = match store_id {
            Some(store_id) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE store_id = ?1")
                    .bind(store_id)
                    .fetch_one(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM products")
                    .fetch_one(&self.pool)
                    .await?
            }
        };

        Ok(count)
    }
}

/// Writes link rows for `category_ids`, keeping their order in `position`.
async fn link_categories(
    tx: &mut Transaction<'_, Sqlite>,
    product_id: i64,
    category_ids: &[i64],
) -> DbResult<()> {
    for (position, category_id) in category_ids.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO product_categories (product_id, category_id, position)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(product_id)
        .bind(*category_id)
        .bind(position as i64)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
