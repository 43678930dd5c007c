//! # User Repository
//!
//! Database operations for user accounts.
//!
//! The `password_hash` column is write-only from the outside: reads map to
//! [`User`], which has no password field.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use storefront_core::{User, UserDraft};

const USER_COLUMNS: &str = "id, role, email, is_staff, is_active";

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Lists all users ordered by id.
    pub async fn list(&self) -> DbResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = users.len(), "Listed users");
        Ok(users)
    }

    /// Gets a user by id.
    ///
    /// ## Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - User not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Gets a user by exact email.
    pub async fn get_by_email(&self, email: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Whether `email` belongs to a user other than `except`.
    pub async fn email_taken(&self, email: &str, except: Option<i64>) -> DbResult<bool> {
        Ok(self
            .get_by_email(email)
            .await?
            .is_some_and(|user| Some(user.id) != except))
    }

    /// Whether a user with this id exists.
    pub async fn exists(&self, id: i64) -> DbResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }

    /// Inserts a new user.
    ///
    /// ## Arguments
    /// * `draft` - Validated user fields
    /// * `password_hash` - Encoded hash, or the unusable-password marker
    ///
    /// ## Returns
    /// * `Ok(User)` - Inserted user with its generated id
    /// * `Err(DbError::UniqueViolation)` - Email already registered
    pub async fn insert(&self, draft: &UserDraft, password_hash: &str) -> DbResult<User> {
        debug!(email = %draft.email, "Inserting user");

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (email, role, is_staff, is_active, password_hash)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&draft.email)
        .bind(draft.role)
        .bind(draft.is_staff)
        .bind(draft.is_active)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Replaces a user's fields.
    ///
    /// The stored password hash is kept when `password_hash` is `None`.
    ///
    /// ## Returns
    /// * `Ok(User)` - Updated user
    /// * `Err(DbError::NotFound)` - User doesn't exist
    pub async fn update(
        &self,
        id: i64,
        draft: &UserDraft,
        password_hash: Option<&str>,
    ) -> DbResult<User> {
        debug!(id = %id, "Updating user");

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users SET
                email = ?2,
                role = ?3,
                is_staff = ?4,
                is_active = ?5,
                password_hash = COALESCE(?6, password_hash)
            WHERE id = ?1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&draft.email)
        .bind(draft.role)
        .bind(draft.is_staff)
        .bind(draft.is_active)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await?;

        user.ok_or_else(|| DbError::not_found("User", id))
    }

    /// Deletes a user. Their stores (and those stores' products) go with them.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting user");

        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", id));
        }

        Ok(())
    }

    /// Returns the stored password hash.
    ///
    /// No request path reads hashes back; this exists so tests can check
    /// what was written.
    pub async fn password_hash(&self, id: i64) -> DbResult<Option<String>> {
        let hash = sqlx::query_scalar("SELECT password_hash FROM users WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(hash)
    }

    /// Counts users (for diagnostics and seeding).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fixtures::{test_db, user_draft};
    use storefront_core::Role;

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = test_db().await;
        let repo = db.users();

        let user = repo.insert(&user_draft("a@b.com"), "!").await.unwrap();
        assert!(user.id > 0);
        assert_eq!(user.role, Some(Role::Manager));
        assert!(user.is_active);

        let fetched = repo.get_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(fetched, user);
        assert!(repo.get_by_id(user.id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_unique_violation() {
        let db = test_db().await;
        let repo = db.users();

        repo.insert(&user_draft("a@b.com"), "!").await.unwrap();
        let err = repo.insert(&user_draft("a@b.com"), "!").await.unwrap_err();

        match err {
            DbError::UniqueViolation { field, .. } => assert_eq!(field, "email"),
            other => panic!("expected unique violation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_email_taken_ignores_self() {
        let db = test_db().await;
        let repo = db.users();

        let user = repo.insert(&user_draft("a@b.com"), "!").await.unwrap();
        assert!(repo.email_taken("a@b.com", None).await.unwrap());
        assert!(!repo.email_taken("a@b.com", Some(user.id)).await.unwrap());
        assert!(!repo.email_taken("c@d.com", None).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_keeps_password_unless_given() {
        let db = test_db().await;
        let repo = db.users();

        let user = repo.insert(&user_draft("a@b.com"), "hash-1").await.unwrap();

        let mut draft = user_draft("new@b.com");
        draft.role = None;
        let updated = repo.update(user.id, &draft, None).await.unwrap();
        assert_eq!(updated.email, "new@b.com");
        assert_eq!(updated.role, None);
        assert_eq!(
            repo.password_hash(user.id).await.unwrap().as_deref(),
            Some("hash-1")
        );

        repo.update(user.id, &draft, Some("hash-2")).await.unwrap();
        assert_eq!(
            repo.password_hash(user.id).await.unwrap().as_deref(),
            Some("hash-2")
        );
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_user() {
        let db = test_db().await;
        let repo = db.users();

        let err = repo.update(99, &user_draft("a@b.com"), None).await.unwrap_err();
        assert!(err.is_not_found());

        let err = repo.delete(99).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_list_and_delete() {
        let db = test_db().await;
        let repo = db.users();

        let first = repo.insert(&user_draft("a@b.com"), "!").await.unwrap();
        repo.insert(&user_draft("c@d.com"), "!").await.unwrap();
        assert_eq!(repo.list().await.unwrap().len(), 2);

        repo.delete(first.id).await.unwrap();
        let remaining = repo.list().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].email, "c@d.com");
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
