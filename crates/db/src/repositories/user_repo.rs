//! Repository for the `users` identity-mirror table.

use sqlx::PgPool;

use crate::models::user::User;

/// Column list for users queries.
const COLUMNS: &str = "id, display_name, created_at, updated_at";

/// Maintains the local mirror of external identity-provider subjects.
pub struct UserRepo;

impl UserRepo {
    /// Upsert the row mirroring an authenticated subject.
    ///
    /// Called before any statement that persists a reference to the
    /// caller, so the foreign keys always resolve. A token without a
    /// name claim leaves an existing display name untouched.
    pub async fn ensure(
        pool: &PgPool,
        id: &str,
        display_name: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO users (id, display_name) \
             VALUES ($1, COALESCE($2, '')) \
             ON CONFLICT (id) DO UPDATE SET display_name = COALESCE($2, users.display_name)",
        )
        .bind(id)
        .bind(display_name)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Find a user by its subject id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
