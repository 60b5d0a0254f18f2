/// Task model and database operations
///
/// Tasks are flat owner-scoped records; all queries are filtered by the
/// owning user so one user can never read or mutate another's tasks.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     title VARCHAR(255) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Task record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Owning user
    pub owner_id: Uuid,

    /// Task title
    pub title: String,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task for the given owner
    pub async fn create(pool: &PgPool, owner_id: Uuid, title: &str) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (owner_id, title)
            VALUES ($1, $2)
            RETURNING id, owner_id, title, created_at, updated_at
            "#,
        )
        .bind(owner_id)
        .bind(title)
        .fetch_one(pool)
        .await
    }

    /// Finds a task by id, scoped to its owner
    ///
    /// Returns None both when the task doesn't exist and when it belongs to
    /// a different user, so callers can't distinguish the two.
    pub async fn find_by_id_and_owner(
        pool: &PgPool,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, owner_id, title, created_at, updated_at
            FROM tasks
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await
    }

    /// Lists all tasks belonging to a user, newest first
    pub async fn list_by_owner(pool: &PgPool, owner_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, owner_id, title, created_at, updated_at
            FROM tasks
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await
    }

    /// Updates a task's title, scoped to its owner
    pub async fn update_title(
        pool: &PgPool,
        id: Uuid,
        owner_id: Uuid,
        title: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = $3, updated_at = NOW()
            WHERE id = $1 AND owner_id = $2
            RETURNING id, owner_id, title, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(title)
        .fetch_optional(pool)
        .await
    }

    /// Deletes a task, scoped to its owner
    ///
    /// Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: Uuid, owner_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
