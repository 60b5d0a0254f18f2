/// Pomodoro session model and database operations
///
/// Sessions are mutated in place by the `complete`, `pause`, and `reset`
/// endpoints. Each mutation is a single `UPDATE ... RETURNING` statement;
/// there is no cross-statement locking or version field.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE session_status AS ENUM ('active', 'paused');
///
/// CREATE TABLE pomodoro_sessions (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     status session_status NOT NULL DEFAULT 'active',
///     start_time TIMESTAMPTZ,
///     end_time TIMESTAMPTZ,
///     duration INTEGER NOT NULL DEFAULT 0,
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     xp_earned INTEGER NOT NULL DEFAULT 0,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// XP awarded for completing a session
pub const COMPLETION_XP: i32 = 5;

/// Session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "session_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Session is counting down
    Active,

    /// Session is paused
    Paused,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Active => "active",
            SessionStatus::Paused => "paused",
        }
    }
}

/// Pomodoro session record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PomodoroSession {
    /// Unique session ID
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Current status
    pub status: SessionStatus,

    /// When the focus interval started
    pub start_time: Option<DateTime<Utc>>,

    /// When the focus interval ended
    pub end_time: Option<DateTime<Utc>>,

    /// Accumulated focus time in seconds
    pub duration: i32,

    /// Whether the session has been completed
    pub completed: bool,

    /// XP awarded so far
    pub xp_earned: i32,

    /// When the record was created
    pub created_at: DateTime<Utc>,

    /// When the record was last updated
    pub updated_at: DateTime<Utc>,
}

impl PomodoroSession {
    /// Starts a new session for the given user
    ///
    /// The session begins active with `start_time` stamped and zeroed
    /// counters.
    pub async fn start(pool: &PgPool, user_id: Uuid) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, PomodoroSession>(
            r#"
            INSERT INTO pomodoro_sessions (user_id, status, start_time)
            VALUES ($1, 'active', NOW())
            RETURNING id, user_id, status, start_time, end_time, duration,
                      completed, xp_earned, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Finds a session by id
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, PomodoroSession>(
            r#"
            SELECT id, user_id, status, start_time, end_time, duration,
                   completed, xp_earned, created_at, updated_at
            FROM pomodoro_sessions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Lists a user's sessions, newest first
    pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, PomodoroSession>(
            r#"
            SELECT id, user_id, status, start_time, end_time, duration,
                   completed, xp_earned, created_at, updated_at
            FROM pomodoro_sessions
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Completes a session: awards the fixed XP, marks it completed, and
    /// stamps `end_time`
    ///
    /// Returns the updated row, or None if no session with that id exists.
    pub async fn complete(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, PomodoroSession>(
            r#"
            UPDATE pomodoro_sessions
            SET xp_earned = xp_earned + $2,
                completed = TRUE,
                end_time = NOW(),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, status, start_time, end_time, duration,
                      completed, xp_earned, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(COMPLETION_XP)
        .fetch_optional(pool)
        .await
    }

    /// Pauses a session
    ///
    /// The WHERE clause excludes completed sessions so a concurrent complete
    /// can't be overwritten; callers distinguish "not found" from "already
    /// completed" by fetching the row first.
    pub async fn pause(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, PomodoroSession>(
            r#"
            UPDATE pomodoro_sessions
            SET status = 'paused', updated_at = NOW()
            WHERE id = $1 AND completed = FALSE
            RETURNING id, user_id, status, start_time, end_time, duration,
                      completed, xp_earned, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Resets a session back to a fresh active state regardless of prior
    /// state: timing fields cleared, duration zeroed, completion flag
    /// dropped
    pub async fn reset(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, PomodoroSession>(
            r#"
            UPDATE pomodoro_sessions
            SET status = 'active',
                start_time = NULL,
                end_time = NULL,
                duration = 0,
                completed = FALSE,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, status, start_time, end_time, duration,
                      completed, xp_earned, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_as_str() {
        assert_eq!(SessionStatus::Active.as_str(), "active");
        assert_eq!(SessionStatus::Paused.as_str(), "paused");
    }

    #[test]
    fn test_status_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&SessionStatus::Paused).unwrap(),
            "\"paused\""
        );
        let status: SessionStatus = serde_json::from_str("\"active\"").unwrap();
        assert_eq!(status, SessionStatus::Active);
    }

    #[test]
    fn test_session_serialization() {
        let session = PomodoroSession {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            status: SessionStatus::Active,
            start_time: Some(Utc::now()),
            end_time: None,
            duration: 0,
            completed: false,
            xp_earned: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains("\"status\":\"active\""));
        assert!(json.contains("\"xp_earned\":0"));
    }

    // Integration tests for database operations live in the api crate's tests/
}
