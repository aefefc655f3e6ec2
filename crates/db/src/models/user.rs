//! Identity-mirror model for the `users` table.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskhive_core::types::{Timestamp, UserId};

/// A user row mirroring an external identity-provider subject.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub display_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
