use sqlx::PgPool;
use taskhive_db::repositories::{TodoListRepo, UserRepo};

/// Full bootstrap test: connect, migrate, verify seed data.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    // Health check
    taskhive_db::health_check(&pool).await.unwrap();

    // Status lookup table must be seeded.
    let statuses: Vec<(i16, String)> =
        sqlx::query_as("SELECT id, name FROM task_statuses ORDER BY id")
            .fetch_all(&pool)
            .await
            .unwrap();
    assert_eq!(
        statuses,
        [
            (1, "Pending".to_string()),
            (2, "InProgress".to_string()),
            (3, "Completed".to_string()),
        ]
    );
}

/// The shared trigger must maintain updated_at on every update.
#[sqlx::test(migrations = "./migrations")]
async fn test_updated_at_trigger_fires(pool: PgPool) {
    UserRepo::ensure(&pool, "alice", Some("Alice")).await.unwrap();
    let list = TodoListRepo::create(&pool, "alice", "Groceries").await.unwrap();
    assert_eq!(list.created_at, list.updated_at);

    let renamed = TodoListRepo::rename(&pool, list.id, "Errands", list.version)
        .await
        .unwrap()
        .unwrap();
    assert!(renamed.updated_at > list.updated_at);
    assert_eq!(renamed.created_at, list.created_at);
}

/// Lazy provisioning is idempotent and keeps an existing display name
/// when the token carries none.
#[sqlx::test(migrations = "./migrations")]
async fn test_user_ensure_upsert(pool: PgPool) {
    UserRepo::ensure(&pool, "alice", Some("Alice")).await.unwrap();
    UserRepo::ensure(&pool, "alice", None).await.unwrap();

    let user = UserRepo::find_by_id(&pool, "alice").await.unwrap().unwrap();
    assert_eq!(user.display_name, "Alice");

    // A fresh name claim refreshes the mirror.
    UserRepo::ensure(&pool, "alice", Some("Alice Smith")).await.unwrap();
    let user = UserRepo::find_by_id(&pool, "alice").await.unwrap().unwrap();
    assert_eq!(user.display_name, "Alice Smith");
}
