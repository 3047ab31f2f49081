// src/services/persistence.rs
use crate::{error::AppResult, models::snapshot::Snapshot};
use sqlx::SqlitePool;

/// Key of the single blob holding students, classes and users.
pub const STORAGE_KEY: &str = "edu_dashboard_data";

/// Reads the snapshot. Never fails: an absent row, an unreadable row or
/// malformed JSON all degrade to an empty snapshot.
pub async fn load(db_pool: &SqlitePool) -> Snapshot {
    let raw: Option<String> =
        match sqlx::query_scalar::<_, String>("SELECT value FROM local_storage WHERE key = ?1")
            .bind(STORAGE_KEY)
            .fetch_optional(db_pool)
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Could not read stored data, starting empty: {:?}", e);
                return Snapshot::default();
            }
        };

    let Some(raw) = raw else {
        tracing::info!("No stored data under '{}', starting empty.", STORAGE_KEY);
        return Snapshot::default();
    };

    match serde_json::from_str::<Snapshot>(&raw) {
        Ok(snapshot) => {
            tracing::info!(
                "Loaded {} students, {} classes, {} users from storage.",
                snapshot.students.len(),
                snapshot.classes.len(),
                snapshot.users.len()
            );
            snapshot
        }
        Err(e) => {
            tracing::warn!("Stored data is corrupt, treating as empty: {}", e);
            Snapshot::default()
        }
    }
}

/// Overwrites the stored blob with the full snapshot.
pub async fn save(db_pool: &SqlitePool, snapshot: &Snapshot) -> AppResult<()> {
    let value = serde_json::to_string(snapshot)?;
    sqlx::query(
        r#"
        INSERT INTO local_storage (key, value, updated_at)
        VALUES (?1, ?2, datetime('now'))
        ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
        "#,
    )
    .bind(STORAGE_KEY)
    .bind(&value)
    .execute(db_pool)
    .await?;

    tracing::info!(
        "✅ Saved {} students, {} classes, {} users ({} bytes).",
        snapshot.students.len(),
        snapshot.classes.len(),
        snapshot.users.len(),
        value.len()
    );
    Ok(())
}
