//! Idempotent schema bootstrap, run every time a store is opened.

use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection};
use tracing::{debug, info};

struct Dialect {
    id: &'static str,
    timestamp: &'static str,
}

const fn dialect(backend: DatabaseBackend) -> Dialect {
    match backend {
        DatabaseBackend::Sqlite => Dialect {
            id: "INTEGER PRIMARY KEY AUTOINCREMENT",
            timestamp: "TIMESTAMP",
        },
        DatabaseBackend::MySql => Dialect {
            id: "BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY",
            timestamp: "DATETIME",
        },
        _ => Dialect {
            id: "BIGSERIAL PRIMARY KEY",
            timestamp: "TIMESTAMP",
        },
    }
}

fn statements(backend: DatabaseBackend) -> Vec<String> {
    let Dialect { id, timestamp } = dialect(backend);
    vec![
        format!(
            "CREATE TABLE IF NOT EXISTS patterns (
                id {id},
                slug VARCHAR(255) NOT NULL UNIQUE,
                name VARCHAR(255) NOT NULL,
                description TEXT NOT NULL,
                content TEXT NOT NULL,
                category VARCHAR(32) NOT NULL,
                difficulty SMALLINT NOT NULL,
                tags TEXT NOT NULL,
                architectures TEXT NOT NULL,
                languages TEXT NOT NULL,
                frameworks TEXT NOT NULL,
                related_patterns TEXT NOT NULL,
                code_examples TEXT NOT NULL,
                created_at {timestamp} NOT NULL
            )"
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS architectures (
                id {id},
                slug VARCHAR(255) NOT NULL UNIQUE,
                name VARCHAR(255) NOT NULL,
                description TEXT NOT NULL,
                characteristics TEXT NOT NULL
            )"
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS favorites (
                id {id},
                pattern_id BIGINT NOT NULL REFERENCES patterns(id) ON DELETE CASCADE,
                session_id VARCHAR(255) NOT NULL,
                created_at {timestamp} NOT NULL,
                UNIQUE (pattern_id, session_id)
            )"
        ),
    ]
}

pub async fn bootstrap(db: &DatabaseConnection) -> anyhow::Result<()> {
    let backend = db.get_database_backend();
    for statement in statements(backend) {
        debug!("Applying schema statement: {}", statement.lines().next().unwrap_or_default());
        db.execute_unprepared(&statement).await?;
    }
    info!("Catalog schema ready ({:?})", backend);
    Ok(())
}
