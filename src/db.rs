use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::store::StoreError;

const CREATE_ATENCIONES: &str = r#"
    CREATE TABLE IF NOT EXISTS atenciones (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        rut TEXT,
        nombre TEXT,
        comuna TEXT,
        tipoSubsidio TEXT,
        comentario TEXT,
        horaInicio TEXT,
        horaFin TEXT,
        duracion INTEGER
    )
"#;

pub async fn init_db(database_url: &str, max_connections: u32) -> Result<SqlitePool, StoreError> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    // every in-memory connection is its own database, so keep exactly one alive
    let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");
    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(max_connections.max(1))
    };

    let pool = pool_options.connect_with(options).await?;

    sqlx::query(CREATE_ATENCIONES).execute(&pool).await?;

    tracing::info!(database_url, in_memory, "Database ready");
    Ok(pool)
}
