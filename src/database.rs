use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Pool, Postgres};

pub type Database = Pool<Postgres>;

// One statement per entry: the extended query protocol rejects multi-statement strings.
// clock_timestamp() stamps the insert itself; now() would reuse the transaction start.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS items (
        id SERIAL PRIMARY KEY,
        sku TEXT NOT NULL UNIQUE,
        ean13 TEXT NOT NULL UNIQUE,
        stock INTEGER NOT NULL DEFAULT 0 CHECK (stock >= 0)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS movements (
        id SERIAL PRIMARY KEY,
        item_id INTEGER NOT NULL REFERENCES items(id),
        change INTEGER NOT NULL,
        timestamp TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_movements_timestamp ON movements (timestamp DESC)",
];

pub async fn create_database_pool(database_url: &str, max_connections: u32) -> Result<Database, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    // Test the connection
    sqlx::query("SELECT 1")
        .fetch_one(&pool)
        .await?;

    log::info!("Connected to database successfully");
    Ok(pool)
}

/// Creates the `items` and `movements` tables when they are missing.
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
