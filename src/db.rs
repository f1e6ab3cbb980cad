use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::config::{self, DatabaseConfig};

/// Opens the pool, creating the database file (and its directory) if missing.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<SqlitePool> {
    config::ensure_sqlite_parent_dir(&cfg.url)?;
    let options = SqliteConnectOptions::from_str(&cfg.url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(10));
    let pool = SqlitePoolOptions::new()
        .max_connections(cfg.max_connections)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Tables the service reads and writes. The readiness check checks for all of them.
pub const TABLES: [&str; 6] = ["users", "categories", "products", "inquiries", "suppliers", "inventory_items"];

/// Creates missing tables, columns and indexes. Safe to run on every start.
pub async fn init_db(pool: &SqlitePool) -> anyhow::Result<()> {
    if let Err(e) = sqlx::query("PRAGMA journal_mode=WAL;").execute(pool).await {
        tracing::warn!("Failed to set WAL journal mode: {}", e);
    }
    // Foreign keys are critical - fail if this doesn't work
    sqlx::query("PRAGMA foreign_keys=ON;").execute(pool).await?;

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            role TEXT NOT NULL DEFAULT 'user',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            deleted_at TEXT NULL
        )"#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )"#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            category_id INTEGER NULL,
            description TEXT NOT NULL DEFAULT '',
            price REAL NOT NULL DEFAULT 0,
            stock INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            deleted_at TEXT NULL,
            FOREIGN KEY(category_id) REFERENCES categories(id) ON DELETE SET NULL
        )"#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS inquiries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            message TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending',
            user_id INTEGER NOT NULL,
            product_id INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            deleted_at TEXT NULL,
            FOREIGN KEY(user_id) REFERENCES users(id),
            FOREIGN KEY(product_id) REFERENCES products(id)
        )"#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS suppliers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            contact_person TEXT NULL,
            email TEXT NULL,
            phone TEXT NULL,
            address TEXT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )"#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS inventory_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            product_id INTEGER NOT NULL,
            quantity INTEGER NOT NULL DEFAULT 0,
            batch_number TEXT NULL,
            expiry_date TEXT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY(product_id) REFERENCES products(id) ON DELETE CASCADE
        )"#,
    )
    .execute(pool)
    .await?;

    // Columns added after the first schema version. Databases created before
    // soft deletes existed get them here.
    for (table, column, ddl) in [
        ("users", "deleted_at", "TEXT NULL"),
        ("products", "deleted_at", "TEXT NULL"),
        ("products", "category_id", "INTEGER NULL REFERENCES categories(id) ON DELETE SET NULL"),
        ("inquiries", "deleted_at", "TEXT NULL"),
    ] {
        let query = format!("ALTER TABLE {} ADD COLUMN {} {}", table, column, ddl);
        if let Err(e) = sqlx::query(&query).execute(pool).await {
            match &e {
                sqlx::Error::Database(db_err) => {
                    let msg = db_err.message().to_lowercase();
                    if !msg.contains("duplicate") && !msg.contains("already exists") {
                        tracing::error!("Failed to add {} column to {}: {}", column, table, e);
                        return Err(anyhow::anyhow!("Migration failed: {}", e));
                    }
                }
                _ => {
                    tracing::error!("Unexpected error adding {} to {}: {}", column, table, e);
                    return Err(anyhow::anyhow!("Migration failed: {}", e));
                }
            }
        }
    }

    let indexes = [
        ("idx_users_deleted", "CREATE INDEX IF NOT EXISTS idx_users_deleted ON users(deleted_at)"),
        ("idx_products_category", "CREATE INDEX IF NOT EXISTS idx_products_category ON products(category_id)"),
        ("idx_products_deleted", "CREATE INDEX IF NOT EXISTS idx_products_deleted ON products(deleted_at)"),
        ("idx_inquiries_user", "CREATE INDEX IF NOT EXISTS idx_inquiries_user ON inquiries(user_id)"),
        ("idx_inquiries_product", "CREATE INDEX IF NOT EXISTS idx_inquiries_product ON inquiries(product_id)"),
        ("idx_inventory_product", "CREATE INDEX IF NOT EXISTS idx_inventory_product ON inventory_items(product_id)"),
        ("idx_inventory_expiry", "CREATE INDEX IF NOT EXISTS idx_inventory_expiry ON inventory_items(expiry_date)"),
    ];

    for (name, query) in indexes {
        if let Err(e) = sqlx::query(query).execute(pool).await {
            tracing::warn!("Failed to create index {}: {}", name, e);
        }
    }

    tracing::debug!("schema ready");
    Ok(())
}
