use std::sync::Arc;

use crate::config::AppConfig;
use crate::metrics::Metrics;
use crate::models::{Category, Inquiry, InventoryItem, Product, Supplier, User};
use crate::repository::{Repository, SqliteRepository};

/// The shared application state.
///
/// Holds no entity data; every record lives in the database. The repositories
/// are trait objects so tests can replace any of them.
#[derive(Clone)]
pub struct AppState {
    /// The database connection pool, used directly by the readiness check.
    pub db: sqlx::SqlitePool,
    pub config: Arc<AppConfig>,
    pub metrics: Metrics,
    pub categories: Arc<dyn Repository<Category>>,
    pub products: Arc<dyn Repository<Product>>,
    pub users: Arc<dyn Repository<User>>,
    pub inquiries: Arc<dyn Repository<Inquiry>>,
    pub suppliers: Arc<dyn Repository<Supplier>>,
    pub inventory: Arc<dyn Repository<InventoryItem>>,
}

impl AppState {
    /// Creates the state with SQLite-backed repositories sharing `db`.
    pub fn new(db: sqlx::SqlitePool, config: AppConfig) -> Self {
        Self {
            categories: Arc::new(SqliteRepository::<Category>::new(db.clone())),
            products: Arc::new(SqliteRepository::<Product>::new(db.clone())),
            users: Arc::new(SqliteRepository::<User>::new(db.clone())),
            inquiries: Arc::new(SqliteRepository::<Inquiry>::new(db.clone())),
            suppliers: Arc::new(SqliteRepository::<Supplier>::new(db.clone())),
            inventory: Arc::new(SqliteRepository::<InventoryItem>::new(db.clone())),
            db,
            config: Arc::new(config),
            metrics: Metrics::new(),
        }
    }
}
