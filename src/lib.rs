//! # Pharmacy Server Library
//!
//! REST backend for a pharmacy: categories, products (medicines), users,
//! customer inquiries, suppliers and inventory items, each exposed as a CRUD
//! resource under `/api`.
//!
//! ## Architecture
//!
//! - **Axum**: HTTP server and routing
//! - **SQLx**: asynchronous SQLite access
//! - **Tokio**: async runtime
//! - **Serde**: JSON request and response bodies
//!
//! ## Core Components
//!
//! - [`config`]: layered configuration (defaults, file, environment)
//! - [`db`]: connection setup and idempotent schema migration
//! - [`error`]: error type and its JSON rendering
//! - [`models`]: entity definitions
//! - [`repository`]: persistence interface and its SQLite / in-memory implementations
//! - [`routes`]: resource handlers and the router
//! - [`state`]: shared application state

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod metrics;
pub mod models;
pub mod repository;
pub mod routes;
pub mod state;

#[cfg(test)]
mod tests;
