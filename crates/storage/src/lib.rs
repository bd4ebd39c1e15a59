//! Storage layer for the Traveller backend.
//!
//! This crate provides implementations of the repository traits defined in
//! `traveller-core`: a PostgreSQL adapter for production and an in-memory
//! adapter for tests.
//!
//! # Architecture
//!
//! The storage layer follows the repository pattern:
//!
//! - [`postgres::Database`] - Connection pool management
//! - [`postgres::PgRepositories`] - Composite repository for all entity kinds
//! - [`memory::InMemoryRepositories`] - Same interface over fixed data
//!
//! # Usage
//!
//! ```ignore
//! use traveller_storage::{Database, DatabaseConfig, PgRepositories};
//!
//! // Connect to the database
//! let config = DatabaseConfig::for_graphql(&database_url);
//! let db = Database::connect(&config).await?;
//!
//! // Run migrations
//! db.migrate().await?;
//!
//! // Create repositories
//! let repositories: Arc<dyn Repositories> = Arc::new(PgRepositories::new(&db));
//! ```

pub mod memory;
pub mod postgres;

pub use memory::{InMemoryRepositories, InMemoryRepository};
pub use postgres::{Database, DatabaseConfig, PgRepositories};
