//! PostgreSQL role store for Rolecall.
//!
//! This crate provides the schema, migrations, connection pool, and the
//! [`GuildRoleStore`](rolecall_interface::GuildRoleStore) implementation that
//! persists each guild's self-assignable role list.
//!
//! # Example
//!
//! ```rust,ignore
//! use rolecall_database::{PostgresGuildRoleStore, StoreSettings, establish_pool, migrate};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = StoreSettings::default();
//! let pool = establish_pool(&std::env::var("DATABASE_URL")?, &settings)?;
//! migrate(&pool).await?;
//! let store = PostgresGuildRoleStore::with_settings(pool, &settings);
//! # Ok(())
//! # }
//! ```

mod connection;
mod guild_role_repository;
mod migrations;
mod models;

// Public modules for external access
pub mod schema;

pub use connection::{PgPool, StoreSettings, establish_pool};
pub use guild_role_repository::PostgresGuildRoleStore;
pub use migrations::{migrate, run_migrations};
pub use models::{GuildRoleConfigRow, NewGuildRoleConfig};

use rolecall_error::StoreError;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
