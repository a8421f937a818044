//! Rolecall: self-assignable roles for Discord guilds.
//!
//! Members pick roles for themselves with `/role add` and `/role remove`;
//! administrators curate which roles are on offer with `/config add` and
//! `/config remove`. Each guild's curated list lives in PostgreSQL.
//!
//! # Architecture
//!
//! - `rolecall-error` - Error types
//! - `rolecall-core` - Domain types, command schema, presentation
//! - `rolecall-interface` - Store and platform traits
//! - `rolecall-database` - PostgreSQL role store
//! - `rolecall-discord` - Dispatcher, registrar, Serenity integration
//!
//! This crate wires them together behind a CLI.
//!
//! # Cargo Features
//!
//! - `observability` - Export spans through OpenTelemetry (stdout)

#![warn(missing_docs)]

mod app;
pub mod config;
pub mod telemetry;

#[cfg(feature = "observability")]
pub mod observability;

pub use app::{run_bot, run_migrate, show_guild};
pub use config::{DiscordCredentials, Settings, database_url_from_env};
