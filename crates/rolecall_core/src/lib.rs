//! Core data types for the Rolecall role bot.
//!
//! This crate provides the platform-independent vocabulary shared by the store,
//! the dispatcher, and the platform adapters.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod invocation;
mod presentation;
mod reply;
mod role;
mod schema;

pub use config::{AddOutcome, GuildRoleConfig, RemoveOutcome};
pub use invocation::{Invocation, InvocationBuilder, InvokingMember, RoleCommand};
pub use presentation::{
    DEFAULT_COLUMN_SIZE, FIELD_NAME_CHARS, MAX_COLUMNS_PER_PAGE, MAX_EMBED_CHARS, MAX_PAGES,
    chunk_names, paginate, render_columns,
};
pub use reply::{Reply, ReplyBody, ReplyStatus};
pub use role::{GuildRole, RoleRef};
pub use schema::{CommandSpec, ROLE_OPTION, SubcommandSpec, command_schema};
