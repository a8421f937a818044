//! Discord integration for Rolecall.
//!
//! This crate turns slash-command interactions into role store and role
//! mutation calls. It enables Rolecall to:
//! - Register the `role` and `config` commands in every guild
//! - Let members add and remove roles on themselves
//! - Let administrators curate the guild's self-assignable roles
//!
//! # Architecture
//!
//! ## Platform-independent layer
//! - **dispatcher**: validates and executes one invocation, producing one reply
//! - **registrar**: pushes the command schema to guilds, isolating failures
//!
//! ## Integration layer
//! - **platform**: Serenity implementations of the role directory and command registry
//! - **conversions**: interaction and response translation
//! - **responder**: deferred reply delivery for command interactions
//! - **handler**: event handler implementing Serenity's EventHandler trait
//! - **client**: Serenity client setup and lifecycle management

#![warn(missing_docs)]

mod client;
mod conversions;
mod dispatcher;
mod handler;
mod platform;
mod registrar;
mod responder;

// Public re-exports
pub use client::RolecallBot;
pub use conversions::{
    create_commands, deferred_response, edit_from_reply, followup_from_reply,
    invocation_from_command, is_private, response_from_reply,
};
pub use dispatcher::{DispatchSettings, Dispatcher};
pub use handler::RolecallHandler;
pub use platform::SerenityPlatform;
pub use registrar::{RegistrationReport, ensure_guilds, register_guild_commands};
pub use responder::SerenityResponder;
