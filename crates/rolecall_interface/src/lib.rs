//! Port traits for the Rolecall role bot.
//!
//! The dispatcher and registrar only talk to the outside world through these
//! traits, so the chat platform and the store can be swapped or mocked.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{CommandRegistry, GuildRoleStore, InteractionResponder, RoleDirectory};
