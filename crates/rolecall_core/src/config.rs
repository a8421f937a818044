//! Per-guild role configuration.

use serde::{Deserialize, Serialize};

/// The persisted self-assignable role configuration of one guild.
///
/// # Examples
///
/// ```
/// use rolecall_core::GuildRoleConfig;
///
/// let config = GuildRoleConfig::empty("1234");
/// assert_eq!(config.guild_id, "1234");
/// assert!(config.available_roles.is_empty());
/// assert!(!config.is_available("42"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildRoleConfig {
    /// Guild identifier, primary key
    pub guild_id: String,
    /// Role identifiers members may currently self-assign, no duplicates
    pub available_roles: Vec<String>,
    /// Role identifiers previously removed from the available list
    pub removed_roles: Vec<String>,
}

impl GuildRoleConfig {
    /// A configuration with empty sequences.
    pub fn empty(guild_id: impl Into<String>) -> Self {
        Self {
            guild_id: guild_id.into(),
            available_roles: Vec::new(),
            removed_roles: Vec::new(),
        }
    }

    /// Whether `role_id` is on the available list.
    pub fn is_available(&self, role_id: &str) -> bool {
        self.available_roles.iter().any(|id| id == role_id)
    }
}

/// Result of adding a role to a guild's available list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum AddOutcome {
    /// The role was appended and persisted
    Added,
    /// The role was already on the list; nothing was written
    AlreadyPresent,
}

/// Result of removing a role from a guild's available list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum RemoveOutcome {
    /// The role was removed and persisted
    Removed,
    /// The role was not on the list; nothing was written
    NotPresent,
}
