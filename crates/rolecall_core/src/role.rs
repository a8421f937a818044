//! Platform role types.

use serde::{Deserialize, Serialize};

/// A role as listed by the platform for a guild.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GuildRole {
    /// Role identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Controlled by an external integration
    pub managed: bool,
    /// The implicit role every member holds
    pub is_everyone: bool,
}

impl GuildRole {
    /// Whether the role belongs in a member-facing listing.
    ///
    /// Managed roles, the everyone role, and names starting with
    /// `reserved_prefix` are hidden.
    ///
    /// # Examples
    ///
    /// ```
    /// use rolecall_core::GuildRole;
    ///
    /// let role = GuildRole {
    ///     id: "1".into(),
    ///     name: "@everyone".into(),
    ///     managed: false,
    ///     is_everyone: true,
    /// };
    /// assert!(!role.is_listable("@"));
    /// ```
    pub fn is_listable(&self, reserved_prefix: &str) -> bool {
        !self.managed
            && !self.is_everyone
            && (reserved_prefix.is_empty() || !self.name.starts_with(reserved_prefix))
    }
}

/// A role argument resolved by the platform from a command option.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleRef {
    /// Role identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Controlled by an external integration
    pub managed: bool,
}

impl RoleRef {
    /// Reference to an ordinary, unmanaged role.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            managed: false,
        }
    }
}
