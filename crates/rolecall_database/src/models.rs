//! Diesel models for the guild_role_configs table.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rolecall_core::GuildRoleConfig;

use crate::schema::guild_role_configs;

/// Database row for guild_role_configs table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = guild_role_configs)]
#[diesel(primary_key(guild_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct GuildRoleConfigRow {
    pub guild_id: String,
    pub available_roles: Vec<String>,
    pub removed_roles: Vec<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable struct for guild_role_configs table.
///
/// Timestamps come from column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = guild_role_configs)]
pub struct NewGuildRoleConfig<'a> {
    pub guild_id: &'a str,
    pub available_roles: Vec<String>,
    pub removed_roles: Vec<String>,
}

impl<'a> NewGuildRoleConfig<'a> {
    /// A row with empty role sequences.
    pub fn empty(guild_id: &'a str) -> Self {
        Self {
            guild_id,
            available_roles: Vec::new(),
            removed_roles: Vec::new(),
        }
    }
}

impl From<GuildRoleConfigRow> for GuildRoleConfig {
    fn from(row: GuildRoleConfigRow) -> Self {
        Self {
            guild_id: row.guild_id,
            available_roles: row.available_roles,
            removed_roles: row.removed_roles,
        }
    }
}
