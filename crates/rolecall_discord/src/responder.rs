//! Interaction reply delivery over Serenity.

use crate::conversions::{
    deferred_response, edit_from_reply, followup_from_reply, is_private, response_from_reply,
};
use async_trait::async_trait;
use rolecall_core::Reply;
use rolecall_error::{PlatformError, PlatformErrorKind, RolecallResult};
use rolecall_interface::InteractionResponder;
use serenity::all::CommandInteraction;
use serenity::http::Http;
use std::sync::Arc;
use tracing::warn;

/// Replies to one command interaction.
///
/// A deferred public reply edits the placeholder. A deferred private reply
/// removes the placeholder and arrives as an ephemeral followup, since a
/// deferred response cannot change its visibility.
pub struct SerenityResponder<'a> {
    http: Arc<Http>,
    command: &'a CommandInteraction,
}

impl<'a> SerenityResponder<'a> {
    /// Respond to `command` through `http`.
    pub fn new(http: Arc<Http>, command: &'a CommandInteraction) -> Self {
        Self { http, command }
    }
}

fn delivery_error(action: &str, err: serenity::Error) -> PlatformError {
    PlatformError::new(PlatformErrorKind::Api(format!("{}: {}", action, err)))
}

#[async_trait]
impl InteractionResponder for SerenityResponder<'_> {
    async fn respond(&self, reply: &Reply) -> RolecallResult<()> {
        self.command
            .create_response(&*self.http, response_from_reply(reply))
            .await
            .map_err(|e| delivery_error("create response", e))?;
        Ok(())
    }

    async fn defer(&self) -> RolecallResult<()> {
        self.command
            .create_response(&*self.http, deferred_response())
            .await
            .map_err(|e| delivery_error("defer response", e))?;
        Ok(())
    }

    async fn complete(&self, reply: &Reply) -> RolecallResult<()> {
        if !is_private(reply) {
            self.command
                .edit_response(&*self.http, edit_from_reply(reply))
                .await
                .map_err(|e| delivery_error("edit response", e))?;
            return Ok(());
        }

        if let Err(e) = self.command.delete_response(&*self.http).await {
            warn!(error = %e, "Failed to remove deferred placeholder");
        }
        self.command
            .create_followup(&*self.http, followup_from_reply(reply))
            .await
            .map_err(|e| delivery_error("create followup", e))?;
        Ok(())
    }
}
