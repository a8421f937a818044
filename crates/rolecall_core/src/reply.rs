//! Replies produced for invocations.

use serde::{Deserialize, Serialize};

/// How an invocation terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum ReplyStatus {
    /// The command ran (including "nothing to do" outcomes)
    Completed,
    /// Validation stopped the command before any side effect
    Rejected,
    /// The store or platform failed while executing
    Failed,
}

/// Reply content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplyBody {
    /// Plain message
    Text(String),
    /// Side-by-side columns of names, split into pages
    Columns {
        /// Heading shown on every page
        title: String,
        /// Each page holds newline-joined columns
        pages: Vec<Vec<String>>,
    },
}

/// The single reply every invocation ends with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    /// Terminal state of the invocation
    pub status: ReplyStatus,
    /// What to show the invoker
    pub body: ReplyBody,
}

impl Reply {
    /// Successful plain-text reply.
    pub fn completed(text: impl Into<String>) -> Self {
        Self {
            status: ReplyStatus::Completed,
            body: ReplyBody::Text(text.into()),
        }
    }

    /// Validation rejection.
    pub fn rejected(text: impl Into<String>) -> Self {
        Self {
            status: ReplyStatus::Rejected,
            body: ReplyBody::Text(text.into()),
        }
    }

    /// Execution failure.
    pub fn failed(text: impl Into<String>) -> Self {
        Self {
            status: ReplyStatus::Failed,
            body: ReplyBody::Text(text.into()),
        }
    }

    /// Column listing.
    pub fn columns(title: impl Into<String>, pages: Vec<Vec<String>>) -> Self {
        Self {
            status: ReplyStatus::Completed,
            body: ReplyBody::Columns {
                title: title.into(),
                pages,
            },
        }
    }

    /// Text content, if this is a plain reply.
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            ReplyBody::Text(text) => Some(text),
            ReplyBody::Columns { .. } => None,
        }
    }
}
