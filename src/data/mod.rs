//! Data structures for the game world
//!
//! Defines the manor map, the clue catalog, the suspect index, and the
//! scenario datasets they are built from.

pub mod catalog;
pub mod room;
pub mod scenario;
pub mod suspects;

pub use catalog::*;
pub use room::*;
pub use scenario::*;
pub use suspects::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kinds of messages shown in the case log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKind {
    Info,
    Clue,
    Warning,
    Verdict,
}

impl MessageKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            MessageKind::Info => "ℹ",
            MessageKind::Clue => "◆",
            MessageKind::Warning => "▲",
            MessageKind::Verdict => "⚖",
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageKind::Info => write!(f, "INFO"),
            MessageKind::Clue => write!(f, "CLUE"),
            MessageKind::Warning => write!(f, "WARN"),
            MessageKind::Verdict => write!(f, "VERDICT"),
        }
    }
}

/// Identifies one play-through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaseId(pub Uuid);

impl CaseId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// First block of the uuid, enough to tell cases apart on screen
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_uppercase()
    }
}

impl Default for CaseId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
