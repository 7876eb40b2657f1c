//! The presence: the conversational entity behind the screen. A client for
//! a Gemini-style generateContent endpoint plus the actor wrapping it.

mod actor;
mod client;

pub use actor::{PresenceCommand, PresenceEvent, spawn_presence_actor};
pub use client::PresenceClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Viewer,
    Presence,
}

/// One exchange in the running conversation, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}
