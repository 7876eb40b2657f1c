//! The truth-or-dare game the set insists on playing.

mod prompts;
mod session;

pub use prompts::{DARES, PromptPool, TRUTHS};
pub use session::{GameSession, GameStep};
