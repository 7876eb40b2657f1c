mod effects;
mod reducer;

pub mod infra;

pub use effects::{CoreDispatch, CoreEffect, CoreEffects, TimerFire, TimerKind, run_effects};
pub use reducer::spawn_app_actor;
