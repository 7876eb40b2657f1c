pub mod app;
pub mod audio;
pub mod core;
pub mod error;
pub mod game;
pub mod logging;
pub mod presence;
pub mod settings;
pub mod speech;
pub mod ui;
pub mod video;
