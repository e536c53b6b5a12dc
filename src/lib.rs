// Library surface for headless/integration tests and reuse.
// The binary only adds terminal setup and the event loop on top.
pub mod app;
pub mod config;
pub mod game;
pub mod keymap;
pub mod logging;
pub mod question;
pub mod runtime;
pub mod setup;
pub mod ui;

pub use app::{Action, App};
