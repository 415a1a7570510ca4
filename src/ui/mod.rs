pub mod app;
pub mod components;
pub mod context;
pub mod input;
pub mod message;
pub mod state;
pub mod tui;
pub mod util;
