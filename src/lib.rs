pub mod audio;
pub mod config;
pub mod error;
pub mod event;
pub mod generation;
pub mod http;
pub mod ui;
pub mod util;
