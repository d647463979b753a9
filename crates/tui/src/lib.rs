pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod tui;

pub use tix_core as core;
pub use tix_core::client;
pub use tix_core::model;
pub use tix_core::view;

pub use tix_core::ApiConfig;
