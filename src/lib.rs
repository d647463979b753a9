pub use tix_tui::cli;
pub use tix_tui::commands;
pub use tix_tui::config;
pub use tix_tui::logging;
pub use tix_tui::tui;

pub use tix_core as core;
pub use tix_core::client;
pub use tix_core::model;
pub use tix_core::view;

pub use tix_core::ApiConfig;
