pub mod client;
pub mod config;
pub mod model;
pub mod view;

pub use client::TaskApi;
pub use config::ApiConfig;
pub use model::*;
pub use view::{TaskCounts, TaskListView};
