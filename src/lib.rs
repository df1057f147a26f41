pub mod cache;
pub mod commands;
pub mod completion;
pub mod config;
pub mod error_handling;
pub mod git;
pub mod github;
pub mod interactive;
pub mod models;
pub mod search;
pub mod ui;

pub use models::*;
