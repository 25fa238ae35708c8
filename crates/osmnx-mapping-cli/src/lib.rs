pub mod cli;
pub mod commands;
pub mod config;
pub mod debug;

pub use cli::{Cli, Commands, RenderArgs};
