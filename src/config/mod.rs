pub mod config;
pub mod difficulty;
