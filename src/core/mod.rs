pub mod types;
pub mod catalog;
pub mod config;
pub mod error;
pub mod stats;
