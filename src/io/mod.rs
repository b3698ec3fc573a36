pub mod catalog;
pub mod cli;
pub mod configuration;
pub mod error;
pub mod image;
pub mod progress;
pub mod visualization;
