//! Configuration module — store directory resolution and vault paths.

pub mod settings;

pub use settings::Settings;
