/// Admin principal configuration from environment variables
pub mod admins;

/// Database configuration and connection management
pub mod database;

/// Serial formatting and retry settings from config.toml
pub mod settings;
