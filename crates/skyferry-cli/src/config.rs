//! CLI configuration from environment.

use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub out_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("SKYFERRY_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            out_dir: env::var("SKYFERRY_OUT_DIR").unwrap_or_else(|_| "resultfiles".to_string()),
        }
    }
}
