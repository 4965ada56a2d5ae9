//! Configuration module for the Hermeneia site server.
//!
//! Loads configuration from environment variables.

use std::env;
use std::net::IpAddr;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind (`HOST`, default `0.0.0.0`).
    pub host: IpAddr,
    /// Port to bind (`PORT`, default `8080`).
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if `HOST` or `PORT` are set but malformed.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let host = env::var("HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string())
            .parse()
            .expect("HOST must be a valid IP address");

        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .expect("PORT must be a number");

        Self { host, port }
    }
}
