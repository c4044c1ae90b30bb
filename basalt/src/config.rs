use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;

/// Server settings, read from the environment once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub db_path: PathBuf,
    /// Accounts registered with this email are given the admin role.
    pub admin_email: Option<String>,
    pub bcrypt_cost: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            db_path: PathBuf::from("./basalt.redb"),
            admin_email: None,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let default = Self::default();
        let port = match std::env::var("PORT") {
            Ok(port) => port.parse().with_context(|| format!("invalid PORT: {port}"))?,
            Err(_) => default.port,
        };
        let bcrypt_cost = match std::env::var("BCRYPT_COST") {
            Ok(cost) => cost
                .parse()
                .with_context(|| format!("invalid BCRYPT_COST: {cost}"))?,
            Err(_) => default.bcrypt_cost,
        };
        Ok(Self {
            port,
            db_path: std::env::var("BASALT_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(default.db_path),
            admin_email: std::env::var("ADMIN_EMAIL")
                .ok()
                .filter(|email| !email.is_empty()),
            bcrypt_cost,
        })
    }
}
