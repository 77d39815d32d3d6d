use std::{net::SocketAddr, path::PathBuf};

use crate::error::ConfigError;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_DB_PATH: &str = "waitlist.db";
const DEFAULT_FROM_EMAIL: &str = "waitlist@example.com";
const DEFAULT_SMTP_PORT: u16 = 587;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub db_path: PathBuf,
    /// Present only when `SMTP_SERVER` is set.
    pub smtp: Option<SmtpConfig>,
    pub from_email: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SmtpConfig {
    pub server: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

impl Config {
    /// Reads the process environment, after loading `.env` if present.
    ///
    /// # Errors
    /// If a variable is set to a value that cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// # Errors
    /// If a variable is set to a value that cannot be parsed, or the SMTP
    /// server is set without its credentials.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bind_addr = non_empty("LOADOUT_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr.parse::<SocketAddr>().map_err(|_| ConfigError::Invalid {
            name: "LOADOUT_BIND_ADDR",
            value: bind_addr.clone(),
        })?;

        let smtp = match non_empty("SMTP_SERVER") {
            Some(server) => {
                let port = match non_empty("SMTP_PORT") {
                    Some(port) => port.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                        name: "SMTP_PORT",
                        value: port.clone(),
                    })?,
                    None => DEFAULT_SMTP_PORT,
                };
                Some(SmtpConfig {
                    server,
                    port,
                    username: non_empty("SMTP_USERNAME").ok_or(ConfigError::Missing("SMTP_USERNAME"))?,
                    password: non_empty("SMTP_PASSWORD").ok_or(ConfigError::Missing("SMTP_PASSWORD"))?,
                })
            }
            None => None,
        };

        Ok(Config {
            bind_addr,
            db_path: non_empty("WAITLIST_DB_PATH")
                .map_or_else(|| PathBuf::from(DEFAULT_DB_PATH), PathBuf::from),
            smtp,
            from_email: non_empty("WAITLIST_FROM_EMAIL").unwrap_or_else(|| DEFAULT_FROM_EMAIL.to_string()),
        })
    }
}
