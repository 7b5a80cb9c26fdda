use std::env;

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub database_dir: String,
    pub max_pool_size: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            database_dir: env::var("DATABASE_DIR").unwrap_or_else(|_| "data".to_string()),
            max_pool_size: env::var("MAX_POOL_SIZE")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,
}
