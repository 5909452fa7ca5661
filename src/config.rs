use std::{env, path::PathBuf, str::FromStr};

use crate::errors::AppError;

const DEFAULT_DATABASE_URL: &str = "sqlite://courses_app.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8000";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

/// Runtime settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct Config{
    pub database_url: String,
    pub max_connections: u32,
    pub server_address: String,
    pub cors_origin: String,
    pub seed_file: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let cors_origin = var_or("CORS_ORIGIN", DEFAULT_CORS_ORIGIN);

        // credentials are allowed, so the origin has to be explicit
        if cors_origin.trim() == "*" {
            return Err(AppError::Config("CORS_ORIGIN must name a single origin, not `*`".to_string()));
        }

        let max_connections = parse_var("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;

        if max_connections == 0 {
            return Err(AppError::Config("DATABASE_MAX_CONNECTIONS must be at least 1".to_string()));
        }

        Ok(Config {
            database_url: var_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            max_connections,
            server_address: var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            cors_origin,
            seed_file: env::var("SEED_FILE").ok().filter(|path| !path.trim().is_empty()).map(PathBuf::from),
        })
    }
}

fn var_or(key:&str, default:&str) -> String{
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T: FromStr>(key:&str, default:T) -> Result<T, AppError>{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{key} must be a number, got `{raw}`"))),
        Err(_) => Ok(default),
    }
}
