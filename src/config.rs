use std::env;
use std::path::PathBuf;

use sqlx::mysql::MySqlConnectOptions;

use crate::error::EtlError;

/// Connection parameters for the MySQL server and target database.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl DbConfig {
    /// Options for talking to the server itself, before the target database
    /// exists. No database is selected.
    pub fn server_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
    }

    /// Options with the target database selected.
    pub fn connect_options(&self) -> MySqlConnectOptions {
        self.server_options().database(&self.database)
    }
}

/// Full pipeline configuration, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub db: DbConfig,
    pub csv_path: PathBuf,
    pub table: String,
}

impl Config {
    /// Read configuration from `SALES_*` environment variables, falling back
    /// to defaults that match a local MySQL install.
    pub fn from_env() -> Result<Self, EtlError> {
        let port_str = env_or("SALES_DB_PORT", "3306");
        let port: u16 = port_str
            .parse()
            .map_err(|_| EtlError::Config(format!("SALES_DB_PORT is not a port: {port_str:?}")))?;

        let db = DbConfig {
            host: env_or("SALES_DB_HOST", "localhost"),
            port,
            user: env_or("SALES_DB_USER", "root"),
            password: env_or("SALES_DB_PASSWORD", ""),
            database: env_or("SALES_DB_NAME", "sales_etl"),
        };
        let cfg = Config {
            db,
            csv_path: PathBuf::from(env_or("SALES_CSV_PATH", "sales_data.csv")),
            table: env_or("SALES_TABLE", "processed_sales"),
        };

        // Database and table names are spliced into DDL, so only accept
        // plain identifiers.
        check_identifier("SALES_DB_NAME", &cfg.db.database)?;
        check_identifier("SALES_TABLE", &cfg.table)?;
        Ok(cfg)
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn check_identifier(what: &str, name: &str) -> Result<(), EtlError> {
    let ok = !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if ok {
        Ok(())
    } else {
        Err(EtlError::Config(format!(
            "{what} must be a plain identifier (letters, digits, underscore): {name:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_rules() {
        assert!(check_identifier("T", "processed_sales").is_ok());
        assert!(check_identifier("T", "Sales2024").is_ok());
        assert!(check_identifier("T", "").is_err());
        assert!(check_identifier("T", "2sales").is_err());
        assert!(check_identifier("T", "sales;drop table x").is_err());
        assert!(check_identifier("T", "sales-etl").is_err());
    }
}
