use anyhow::{anyhow, Context, Result};
use std::env;

use crate::errors::ErrorFormat;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub errors: ErrorsConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub instance_id: String,
    /// Skip the startup banner
    pub hide_banner: bool,
    /// Skip logging the listen address
    pub hide_port: bool,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub debug: bool,
}

#[derive(Debug, Clone)]
pub struct ErrorsConfig {
    /// Response shape written by the error hook
    pub format: ErrorFormat,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8008,
                instance_id: "unknown".to_string(),
                hide_banner: false,
                hide_port: false,
            },
            logging: LoggingConfig { debug: false },
            errors: ErrorsConfig {
                format: ErrorFormat::Flat,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Ok(Config {
            server: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("API_PORT")
                    .unwrap_or_else(|_| "8008".to_string())
                    .parse()
                    .context("API_PORT must be a valid port number")?,
                // Used only for debugging/observability. If unset, fall back to HOSTNAME if
                // present (e.g. Docker/Kubernetes), otherwise "unknown".
                instance_id: env::var("INSTANCE_ID")
                    .or_else(|_| env::var("HOSTNAME"))
                    .unwrap_or_else(|_| "unknown".to_string()),
                hide_banner: bool_var("HIDE_BANNER")?,
                hide_port: bool_var("HIDE_PORT")?,
            },
            logging: LoggingConfig {
                debug: bool_var("DEBUG")?,
            },
            errors: ErrorsConfig {
                format: env::var("ERROR_FORMAT")
                    .unwrap_or_else(|_| "flat".to_string())
                    .parse::<ErrorFormat>()
                    .map_err(|e| anyhow!(e))
                    .context("ERROR_FORMAT must be 'flat' or 'hal'")?,
            },
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Default tracing filter when RUST_LOG is unset
    pub fn log_filter(&self) -> &'static str {
        if self.logging.debug {
            "debug,matrix_scaffold=debug"
        } else {
            "info,matrix_scaffold=info"
        }
    }
}

fn bool_var(name: &str) -> Result<bool> {
    match env::var(name) {
        Ok(value) => parse_bool(&value).with_context(|| format!("{} must be true or false", name)),
        Err(_) => Ok(false),
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(anyhow!("invalid boolean '{}'", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    #[test]
    fn test_server_address() {
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 3000;

        assert_eq!(config.server_address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_log_filter_follows_debug() {
        let mut config = Config::default();
        assert!(config.log_filter().starts_with("info"));
        config.logging.debug = true;
        assert!(config.log_filter().starts_with("debug"));
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("TRUE").unwrap());
        assert!(parse_bool("1").unwrap());
        assert!(!parse_bool("off").unwrap());
        assert!(parse_bool("maybe").is_err());
    }

    // Tests below mutate the process environment and must not interleave
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "API_HOST",
        "API_PORT",
        "INSTANCE_ID",
        "HOSTNAME",
        "HIDE_BANNER",
        "HIDE_PORT",
        "DEBUG",
        "ERROR_FORMAT",
    ];

    fn clean_env() -> MutexGuard<'static, ()> {
        let guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        for var in VARS {
            env::remove_var(var);
        }
        guard
    }

    #[test]
    fn test_from_env_defaults() {
        let _guard = clean_env();
        let config = Config::from_env().unwrap();

        assert_eq!(config.server_address(), "0.0.0.0:8008");
        assert_eq!(config.server.instance_id, "unknown");
        assert!(!config.server.hide_banner);
        assert!(!config.server.hide_port);
        assert!(!config.logging.debug);
        assert_eq!(config.errors.format, ErrorFormat::Flat);
    }

    #[test]
    fn test_from_env_instance_id_fallback() {
        let _guard = clean_env();
        env::set_var("HOSTNAME", "pod-7");
        assert_eq!(Config::from_env().unwrap().server.instance_id, "pod-7");

        env::set_var("INSTANCE_ID", "synapse-1");
        assert_eq!(Config::from_env().unwrap().server.instance_id, "synapse-1");
        env::remove_var("INSTANCE_ID");
        env::remove_var("HOSTNAME");
    }

    #[test]
    fn test_from_env_reads_overrides() {
        let _guard = clean_env();
        env::set_var("API_HOST", "127.0.0.1");
        env::set_var("API_PORT", "9000");
        env::set_var("HIDE_PORT", "yes");
        env::set_var("DEBUG", "1");
        env::set_var("ERROR_FORMAT", "HAL");

        let config = Config::from_env().unwrap();
        assert_eq!(config.server_address(), "127.0.0.1:9000");
        assert!(config.server.hide_port);
        assert!(config.logging.debug);
        assert_eq!(config.errors.format, ErrorFormat::Hal);

        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_from_env_rejects_bad_values() {
        let _guard = clean_env();

        for (var, value) in [
            ("ERROR_FORMAT", "xml"),
            ("HIDE_PORT", "maybe"),
            ("DEBUG", "verbose"),
            ("API_PORT", "http"),
        ] {
            env::set_var(var, value);
            let err = Config::from_env().unwrap_err();
            assert!(
                format!("{err:#}").contains(var),
                "{var}={value} gave: {err:#}"
            );
            env::remove_var(var);
        }
    }
}
