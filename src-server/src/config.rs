//! Configuration
//!
//! Loaded from environment variables (and `.env`) with defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::domain::GateError;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL, e.g. `https://xyz.supabase.co`
    pub supabase_url: String,
    /// Public anon key sent as `apikey`
    pub supabase_anon_key: String,
    pub bind_addr: SocketAddr,
    /// Built WASM bundle (trunk `dist/`)
    pub dist_dir: PathBuf,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Mark auth cookies `Secure`
    pub secure_cookies: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, GateError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, GateError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let (Some(supabase_url), Some(supabase_anon_key)) = (
            non_empty("PROJEX_SUPABASE_URL"),
            non_empty("PROJEX_SUPABASE_ANON_KEY"),
        ) else {
            return Err(GateError::MissingBackend);
        };

        let bind = lookup("PROJEX_BIND_ADDR").unwrap_or_else(|| "127.0.0.1:3000".to_string());
        let bind_addr = bind.parse().map_err(|_| GateError::InvalidBindAddr(bind))?;

        Ok(Self {
            supabase_url: supabase_url.trim_end_matches('/').to_string(),
            supabase_anon_key,
            bind_addr,
            dist_dir: lookup("PROJEX_DIST_DIR").unwrap_or_else(|| "./dist".to_string()).into(),
            log_level: lookup("PROJEX_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            secure_cookies: lookup("PROJEX_SECURE_COOKIES").is_some_and(|v| v == "1" || v == "true"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("PROJEX_SUPABASE_URL", "https://abc.supabase.co/"),
            ("PROJEX_SUPABASE_ANON_KEY", "anon"),
        ]))
        .unwrap();

        assert_eq!(config.supabase_url, "https://abc.supabase.co");
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(config.dist_dir, PathBuf::from("./dist"));
        assert_eq!(config.log_level, "info");
        assert!(!config.secure_cookies);
    }

    #[test]
    fn test_missing_backend() {
        let err = Config::from_lookup(lookup(&[("PROJEX_SUPABASE_URL", "https://abc.supabase.co")])).unwrap_err();
        assert_eq!(err.to_string(), "Supabase URL or Key is missing");

        let err = Config::from_lookup(lookup(&[
            ("PROJEX_SUPABASE_URL", " "),
            ("PROJEX_SUPABASE_ANON_KEY", "anon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, GateError::MissingBackend));
    }

    #[test]
    fn test_invalid_bind_addr() {
        let err = Config::from_lookup(lookup(&[
            ("PROJEX_SUPABASE_URL", "https://abc.supabase.co"),
            ("PROJEX_SUPABASE_ANON_KEY", "anon"),
            ("PROJEX_BIND_ADDR", "nowhere"),
        ]))
        .unwrap_err();
        assert!(matches!(err, GateError::InvalidBindAddr(_)));
    }
}
