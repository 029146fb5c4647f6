use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use rand::RngCore;

use crate::auth::{decode_secret_key, AuthConfig};

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_DB_PATH: &str = "./db/budgetwise.db";
const DEFAULT_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_TOKEN_TTL_MINUTES: u64 = 24 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    pub fn from_env() -> Self {
        match std::env::var("BW_LOG_FORMAT") {
            Ok(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub auth: AuthConfig,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_u64(key: &str, default: u64) -> anyhow::Result<u64> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key}: expected a positive integer, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = env_or("BW_LISTEN_ADDR", DEFAULT_LISTEN_ADDR)
            .parse()
            .context("Invalid BW_LISTEN_ADDR")?;
        let db_path = env_or("BW_DB_PATH", DEFAULT_DB_PATH);
        let cors_allow = parse_origins(&env_or("BW_CORS_ALLOW_ORIGINS", "*"));

        let timeout_ms = parse_u64("BW_REQUEST_TIMEOUT_MS", DEFAULT_TIMEOUT_MS)?;
        if timeout_ms == 0 {
            anyhow::bail!("BW_REQUEST_TIMEOUT_MS must be greater than zero");
        }
        let access_token_ttl = token_ttl(parse_u64(
            "BW_TOKEN_TTL_MINUTES",
            DEFAULT_TOKEN_TTL_MINUTES,
        )?)?;

        let jwt_secret = match std::env::var("BW_SECRET_KEY") {
            Ok(raw) => decode_secret_key(&raw).context("Invalid BW_SECRET_KEY")?,
            Err(_) => {
                tracing::warn!(
                    "BW_SECRET_KEY is not set; using a random key. Tokens will not survive a restart."
                );
                random_secret()
            }
        };

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            auth: AuthConfig {
                jwt_secret,
                access_token_ttl,
            },
        })
    }
}

fn token_ttl(minutes: u64) -> anyhow::Result<Duration> {
    if minutes == 0 {
        anyhow::bail!("BW_TOKEN_TTL_MINUTES must be greater than zero");
    }
    match minutes.checked_mul(60) {
        Some(secs) => Ok(Duration::from_secs(secs)),
        None => anyhow::bail!("BW_TOKEN_TTL_MINUTES is too large"),
    }
}

pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn random_secret() -> Vec<u8> {
    let mut bytes = vec![0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

    #[test]
    fn test_parse_origins_skips_blanks() {
        assert_eq!(
            parse_origins("http://a.test, ,http://b.test,"),
            vec!["http://a.test", "http://b.test"]
        );
        assert_eq!(parse_origins("*"), vec!["*"]);
    }

    #[test]
    fn test_random_secret_round_trips_through_decoder() {
        let secret = random_secret();
        assert_eq!(secret.len(), 32);
        let decoded = decode_secret_key(&BASE64.encode(&secret)).unwrap();
        assert_eq!(decoded, secret);
    }

    #[test]
    fn test_token_ttl_bounds() {
        assert_eq!(token_ttl(1440).unwrap(), Duration::from_secs(86_400));
        assert!(token_ttl(0).is_err());
        assert!(token_ttl(u64::MAX).is_err());
    }
}
