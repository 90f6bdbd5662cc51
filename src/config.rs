use std::path::PathBuf;

use anyhow::{Context, Result};

// ---------------------------------------------------------------------------
// AllowedOrigins
// ---------------------------------------------------------------------------

/// CORS origin allow-list parsed from `ALLOWED_ORIGINS`.
///
/// A literal `*` anywhere in the list permits every origin. Requests without
/// an `Origin` header (curl, server-to-server) are never subject to the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

impl AllowedOrigins {
    /// Parse a comma-separated origin list, e.g.
    /// `"https://example.com,http://localhost:3000"`.
    pub fn parse(raw: &str) -> Self {
        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect();

        if origins.iter().any(|o| o == "*") {
            Self::Any
        } else {
            Self::List(origins)
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    /// Directory holding one JSON file per ingested reading.
    pub data_dir: PathBuf,
    pub allowed_origins: AllowedOrigins,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            server_host: optional("SERVER_HOST", "0.0.0.0"),
            server_port: optional("PORT", "3001")
                .parse()
                .context("PORT must be a valid port number")?,
            data_dir: PathBuf::from(optional("DATA_DIR", "./db")),
            allowed_origins: AllowedOrigins::parse(&optional(
                "ALLOWED_ORIGINS",
                "http://localhost:3000",
            )),
        })
    }
}

fn optional(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_origins_empty() {
        assert_eq!(AllowedOrigins::parse(""), AllowedOrigins::List(vec![]));
    }

    #[test]
    fn parse_origins_single() {
        assert_eq!(
            AllowedOrigins::parse("http://localhost:3000"),
            AllowedOrigins::List(vec!["http://localhost:3000".to_owned()])
        );
    }

    #[test]
    fn parse_origins_list_trims_whitespace() {
        assert_eq!(
            AllowedOrigins::parse("https://example.com, http://localhost:3000"),
            AllowedOrigins::List(vec![
                "https://example.com".to_owned(),
                "http://localhost:3000".to_owned(),
            ])
        );
    }

    #[test]
    fn parse_origins_wildcard_allows_any() {
        assert_eq!(AllowedOrigins::parse("*"), AllowedOrigins::Any);
    }

    #[test]
    fn parse_origins_wildcard_among_others_allows_any() {
        assert_eq!(
            AllowedOrigins::parse("https://example.com,*"),
            AllowedOrigins::Any
        );
    }
}
