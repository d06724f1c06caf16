use anyhow::{bail, Context, Result};
use chrono::FixedOffset;
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

/// Default upload ceiling: 50 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    /// Directory uploaded media is written under
    pub media_root: PathBuf,
    /// Public URL prefix for stored media
    pub media_base_url: String,
    pub max_upload_bytes: usize,
    /// Timezone used for "today" listings
    pub utc_offset: FixedOffset,
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "playday".to_string()),
            media_root: env::var("MEDIA_ROOT")
                .unwrap_or_else(|_| "./storage/media".to_string())
                .into(),
            media_base_url: env::var("MEDIA_BASE_URL").unwrap_or_else(|_| "/media".to_string()),
            max_upload_bytes: match env::var("MAX_UPLOAD_BYTES") {
                Ok(value) => value
                    .parse()
                    .context("MAX_UPLOAD_BYTES must be a valid number")?,
                Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
            },
            utc_offset: parse_utc_offset(
                &env::var("APP_UTC_OFFSET").unwrap_or_else(|_| "+00:00".to_string()),
            )
            .context("APP_UTC_OFFSET must look like +08:00")?,
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|origins| parse_origins(&origins))
                .unwrap_or_default(),
        })
    }
}

/// Parse `"+HH:MM"`, `"-HH:MM"`, `"Z"` or `"UTC"` into a fixed offset.
pub fn parse_utc_offset(value: &str) -> Result<FixedOffset> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("z") || value.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).context("zero offset");
    }

    let (sign, rest) = if let Some(rest) = value.strip_prefix('+') {
        (1, rest)
    } else if let Some(rest) = value.strip_prefix('-') {
        (-1, rest)
    } else {
        bail!("offset must start with + or -: {value}");
    };

    let (hours, minutes) = rest
        .split_once(':')
        .with_context(|| format!("offset must be HH:MM: {value}"))?;
    let hours: i32 = hours.parse().context("invalid offset hours")?;
    let minutes: i32 = minutes.parse().context("invalid offset minutes")?;
    if hours > 14 || minutes > 59 {
        bail!("offset out of range: {value}");
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .with_context(|| format!("offset out of range: {value}"))
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
