//! # Site configuration
//!
//! Settings are layered with the `config` crate, lowest priority first:
//!
//! 1. built-in defaults,
//! 2. an optional `config.toml` in the working directory,
//! 3. environment variables, `_` separating section and key.
//!
//! A `.env` file is loaded into the environment first (via `dotenvy`).
//!
//! ```toml
//! [supabase]
//! url = "https://xyzcompany.supabase.co"
//! key = "public-anon-key"
//! timeout = 10        # seconds per request
//!
//! [session]
//! ttl = 7             # days of inactivity before the session cookie expires
//! secure = false      # set the Secure flag on the session cookie
//! ```
//!
//! The same values come from `SUPABASE_URL`, `SUPABASE_KEY`, `SUPABASE_TIMEOUT`,
//! `SESSION_TTL` and `SESSION_SECURE`.

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseSettings {
    /// Project URL, without the `/rest/v1` or `/auth/v1` suffix.
    pub url: String,
    /// API key sent as `apikey` on every request.
    pub key: String,
    /// Request timeout in seconds.
    pub timeout: u64,
}

impl Default for SupabaseSettings {
    fn default() -> Self {
        Self {
            url: "http://localhost:54321".into(),
            key: String::new(),
            timeout: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    /// Days of inactivity before the session expires.
    pub ttl: i64,
    pub secure: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            ttl: 7,
            secure: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    pub supabase: SupabaseSettings,
    pub session: SessionSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .set_default("supabase.url", "http://localhost:54321")?
            .set_default("supabase.key", "")?
            .set_default("supabase.timeout", 10)?
            .set_default("session.ttl", 7)?
            .set_default("session.secure", false)?
            .add_source(
                File::with_name("config.toml")
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(Environment::default().separator("_").try_parsing(true))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::set_var;

    #[test]
    fn test_settings() {
        set_var("SUPABASE_URL", "https://ments.supabase.co");
        set_var("SUPABASE_KEY", "anon-key");
        set_var("SESSION_TTL", "14");
        let settings = Settings::new().unwrap_or_default();
        println!("Settings = {:?}", settings);
        assert_eq!(settings.supabase.url, "https://ments.supabase.co");
        assert_eq!(settings.supabase.key, "anon-key");
        assert_eq!(settings.supabase.timeout, 10);
        assert_eq!(settings.session.ttl, 14);
        assert!(!settings.session.secure);
    }
}
