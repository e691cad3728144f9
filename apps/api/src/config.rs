use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing; the service never comes
/// up with an unusable inference credential.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_env_missing_is_error() {
        let err = require_env("CVLENS_TEST_VAR_THAT_IS_NEVER_SET").unwrap_err();
        assert!(err.to_string().contains("CVLENS_TEST_VAR_THAT_IS_NEVER_SET"));
    }

    #[test]
    fn test_require_env_present() {
        std::env::set_var("CVLENS_TEST_VAR_PRESENT", "value");
        assert_eq!(require_env("CVLENS_TEST_VAR_PRESENT").unwrap(), "value");
    }
}
