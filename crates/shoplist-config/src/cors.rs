use std::env;

const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:8000,http://localhost:5173";

/// Origins allowed to call the API from a browser.
#[derive(Clone, Debug, Default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    /// Reads the comma-separated `ALLOWED_ORIGINS`.
    pub fn from_env() -> Self {
        let origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string());
        Self::parse(&origins)
    }

    fn parse(origins: &str) -> Self {
        Self {
            allowed_origins: origins
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_skips_blanks() {
        let config = CorsConfig::parse(" https://a.example , ,https://b.example,");
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn test_default_origins() {
        let config = CorsConfig::parse(DEFAULT_ALLOWED_ORIGINS);
        assert_eq!(config.allowed_origins.len(), 2);
    }
}
