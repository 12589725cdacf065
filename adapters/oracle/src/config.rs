use serde::Deserialize;

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Connection settings for the remote text-generation service.
///
/// Deserialised from the `[oracle]` table of the game configuration file;
/// missing keys take their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OracleConfig {
    /// Base URL of the service, without a trailing slash.
    pub endpoint: String,
    /// Model identifier appended to the endpoint.
    pub model: String,
    /// Environment variable consulted when no inline key is configured.
    pub api_key_env: String,
    /// Inline API key, taking precedence over the environment.
    pub api_key: Option<String>,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            api_key_env: DEFAULT_API_KEY_ENV.to_owned(),
            api_key: None,
        }
    }
}

impl OracleConfig {
    /// Returns the API key from the configuration or the environment.
    ///
    /// Blank values count as absent. Never fails.
    #[must_use]
    pub fn credential(&self) -> Option<String> {
        let inline = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty());
        if let Some(key) = inline {
            return Some(key.to_owned());
        }

        std::env::var(&self.api_key_env)
            .ok()
            .map(|key| key.trim().to_owned())
            .filter(|key| !key.is_empty())
    }

    /// Full URL of the content generation call for the configured model.
    #[must_use]
    pub(crate) fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_key_is_trimmed() {
        let config = OracleConfig {
            api_key: Some("  abc  ".to_owned()),
            ..OracleConfig::default()
        };

        assert_eq!(config.credential().as_deref(), Some("abc"));
    }

    #[test]
    fn blank_inline_key_defers_to_missing_environment() {
        let config = OracleConfig {
            api_key: Some("   ".to_owned()),
            api_key_env: "WAYPOINT_DEFENCE_TEST_NEVER_SET".to_owned(),
            ..OracleConfig::default()
        };

        assert_eq!(config.credential(), None);
    }

    #[test]
    fn url_tolerates_trailing_slash() {
        let config = OracleConfig {
            endpoint: "https://example.test/v1/".to_owned(),
            model: "m".to_owned(),
            ..OracleConfig::default()
        };

        assert_eq!(
            config.generate_url(),
            "https://example.test/v1/models/m:generateContent"
        );
    }
}
