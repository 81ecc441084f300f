//! Configuration resolution for ticket-analyzer
//!
//! Two-tier resolution with ENV -> TOML priority, falling back to the
//! compiled demo defaults. There is no database tier: this service keeps no
//! persistent state of any kind.
//!
//! TOML file location: `<config_dir>/ticket-analyzer/config.toml`
//! (e.g. `~/.config/ticket-analyzer/config.toml` on Linux).

use serde::Deserialize;
use std::path::PathBuf;
use tracing::{info, warn};

/// Default HTTP listen port
pub const DEFAULT_PORT: u16 = 5740;

/// Demo Freshdesk tenant the analyzer posts notes to
const DEFAULT_FRESHDESK_DOMAIN: &str = "sbainfo-helpdesk";

/// Demo Freshdesk API key (Freshdesk basic auth uses the key as username)
const DEFAULT_FRESHDESK_API_KEY: &str = "QdOru20krgSfVPa6Izw";

/// OpenAI-compatible speech-to-text endpoint (e.g. a local whisper server)
const DEFAULT_TRANSCRIPTION_URL: &str = "http://127.0.0.1:8080/v1/audio/transcriptions";

/// LibreTranslate-compatible translation endpoint
const DEFAULT_TRANSLATION_URL: &str = "http://127.0.0.1:5000/translate";

/// Hugging-Face-inference-compatible sentiment endpoint
const DEFAULT_SENTIMENT_URL: &str =
    "https://api-inference.huggingface.co/models/distilbert-base-uncased-finetuned-sst-2-english";

/// Optional values parsed from the TOML config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub listen_port: Option<u16>,
    pub freshdesk_domain: Option<String>,
    pub freshdesk_api_key: Option<String>,
    pub transcription_url: Option<String>,
    pub translation_url: Option<String>,
    pub sentiment_url: Option<String>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub listen_port: u16,
    pub freshdesk_domain: String,
    pub freshdesk_api_key: String,
    pub transcription_url: String,
    pub translation_url: String,
    pub sentiment_url: String,
}

impl AnalyzerConfig {
    /// Resolve configuration with ENV -> TOML -> default priority
    pub fn resolve() -> Self {
        let toml_config = load_toml_config().unwrap_or_default();

        let listen_port = resolve_port(
            std::env::var("TICKET_ANALYZER_PORT").ok(),
            toml_config.listen_port,
        );

        Self {
            listen_port,
            freshdesk_domain: resolve_value(
                "freshdesk_domain",
                std::env::var("TICKET_ANALYZER_FRESHDESK_DOMAIN").ok(),
                toml_config.freshdesk_domain,
                DEFAULT_FRESHDESK_DOMAIN,
            ),
            freshdesk_api_key: resolve_value(
                "freshdesk_api_key",
                std::env::var("TICKET_ANALYZER_FRESHDESK_API_KEY").ok(),
                toml_config.freshdesk_api_key,
                DEFAULT_FRESHDESK_API_KEY,
            ),
            transcription_url: resolve_value(
                "transcription_url",
                std::env::var("TICKET_ANALYZER_TRANSCRIPTION_URL").ok(),
                toml_config.transcription_url,
                DEFAULT_TRANSCRIPTION_URL,
            ),
            translation_url: resolve_value(
                "translation_url",
                std::env::var("TICKET_ANALYZER_TRANSLATION_URL").ok(),
                toml_config.translation_url,
                DEFAULT_TRANSLATION_URL,
            ),
            sentiment_url: resolve_value(
                "sentiment_url",
                std::env::var("TICKET_ANALYZER_SENTIMENT_URL").ok(),
                toml_config.sentiment_url,
                DEFAULT_SENTIMENT_URL,
            ),
        }
    }

    /// Freshdesk REST API base URL for the configured tenant
    pub fn freshdesk_base_url(&self) -> String {
        format!("https://{}.freshdesk.com/api/v2", self.freshdesk_domain)
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            listen_port: DEFAULT_PORT,
            freshdesk_domain: DEFAULT_FRESHDESK_DOMAIN.to_string(),
            freshdesk_api_key: DEFAULT_FRESHDESK_API_KEY.to_string(),
            transcription_url: DEFAULT_TRANSCRIPTION_URL.to_string(),
            translation_url: DEFAULT_TRANSLATION_URL.to_string(),
            sentiment_url: DEFAULT_SENTIMENT_URL.to_string(),
        }
    }
}

/// Resolve a single string value with ENV -> TOML -> default priority
///
/// Warns when both ENV and TOML provide a value (potential misconfiguration),
/// then uses ENV (highest priority).
fn resolve_value(name: &str, env_val: Option<String>, toml_val: Option<String>, default: &str) -> String {
    let env_val = env_val.filter(|v| is_valid_value(v));
    let toml_val = toml_val.filter(|v| is_valid_value(v));

    if env_val.is_some() && toml_val.is_some() {
        warn!(
            "{} found in both environment and TOML. Using environment (highest priority).",
            name
        );
    }

    if let Some(v) = env_val {
        info!("{} loaded from environment variable", name);
        return v;
    }
    if let Some(v) = toml_val {
        info!("{} loaded from TOML config", name);
        return v;
    }
    default.to_string()
}

/// Resolve the listen port; unparseable ENV values fall through to TOML
fn resolve_port(env_val: Option<String>, toml_val: Option<u16>) -> u16 {
    if let Some(raw) = env_val {
        match raw.parse::<u16>() {
            Ok(port) => return port,
            Err(_) => warn!("TICKET_ANALYZER_PORT is not a valid port: {}", raw),
        }
    }
    toml_val.unwrap_or(DEFAULT_PORT)
}

/// Validate a configured value (non-empty, non-whitespace)
pub fn is_valid_value(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Platform config file path: `<config_dir>/ticket-analyzer/config.toml`
fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("ticket-analyzer").join("config.toml"))
}

/// Read and parse the TOML config file if present; parse failures are
/// reported and treated as absent
fn load_toml_config() -> Option<TomlConfig> {
    let path = config_file_path()?;
    if !path.exists() {
        return None;
    }
    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            return None;
        }
    };
    match toml::from_str::<TomlConfig>(&content) {
        Ok(config) => {
            info!("Loaded TOML config from {}", path.display());
            Some(config)
        }
        Err(e) => {
            warn!("Failed to parse {}: {}", path.display(), e);
            None
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_beats_toml() {
        let v = resolve_value(
            "test",
            Some("from-env".to_string()),
            Some("from-toml".to_string()),
            "default",
        );
        assert_eq!(v, "from-env");
    }

    #[test]
    fn test_toml_beats_default() {
        let v = resolve_value("test", None, Some("from-toml".to_string()), "default");
        assert_eq!(v, "from-toml");
    }

    #[test]
    fn test_blank_values_are_skipped() {
        let v = resolve_value("test", Some("   ".to_string()), None, "default");
        assert_eq!(v, "default", "Whitespace-only value should be rejected");
    }

    #[test]
    fn test_port_parse_failure_falls_through() {
        assert_eq!(resolve_port(Some("not-a-port".to_string()), Some(6000)), 6000);
        assert_eq!(resolve_port(Some("not-a-port".to_string()), None), DEFAULT_PORT);
        assert_eq!(resolve_port(Some("5999".to_string()), Some(6000)), 5999);
    }

    #[test]
    fn test_freshdesk_base_url() {
        let config = AnalyzerConfig::default();
        assert_eq!(
            config.freshdesk_base_url(),
            "https://sbainfo-helpdesk.freshdesk.com/api/v2"
        );
    }

    #[test]
    fn test_toml_parse() {
        let parsed: TomlConfig = toml::from_str(
            r#"
            listen_port = 6001
            freshdesk_domain = "example-helpdesk"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.listen_port, Some(6001));
        assert_eq!(parsed.freshdesk_domain.as_deref(), Some("example-helpdesk"));
        assert!(parsed.sentiment_url.is_none());
    }
}
