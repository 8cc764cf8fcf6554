use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompanionConfig {
    pub generative: GenerativeConfig,
    pub catalog: CatalogConfig,
    pub gateway: GatewayConfig,
}

impl CompanionConfig {
    /// Load config from a TOML file, falling back to defaults for missing
    /// fields. After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: CompanionConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Try to load from path; if the file doesn't exist, return defaults
    /// with env overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({}), using defaults", e);
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg
            }
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("GEMINI_MODEL") {
            self.generative.model = v;
        }
        if let Ok(v) = std::env::var("GEMINI_BASE_URL") {
            self.generative.base_url = Some(v);
        }
        if let Ok(v) = std::env::var("GENERATIVE_TIMEOUT_SECS") {
            if let Ok(n) = v.parse() {
                self.generative.timeout_secs = n;
            }
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerativeConfig {
    pub model: String,
    pub base_url: Option<String>,
    /// Upper bound on a single generative call; on expiry the caller falls
    /// back to the deterministic template.
    pub timeout_secs: u64,
    /// Stories may vary creatively.
    pub story_temperature: f32,
    /// Tips must read as factual and actionable.
    pub tip_temperature: f32,
}

impl Default for GenerativeConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            base_url: None,
            timeout_secs: 10,
            story_temperature: 0.8,
            tip_temperature: 0.4,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub quotes_path: PathBuf,
    pub media_path: PathBuf,
    pub exercises_path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            quotes_path: PathBuf::from("resources/quotes.json"),
            media_path: PathBuf::from("resources/mood_media.json"),
            exercises_path: PathBuf::from("resources/exercises.json"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8787,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = CompanionConfig::default();
        assert_eq!(cfg.generative.model, "gemini-2.5-flash");
        assert_eq!(cfg.generative.timeout_secs, 10);
        assert!(cfg.generative.story_temperature > cfg.generative.tip_temperature);
        assert_eq!(cfg.gateway.port, 8787);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let cfg: CompanionConfig = toml::from_str(
            r#"
            [generative]
            model = "gemini-2.0-flash"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.generative.model, "gemini-2.0-flash");
        assert_eq!(cfg.generative.timeout_secs, 10);
        assert_eq!(cfg.catalog.quotes_path, PathBuf::from("resources/quotes.json"));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let cfg = CompanionConfig::load_or_default("/nonexistent/solace.toml");
        assert_eq!(cfg.generative.model, "gemini-2.5-flash");
    }
}
