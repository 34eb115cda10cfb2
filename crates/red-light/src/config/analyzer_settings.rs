use red_light_core::AnalyzerOptions;

use serde::{Deserialize, Serialize};

/// Remote model settings. Missing fields fall back to the analyzer defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerSettings {
    /// Base URL of the Messages API.
    pub endpoint: String,
    /// Vision-capable model identifier.
    pub model: String,
    /// Upper bound on reply tokens.
    pub max_tokens: u32,
    /// `anthropic-version` header value.
    pub api_version: String,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        AnalyzerOptions::default().into()
    }
}

impl From<AnalyzerOptions> for AnalyzerSettings {
    fn from(options: AnalyzerOptions) -> Self {
        Self {
            endpoint: options.endpoint,
            model: options.model,
            max_tokens: options.max_tokens,
            api_version: options.api_version,
        }
    }
}

impl From<&AnalyzerSettings> for AnalyzerOptions {
    fn from(settings: &AnalyzerSettings) -> Self {
        Self {
            endpoint: settings.endpoint.clone(),
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
            api_version: settings.api_version.clone(),
        }
    }
}
