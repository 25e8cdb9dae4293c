//! Data models and structures
//!
//! Defines the request/response records exchanged between the studio client
//! and the gateway, plus the process-wide gateway configuration.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Sample count used when the caller omits `count` or sends an unusable one.
pub const DEFAULT_SAMPLE_COUNT: u32 = 3;

/// Design category the studio lets the user pick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UseCase {
    #[default]
    Interior,
    Architecture,
    Construction,
    Event,
}

impl UseCase {
    pub const ALL: [UseCase; 4] = [
        UseCase::Interior,
        UseCase::Architecture,
        UseCase::Construction,
        UseCase::Event,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UseCase::Interior => "interior",
            UseCase::Architecture => "architecture",
            UseCase::Construction => "construction",
            UseCase::Event => "event",
        }
    }
}

impl fmt::Display for UseCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UseCase {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        UseCase::ALL
            .into_iter()
            .find(|case| case.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "Unknown use case '{}'. Expected one of: interior, architecture, construction, event",
                    s
                )
            })
    }
}

/// Body of `POST /api/generate-image`.
///
/// `count` stays an untyped JSON value so that odd inputs (strings, floats,
/// negatives) fall back to the default instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_case: Option<String>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, use_case: UseCase, count: u32) -> Self {
        Self {
            prompt: Some(prompt.into()),
            count: Some(Value::from(count)),
            use_case: Some(use_case.to_string()),
        }
    }

    /// Number of samples to request upstream. Always positive.
    pub fn sample_count(&self) -> u32 {
        resolve_sample_count(self.count.as_ref())
    }
}

/// Positive integers pass through (saturating at `u32::MAX`); everything else
/// resolves to [`DEFAULT_SAMPLE_COUNT`].
pub fn resolve_sample_count(count: Option<&Value>) -> u32 {
    match count.and_then(Value::as_u64) {
        Some(n) if n > 0 => u32::try_from(n).unwrap_or(u32::MAX),
        _ => DEFAULT_SAMPLE_COUNT,
    }
}

/// Gateway answer: either `images` or `error`, never both.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GenerationResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerationResponse {
    pub fn images(images: Vec<String>) -> Self {
        Self {
            images: Some(images),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            images: None,
            error: Some(message.into()),
        }
    }
}

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_STABILITY_API_BASE: &str = "https://api.stability.ai";
pub const DEFAULT_STABILITY_ENGINE: &str = "stable-diffusion-xl-1024-v1-0";

// Configuration
#[derive(Clone)]
pub struct Config {
    pub stability_api_key: String,
    pub stability_api_base: String,
    pub stability_engine: String,
    pub port: u16,
    pub allowed_origin: Option<String>,
    pub upstream_timeout: Option<Duration>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("stability_api_key", &"<redacted>")
            .field("stability_api_base", &self.stability_api_base)
            .field("stability_engine", &self.stability_engine)
            .field("port", &self.port)
            .field("allowed_origin", &self.allowed_origin)
            .field("upstream_timeout", &self.upstream_timeout)
            .finish()
    }
}

impl Config {
    /// Load configuration from the process environment, reading `.env` first
    /// when one exists.
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let stability_api_key = non_empty("STABILITY_API_KEY")
            .ok_or_else(|| crate::Error::Config("STABILITY_API_KEY not set".to_string()))?;

        let port = match non_empty("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| crate::Error::Config(format!("Invalid PORT '{}'", raw)))?,
            None => DEFAULT_PORT,
        };

        let upstream_timeout = match non_empty("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.parse::<u64>().map_err(|_| {
                    crate::Error::Config(format!("Invalid UPSTREAM_TIMEOUT_SECS '{}'", raw))
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            stability_api_key,
            stability_api_base: non_empty("STABILITY_API_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_STABILITY_API_BASE.to_string()),
            stability_engine: non_empty("STABILITY_ENGINE")
                .unwrap_or_else(|| DEFAULT_STABILITY_ENGINE.to_string()),
            port,
            allowed_origin: non_empty("ALLOWED_ORIGIN"),
            upstream_timeout,
        })
    }
}
