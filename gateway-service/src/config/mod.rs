//! Gateway configuration and the startup gate that validates it.
//!
//! Credentials must be present and must not be one of the sample values
//! shipped in `.env.example`. The gate reports every offending key at once
//! and never echoes a value.

use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::fmt;
use thiserror::Error;

pub const SUPABASE_URL: &str = "SUPABASE_URL";
pub const SUPABASE_SERVICE_ROLE_KEY: &str = "SUPABASE_SERVICE_ROLE_KEY";
pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const GEMINI_MODEL: &str = "GEMINI_MODEL";
pub const SUPABASE_PROBE_TABLE: &str = "SUPABASE_PROBE_TABLE";

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_PROBE_TABLE: &str = "users";

/// Sample values from the example env file. Compared case-insensitively.
const PLACEHOLDER_VALUES: &[&str] = &[
    "your_supabase_url_here",
    "your_supabase_service_role_key_here",
    "your_gemini_api_key_here",
    "your_supabase_project_url",
    "your_service_role_key",
    "your_gemini_api_key",
    "https://your-project.supabase.co",
    "https://your-project-id.supabase.co",
    "your-service-role-key",
    "your-gemini-api-key",
    "changeme",
];

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub common: core_config::Config,
    pub supabase: SupabaseConfig,
    pub gemini: GeminiSettings,
}

#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub service_role_key: Secret<String>,
    /// Table read by `/api/supabase-test`.
    pub probe_table: String,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: Secret<String>,
    /// Fixed for the lifetime of the process.
    pub model: String,
}

/// A required key that failed the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidKey {
    Missing(&'static str),
    Placeholder(&'static str),
}

impl InvalidKey {
    pub fn key(&self) -> &'static str {
        match self {
            InvalidKey::Missing(key) | InvalidKey::Placeholder(key) => key,
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            InvalidKey::Missing(_) => "missing",
            InvalidKey::Placeholder(_) => "placeholder value",
        }
    }
}

impl fmt::Display for InvalidKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.key(), self.reason())
    }
}

#[derive(Debug, Error)]
pub struct ConfigGateError {
    pub invalid: Vec<InvalidKey>,
}

impl fmt::Display for ConfigGateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<String> = self.invalid.iter().map(ToString::to_string).collect();
        write!(
            f,
            "missing or placeholder configuration: {}",
            keys.join(", ")
        )
    }
}

fn is_placeholder(value: &str) -> bool {
    PLACEHOLDER_VALUES
        .iter()
        .any(|placeholder| placeholder.eq_ignore_ascii_case(value))
}

fn check_required(key: &'static str, value: Option<String>) -> Result<String, InvalidKey> {
    let value = value.map(|v| v.trim().to_string()).unwrap_or_default();
    if value.is_empty() {
        Err(InvalidKey::Missing(key))
    } else if is_placeholder(&value) {
        Err(InvalidKey::Placeholder(key))
    } else {
        Ok(value)
    }
}

fn optional<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl GatewayConfig {
    /// Run the gate against the process environment. `common` comes from
    /// `service_core::config::Config::load`, which has already read `.env`.
    pub fn load(common: core_config::Config) -> Result<Self, AppError> {
        Self::from_lookup(common, |key| env::var(key).ok()).map_err(|e| {
            for invalid in &e.invalid {
                tracing::error!(
                    key = invalid.key(),
                    reason = invalid.reason(),
                    "Required configuration is not usable"
                );
            }
            AppError::ConfigError(anyhow::Error::new(e))
        })
    }

    /// Validate required keys using `lookup` as the value source.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, ConfigGateError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut invalid = Vec::new();
        let mut required = |key: &'static str| match check_required(key, lookup(key)) {
            Ok(value) => Some(value),
            Err(bad) => {
                invalid.push(bad);
                None
            }
        };

        let url = required(SUPABASE_URL);
        let service_role_key = required(SUPABASE_SERVICE_ROLE_KEY);
        let api_key = required(GEMINI_API_KEY);

        match (url, service_role_key, api_key) {
            (Some(url), Some(service_role_key), Some(api_key)) => Ok(GatewayConfig {
                common,
                supabase: SupabaseConfig {
                    url,
                    service_role_key: Secret::new(service_role_key),
                    probe_table: optional(&lookup, SUPABASE_PROBE_TABLE, DEFAULT_PROBE_TABLE),
                },
                gemini: GeminiSettings {
                    api_key: Secret::new(api_key),
                    model: optional(&lookup, GEMINI_MODEL, DEFAULT_GEMINI_MODEL),
                },
            }),
            _ => Err(ConfigGateError { invalid }),
        }
    }
}
