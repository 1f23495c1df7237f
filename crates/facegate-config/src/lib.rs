//! Configuration for the facegate front end.
//!
//! A TOML file in the platform config directory, overridable by
//! `FACEGATE_*` environment variables, translated into
//! `facegate_core::FrontendConfig`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use facegate_core::config::{
    DEFAULT_LIFETIME, DEFAULT_OVERLAY_LIMIT, DEFAULT_SERVER_URL, DEFAULT_SHOW_DELAY,
};
use facegate_core::{FeedbackConfig, FrontendConfig, PresentationMode, TlsVerification, ToastTimings};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Backend base URL.
    #[serde(default = "default_server")]
    pub server: String,

    /// Request timeout in seconds. Unset means no timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Accept invalid TLS certificates.
    #[serde(default)]
    pub insecure: bool,

    /// Path to a custom CA certificate (PEM).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    #[serde(default)]
    pub feedback: Feedback,

    #[serde(default)]
    pub terminal: Terminal,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: default_server(),
            timeout_secs: None,
            insecure: false,
            ca_cert: None,
            feedback: Feedback::default(),
            terminal: Terminal::default(),
        }
    }
}

fn default_server() -> String {
    DEFAULT_SERVER_URL.into()
}

/// `[feedback]`: how each page reports to the user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Feedback {
    /// "inline" or "overlay".
    #[serde(default = "default_presentation")]
    pub register: String,

    /// "inline" or "overlay".
    #[serde(default = "default_presentation")]
    pub sign_in: String,

    #[serde(default = "default_show_delay_ms")]
    pub show_delay_ms: u64,

    #[serde(default = "default_lifetime_ms")]
    pub lifetime_ms: u64,

    /// Most toasts on screen at once; 0 lifts the cap.
    #[serde(default = "default_overlay_limit")]
    pub overlay_limit: usize,
}

impl Default for Feedback {
    fn default() -> Self {
        Self {
            register: default_presentation(),
            sign_in: default_presentation(),
            show_delay_ms: default_show_delay_ms(),
            lifetime_ms: default_lifetime_ms(),
            overlay_limit: default_overlay_limit(),
        }
    }
}

fn default_presentation() -> String {
    "inline".into()
}
fn default_show_delay_ms() -> u64 {
    u64::try_from(DEFAULT_SHOW_DELAY.as_millis()).unwrap_or(100)
}
fn default_lifetime_ms() -> u64 {
    u64::try_from(DEFAULT_LIFETIME.as_millis()).unwrap_or(3000)
}
fn default_overlay_limit() -> usize {
    DEFAULT_OVERLAY_LIMIT
}

/// `[terminal]`: event pacing for the terminal front end.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Terminal {
    /// Spinner frame interval.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    #[serde(default = "default_render_ms")]
    pub render_ms: u64,
}

impl Default for Terminal {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            render_ms: default_render_ms(),
        }
    }
}

fn default_tick_ms() -> u64 {
    100
}
fn default_render_ms() -> u64 {
    33
}

impl Terminal {
    /// `(tick, render)` intervals. Both must be non-zero.
    pub fn intervals(&self) -> Result<(Duration, Duration), ConfigError> {
        let positive = |field: &str, ms: u64| {
            if ms == 0 {
                Err(ConfigError::Validation {
                    field: field.into(),
                    reason: "must be greater than zero".into(),
                })
            } else {
                Ok(Duration::from_millis(ms))
            }
        };
        Ok((
            positive("terminal.tick_ms", self.tick_ms)?,
            positive("terminal.render_ms", self.render_ms)?,
        ))
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "facegate", "facegate").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("facegate");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// The provider chain: defaults, then the TOML file at `path`, then
/// `FACEGATE_*` variables. Nested keys use a double underscore, e.g.
/// `FACEGATE_FEEDBACK__SIGN_IN=overlay`.
pub fn figment_for(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("FACEGATE_").split("__"))
}

/// Extract a `Config` from any provider chain.
pub fn load_from(figment: &Figment) -> Result<Config, ConfigError> {
    Ok(figment.extract()?)
}

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_from(&figment_for(&config_path()))
}

/// Load config from an explicit file + environment.
pub fn load_config_at(path: &Path) -> Result<Config, ConfigError> {
    load_from(&figment_for(path))
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

fn parse_presentation(field: &str, value: &str) -> Result<PresentationMode, ConfigError> {
    match value {
        "inline" => Ok(PresentationMode::Inline),
        "overlay" => Ok(PresentationMode::Overlay),
        other => Err(ConfigError::Validation {
            field: field.into(),
            reason: format!("expected 'inline' or 'overlay', got '{other}'"),
        }),
    }
}

impl Feedback {
    pub fn to_feedback_config(&self) -> Result<FeedbackConfig, ConfigError> {
        let show_delay = Duration::from_millis(self.show_delay_ms);
        let lifetime = Duration::from_millis(self.lifetime_ms);
        if lifetime.is_zero() {
            return Err(ConfigError::Validation {
                field: "feedback.lifetime_ms".into(),
                reason: "must be greater than zero".into(),
            });
        }

        Ok(FeedbackConfig {
            register: parse_presentation("feedback.register", &self.register)?,
            sign_in: parse_presentation("feedback.sign_in", &self.sign_in)?,
            toasts: ToastTimings {
                show_delay,
                lifetime,
                limit: (self.overlay_limit > 0).then_some(self.overlay_limit),
            },
        })
    }
}

impl Config {
    /// Build the core runtime configuration.
    pub fn to_frontend_config(&self) -> Result<FrontendConfig, ConfigError> {
        let url: url::Url = self.server.parse().map_err(|_| ConfigError::Validation {
            field: "server".into(),
            reason: format!("invalid URL: {}", self.server),
        })?;

        let tls = if self.insecure {
            TlsVerification::DangerAcceptInvalid
        } else if let Some(ref ca_path) = self.ca_cert {
            TlsVerification::CustomCa(ca_path.clone())
        } else {
            TlsVerification::SystemDefaults
        };

        Ok(FrontendConfig {
            url,
            tls,
            timeout: self.timeout_secs.map(Duration::from_secs),
            feedback: self.feedback.to_feedback_config()?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn from_toml(s: &str) -> Result<Config, ConfigError> {
        load_from(
            &Figment::new()
                .merge(Serialized::defaults(Config::default()))
                .merge(Toml::string(s)),
        )
    }

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = from_toml("").unwrap();
        assert_eq!(cfg, Config::default());

        let fe = cfg.to_frontend_config().unwrap();
        assert_eq!(fe.url.as_str(), "http://127.0.0.1:8000/");
        assert_eq!(fe.timeout, None);
        assert_eq!(fe.tls, TlsVerification::SystemDefaults);
        assert_eq!(fe.feedback, FeedbackConfig::default());
    }

    #[test]
    fn full_file_is_translated() {
        let cfg = from_toml(
            r#"
            server = "https://faces.example:8443"
            timeout_secs = 15
            ca_cert = "/etc/facegate/ca.pem"

            [feedback]
            sign_in = "overlay"
            show_delay_ms = 50
            lifetime_ms = 5000
            overlay_limit = 0
            "#,
        )
        .unwrap();

        let fe = cfg.to_frontend_config().unwrap();
        assert_eq!(fe.url.host_str(), Some("faces.example"));
        assert_eq!(fe.timeout, Some(Duration::from_secs(15)));
        assert_eq!(
            fe.tls,
            TlsVerification::CustomCa(PathBuf::from("/etc/facegate/ca.pem"))
        );
        assert_eq!(fe.feedback.register, PresentationMode::Inline);
        assert_eq!(fe.feedback.sign_in, PresentationMode::Overlay);
        assert_eq!(fe.feedback.toasts.show_delay, Duration::from_millis(50));
        assert_eq!(fe.feedback.toasts.lifetime, Duration::from_millis(5000));
        assert_eq!(fe.feedback.toasts.limit, None);
    }

    #[test]
    fn insecure_wins_over_ca_cert() {
        let cfg = from_toml("insecure = true\nca_cert = \"/ca.pem\"").unwrap();
        assert_eq!(
            cfg.to_frontend_config().unwrap().tls,
            TlsVerification::DangerAcceptInvalid
        );
    }

    #[test]
    fn bad_values_are_rejected() {
        let bad_url = from_toml("server = \"not a url\"").unwrap();
        assert!(matches!(
            bad_url.to_frontend_config(),
            Err(ConfigError::Validation { ref field, .. }) if field == "server"
        ));

        let bad_mode = from_toml("[feedback]\nregister = \"popup\"").unwrap();
        assert!(matches!(
            bad_mode.to_frontend_config(),
            Err(ConfigError::Validation { ref field, .. }) if field == "feedback.register"
        ));

        let zero_life = from_toml("[feedback]\nlifetime_ms = 0").unwrap();
        assert!(zero_life.to_frontend_config().is_err());

        assert!(matches!(
            from_toml("timeout_secs = \"soon\""),
            Err(ConfigError::Figment(_))
        ));
    }

    #[test]
    fn terminal_intervals() {
        let cfg = from_toml("").unwrap();
        assert_eq!(
            cfg.terminal.intervals().unwrap(),
            (Duration::from_millis(100), Duration::from_millis(33))
        );

        let cfg = from_toml("[terminal]\ntick_ms = 250\nrender_ms = 16").unwrap();
        assert_eq!(
            cfg.terminal.intervals().unwrap(),
            (Duration::from_millis(250), Duration::from_millis(16))
        );

        let cfg = from_toml("[terminal]\nrender_ms = 0").unwrap();
        assert!(matches!(
            cfg.terminal.intervals(),
            Err(ConfigError::Validation { ref field, .. }) if field == "terminal.render_ms"
        ));
    }

    #[test]
    fn save_then_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = Config {
            server: "http://10.0.0.2:8000".into(),
            timeout_secs: Some(5),
            ..Config::default()
        };

        save_config_to(&cfg, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("server = \"http://10.0.0.2:8000\""));

        let loaded = load_from(
            &Figment::new()
                .merge(Serialized::defaults(Config::default()))
                .merge(Toml::file(&path)),
        )
        .unwrap();
        assert_eq!(loaded, cfg);
    }
}
