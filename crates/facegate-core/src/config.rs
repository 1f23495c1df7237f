// ── Runtime frontend configuration ──
//
// These types describe *how* the frontend talks to the backend and presents
// feedback. They never touch disk: facegate-config builds a `FrontendConfig`
// from TOML/env and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

/// Backend assumed when nothing else is configured.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

/// Delay between a toast being created and it switching to its shown state.
pub const DEFAULT_SHOW_DELAY: Duration = Duration::from_millis(100);

/// Total time a toast stays on screen, measured from creation.
pub const DEFAULT_LIFETIME: Duration = Duration::from_millis(3000);

/// Maximum number of toasts on screen at once; the oldest is evicted first.
pub const DEFAULT_OVERLAY_LIMIT: usize = 5;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed development backends).
    DangerAcceptInvalid,
}

/// How a page shows feedback to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PresentationMode {
    /// A single persistent status region, overwritten on every report.
    #[default]
    Inline,
    /// Stacking, auto-dismissing toasts.
    Overlay,
}

/// Toast lifecycle timings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastTimings {
    pub show_delay: Duration,
    pub lifetime: Duration,
    /// `None` means no cap.
    pub limit: Option<usize>,
}

impl Default for ToastTimings {
    fn default() -> Self {
        Self {
            show_delay: DEFAULT_SHOW_DELAY,
            lifetime: DEFAULT_LIFETIME,
            limit: Some(DEFAULT_OVERLAY_LIMIT),
        }
    }
}

/// Feedback presentation, chosen per page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedbackConfig {
    pub register: PresentationMode,
    pub sign_in: PresentationMode,
    pub toasts: ToastTimings,
}

/// Configuration for a single frontend instance.
#[derive(Debug, Clone)]
pub struct FrontendConfig {
    /// Backend root URL (e.g., `http://127.0.0.1:8000`).
    pub url: Url,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout. `None` lets a request run until the connection
    /// completes or fails.
    pub timeout: Option<Duration>,
    pub feedback: FeedbackConfig,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SERVER_URL
                .parse()
                .expect("default server URL is valid"),
            tls: TlsVerification::default(),
            timeout: None,
            feedback: FeedbackConfig::default(),
        }
    }
}

impl FrontendConfig {
    /// Default configuration pointed at another backend.
    pub fn with_url(url: Url) -> Self {
        Self {
            url,
            ..Self::default()
        }
    }
}
