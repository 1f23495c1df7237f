//! User-facing feedback.
//!
//! One [`FeedbackReporter`] type with two presentations: an inline status
//! region that each report overwrites, or an overlay of toasts that stack
//! and expire on their own timers.

use tokio::time::{Instant, sleep_until};
use tracing::{trace, warn};
use uuid::Uuid;

use crate::config::{PresentationMode, ToastTimings};
use crate::element::Shared;

// ── Messages ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    /// No severity; paired with empty text it clears the status region.
    #[default]
    Neutral,
}

impl Severity {
    /// Style class suffix for web markup (`message success`, `message error`).
    pub fn class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Neutral => "",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackMessage {
    pub text: String,
    pub severity: Severity,
}

impl FeedbackMessage {
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Success)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Error)
    }

    /// Empty text with no severity.
    pub fn is_clear(&self) -> bool {
        self.text.is_empty() && self.severity == Severity::Neutral
    }
}

// ── Inline surface ───────────────────────────────────────────────────

/// The `message-box` status region. Holds at most one message.
#[derive(Debug, Clone)]
pub struct StatusRegion {
    message: Shared<FeedbackMessage>,
}

impl StatusRegion {
    pub fn new() -> Self {
        Self {
            message: Shared::new(FeedbackMessage::default()),
        }
    }

    pub fn message(&self) -> FeedbackMessage {
        self.message.get()
    }

    pub fn is_empty(&self) -> bool {
        self.message.with(|m| m.text.is_empty())
    }

    fn show(&self, message: FeedbackMessage) {
        self.message.set(message);
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<FeedbackMessage> {
        self.message.subscribe()
    }
}

impl Default for StatusRegion {
    fn default() -> Self {
        Self::new()
    }
}

// ── Overlay surface ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    /// Just appended; not yet visible.
    Entering,
    /// Fully shown.
    Shown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: Uuid,
    pub message: FeedbackMessage,
    pub phase: ToastPhase,
}

/// Container for overlay toasts, oldest first.
#[derive(Debug, Clone)]
pub struct ToastLayer {
    toasts: Shared<Vec<Toast>>,
}

impl ToastLayer {
    pub fn new() -> Self {
        Self {
            toasts: Shared::new(Vec::new()),
        }
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.get()
    }

    pub fn len(&self) -> usize {
        self.toasts.with(Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.with(Vec::is_empty)
    }

    pub fn phase_of(&self, id: Uuid) -> Option<ToastPhase> {
        self.toasts
            .with(|t| t.iter().find(|toast| toast.id == id).map(|toast| toast.phase))
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<Vec<Toast>> {
        self.toasts.subscribe()
    }

    /// Append a toast, evicting the oldest ones above `limit`.
    fn push(&self, toast: Toast, limit: Option<usize>) {
        self.toasts.modify(|toasts| {
            toasts.push(toast);
            if let Some(limit) = limit {
                let excess = toasts.len().saturating_sub(limit.max(1));
                toasts.drain(..excess);
            }
        });
    }

    fn mark_shown(&self, id: Uuid) {
        self.toasts.modify(|toasts| {
            if let Some(toast) = toasts.iter_mut().find(|t| t.id == id) {
                toast.phase = ToastPhase::Shown;
            }
        });
    }

    fn remove(&self, id: Uuid) {
        self.toasts.modify(|toasts| toasts.retain(|t| t.id != id));
    }
}

impl Default for ToastLayer {
    fn default() -> Self {
        Self::new()
    }
}

// ── Reporter ─────────────────────────────────────────────────────────

/// Where a reporter sends its messages.
#[derive(Debug, Clone)]
pub enum Presentation {
    Inline(StatusRegion),
    Overlay {
        layer: ToastLayer,
        timings: ToastTimings,
    },
}

#[derive(Debug, Clone)]
pub struct FeedbackReporter {
    presentation: Presentation,
}

impl FeedbackReporter {
    pub fn inline(region: StatusRegion) -> Self {
        Self {
            presentation: Presentation::Inline(region),
        }
    }

    pub fn overlay(layer: ToastLayer, timings: ToastTimings) -> Self {
        Self {
            presentation: Presentation::Overlay { layer, timings },
        }
    }

    /// Pick a presentation by mode over the shared surfaces.
    pub fn for_mode(
        mode: PresentationMode,
        region: &StatusRegion,
        layer: &ToastLayer,
        timings: ToastTimings,
    ) -> Self {
        match mode {
            PresentationMode::Inline => Self::inline(region.clone()),
            PresentationMode::Overlay => Self::overlay(layer.clone(), timings),
        }
    }

    pub fn mode(&self) -> PresentationMode {
        match self.presentation {
            Presentation::Inline(_) => PresentationMode::Inline,
            Presentation::Overlay { .. } => PresentationMode::Overlay,
        }
    }

    /// Show `text` to the user. Never fails.
    pub fn report(&self, text: &str, severity: Severity) {
        self.report_message(FeedbackMessage::new(text, severity));
    }

    pub fn report_message(&self, message: FeedbackMessage) {
        trace!(text = %message.text, severity = ?message.severity, "feedback");
        match &self.presentation {
            Presentation::Inline(region) => region.show(message),
            Presentation::Overlay { layer, timings } => {
                // Toasts have nothing standing to clear.
                if message.is_clear() {
                    return;
                }
                spawn_toast(layer, *timings, message);
            }
        }
    }

    /// Clear any standing inline message.
    pub fn clear(&self) {
        self.report("", Severity::Neutral);
    }
}

/// Append a toast and start its show/remove timer pair.
fn spawn_toast(layer: &ToastLayer, timings: ToastTimings, message: FeedbackMessage) -> Uuid {
    let id = Uuid::new_v4();
    layer.push(
        Toast {
            id,
            message,
            phase: ToastPhase::Entering,
        },
        timings.limit,
    );

    let Ok(handle) = tokio::runtime::Handle::try_current() else {
        warn!("no async runtime; toast shown without expiry");
        layer.mark_shown(id);
        return id;
    };

    let layer = layer.clone();
    let created = Instant::now();
    handle.spawn(async move {
        if timings.show_delay < timings.lifetime {
            sleep_until(created + timings.show_delay).await;
            layer.mark_shown(id);
        }
        sleep_until(created + timings.lifetime).await;
        layer.remove(id);
        trace!(%id, "toast expired");
    });

    id
}
