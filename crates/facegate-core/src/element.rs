//! Observable element model.
//!
//! Every interactive element the flows touch is a cheap, cloneable handle
//! around a `watch` channel. Handlers mutate through the handle; a renderer
//! (or a test) reads the current value with `snapshot()` or waits for
//! changes through `subscribe()`. Nothing here knows how it is drawn.

use std::fmt;
use std::sync::Arc;

use facegate_api::ImageUpload;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use tokio::sync::watch;

use crate::error::CoreError;

// ── ElementId ────────────────────────────────────────────────────────

/// Named elements, with their document ids.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr,
)]
pub enum ElementId {
    /// Register page: name text input.
    #[strum(serialize = "name")]
    Name,
    /// Register page: image picker.
    #[strum(serialize = "file")]
    File,
    /// Sign-in page: image picker.
    #[strum(serialize = "signin-file")]
    SignInFile,
    /// Register page: submit control.
    #[strum(serialize = "register-btn")]
    RegisterButton,
    /// Register page: hidden until a registration succeeds, then leads to
    /// the sign-in page.
    #[strum(serialize = "sign-in-btn")]
    GoToSignInButton,
    /// Sign-in page: submit control.
    #[strum(serialize = "signin-btn")]
    SignInButton,
    /// Inline status region shared by both pages.
    #[strum(serialize = "message-box")]
    MessageBox,
}

impl ElementId {
    /// The document id of this element.
    pub fn dom_id(self) -> &'static str {
        self.into()
    }

    /// Whether this element is a clickable control.
    pub fn is_button(self) -> bool {
        matches!(
            self,
            Self::RegisterButton | Self::GoToSignInButton | Self::SignInButton
        )
    }
}

// ── Shared ───────────────────────────────────────────────────────────

/// A shared, observable value. Clones point at the same state.
pub struct Shared<T> {
    tx: Arc<watch::Sender<T>>,
}

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        let (tx, _) = watch::channel(value);
        Self { tx: Arc::new(tx) }
    }

    /// Mutate in place and notify subscribers.
    pub fn modify(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_modify(f);
    }

    /// Replace the value and notify subscribers.
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Read the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.tx.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T: Clone> Shared<T> {
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Shared").field(&*self.tx.borrow()).finish()
    }
}

// ── Button ───────────────────────────────────────────────────────────

/// Visible state of a clickable control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonState {
    pub label: String,
    pub enabled: bool,
    pub visible: bool,
    /// Draw the spinner marker next to the label.
    pub busy: bool,
    /// Label captured when the control last went busy.
    pub(crate) original_label: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Button {
    id: ElementId,
    state: Shared<ButtonState>,
}

impl Button {
    pub fn new(id: ElementId, label: impl Into<String>) -> Self {
        Self {
            id,
            state: Shared::new(ButtonState {
                label: label.into(),
                enabled: true,
                visible: true,
                busy: false,
                original_label: None,
            }),
        }
    }

    /// A control that starts out hidden.
    pub fn hidden(id: ElementId, label: impl Into<String>) -> Self {
        let button = Self::new(id, label);
        button.set_visible(false);
        button
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn snapshot(&self) -> ButtonState {
        self.state.get()
    }

    pub fn label(&self) -> String {
        self.state.with(|s| s.label.clone())
    }

    pub fn is_enabled(&self) -> bool {
        self.state.with(|s| s.enabled)
    }

    pub fn is_visible(&self) -> bool {
        self.state.with(|s| s.visible)
    }

    pub fn is_busy(&self) -> bool {
        self.state.with(|s| s.busy)
    }

    /// Whether a click on this control should be delivered at all.
    pub fn accepts_input(&self) -> bool {
        self.state.with(|s| s.enabled && s.visible)
    }

    pub fn set_label(&self, label: impl Into<String>) {
        let label = label.into();
        self.state.modify(|s| s.label = label);
    }

    pub fn set_visible(&self, visible: bool) {
        self.state.modify(|s| s.visible = visible);
    }

    pub fn subscribe(&self) -> watch::Receiver<ButtonState> {
        self.state.subscribe()
    }

    pub(crate) fn modify(&self, f: impl FnOnce(&mut ButtonState)) {
        self.state.modify(f);
    }
}

// ── TextInput ────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct TextInput {
    id: ElementId,
    value: Shared<String>,
}

impl TextInput {
    pub fn new(id: ElementId) -> Self {
        Self {
            id,
            value: Shared::new(String::new()),
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn value(&self) -> String {
        self.value.get()
    }

    /// Whether the field holds nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.value.with(|v| v.trim().is_empty())
    }

    pub fn set_value(&self, value: impl Into<String>) {
        self.value.set(value.into());
    }

    pub fn push(&self, c: char) {
        self.value.modify(|v| v.push(c));
    }

    pub fn pop(&self) {
        self.value.modify(|v| {
            v.pop();
        });
    }

    pub fn clear(&self) {
        self.value.set(String::new());
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.value.subscribe()
    }
}

// ── FileInput ────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct FileInput {
    id: ElementId,
    selection: Shared<Option<ImageUpload>>,
}

impl FileInput {
    pub fn new(id: ElementId) -> Self {
        Self {
            id,
            selection: Shared::new(None),
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// The currently selected image, cloned as a submission snapshot.
    pub fn selection(&self) -> Option<ImageUpload> {
        self.selection.get()
    }

    /// File name of the current selection, for display.
    pub fn selected_name(&self) -> Option<String> {
        self.selection
            .with(|s| s.as_ref().map(|u| u.file_name().to_owned()))
    }

    pub fn has_selection(&self) -> bool {
        self.selection.with(Option::is_some)
    }

    pub fn select(&self, upload: ImageUpload) {
        self.selection.set(Some(upload));
    }

    /// Read an image from disk and select it. On failure the previous
    /// selection is left untouched.
    pub async fn select_path(&self, path: &str) -> Result<(), CoreError> {
        let upload = ImageUpload::from_path(path).await?;
        self.select(upload);
        Ok(())
    }

    pub fn clear(&self) {
        self.selection.set(None);
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<ImageUpload>> {
        self.selection.subscribe()
    }
}
