//! Event binding: which handler runs for which element and interaction.
//!
//! Registration is kept apart from the handlers themselves; a [`Handler`]
//! is only an identity, resolved to behaviour by `Frontend::dispatch`.

use std::collections::HashMap;

use strum::Display;

use crate::element::ElementId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum EventKind {
    Click,
    Submit,
    /// Focus left the element.
    Blur,
    /// The picker closed with a file chosen.
    PickerChanged,
    /// The picker closed without a choice.
    PickerCancelled,
}

impl EventKind {
    /// Interactions that a disabled control swallows.
    pub fn is_activation(self) -> bool {
        matches!(self, Self::Click | Self::Submit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Handler {
    SubmitRegister,
    SubmitSignIn,
    ValidateName,
    ValidateFile,
    ValidateSignInFile,
    RedirectToSignIn,
}

/// An interaction delivered to a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormEvent {
    pub target: ElementId,
    pub kind: EventKind,
    default_prevented: bool,
}

impl FormEvent {
    pub fn new(target: ElementId, kind: EventKind) -> Self {
        Self {
            target,
            kind,
            default_prevented: false,
        }
    }

    /// Stop the element's built-in action (form submission, link follow).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Handler registrations keyed by element and interaction. At most one
/// handler per pair; binding again replaces the previous one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    handlers: HashMap<(ElementId, EventKind), Handler>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// The page wiring the backend's templates ship with.
    ///
    /// The image pickers validate on cancel only, so choosing a file never
    /// clears an earlier "Please upload an image." warning; the submission
    /// check covers that case.
    pub fn defaults() -> Self {
        let mut b = Self::new();
        b.bind(ElementId::Name, EventKind::Blur, Handler::ValidateName);
        b.bind(ElementId::File, EventKind::PickerCancelled, Handler::ValidateFile);
        b.bind(
            ElementId::SignInFile,
            EventKind::PickerCancelled,
            Handler::ValidateSignInFile,
        );
        b.bind(ElementId::RegisterButton, EventKind::Click, Handler::SubmitRegister);
        b.bind(ElementId::SignInButton, EventKind::Click, Handler::SubmitSignIn);
        b.bind(
            ElementId::GoToSignInButton,
            EventKind::Click,
            Handler::RedirectToSignIn,
        );
        b
    }

    /// Register `handler`, returning the one it replaced.
    pub fn bind(&mut self, element: ElementId, kind: EventKind, handler: Handler) -> Option<Handler> {
        self.handlers.insert((element, kind), handler)
    }

    pub fn unbind(&mut self, element: ElementId, kind: EventKind) -> Option<Handler> {
        self.handlers.remove(&(element, kind))
    }

    pub fn handler_for(&self, element: ElementId, kind: EventKind) -> Option<Handler> {
        self.handlers.get(&(element, kind)).copied()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate_pickers_on_cancel_only() {
        let b = Bindings::defaults();
        assert_eq!(
            b.handler_for(ElementId::File, EventKind::PickerCancelled),
            Some(Handler::ValidateFile)
        );
        assert_eq!(b.handler_for(ElementId::File, EventKind::PickerChanged), None);
        assert_eq!(
            b.handler_for(ElementId::SignInFile, EventKind::PickerChanged),
            None
        );
    }

    #[test]
    fn defaults_cover_buttons() {
        let b = Bindings::defaults();
        assert_eq!(b.len(), 6);
        assert_eq!(
            b.handler_for(ElementId::GoToSignInButton, EventKind::Click),
            Some(Handler::RedirectToSignIn)
        );
        assert_eq!(
            b.handler_for(ElementId::RegisterButton, EventKind::Click),
            Some(Handler::SubmitRegister)
        );
    }

    #[test]
    fn rebinding_replaces() {
        let mut b = Bindings::new();
        assert_eq!(b.bind(ElementId::Name, EventKind::Blur, Handler::ValidateName), None);
        assert_eq!(
            b.bind(ElementId::Name, EventKind::Blur, Handler::ValidateFile),
            Some(Handler::ValidateName)
        );
        assert_eq!(b.unbind(ElementId::Name, EventKind::Blur), Some(Handler::ValidateFile));
        assert!(b.is_empty());
    }

    #[test]
    fn activation_kinds() {
        assert!(EventKind::Click.is_activation());
        assert!(EventKind::Submit.is_activation());
        assert!(!EventKind::Blur.is_activation());
        assert_eq!(EventKind::PickerCancelled.to_string(), "picker-cancelled");
    }
}
