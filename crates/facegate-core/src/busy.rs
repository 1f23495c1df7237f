//! Busy-state toggling for submit controls.

use tracing::debug;

use crate::element::Button;

/// Label shown while a control is busy. Renderers draw the spinner next to it.
pub const WORKING_LABEL: &str = "Loading";

/// Mark `button` busy or idle.
///
/// Going busy records the current label, disables the control and swaps in
/// [`WORKING_LABEL`] with the spinner marker. A control that is already busy
/// keeps the label it recorded first. Going idle re-enables the
/// control and restores the recorded label. If nothing was recorded the
/// label is left as it is; the control is still re-enabled.
pub fn set_busy(button: &Button, busy: bool) {
    button.modify(|state| {
        if busy {
            // Already busy: the recorded label is still the one to restore.
            if !state.busy {
                state.original_label = Some(std::mem::replace(
                    &mut state.label,
                    WORKING_LABEL.to_owned(),
                ));
            }
            state.enabled = false;
            state.busy = true;
        } else {
            if let Some(label) = state.original_label.take() {
                state.label = label;
            }
            state.enabled = true;
            state.busy = false;
        }
    });
    debug!(control = %button.id(), busy, "busy state changed");
}

/// Holds a control busy until dropped.
///
/// Dropping restores the control on every exit path, including early
/// returns and a cancelled future.
#[must_use = "the control is released as soon as the guard is dropped"]
pub struct BusyGuard<'a> {
    button: &'a Button,
}

impl<'a> BusyGuard<'a> {
    pub fn acquire(button: &'a Button) -> Self {
        set_busy(button, true);
        Self { button }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        set_busy(self.button, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementId;

    #[test]
    fn busy_disables_and_shows_working_label() {
        let button = Button::new(ElementId::RegisterButton, "Register");
        set_busy(&button, true);

        let state = button.snapshot();
        assert_eq!(state.label, WORKING_LABEL);
        assert!(!state.enabled);
        assert!(state.busy);
    }

    #[test]
    fn idle_restores_label_captured_at_last_busy() {
        let button = Button::new(ElementId::SignInButton, "Sign In");
        set_busy(&button, true);
        set_busy(&button, false);
        assert_eq!(button.label(), "Sign In");

        button.set_label("Try again");
        set_busy(&button, true);
        set_busy(&button, false);

        let state = button.snapshot();
        assert_eq!(state.label, "Try again");
        assert!(state.enabled);
        assert!(!state.busy);
        assert_eq!(state.original_label, None);
    }

    #[test]
    fn idle_without_record_only_reenables() {
        let button = Button::new(ElementId::SignInButton, "Sign In");
        button.modify(|s| s.enabled = false);

        set_busy(&button, false);

        assert_eq!(button.label(), "Sign In");
        assert!(button.is_enabled());
    }

    #[test]
    fn repeated_busy_keeps_first_label() {
        let button = Button::new(ElementId::RegisterButton, "Register");
        let first = BusyGuard::acquire(&button);
        let second = BusyGuard::acquire(&button);
        assert_eq!(button.label(), WORKING_LABEL);

        drop(second);
        drop(first);

        let state = button.snapshot();
        assert_eq!(state.label, "Register");
        assert!(state.enabled);
        assert!(!state.busy);
    }

    #[test]
    fn guard_releases_on_drop() {
        let button = Button::new(ElementId::RegisterButton, "Register");
        {
            let _guard = BusyGuard::acquire(&button);
            assert!(button.is_busy());
        }
        assert!(!button.is_busy());
        assert_eq!(button.label(), "Register");
    }
}
