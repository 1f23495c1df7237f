//! Register page: name, image, submit, and the follow-up sign-in control.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::Span,
    widgets::Paragraph,
};
use throbber_widgets_tui::ThrobberState;

use facegate_core::{ElementId, EventKind, Frontend};

use super::{
    PathPrompt, PromptResult, render_button, render_input_field, render_key_hints,
    render_message_box,
};
use crate::action::Action;
use crate::component::Component;
use crate::theme;

const FOCUS_ORDER: [ElementId; 4] = [
    ElementId::Name,
    ElementId::File,
    ElementId::RegisterButton,
    ElementId::GoToSignInButton,
];

pub struct RegisterScreen {
    frontend: Frontend,
    focus: ElementId,
    picker: Option<PathPrompt>,
    throbber: ThrobberState,
}

impl RegisterScreen {
    pub fn new(frontend: Frontend) -> Self {
        Self {
            frontend,
            focus: ElementId::Name,
            picker: None,
            throbber: ThrobberState::default(),
        }
    }

    /// Whether `id` can take focus: inputs always, controls while shown.
    fn focusable(&self, id: ElementId) -> bool {
        self.frontend.button(id).is_none_or(facegate_core::Button::is_visible)
    }

    /// Move focus to the next (or previous) focusable element. Leaving the
    /// name field blurs it.
    fn move_focus(&mut self, forward: bool) -> Option<Action> {
        let from = self.focus;
        let len = FOCUS_ORDER.len();
        let mut idx = FOCUS_ORDER.iter().position(|&id| id == from).unwrap_or(0);
        for _ in 0..len {
            idx = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
            if self.focusable(FOCUS_ORDER[idx]) {
                break;
            }
        }
        self.focus = FOCUS_ORDER[idx];
        blur_if_left(from, self.focus)
    }

    fn handle_picker_key(&mut self, key: KeyEvent) -> Option<Action> {
        let prompt = self.picker.as_mut()?;
        match prompt.handle_key(key) {
            PromptResult::Editing => None,
            PromptResult::Chosen(path) => {
                self.picker = None;
                Some(Action::PickFile(ElementId::File, path))
            }
            PromptResult::Cancelled => {
                self.picker = None;
                Some(Action::Interact(ElementId::File, EventKind::PickerCancelled))
            }
        }
    }
}

fn blur_if_left(from: ElementId, to: ElementId) -> Option<Action> {
    (from == ElementId::Name && to != ElementId::Name)
        .then_some(Action::Interact(ElementId::Name, EventKind::Blur))
}

impl Component for RegisterScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.picker.is_some() {
            return Ok(self.handle_picker_key(key));
        }

        let action = match key.code {
            KeyCode::Tab | KeyCode::Down => self.move_focus(true),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(false),
            KeyCode::Char(c) if self.focus == ElementId::Name => {
                self.frontend.register_form().name.push(c);
                None
            }
            KeyCode::Backspace if self.focus == ElementId::Name => {
                self.frontend.register_form().name.pop();
                None
            }
            KeyCode::Enter => match self.focus {
                ElementId::Name => self.move_focus(true),
                ElementId::File => {
                    self.picker = Some(PathPrompt::default());
                    None
                }
                id => Some(Action::Interact(id, EventKind::Click)),
            },
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if *action == Action::Tick {
            // A successful registration hides the focused submit control.
            if !self.focusable(self.focus) {
                self.move_focus(true);
            }
            if self.frontend.register_form().submit.is_busy() {
                self.throbber.calc_next();
            }
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let form = self.frontend.register_form();
        let layout = Layout::vertical([
            Constraint::Length(2), // Title
            Constraint::Length(4), // Name
            Constraint::Length(4), // Image
            Constraint::Length(1), // Register
            Constraint::Length(1), // Go to sign in
            Constraint::Length(1),
            Constraint::Length(3), // Message box
            Constraint::Min(0),
            Constraint::Length(1), // Hints
        ])
        .split(area);

        frame.render_widget(
            Paragraph::new(Span::styled("  Register your face", theme::title_style())),
            layout[0],
        );

        render_input_field(
            frame,
            layout[1],
            "  Name",
            &form.name.value(),
            self.focus == ElementId::Name && self.picker.is_none(),
        );

        match &self.picker {
            Some(prompt) => {
                render_input_field(frame, layout[2], "  Image path", prompt.buffer(), true);
            }
            None => {
                let shown = form
                    .file
                    .selected_name()
                    .unwrap_or_else(|| "(Enter to choose an image)".into());
                render_input_field(
                    frame,
                    layout[2],
                    "  Image",
                    &shown,
                    self.focus == ElementId::File,
                );
            }
        }

        render_button(
            frame,
            layout[3],
            &form.submit.snapshot(),
            self.focus == ElementId::RegisterButton,
            &self.throbber,
        );
        render_button(
            frame,
            layout[4],
            &form.go_to_sign_in.snapshot(),
            self.focus == ElementId::GoToSignInButton,
            &self.throbber,
        );

        render_message_box(frame, layout[6], &self.frontend.message_box().message());

        let hints: &[(&str, &str)] = if self.picker.is_some() {
            &[("Enter", "choose"), ("Esc", "cancel")]
        } else {
            &[("Tab", "next field"), ("Enter", "select"), ("Ctrl+C", "quit")]
        };
        render_key_hints(frame, layout[8], hints);
    }

    fn captures_input(&self) -> bool {
        self.picker.is_some() || self.focus == ElementId::Name
    }

    fn id(&self) -> &str {
        "register"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    use facegate_core::FrontendConfig;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn screen() -> RegisterScreen {
        RegisterScreen::new(Frontend::new(FrontendConfig::default()).unwrap())
    }

    #[test]
    fn typing_fills_name_and_tab_blurs_it() {
        let mut s = screen();
        s.handle_key_event(key(KeyCode::Char('A'))).unwrap();
        s.handle_key_event(key(KeyCode::Char('l'))).unwrap();
        assert_eq!(s.frontend.register_form().name.value(), "Al");
        assert!(s.captures_input());

        let action = s.handle_key_event(key(KeyCode::Tab)).unwrap();
        assert_eq!(
            action,
            Some(Action::Interact(ElementId::Name, EventKind::Blur))
        );
        assert_eq!(s.focus, ElementId::File);
        assert!(!s.captures_input());
    }

    #[test]
    fn picker_escape_is_a_cancel() {
        let mut s = screen();
        s.focus = ElementId::File;
        s.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert!(s.captures_input());

        let action = s.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert_eq!(
            action,
            Some(Action::Interact(ElementId::File, EventKind::PickerCancelled))
        );
        assert!(s.picker.is_none());
    }

    #[test]
    fn picker_enter_picks_the_path() {
        let mut s = screen();
        s.focus = ElementId::File;
        s.handle_key_event(key(KeyCode::Enter)).unwrap();
        for c in "face.png".chars() {
            s.handle_key_event(key(KeyCode::Char(c))).unwrap();
        }
        let action = s.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(
            action,
            Some(Action::PickFile(ElementId::File, "face.png".into()))
        );
    }

    #[test]
    fn hidden_control_is_skipped() {
        let mut s = screen();
        s.focus = ElementId::RegisterButton;
        assert_eq!(
            s.handle_key_event(key(KeyCode::Enter)).unwrap(),
            Some(Action::Interact(ElementId::RegisterButton, EventKind::Click))
        );

        // The go-to-sign-in control starts hidden, so focus wraps to the name.
        s.handle_key_event(key(KeyCode::Tab)).unwrap();
        assert_eq!(s.focus, ElementId::Name);
    }
}
