//! Sign-in page: one image and a submit control.

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

pub struct SignInScreen {
    frontend: Frontend,
    focus: ElementId,
    picker: Option<PathPrompt>,
    throbber: ThrobberState,
}

impl SignInScreen {
    pub fn new(frontend: Frontend) -> Self {
        Self {
            frontend,
            focus: ElementId::SignInFile,
            picker: None,
            throbber: ThrobberState::default(),
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            ElementId::SignInFile => ElementId::SignInButton,
            _ => ElementId::SignInFile,
        };
    }
}

impl Component for SignInScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(prompt) = self.picker.as_mut() {
            let action = match prompt.handle_key(key) {
                PromptResult::Editing => return Ok(None),
                PromptResult::Chosen(path) => Action::PickFile(ElementId::SignInFile, path),
                PromptResult::Cancelled => {
                    Action::Interact(ElementId::SignInFile, EventKind::PickerCancelled)
                }
            };
            self.picker = None;
            return Ok(Some(action));
        }

        match key.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.toggle_focus();
            }
            KeyCode::Enter if self.focus == ElementId::SignInFile => {
                self.picker = Some(PathPrompt::default());
            }
            KeyCode::Enter => {
                return Ok(Some(Action::Interact(
                    ElementId::SignInButton,
                    EventKind::Click,
                )));
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if *action == Action::Tick && self.frontend.sign_in_form().submit.is_busy() {
            self.throbber.calc_next();
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let form = self.frontend.sign_in_form();
        let layout = Layout::vertical([
            Constraint::Length(2), // Title
            Constraint::Length(4), // Image
            Constraint::Length(1), // Sign in
            Constraint::Length(1),
            Constraint::Length(3), // Message box
            Constraint::Min(0),
            Constraint::Length(1), // Hints
        ])
        .split(area);

        frame.render_widget(
            Paragraph::new(Span::styled("  Sign in with your face", theme::title_style())),
            layout[0],
        );

        if let Some(prompt) = &self.picker {
            render_input_field(frame, layout[1], "  Image path", prompt.buffer(), true);
        } else {
            let shown = form
                .file
                .selected_name()
                .unwrap_or_else(|| "(Enter to choose an image)".into());
            render_input_field(
                frame,
                layout[1],
                "  Image",
                &shown,
                self.focus == ElementId::SignInFile,
            );
        }

        render_button(
            frame,
            layout[2],
            &form.submit.snapshot(),
            self.focus == ElementId::SignInButton,
            &self.throbber,
        );

        render_message_box(frame, layout[4], &self.frontend.message_box().message());

        let hints: &[(&str, &str)] = if self.picker.is_some() {
            &[("Enter", "choose"), ("Esc", "cancel")]
        } else {
            &[("Tab", "next field"), ("Enter", "select"), ("q", "quit")]
        };
        render_key_hints(frame, layout[6], hints);
    }

    fn captures_input(&self) -> bool {
        self.picker.is_some()
    }

    fn id(&self) -> &str {
        "sign-in"
    }
}
