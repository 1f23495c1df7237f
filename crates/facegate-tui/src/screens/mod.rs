//! Page screens and the widgets they share.

mod home;
mod register;
mod sign_in;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use throbber_widgets_tui::{Throbber, ThrobberState};

use facegate_core::{ButtonState, FeedbackMessage, Frontend};

use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme;

pub use home::HomeScreen;
pub use register::RegisterScreen;
pub use sign_in::SignInScreen;

/// One component per page, all sharing the same frontend.
pub fn create_screens(frontend: &Frontend) -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (ScreenId::Home, Box::new(HomeScreen::new(frontend.clone()))),
        (
            ScreenId::Register,
            Box::new(RegisterScreen::new(frontend.clone())),
        ),
        (ScreenId::SignIn, Box::new(SignInScreen::new(frontend.clone()))),
    ]
}

// ── Path prompt ─────────────────────────────────────────────────────

/// Stand-in for a native file picker: a one-line path prompt.
#[derive(Debug, Default)]
pub(crate) struct PathPrompt {
    buffer: String,
}

/// How a prompt keystroke left the picker.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum PromptResult {
    Editing,
    Chosen(String),
    Cancelled,
}

impl PathPrompt {
    pub fn handle_key(&mut self, key: KeyEvent) -> PromptResult {
        match key.code {
            KeyCode::Char(c) => {
                self.buffer.push(c);
                PromptResult::Editing
            }
            KeyCode::Backspace => {
                self.buffer.pop();
                PromptResult::Editing
            }
            // Confirming an empty prompt is the same as closing the dialog.
            KeyCode::Enter if self.buffer.trim().is_empty() => PromptResult::Cancelled,
            KeyCode::Enter => PromptResult::Chosen(self.buffer.trim().to_owned()),
            KeyCode::Esc => PromptResult::Cancelled,
            _ => PromptResult::Editing,
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }
}

// ── Shared widgets ──────────────────────────────────────────────────

/// Label line plus a rounded input box; a block cursor marks focus.
pub(crate) fn render_input_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    active: bool,
) {
    if area.height < 3 {
        return;
    }

    let label_area = Rect::new(area.x, area.y, area.width, 1);
    let label_style = if active {
        Style::default().fg(theme::NEON_CYAN)
    } else {
        Style::default().fg(theme::DIM_WHITE)
    };
    frame.render_widget(
        Paragraph::new(Span::styled(label, label_style)),
        label_area,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if active {
            theme::border_focused()
        } else {
            theme::border_default()
        });

    let block_area = Rect::new(area.x, area.y + 1, area.width, 3.min(area.height - 1));
    let inner = block.inner(block_area);
    frame.render_widget(block, block_area);

    let text = if active {
        format!("{value}\u{2588}")
    } else {
        value.to_string()
    };
    frame.render_widget(
        Paragraph::new(Span::styled(text, Style::default().fg(theme::NEON_CYAN))),
        inner,
    );
}

/// A clickable control. Hidden controls draw nothing; a busy control
/// draws its working label next to a spinner.
pub(crate) fn render_button(
    frame: &mut Frame,
    area: Rect,
    state: &ButtonState,
    focused: bool,
    throbber: &ThrobberState,
) {
    if !state.visible {
        return;
    }

    if state.busy {
        let spinner = Throbber::default()
            .label(state.label.clone())
            .style(theme::button_disabled())
            .throbber_style(Style::default().fg(theme::ELECTRIC_PURPLE));
        frame.render_stateful_widget(spinner, area, &mut throbber.clone());
        return;
    }

    let style = if state.enabled {
        theme::button(focused)
    } else {
        theme::button_disabled()
    };
    frame.render_widget(
        Paragraph::new(Span::styled(format!("[ {} ]", state.label), style)),
        area,
    );
}

/// The inline `message-box` region. Empty messages leave it blank.
pub(crate) fn render_message_box(frame: &mut Frame, area: Rect, message: &FeedbackMessage) {
    if message.text.is_empty() {
        return;
    }

    let color = theme::severity_color(message.severity);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", theme::severity_icon(message.severity)),
            Style::default().fg(color),
        ),
        Span::styled(
            message.text.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}

pub(crate) fn render_key_hints(frame: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, what)| {
            [
                Span::styled(format!(" {key} "), theme::key_hint_key()),
                Span::styled(format!("{what} "), theme::key_hint()),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
