//! Landing page.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use facegate_core::Frontend;

use super::render_key_hints;
use crate::component::Component;
use crate::theme;

pub struct HomeScreen {
    frontend: Frontend,
}

impl HomeScreen {
    pub fn new(frontend: Frontend) -> Self {
        Self { frontend }
    }
}

impl Component for HomeScreen {
    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

        frame.render_widget(
            Paragraph::new(Span::styled("  Face Login", theme::title_style())),
            layout[0],
        );

        let backend = self.frontend.controller().client().base_url().to_string();
        let body = vec![
            Line::from(Span::styled(
                "  Register a face once, then sign in with a photo.",
                theme::tab_inactive(),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("  2 ", theme::key_hint_key()),
                Span::styled("Register", theme::tab_inactive()),
            ]),
            Line::from(vec![
                Span::styled("  3 ", theme::key_hint_key()),
                Span::styled("Sign In", theme::tab_inactive()),
            ]),
            Line::from(""),
            Line::from(Span::styled(format!("  Backend: {backend}"), theme::key_hint())),
        ];
        frame.render_widget(Paragraph::new(body), layout[1]);

        render_key_hints(frame, layout[2], &[("1-3", "pages"), ("?", "help"), ("q", "quit")]);
    }

    fn id(&self) -> &str {
        "home"
    }
}
