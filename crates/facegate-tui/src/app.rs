//! Application core: event loop, page management, action dispatch.

use std::collections::HashMap;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use facegate_core::{
    Dispatch, ElementId, EventKind, Frontend, Severity, Toast, ToastPhase, nav_links,
};

use crate::action::Action;
use crate::component::Component;
use crate::event::{Event, EventReader, Pacing};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

/// Top-level application state and event loop.
pub struct App {
    frontend: Frontend,
    active_screen: ScreenId,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    pacing: Pacing,
    running: bool,
    help_visible: bool,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(frontend: Frontend, pacing: Pacing) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let screens = create_screens(&frontend).into_iter().collect();
        let active_screen = ScreenId::from(frontend.navigator().current());

        Self {
            frontend,
            active_screen,
            screens,
            pacing,
            running: true,
            help_visible: false,
            action_tx,
            action_rx,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        let mut events = EventReader::new(self.pacing);

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize | Event::Render => self.action_tx.send(Action::Render)?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Global keys first, unless the active page is taking text; then the
    /// active page.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        let capturing = self
            .screens
            .get(&self.active_screen)
            .is_some_and(|s| s.captures_input());

        if !capturing && key.modifiers == KeyModifiers::NONE {
            match key.code {
                KeyCode::Char('q') => return Ok(Some(Action::Quit)),
                KeyCode::Char('?') => return Ok(Some(Action::ToggleHelp)),
                KeyCode::Char(c @ '1'..='3') => {
                    let n = u8::try_from(u32::from(c) - u32::from('0')).unwrap_or(0);
                    if let Some(screen) = ScreenId::from_number(n) {
                        return Ok(Some(Action::SwitchScreen(screen)));
                    }
                }
                _ => {}
            }
        }

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }
        Ok(None)
    }

    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::SwitchScreen(target) => {
                self.frontend.navigator().navigate(target.location());
                self.sync_screen();
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            Action::Interact(element, kind) => self.spawn_dispatch(*element, *kind),

            Action::PickFile(element, path) => self.spawn_pick(*element, path.clone()),

            Action::Dispatched(element, result) => {
                debug!(%element, ?result, "dispatch finished");
                if let Dispatch::Navigated(_) = result {
                    self.sync_screen();
                }
            }

            Action::Render => {}

            Action::Tick => {
                // Navigation can also happen inside a handler.
                self.sync_screen();
                self.forward(action)?;
            }
        }

        Ok(())
    }

    fn forward(&mut self, action: &Action) -> Result<()> {
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    /// Show whichever page the navigator points at.
    fn sync_screen(&mut self) {
        let target = ScreenId::from(self.frontend.navigator().current());
        if target != self.active_screen {
            let page = self.screens.get(&target).map_or("?", |s| s.id());
            debug!("switching screen: {} → {} ({page})", self.active_screen, target);
            self.active_screen = target;
        }
    }

    /// Run a bound handler off the event loop so slow submissions never
    /// stall rendering.
    fn spawn_dispatch(&self, element: ElementId, kind: EventKind) {
        let frontend = self.frontend.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = frontend.dispatch(element, kind).await;
            let _ = tx.send(Action::Dispatched(element, result));
        });
    }

    /// Load the chosen image, then report the picker change.
    fn spawn_pick(&self, element: ElementId, path: String) {
        let frontend = self.frontend.clone();
        let tx = self.action_tx.clone();
        let location = self.active_screen.location();
        tokio::spawn(async move {
            let Some(input) = frontend.file_input(element) else {
                return;
            };
            match input.select_path(&path).await {
                Ok(()) => {
                    let result = frontend.dispatch(element, EventKind::PickerChanged).await;
                    let _ = tx.send(Action::Dispatched(element, result));
                }
                Err(e) => {
                    warn!(%element, error = %e, "image not loaded");
                    frontend
                        .reporter_for(location)
                        .report(&e.to_string(), Severity::Error);
                }
            }
        });
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::vertical([
            Constraint::Length(1), // Nav bar
            Constraint::Min(1),    // Page
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        self.render_nav_bar(frame, layout[0]);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, layout[1]);
        }

        self.render_status_bar(frame, layout[2]);
        self.render_toasts(frame, area);

        if self.help_visible {
            Self::render_help_overlay(frame, area);
        }
    }

    /// One entry per page; the current location is highlighted.
    fn render_nav_bar(&self, frame: &mut Frame, area: Rect) {
        let navigator = self.frontend.navigator();
        let links = nav_links();
        let titles: Vec<Line> = links
            .iter()
            .map(|link| {
                let style = if link.is_current(navigator) {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                let number = ScreenId::from(link.target).number();
                Line::from(Span::styled(format!(" {number} {} ", link.label()), style))
            })
            .collect();

        let selected = links
            .iter()
            .position(|link| link.is_current(navigator))
            .unwrap_or(0);
        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(selected);

        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let location = self.frontend.navigator().current();
        let backend = self.frontend.controller().client().base_url().to_string();
        let line = Line::from(vec![
            Span::styled(format!(" {location} "), Style::default().fg(theme::NEON_CYAN)),
            Span::styled(format!("│ {backend} "), theme::key_hint()),
            Span::styled("│ ? help  Ctrl+C quit", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    /// Overlay toasts, newest at the bottom, stacked up from above the
    /// status bar.
    fn render_toasts(&self, frame: &mut Frame, area: Rect) {
        let toasts = self.frontend.toasts().toasts();
        let height = 3u16;
        let mut bottom = area.bottom().saturating_sub(1);

        for toast in toasts.iter().rev() {
            if bottom < area.y + height {
                break;
            }
            bottom -= height;
            render_toast(frame, area, bottom, toast);
        }
    }

    fn render_help_overlay(frame: &mut Frame, area: Rect) {
        let help_width = 50u16.min(area.width.saturating_sub(4));
        let help_height = 12u16.min(area.height.saturating_sub(4));
        let x = (area.width.saturating_sub(help_width)) / 2;
        let y = (area.height.saturating_sub(help_height)) / 2;
        let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            help_area,
        );

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let row = |key: &'static str, what: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {key:<10}"), theme::key_hint_key()),
                Span::styled(what, theme::key_hint()),
            ])
        };
        let help_text = vec![
            Line::from(""),
            row("1-3", "Home / Register / Sign In"),
            row("Tab", "Next field"),
            row("Enter", "Choose image / press control"),
            row("Esc", "Close the image prompt"),
            row("q", "Quit (outside text fields)"),
            row("Ctrl+C", "Quit"),
            Line::from(""),
            Line::from(Span::styled("          Esc or ? to close", theme::key_hint())),
        ];
        frame.render_widget(Paragraph::new(help_text), inner);
    }
}

fn render_toast(frame: &mut Frame, area: Rect, y: u16, toast: &Toast) {
    let text = &toast.message.text;
    let msg_len = u16::try_from(text.chars().count()).unwrap_or(u16::MAX);
    let width = msg_len.saturating_add(6).clamp(20, 60).min(area.width);
    let x = area.width.saturating_sub(width + 1);
    let toast_area = Rect::new(area.x + x, y, width, 3);

    let color = theme::severity_color(toast.message.severity);
    let text_style = match toast.phase {
        ToastPhase::Entering => Style::default().fg(color).add_modifier(Modifier::DIM),
        ToastPhase::Shown => Style::default().fg(theme::DIM_WHITE),
    };

    frame.render_widget(
        Block::default().style(Style::default().bg(theme::BG_DARK)),
        toast_area,
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color));
    let inner = block.inner(toast_area);
    frame.render_widget(block, toast_area);

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", theme::severity_icon(toast.message.severity)),
            Style::default().fg(color),
        ),
        Span::styled(text.clone(), text_style),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}
