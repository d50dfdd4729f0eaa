use super::contact_form::{ContactFormResult, ContactFormWidget};
use super::login_form::{LoginFormResult, LoginFormWidget};
use super::popup_menu::{MenuItem, PopupMenu};
use super::project_form::{ProjectFormResult, ProjectFormWidget};
use super::response_form::{ResponseFormResult, ResponseFormWidget};
use super::widget_traits::TextEditable;
use super::{admin, gallery, lightbox, sections};
use crate::core::app_core::{FormFeedback, FormSeed};
use crate::core::gallery::CategoryFilter;
use crate::core::AppCore;
use crate::data::{InputMode, Section, ToastLevel};
use crate::data::site;
use crate::frontend::{Frontend, FrontendEvent};
use crate::theme::AppTheme;
use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Widget},
    Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Popup form currently on screen
pub enum OverlayForm {
    Login(LoginFormWidget),
    Project(ProjectFormWidget),
    Response(ResponseFormWidget),
}

impl OverlayForm {
    fn from_seed(seed: FormSeed) -> Self {
        match seed {
            FormSeed::Login => Self::Login(LoginFormWidget::new()),
            FormSeed::Project(draft) => Self::Project(ProjectFormWidget::from_seed(draft.as_ref())),
            FormSeed::Response { message_id, to } => {
                Self::Response(ResponseFormWidget::new(message_id, to))
            }
        }
    }

    /// Input mode the core is in while this form is open
    fn mode(&self) -> InputMode {
        match self {
            Self::Login(_) => InputMode::LoginForm,
            Self::Project(_) => InputMode::ProjectForm,
            Self::Response(_) => InputMode::ResponseForm,
        }
    }

    fn set_error(&mut self, message: String) {
        match self {
            Self::Login(form) => form.set_error(message),
            Self::Project(form) => form.set_error(message),
            Self::Response(form) => form.set_error(message),
        }
    }

    fn editable(&mut self) -> &mut dyn TextEditable {
        match self {
            Self::Login(form) => form,
            Self::Project(form) => form,
            Self::Response(form) => form,
        }
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
        match self {
            Self::Login(form) => form.render(area, buf, theme),
            Self::Project(form) => form.render(area, buf, theme),
            Self::Response(form) => form.render(area, buf, theme),
        }
    }
}

/// TUI Frontend using ratatui
///
/// Owns the terminal and the text-entry widgets; everything else is read
/// from [`AppCore`] each frame.
pub struct TuiFrontend {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    poll_timeout: Duration,
    forms: FormState,
}

/// Text-entry state kept across frames
pub struct FormState {
    theme: AppTheme,
    contact: ContactFormWidget,
    overlay: Option<OverlayForm>,
}

impl TuiFrontend {
    /// Create a new TUI frontend
    ///
    /// Initializes terminal in raw mode, enables bracketed paste, and enters alternate screen.
    pub fn new(theme: AppTheme) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
            .context("Failed to setup terminal")?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor()?;

        Ok(Self {
            terminal,
            poll_timeout: Duration::from_millis(50),
            forms: FormState::new(theme),
        })
    }

    /// Set poll timeout (controls how often autoplay timers are checked)
    pub fn set_poll_timeout(&mut self, timeout: Duration) {
        self.poll_timeout = timeout;
    }

    pub fn forms_mut(&mut self) -> &mut FormState {
        &mut self.forms
    }

    /// Convert crossterm event to FrontendEvent
    fn convert_event(event: Event) -> Option<FrontendEvent> {
        match event {
            Event::Key(key_event) => {
                // Only process key press events (ignore repeats and releases)
                if key_event.kind != KeyEventKind::Press {
                    return None;
                }
                Some(FrontendEvent::key(key_event.code, key_event.modifiers))
            }
            Event::Resize(w, h) => Some(FrontendEvent::resize(w, h)),
            Event::Paste(text) => Some(FrontendEvent::paste(text)),
            _ => None,
        }
    }
}

impl FormState {
    pub fn new(theme: AppTheme) -> Self {
        Self {
            theme,
            contact: ContactFormWidget::new(),
            overlay: None,
        }
    }

    pub fn overlay(&self) -> Option<&OverlayForm> {
        self.overlay.as_ref()
    }

    /// Pick up forms the core asked for and feedback from submissions, and
    /// drop a popup once the core has left its mode.
    pub fn sync(&mut self, core: &mut AppCore) {
        if let Some(seed) = core.take_form_seed() {
            self.overlay = Some(OverlayForm::from_seed(seed));
        }

        if let Some(feedback) = core.take_form_feedback() {
            match feedback {
                FormFeedback::ContactSent => self.contact.clear(),
                FormFeedback::Error(message) => match self.overlay.as_mut() {
                    Some(form) if form.mode() == core.ui.input_mode => form.set_error(message),
                    _ => self.contact.set_error(message),
                },
            }
        }

        if self
            .overlay
            .as_ref()
            .is_some_and(|form| form.mode() != core.ui.input_mode)
        {
            self.overlay = None;
        }
    }

    fn focused_editable(&mut self, mode: &InputMode) -> Option<&mut dyn TextEditable> {
        match mode {
            InputMode::ContactForm => Some(&mut self.contact),
            _ => self.overlay.as_mut().map(OverlayForm::editable),
        }
    }

    /// Feed a key to whichever form has focus and hand results to the core
    pub fn handle_key(&mut self, key: KeyEvent, core: &mut AppCore, now: Instant) {
        self.sync(core);

        if key.code == KeyCode::Char('y') && key.modifiers.contains(KeyModifiers::CONTROL) {
            let mode = core.ui.input_mode.clone();
            if let Some(editable) = self.focused_editable(&mode) {
                match editable.copy_to_clipboard() {
                    Ok(()) => core.ui.notify(ToastLevel::Success, "Selection copied to clipboard", now),
                    Err(e) => core.ui.notify(ToastLevel::Error, format!("{:#}", e), now),
                }
            }
            return;
        }

        match core.ui.input_mode {
            InputMode::ContactForm => match self.contact.input(key) {
                Some(ContactFormResult::Submit(submission)) => core.submit_contact(submission),
                Some(ContactFormResult::Cancel) => core.cancel_form(),
                None => {}
            },
            _ => match self.overlay.as_mut() {
                Some(OverlayForm::Login(form)) => match form.input(key) {
                    Some(LoginFormResult::Submit { username, password }) => {
                        core.submit_login(&username, &password)
                    }
                    Some(LoginFormResult::Cancel) => core.cancel_form(),
                    None => {}
                },
                Some(OverlayForm::Project(form)) => match form.input(key) {
                    Some(ProjectFormResult::Save(draft)) => core.submit_project(draft),
                    Some(ProjectFormResult::Cancel) => core.cancel_form(),
                    None => {}
                },
                Some(OverlayForm::Response(form)) => match form.input(key) {
                    Some(ResponseFormResult::Send {
                        message_id,
                        response,
                    }) => core.submit_response(&message_id, &response),
                    Some(ResponseFormResult::Cancel) => core.cancel_form(),
                    None => {}
                },
                None => {
                    tracing::warn!("Form mode {:?} without a form; leaving it", core.ui.input_mode);
                    core.cancel_form();
                }
            },
        }

        self.sync(core);
    }

    /// Bracketed paste goes into the focused field
    pub fn handle_paste(&mut self, text: &str, core: &mut AppCore) {
        self.sync(core);
        let mode = core.ui.input_mode.clone();
        if let Some(editable) = self.focused_editable(&mode) {
            editable.paste_text(text);
        }
    }

    /// Draw the whole page plus whatever overlay is active
    pub fn draw(&mut self, area: Rect, buf: &mut Buffer, core: &AppCore) {
        let theme = &self.theme;
        Block::default()
            .style(Style::default().bg(theme.background_primary))
            .render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        render_header(core, chunks[0], buf, theme);

        let body = chunks[1];
        match core.ui.section {
            Section::Hero => sections::render_hero(body, buf, theme),
            Section::Services => sections::render_services(body, buf, theme),
            Section::Projects => gallery::render(&core.gallery, body, buf, theme),
            Section::Contact => {
                let columns = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
                    .split(body);
                sections::render_contact_info(columns[0], buf, theme);
                self.contact.render(
                    columns[1],
                    buf,
                    theme,
                    core.ui.input_mode == InputMode::ContactForm,
                    core.contact_sending,
                );
            }
            Section::Admin => admin::render(&core.admin, body, buf, theme),
        }

        sections::render_footer(chunks[2], buf, theme);
        render_status(core, chunks[3], buf, theme);

        match core.ui.input_mode {
            InputMode::FilterMenu => {
                let items = CategoryFilter::choices()
                    .into_iter()
                    .map(|filter| MenuItem {
                        text: filter.label().to_string(),
                        active: &filter == core.gallery.filter(),
                    })
                    .collect();
                let menu = PopupMenu::new(" Category ", items, (body.x + 2, body.y + 3), core.filter_cursor);
                menu.render(area, buf, theme);
            }
            InputMode::Lightbox => {
                if let Some(open) = core.gallery.open_lightbox_item().and_then(|item| item.lightbox()) {
                    lightbox::render(open, area, buf, theme);
                }
            }
            InputMode::ConfirmDelete => {
                let title = core
                    .admin
                    .pending_delete()
                    .and_then(|id| core.admin.projects().iter().find(|p| p.id == id))
                    .map(|p| p.title.as_str())
                    .unwrap_or("this project");
                admin::render_confirm_delete(title, area, buf, theme);
            }
            _ => {}
        }

        if let Some(form) = self.overlay.as_mut() {
            form.render(area, buf, theme);
        }
    }
}

fn render_header(core: &AppCore, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(theme.window_border));
    let inner = block.inner(area);
    block.render(area, buf);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let mut brand = vec![Span::styled(
        site::COMPANY_NAME,
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
    )];
    if let Some(username) = core.admin.username() {
        brand.push(Span::styled(
            format!("   admin: {}", username),
            Style::default().fg(theme.text_secondary),
        ));
    }
    Paragraph::new(Line::from(brand)).render(rows[0], buf);

    let selected = Section::ALL
        .iter()
        .position(|s| *s == core.ui.section)
        .unwrap_or(0);
    Tabs::new(Section::ALL.iter().map(|s| s.title()))
        .select(selected)
        .style(Style::default().fg(theme.text_secondary))
        .highlight_style(Style::default().fg(theme.text_selected).add_modifier(Modifier::BOLD))
        .render(rows[1], buf);
}

fn render_status(core: &AppCore, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let (text, color) = match &core.ui.toast {
        Some(toast) => {
            let color = match toast.level {
                ToastLevel::Info => theme.status_info,
                ToastLevel::Success => theme.status_success,
                ToastLevel::Error => theme.status_error,
            };
            (toast.text.as_str(), color)
        }
        None => (core.ui.status_text.as_str(), theme.text_secondary),
    };

    let hints = "Tab sections  q quit";
    let hint_width = hints.len() as u16;
    let status_style = Style::default().bg(theme.status_background);
    Block::default().style(status_style).render(area, buf);

    let text_width = area.width.saturating_sub(hint_width + 2);
    Paragraph::new(Line::from(Span::styled(
        super::carousel::truncate(text, text_width as usize),
        status_style.fg(color),
    )))
    .render(
        Rect {
            width: text_width,
            ..area
        },
        buf,
    );
    if area.width > hint_width {
        buf.set_string(
            area.x + area.width - hint_width,
            area.y,
            hints,
            status_style.fg(theme.text_disabled),
        );
    }
}

impl Frontend for TuiFrontend {
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>> {
        let mut events = Vec::new();

        // Wait up to the timeout for the first event, then drain what's queued
        let mut timeout = self.poll_timeout;
        while event::poll(timeout)? {
            if let Some(frontend_event) = Self::convert_event(event::read()?) {
                events.push(frontend_event);
            }
            timeout = Duration::ZERO;
        }

        Ok(events)
    }

    fn render(&mut self, core: &mut AppCore) -> Result<()> {
        self.forms.sync(core);
        let forms = &mut self.forms;
        self.terminal.draw(|f| {
            let area = f.area();
            forms.draw(area, f.buffer_mut(), core);
        })?;
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableBracketedPaste
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    fn size(&self) -> (u16, u16) {
        let size = self.terminal.size().unwrap_or_default();
        (size.width, size.height)
    }
}

impl Drop for TuiFrontend {
    fn drop(&mut self) {
        // Ensure terminal is restored even if cleanup() wasn't called
        let _ = self.cleanup();
    }
}
