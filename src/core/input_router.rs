//! Input routing for the page and its overlays
//!
//! Routes keyboard input to an [`Action`] based on:
//! - Current InputMode (which overlay has focus)
//! - The visible section
//! - Admin login state and tab
//!
//! Form modes return [`Action::None`]: their keys belong to the form widget.

use crate::core::admin::AdminTab;
use crate::core::carousel::Direction;
use crate::data::ui_state::{InputMode, Section};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextSection,
    PreviousSection,

    // Gallery
    SelectNextCard,
    SelectPreviousCard,
    Carousel(Direction),
    /// Dot selection, 0-based
    CarouselDot(usize),
    OpenLightbox,
    OpenFilterMenu,
    ToggleAutoplay,
    AutoplayFaster,
    AutoplaySlower,
    ReloadProjects,
    CopyImageUrl,

    /// Key for the open lightbox
    Lightbox(KeyCode),

    // Filter popup
    MenuNext,
    MenuPrevious,
    MenuSelect,
    MenuCancel,

    // Contact
    FocusContactForm,
    CopyWhatsapp,

    // Admin
    OpenLogin,
    Logout,
    AdminSwitchTab,
    AdminUp,
    AdminDown,
    AdminNewProject,
    AdminEditProject,
    AdminDeleteProject,
    AdminOpenMessage,
    AdminRespond,
    AdminRefresh,

    ConfirmYes,
    ConfirmNo,

    None,
}

/// What the router needs to know besides the key
#[derive(Debug, Clone, Copy)]
pub struct RouteContext<'a> {
    pub mode: &'a InputMode,
    pub section: Section,
    pub logged_in: bool,
    pub admin_tab: AdminTab,
}

/// Route a key event to an Action based on current context
pub fn route_input(key: KeyEvent, ctx: RouteContext<'_>) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match ctx.mode {
        InputMode::Normal => route_normal(key.code, ctx),
        InputMode::Lightbox => Action::Lightbox(key.code),
        InputMode::FilterMenu => match key.code {
            KeyCode::Down | KeyCode::Char('j') => Action::MenuNext,
            KeyCode::Up | KeyCode::Char('k') => Action::MenuPrevious,
            KeyCode::Enter => Action::MenuSelect,
            KeyCode::Esc | KeyCode::Char('q') => Action::MenuCancel,
            _ => Action::None,
        },
        InputMode::ConfirmDelete => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Action::ConfirmYes,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Action::ConfirmNo,
            _ => Action::None,
        },
        InputMode::ContactForm
        | InputMode::LoginForm
        | InputMode::ProjectForm
        | InputMode::ResponseForm => Action::None,
    }
}

/// Check if the current InputMode hands keys to a form widget
pub fn is_form_mode(mode: &InputMode) -> bool {
    matches!(
        mode,
        InputMode::ContactForm | InputMode::LoginForm | InputMode::ProjectForm | InputMode::ResponseForm
    )
}

fn route_normal(code: KeyCode, ctx: RouteContext<'_>) -> Action {
    match code {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Tab => return Action::NextSection,
        KeyCode::BackTab => return Action::PreviousSection,
        _ => {}
    }

    match ctx.section {
        Section::Hero => match code {
            KeyCode::Char('w') => Action::CopyWhatsapp,
            _ => Action::None,
        },
        Section::Services => Action::None,
        Section::Projects => match code {
            KeyCode::Down | KeyCode::Char('j') => Action::SelectNextCard,
            KeyCode::Up | KeyCode::Char('k') => Action::SelectPreviousCard,
            KeyCode::Right | KeyCode::Char('l') => Action::Carousel(Direction::Forward),
            KeyCode::Left | KeyCode::Char('h') => Action::Carousel(Direction::Backward),
            KeyCode::Char(c @ '1'..='9') => Action::CarouselDot(c as usize - '1' as usize),
            KeyCode::Enter => Action::OpenLightbox,
            KeyCode::Char('f') => Action::OpenFilterMenu,
            KeyCode::Char('p') => Action::ToggleAutoplay,
            KeyCode::Char('+') | KeyCode::Char('=') => Action::AutoplayFaster,
            KeyCode::Char('-') => Action::AutoplaySlower,
            KeyCode::Char('r') | KeyCode::F(5) => Action::ReloadProjects,
            KeyCode::Char('y') => Action::CopyImageUrl,
            _ => Action::None,
        },
        Section::Contact => match code {
            KeyCode::Enter | KeyCode::Char('i') => Action::FocusContactForm,
            KeyCode::Char('w') => Action::CopyWhatsapp,
            _ => Action::None,
        },
        Section::Admin if !ctx.logged_in => match code {
            KeyCode::Enter | KeyCode::Char('l') => Action::OpenLogin,
            _ => Action::None,
        },
        Section::Admin => route_admin(code, ctx.admin_tab),
    }
}

fn route_admin(code: KeyCode, tab: AdminTab) -> Action {
    match code {
        KeyCode::Left | KeyCode::Right | KeyCode::Char('t') => Action::AdminSwitchTab,
        KeyCode::Up | KeyCode::Char('k') => Action::AdminUp,
        KeyCode::Down | KeyCode::Char('j') => Action::AdminDown,
        KeyCode::Char('r') | KeyCode::F(5) => Action::AdminRefresh,
        KeyCode::Char('x') => Action::Logout,
        _ => match tab {
            AdminTab::Projects => match code {
                KeyCode::Char('n') => Action::AdminNewProject,
                KeyCode::Char('e') | KeyCode::Enter => Action::AdminEditProject,
                KeyCode::Char('d') | KeyCode::Delete => Action::AdminDeleteProject,
                _ => Action::None,
            },
            AdminTab::Messages => match code {
                KeyCode::Enter => Action::AdminOpenMessage,
                KeyCode::Char('a') => Action::AdminRespond,
                _ => Action::None,
            },
        },
    }
}
