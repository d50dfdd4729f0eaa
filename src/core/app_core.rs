use crate::clipboard;
use crate::config::Config;
use crate::core::admin::AdminPanel;
use crate::core::carousel::AutoplayInterval;
use crate::core::gallery::{CategoryFilter, Gallery};
use crate::core::input_router::Action;
use crate::core::lightbox::{KeyListenerRegistry, LightboxKeyOutcome};
use crate::core::tasks::{self, ApiEvent, ApiRequest, RequestError};
use crate::data::site;
use crate::data::{ContactSubmission, InputMode, ProjectDraft, ToastLevel, UiState};
use crate::session::{Session, SessionStore};
use chrono::Utc;
use std::time::Instant;
use tokio::sync::mpsc;

/// Gallery autoplay speed steps for `+` / `-`
const INTERVAL_STEP_MS: u64 = 1000;
const MIN_INTERVAL_MS: u64 = 1000;
const MAX_INTERVAL_MS: u64 = 10_000;

/// Form the frontend should open, with its initial contents
#[derive(Debug, Clone, PartialEq)]
pub enum FormSeed {
    Login,
    /// `None` creates a new project
    Project(Option<ProjectDraft>),
    Response { message_id: String, to: String },
}

/// Result of a form submission, consumed by the frontend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormFeedback {
    /// Show inline in the open form
    Error(String),
    /// Clear the contact form fields
    ContactSent,
}

/// Core application state (frontend-agnostic)
///
/// AppCore owns every piece of page state and is only touched from the UI
/// loop. Network work goes out as [`ApiRequest`]s and comes back through
/// [`AppCore::apply_api_event`].
pub struct AppCore {
    /// Application configuration
    pub config: Config,

    /// Section, input mode, toasts
    pub ui: UiState,

    /// Project gallery with one carousel per visible card
    pub gallery: Gallery,

    /// Admin session and data
    pub admin: AdminPanel,

    /// Application running flag
    pub running: bool,

    /// Cursor in the category filter popup
    pub filter_cursor: usize,

    /// Set while a contact submission is in flight
    pub contact_sending: bool,

    form_seed: Option<FormSeed>,
    form_feedback: Option<FormFeedback>,
    session_store: SessionStore,
    requests: mpsc::UnboundedSender<ApiRequest>,
}

impl AppCore {
    /// Build the app state, restoring a stored admin session if present.
    ///
    /// The caller is responsible for putting a restored token on the API
    /// client before dispatching requests.
    pub fn new(
        config: Config,
        session_store: SessionStore,
        requests: mpsc::UnboundedSender<ApiRequest>,
        now: Instant,
    ) -> Self {
        let listeners = KeyListenerRegistry::new();
        let mut gallery = Gallery::new(config.carousel.gallery_options(), listeners);

        gallery.set_reload_hook(tasks::queue_reload(requests.clone()));

        let session = session_store.load();
        if let Some(session) = &session {
            tracing::info!("Restored admin session for '{}'", session.username);
        }

        Self {
            ui: UiState::new(config.ui.toast_duration()),
            config,
            gallery,
            admin: AdminPanel::new(session),
            running: true,
            filter_cursor: 0,
            contact_sending: false,
            form_seed: None,
            form_feedback: None,
            session_store,
            requests,
        }
        .started(now)
    }

    /// Initial fetches
    fn started(mut self, now: Instant) -> Self {
        self.gallery.request_reload();
        if self.admin.is_logged_in() {
            self.request_admin_data();
        }
        self.ui.status_text = format!("Connected to {}", self.config.api.base_url);
        self.tick(now);
        self
    }

    pub fn session(&self) -> Option<&Session> {
        self.admin.session()
    }

    pub fn take_form_seed(&mut self) -> Option<FormSeed> {
        self.form_seed.take()
    }

    pub fn take_form_feedback(&mut self) -> Option<FormFeedback> {
        self.form_feedback.take()
    }

    fn send(&self, request: ApiRequest) {
        if self.requests.send(request).is_err() {
            tracing::error!("Request queue closed");
        }
    }

    fn notify(&mut self, level: ToastLevel, text: impl Into<String>, now: Instant) {
        self.ui.notify(level, text, now);
    }

    fn request_admin_data(&mut self) {
        self.admin.loading = true;
        self.send(ApiRequest::LoadAdminData);
    }

    /// Advance timers and drop stale overlays
    pub fn tick(&mut self, now: Instant) {
        self.gallery.tick(now);
        if self.admin.is_logged_in() {
            self.admin.sync_preview(self.config.carousel.carousel_options(), now);
        }
        self.ui.expire_toast(now);

        // A reload or filter change can unmount the card whose lightbox was open
        if self.ui.input_mode == InputMode::Lightbox && !self.gallery.is_lightbox_open() {
            self.ui.input_mode = InputMode::Normal;
        }
    }

    /// Move the gallery autoplay interval one step, within bounds
    fn step_interval(&mut self, steps: i64, now: Instant) {
        let current = self.gallery.interval().as_duration().as_millis() as u64;
        let target = current
            .saturating_add_signed(steps * INTERVAL_STEP_MS as i64)
            .clamp(MIN_INTERVAL_MS, MAX_INTERVAL_MS);
        let Some(interval) = AutoplayInterval::from_millis(target) else {
            return;
        };
        self.gallery.set_interval(interval, now);
        let text = format!("Autoplay every {:.1}s", target as f64 / 1000.0);
        self.notify(ToastLevel::Info, text, now);
    }

    pub fn handle_action(&mut self, action: Action, now: Instant) {
        match action {
            Action::None => {}
            Action::Quit => {
                tracing::info!("Quit requested");
                self.running = false;
            }
            Action::NextSection => self.ui.section = self.ui.section.next(),
            Action::PreviousSection => self.ui.section = self.ui.section.previous(),

            Action::SelectNextCard => self.gallery.select_next(),
            Action::SelectPreviousCard => self.gallery.select_previous(),
            Action::Carousel(direction) => self.gallery.navigate_selected(direction, now),
            Action::CarouselDot(index) => {
                if let Err(e) = self.gallery.jump_selected(index, now) {
                    tracing::debug!("Ignoring dot selection: {}", e);
                }
            }
            Action::OpenLightbox => {
                if self.gallery.open_lightbox() {
                    self.ui.input_mode = InputMode::Lightbox;
                }
            }
            Action::Lightbox(code) => {
                let outcome = self.gallery.lightbox_key(code);
                if outcome == LightboxKeyOutcome::Closed || !self.gallery.is_lightbox_open() {
                    self.ui.input_mode = InputMode::Normal;
                }
            }
            Action::OpenFilterMenu => {
                self.filter_cursor = CategoryFilter::choices()
                    .iter()
                    .position(|f| f == self.gallery.filter())
                    .unwrap_or(0);
                self.ui.input_mode = InputMode::FilterMenu;
            }
            Action::MenuNext => {
                let len = CategoryFilter::choices().len();
                self.filter_cursor = (self.filter_cursor + 1) % len;
            }
            Action::MenuPrevious => {
                let len = CategoryFilter::choices().len();
                self.filter_cursor = (self.filter_cursor + len - 1) % len;
            }
            Action::MenuSelect => {
                if let Some(filter) = CategoryFilter::choices().into_iter().nth(self.filter_cursor) {
                    self.gallery.set_filter(filter, now);
                }
                self.ui.input_mode = InputMode::Normal;
            }
            Action::MenuCancel => self.ui.input_mode = InputMode::Normal,
            Action::ToggleAutoplay => {
                let enabled = !self.gallery.autoplay();
                self.gallery.set_autoplay(enabled, now);
                let text = if enabled { "Autoplay on" } else { "Autoplay paused" };
                self.notify(ToastLevel::Info, text, now);
            }
            Action::AutoplayFaster => self.step_interval(-1, now),
            Action::AutoplaySlower => self.step_interval(1, now),
            Action::ReloadProjects => self.gallery.request_reload(),
            Action::CopyImageUrl => {
                let url = self
                    .gallery
                    .selected_item()
                    .and_then(|item| item.carousel.current_image())
                    .map(str::to_string);
                match url {
                    Some(url) => self.copy_to_clipboard("Image URL", &url, now),
                    None => self.notify(ToastLevel::Info, "No image to copy", now),
                }
            }

            Action::FocusContactForm => self.ui.input_mode = InputMode::ContactForm,
            Action::CopyWhatsapp => self.copy_to_clipboard("WhatsApp link", &site::whatsapp_link(), now),

            Action::OpenLogin => self.open_form(InputMode::LoginForm, FormSeed::Login),
            Action::Logout => self.logout(now),
            Action::AdminSwitchTab => self.admin.tab = self.admin.tab.toggle(),
            Action::AdminUp => self.admin.move_selection(-1),
            Action::AdminDown => self.admin.move_selection(1),
            Action::AdminRefresh => self.request_admin_data(),
            Action::AdminNewProject => {
                self.admin.begin_create();
                self.open_form(InputMode::ProjectForm, FormSeed::Project(None));
            }
            Action::AdminEditProject => {
                if let Some(draft) = self.admin.begin_edit().map(ProjectDraft::from_project) {
                    self.open_form(InputMode::ProjectForm, FormSeed::Project(Some(draft)));
                }
            }
            Action::AdminDeleteProject => {
                if self.admin.request_delete().is_some() {
                    self.ui.input_mode = InputMode::ConfirmDelete;
                }
            }
            Action::ConfirmYes => {
                if let Some(id) = self.admin.take_pending_delete() {
                    self.send(ApiRequest::DeleteProject { id });
                }
                self.ui.input_mode = InputMode::Normal;
            }
            Action::ConfirmNo => {
                self.admin.take_pending_delete();
                self.ui.input_mode = InputMode::Normal;
            }
            Action::AdminOpenMessage => {
                if let Some(message) = self.admin.selected_message().filter(|m| m.is_unread()) {
                    let id = message.id.clone();
                    self.send(ApiRequest::MarkRead { id });
                }
            }
            Action::AdminRespond => {
                let seed = self.admin.selected_message().map(|m| FormSeed::Response {
                    message_id: m.id.clone(),
                    to: m.name.clone(),
                });
                if let Some(seed) = seed {
                    self.open_form(InputMode::ResponseForm, seed);
                }
            }
        }
    }

    fn open_form(&mut self, mode: InputMode, seed: FormSeed) {
        self.form_feedback = None;
        self.form_seed = Some(seed);
        self.ui.input_mode = mode;
    }

    /// Close whatever form is open without submitting
    pub fn cancel_form(&mut self) {
        self.form_feedback = None;
        self.ui.input_mode = InputMode::Normal;
    }

    fn copy_to_clipboard(&mut self, label: &str, text: &str, now: Instant) {
        match clipboard::copy_for_toast(label, text) {
            Ok(msg) => self.notify(ToastLevel::Success, msg, now),
            Err(msg) => self.notify(ToastLevel::Error, msg, now),
        }
    }

    pub fn submit_contact(&mut self, mut submission: ContactSubmission) {
        if self.contact_sending {
            return;
        }
        if let Err(e) = submission.validate() {
            self.form_feedback = Some(FormFeedback::Error(e.to_string()));
            return;
        }
        self.contact_sending = true;
        self.send(ApiRequest::SubmitContact(submission));
    }

    pub fn submit_login(&mut self, username: &str, password: &str) {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            self.form_feedback = Some(FormFeedback::Error(
                "Please enter username and password".to_string(),
            ));
            return;
        }
        self.send(ApiRequest::Login {
            username: username.to_string(),
            password: password.to_string(),
        });
    }

    pub fn submit_project(&mut self, draft: ProjectDraft) {
        if let Err(e) = draft.validate() {
            self.form_feedback = Some(FormFeedback::Error(e.to_string()));
            return;
        }
        let id = self.admin.editing().map(str::to_string);
        self.send(ApiRequest::SaveProject { id, draft });
    }

    /// Empty responses are not sent
    pub fn submit_response(&mut self, message_id: &str, response: &str) {
        let response = response.trim();
        if response.is_empty() {
            self.form_feedback = Some(FormFeedback::Error("Please enter a response".to_string()));
            return;
        }
        self.send(ApiRequest::Respond {
            id: message_id.to_string(),
            response: response.to_string(),
        });
    }

    pub fn logout(&mut self, now: Instant) {
        self.end_session();
        self.notify(ToastLevel::Info, "Logged out", now);
    }

    fn end_session(&mut self) {
        self.admin.logout();
        if let Err(e) = self.session_store.clear() {
            tracing::warn!("Failed to clear stored session: {:#}", e);
        }
        self.send(ApiRequest::Logout);
        if matches!(
            self.ui.input_mode,
            InputMode::ProjectForm | InputMode::ResponseForm | InputMode::ConfirmDelete
        ) {
            self.ui.input_mode = InputMode::Normal;
        }
    }

    /// Common failure path: a 401 ends the session, anything else is a toast
    fn request_failed(&mut self, context: &str, err: RequestError, now: Instant) {
        if err.unauthorized {
            tracing::warn!("{}: session rejected by server", context);
            if self.admin.is_logged_in() {
                self.end_session();
            }
            self.notify(ToastLevel::Error, err.message, now);
        } else {
            tracing::error!("{}: {}", context, err.message);
            self.notify(ToastLevel::Error, format!("{}: {}", context, err.message), now);
        }
    }

    /// Apply the result of a background request
    pub fn apply_api_event(&mut self, event: ApiEvent, now: Instant) {
        match event {
            ApiEvent::ProjectsLoaded(Ok(projects)) => self.gallery.set_projects(projects, now),
            ApiEvent::ProjectsLoaded(Err(err)) => self.gallery.set_failed(&err.message),

            ApiEvent::AdminDataLoaded(Ok((projects, messages))) => {
                self.admin.set_data(projects, messages);
            }
            ApiEvent::AdminDataLoaded(Err(err)) => {
                self.admin.loading = false;
                self.request_failed("Failed to load dashboard data", err, now);
            }

            ApiEvent::LoggedIn(Ok(session)) => {
                if let Err(e) = self.session_store.save(&session) {
                    tracing::warn!("Session not persisted: {:#}", e);
                }
                let welcome = format!("Welcome, {}", session.username);
                self.admin.login(session);
                self.ui.input_mode = InputMode::Normal;
                self.notify(ToastLevel::Success, welcome, now);
                self.request_admin_data();
            }
            ApiEvent::LoggedIn(Err(err)) => {
                tracing::warn!("Login failed: {}", err.message);
                self.form_feedback = Some(FormFeedback::Error(err.message));
            }

            ApiEvent::ContactSubmitted(result) => {
                self.contact_sending = false;
                match result {
                    Ok(_) => {
                        self.form_feedback = Some(FormFeedback::ContactSent);
                        if self.ui.input_mode == InputMode::ContactForm {
                            self.ui.input_mode = InputMode::Normal;
                        }
                        self.notify(
                            ToastLevel::Success,
                            "Message sent! We'll get back to you soon.",
                            now,
                        );
                    }
                    Err(err) => {
                        self.form_feedback = Some(FormFeedback::Error(err.message.clone()));
                        self.notify(ToastLevel::Error, err.message, now);
                    }
                }
            }

            ApiEvent::ProjectSaved { created, result } => match result {
                Ok(project) => {
                    self.admin.apply_saved(project);
                    self.ui.input_mode = InputMode::Normal;
                    let verb = if created { "created" } else { "updated" };
                    self.notify(ToastLevel::Success, format!("Project {} successfully", verb), now);
                    self.gallery.request_reload();
                }
                Err(err) if err.unauthorized => self.request_failed("Failed to save project", err, now),
                Err(err) => self.form_feedback = Some(FormFeedback::Error(err.message)),
            },

            ApiEvent::ProjectDeleted { id, result } => match result {
                Ok(_) => {
                    self.admin.remove_project(&id);
                    self.notify(ToastLevel::Success, "Project deleted successfully", now);
                    self.gallery.request_reload();
                }
                Err(err) => self.request_failed("Failed to delete project", err, now),
            },

            ApiEvent::MessageUpdated(Ok(message)) => self.admin.replace_message(message),
            ApiEvent::MessageUpdated(Err(err)) => {
                self.request_failed("Failed to update message status", err, now)
            }

            ApiEvent::MessageResponded { id, response, result } => match result {
                Ok(_) => {
                    self.admin.mark_responded(&id, response, Utc::now());
                    if self.ui.input_mode == InputMode::ResponseForm {
                        self.ui.input_mode = InputMode::Normal;
                    }
                    self.notify(ToastLevel::Success, "Response sent successfully", now);
                }
                Err(err) if err.unauthorized => self.request_failed("Failed to send response", err, now),
                Err(err) => self.form_feedback = Some(FormFeedback::Error(err.message)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::carousel::Direction;
    use crate::data::{Category, ContactMessage, MessageStatus, Project, Section};
    use crossterm::event::KeyCode;
    use tempfile::TempDir;

    struct Harness {
        core: AppCore,
        rx: mpsc::UnboundedReceiver<ApiRequest>,
        store: SessionStore,
        _dir: TempDir,
    }

    impl Harness {
        fn new(session: Option<Session>) -> Self {
            let dir = TempDir::new().unwrap();
            let store = SessionStore::new(dir.path());
            if let Some(session) = &session {
                store.save(session).unwrap();
            }
            let (tx, rx) = mpsc::unbounded_channel();
            let core = AppCore::new(Config::default(), store.clone(), tx, Instant::now());
            Self {
                core,
                rx,
                store,
                _dir: dir,
            }
        }

        fn drain(&mut self) -> Vec<ApiRequest> {
            let mut out = Vec::new();
            while let Ok(req) = self.rx.try_recv() {
                out.push(req);
            }
            out
        }
    }

    fn project(id: &str, category: Category, images: usize) -> Project {
        Project {
            id: id.to_string(),
            title: format!("Project {}", id),
            description: "desc".into(),
            category,
            images: (0..images)
                .map(|i| format!("https://cdn/{}/{}.jpg", id, i))
                .collect::<Vec<_>>()
                .into(),
            created_at: None,
            updated_at: None,
        }
    }

    fn message(id: &str) -> ContactMessage {
        ContactMessage {
            id: id.into(),
            name: "Ravi".into(),
            email: "ravi@example.com".into(),
            phone: "1".into(),
            message: "Hello".into(),
            status: MessageStatus::Unread,
            created_at: None,
            response: None,
            responded_at: None,
        }
    }

    fn loaded(h: &mut Harness, now: Instant) {
        h.core.apply_api_event(
            ApiEvent::ProjectsLoaded(Ok(vec![
                project("a", Category::Medical, 3),
                project("b", Category::Residential, 1),
            ])),
            now,
        );
    }

    fn unauthorized() -> RequestError {
        RequestError {
            message: "Unauthorized - please login again".into(),
            unauthorized: true,
        }
    }

    #[test]
    fn test_startup_requests() {
        let mut h = Harness::new(None);
        assert!(matches!(h.drain().as_slice(), [ApiRequest::LoadProjects]));

        let mut h = Harness::new(Some(Session::new("t".into(), Some("admin".into()))));
        assert!(h.core.admin.is_logged_in());
        assert!(matches!(
            h.drain().as_slice(),
            [ApiRequest::LoadProjects, ApiRequest::LoadAdminData]
        ));
    }

    #[test]
    fn test_lightbox_mode_follows_overlay() {
        let now = Instant::now();
        let mut h = Harness::new(None);
        loaded(&mut h, now);
        h.core.ui.section = Section::Projects;

        h.core.handle_action(Action::Carousel(Direction::Forward), now);
        h.core.handle_action(Action::OpenLightbox, now);
        assert_eq!(h.core.ui.input_mode, InputMode::Lightbox);

        h.core.handle_action(Action::Lightbox(KeyCode::Right), now);
        assert_eq!(h.core.ui.input_mode, InputMode::Lightbox);

        h.core.handle_action(Action::Lightbox(KeyCode::Esc), now);
        assert_eq!(h.core.ui.input_mode, InputMode::Normal);
        assert!(!h.core.gallery.is_lightbox_open());
    }

    #[test]
    fn test_reload_unmounting_lightbox_resets_mode() {
        let now = Instant::now();
        let mut h = Harness::new(None);
        loaded(&mut h, now);
        h.core.handle_action(Action::OpenLightbox, now);
        assert_eq!(h.core.ui.input_mode, InputMode::Lightbox);

        loaded(&mut h, now);
        h.core.tick(now);
        assert_eq!(h.core.ui.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_filter_menu_flow() {
        let now = Instant::now();
        let mut h = Harness::new(None);
        loaded(&mut h, now);

        h.core.handle_action(Action::OpenFilterMenu, now);
        assert_eq!(h.core.ui.input_mode, InputMode::FilterMenu);
        assert_eq!(h.core.filter_cursor, 0);

        h.core.handle_action(Action::MenuNext, now);
        h.core.handle_action(Action::MenuNext, now);
        h.core.handle_action(Action::MenuSelect, now);
        assert_eq!(h.core.gallery.filter(), &CategoryFilter::Only(Category::Residential));
        assert_eq!(h.core.gallery.items().len(), 1);
        assert_eq!(h.core.ui.input_mode, InputMode::Normal);

        h.core.handle_action(Action::OpenFilterMenu, now);
        assert_eq!(h.core.filter_cursor, 2);
        h.core.handle_action(Action::MenuPrevious, now);
        h.core.handle_action(Action::MenuPrevious, now);
        h.core.handle_action(Action::MenuPrevious, now);
        assert_eq!(h.core.filter_cursor, 3);
        h.core.handle_action(Action::MenuCancel, now);
        assert_eq!(h.core.gallery.filter(), &CategoryFilter::Only(Category::Residential));
    }

    #[test]
    fn test_reload_goes_through_hook() {
        let now = Instant::now();
        let mut h = Harness::new(None);
        h.drain();
        loaded(&mut h, now);
        h.core.handle_action(Action::ReloadProjects, now);
        assert!(matches!(h.drain().as_slice(), [ApiRequest::LoadProjects]));
    }

    #[test]
    fn test_failed_load_surfaces_message() {
        let now = Instant::now();
        let mut h = Harness::new(None);
        h.core.apply_api_event(
            ApiEvent::ProjectsLoaded(Err(RequestError {
                message: "HTTP error! status: 500".into(),
                unauthorized: false,
            })),
            now,
        );
        assert_eq!(
            h.core.gallery.state(),
            &crate::core::gallery::LoadState::Failed("Failed to load projects".into())
        );
    }

    #[test]
    fn test_login_success_persists_and_loads() {
        let now = Instant::now();
        let mut h = Harness::new(None);
        h.drain();
        h.core.handle_action(Action::OpenLogin, now);
        assert_eq!(h.core.take_form_seed(), Some(FormSeed::Login));

        h.core.submit_login("admin", "pw");
        assert!(matches!(h.drain().as_slice(), [ApiRequest::Login { .. }]));

        let session = Session::new("tok".into(), Some("admin".into()));
        h.core.apply_api_event(ApiEvent::LoggedIn(Ok(session.clone())), now);
        assert_eq!(h.core.ui.input_mode, InputMode::Normal);
        assert_eq!(h.store.load(), Some(session));
        assert!(matches!(h.drain().as_slice(), [ApiRequest::LoadAdminData]));
    }

    #[test]
    fn test_login_validation_and_failure() {
        let now = Instant::now();
        let mut h = Harness::new(None);
        h.drain();
        h.core.submit_login("  ", "pw");
        assert!(h.drain().is_empty());
        assert!(matches!(h.core.take_form_feedback(), Some(FormFeedback::Error(_))));

        h.core.apply_api_event(
            ApiEvent::LoggedIn(Err(RequestError {
                message: "Invalid credentials".into(),
                unauthorized: false,
            })),
            now,
        );
        assert_eq!(
            h.core.take_form_feedback(),
            Some(FormFeedback::Error("Invalid credentials".into()))
        );
        assert!(!h.core.admin.is_logged_in());
    }

    #[test]
    fn test_unauthorized_ends_session() {
        let now = Instant::now();
        let mut h = Harness::new(Some(Session::new("t".into(), None)));
        h.drain();
        h.core.ui.section = Section::Admin;

        h.core
            .apply_api_event(ApiEvent::AdminDataLoaded(Err(unauthorized())), now);
        assert!(!h.core.admin.is_logged_in());
        assert!(h.store.load().is_none());
        assert!(matches!(h.drain().as_slice(), [ApiRequest::Logout]));
        assert_eq!(h.core.ui.toast.as_ref().unwrap().level, ToastLevel::Error);
    }

    #[test]
    fn test_contact_submission_flow() {
        let now = Instant::now();
        let mut h = Harness::new(None);
        h.drain();
        h.core.handle_action(Action::FocusContactForm, now);

        let mut bad = ContactSubmission {
            name: "A".into(),
            email: "not-an-email".into(),
            phone: "1".into(),
            message: "m".into(),
        };
        h.core.submit_contact(bad.clone());
        assert_eq!(
            h.core.take_form_feedback(),
            Some(FormFeedback::Error("Please enter a valid email address".into()))
        );

        bad.email = "a@b.co".into();
        h.core.submit_contact(bad.clone());
        h.core.submit_contact(bad);
        assert_eq!(h.drain().len(), 1);
        assert!(h.core.contact_sending);

        h.core.apply_api_event(ApiEvent::ContactSubmitted(Ok("ok".into())), now);
        assert!(!h.core.contact_sending);
        assert_eq!(h.core.take_form_feedback(), Some(FormFeedback::ContactSent));
        assert_eq!(h.core.ui.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_admin_project_crud() {
        let now = Instant::now();
        let mut h = Harness::new(Some(Session::new("t".into(), None)));
        h.core.apply_api_event(
            ApiEvent::AdminDataLoaded(Ok((vec![project("a", Category::Medical, 2)], vec![]))),
            now,
        );
        h.drain();

        h.core.handle_action(Action::AdminEditProject, now);
        assert_eq!(h.core.ui.input_mode, InputMode::ProjectForm);
        let Some(FormSeed::Project(Some(draft))) = h.core.take_form_seed() else {
            panic!("expected edit seed");
        };
        h.core.submit_project(draft);
        match h.drain().as_slice() {
            [ApiRequest::SaveProject { id: Some(id), .. }] => assert_eq!(id, "a"),
            other => panic!("unexpected requests: {:?}", other),
        }

        h.core.apply_api_event(
            ApiEvent::ProjectSaved {
                created: false,
                result: Ok(project("a", Category::Commercial, 2)),
            },
            now,
        );
        assert_eq!(h.core.ui.input_mode, InputMode::Normal);
        assert_eq!(h.core.admin.projects()[0].category, Category::Commercial);
        assert!(matches!(h.drain().as_slice(), [ApiRequest::LoadProjects]));

        h.core.handle_action(Action::AdminDeleteProject, now);
        assert_eq!(h.core.ui.input_mode, InputMode::ConfirmDelete);
        h.core.handle_action(Action::ConfirmYes, now);
        assert!(matches!(h.drain().as_slice(), [ApiRequest::DeleteProject { .. }]));
        h.core.apply_api_event(
            ApiEvent::ProjectDeleted {
                id: "a".into(),
                result: Ok("Project deleted".into()),
            },
            now,
        );
        assert!(h.core.admin.projects().is_empty());
    }

    #[test]
    fn test_invalid_draft_is_not_sent() {
        let mut h = Harness::new(Some(Session::new("t".into(), None)));
        h.drain();
        h.core.submit_project(ProjectDraft {
            title: "t".into(),
            description: "d".into(),
            category: Some(Category::Medical),
            images: vec![],
        });
        assert!(h.drain().is_empty());
        assert_eq!(
            h.core.take_form_feedback(),
            Some(FormFeedback::Error("Please upload at least one image".into()))
        );
    }

    #[test]
    fn test_messages_mark_read_and_respond() {
        let now = Instant::now();
        let mut h = Harness::new(Some(Session::new("t".into(), None)));
        h.core.apply_api_event(
            ApiEvent::AdminDataLoaded(Ok((vec![], vec![message("m1")]))),
            now,
        );
        h.core.admin.tab = crate::core::admin::AdminTab::Messages;
        h.drain();

        h.core.handle_action(Action::AdminOpenMessage, now);
        assert!(matches!(h.drain().as_slice(), [ApiRequest::MarkRead { .. }]));

        h.core.handle_action(Action::AdminRespond, now);
        assert_eq!(
            h.core.take_form_seed(),
            Some(FormSeed::Response {
                message_id: "m1".into(),
                to: "Ravi".into()
            })
        );
        h.core.submit_response("m1", "   ");
        assert!(h.drain().is_empty());

        h.core.submit_response("m1", " Thanks ");
        match h.drain().as_slice() {
            [ApiRequest::Respond { response, .. }] => assert_eq!(response, "Thanks"),
            other => panic!("unexpected requests: {:?}", other),
        }
        h.core.apply_api_event(
            ApiEvent::MessageResponded {
                id: "m1".into(),
                response: "Thanks".into(),
                result: Ok("sent".into()),
            },
            now,
        );
        assert_eq!(h.core.admin.messages()[0].status, MessageStatus::Responded);
        assert_eq!(h.core.ui.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_toggle_autoplay() {
        let now = Instant::now();
        let mut h = Harness::new(None);
        loaded(&mut h, now);
        assert!(h.core.gallery.autoplay());
        h.core.handle_action(Action::ToggleAutoplay, now);
        assert!(!h.core.gallery.autoplay());
        assert!(!h.core.gallery.items()[0].carousel.autoplay_active());
    }

    #[test]
    fn test_autoplay_speed_steps_are_bounded() {
        let now = Instant::now();
        let mut h = Harness::new(None);
        loaded(&mut h, now);
        let start = h.core.gallery.interval().as_duration();

        h.core.handle_action(Action::AutoplayFaster, now);
        assert_eq!(
            h.core.gallery.interval().as_duration(),
            start - std::time::Duration::from_millis(1000)
        );
        assert!(h.core.ui.toast.as_ref().unwrap().text.starts_with("Autoplay every"));

        for _ in 0..20 {
            h.core.handle_action(Action::AutoplayFaster, now);
        }
        assert_eq!(h.core.gallery.interval().as_duration().as_millis(), 1000);
        assert_eq!(
            h.core.gallery.items()[0].carousel.next_tick_at(),
            Some(now + std::time::Duration::from_millis(1000))
        );

        for _ in 0..20 {
            h.core.handle_action(Action::AutoplaySlower, now);
        }
        assert_eq!(h.core.gallery.interval().as_duration().as_millis(), 10_000);
    }

    #[test]
    fn test_failed_reload_leaves_lightbox_mode() {
        let now = Instant::now();
        let mut h = Harness::new(None);
        loaded(&mut h, now);
        h.core.handle_action(Action::OpenLightbox, now);
        assert_eq!(h.core.ui.input_mode, InputMode::Lightbox);

        h.core.gallery.request_reload();
        h.core.apply_api_event(
            ApiEvent::ProjectsLoaded(Err(RequestError {
                message: "timeout".into(),
                unauthorized: false,
            })),
            now,
        );
        h.core.tick(now);
        assert_eq!(h.core.ui.input_mode, InputMode::Normal);
        assert!(h.core.gallery.items().is_empty());
        assert_eq!(h.core.gallery.next_tick_at(), None);
    }
}
