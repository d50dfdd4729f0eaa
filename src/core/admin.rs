//! Admin panel state: session, project management and the message inbox.
//!
//! Everything here is plain state; requests are issued by the app core and
//! their results applied back through the `apply_*` methods.

use crate::core::carousel::{Carousel, CarouselOptions};
use crate::data::{ContactMessage, MessageStatus, Project};
use crate::session::Session;
use chrono::{DateTime, Utc};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
    #[default]
    Projects,
    Messages,
}

impl AdminTab {
    pub fn title(&self) -> &'static str {
        match self {
            AdminTab::Projects => "Projects",
            AdminTab::Messages => "Messages",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            AdminTab::Projects => AdminTab::Messages,
            AdminTab::Messages => AdminTab::Projects,
        }
    }
}

/// Dashboard counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdminStats {
    pub total_projects: usize,
    pub total_messages: usize,
    pub unread_messages: usize,
}

#[derive(Debug, Default)]
pub struct AdminPanel {
    session: Option<Session>,
    projects: Vec<Project>,
    messages: Vec<ContactMessage>,
    pub tab: AdminTab,
    project_selected: usize,
    message_selected: usize,
    /// Project id awaiting delete confirmation
    pending_delete: Option<String>,
    /// Project id being edited; `None` while creating
    editing: Option<String>,
    pub loading: bool,
    /// Image preview of the selected project
    preview: Option<Carousel>,
    preview_of: Option<String>,
}

impl AdminPanel {
    pub fn new(session: Option<Session>) -> Self {
        Self {
            session,
            ..Self::default()
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn username(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.username.as_str())
    }

    pub fn login(&mut self, session: Session) {
        tracing::info!("Admin '{}' logged in", session.username);
        self.session = Some(session);
    }

    /// Forget the session and everything fetched with it
    pub fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::info!("Admin '{}' logged out", session.username);
        }
        self.projects.clear();
        self.messages.clear();
        self.project_selected = 0;
        self.message_selected = 0;
        self.pending_delete = None;
        self.editing = None;
        self.loading = false;
        self.preview = None;
        self.preview_of = None;
    }

    pub fn preview(&self) -> Option<&Carousel> {
        self.preview.as_ref()
    }

    /// Rebuild the preview when the selected project or its images change,
    /// then advance it.
    pub fn sync_preview(&mut self, options: CarouselOptions, now: Instant) {
        let stale = match (self.selected_project(), &self.preview) {
            (Some(project), Some(preview)) => {
                self.preview_of.as_deref() != Some(project.id.as_str())
                    || preview.images() != &project.images
            }
            (None, None) => false,
            _ => true,
        };
        if stale {
            let (id, preview) = self
                .selected_project()
                .map(|p| {
                    let carousel = Carousel::new(p.images.clone(), p.title.clone(), options, now);
                    (p.id.clone(), carousel)
                })
                .unzip();
            self.preview_of = id;
            self.preview = preview;
        }
        if let Some(preview) = &mut self.preview {
            preview.set_interval(options.interval, now);
            preview.tick(now);
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn messages(&self) -> &[ContactMessage] {
        &self.messages
    }

    pub fn stats(&self) -> AdminStats {
        AdminStats {
            total_projects: self.projects.len(),
            total_messages: self.messages.len(),
            unread_messages: self.messages.iter().filter(|m| m.is_unread()).count(),
        }
    }

    pub fn set_data(&mut self, projects: Vec<Project>, messages: Vec<ContactMessage>) {
        self.projects = projects;
        self.messages = messages;
        self.loading = false;
        self.clamp_selection();
    }

    pub fn project_selected(&self) -> usize {
        self.project_selected
    }

    pub fn message_selected(&self) -> usize {
        self.message_selected
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.projects.get(self.project_selected)
    }

    pub fn selected_message(&self) -> Option<&ContactMessage> {
        self.messages.get(self.message_selected)
    }

    /// Move the selection in the active tab, clamped at the ends
    pub fn move_selection(&mut self, delta: isize) {
        let (selected, len) = match self.tab {
            AdminTab::Projects => (&mut self.project_selected, self.projects.len()),
            AdminTab::Messages => (&mut self.message_selected, self.messages.len()),
        };
        if len == 0 {
            *selected = 0;
            return;
        }
        *selected = selected.saturating_add_signed(delta).min(len - 1);
    }

    pub fn begin_create(&mut self) {
        self.editing = None;
    }

    /// Start editing the selected project; returns it for the form
    pub fn begin_edit(&mut self) -> Option<&Project> {
        let project = self.projects.get(self.project_selected)?;
        self.editing = Some(project.id.clone());
        Some(project)
    }

    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// Mark the selected project for deletion; returns its title
    pub fn request_delete(&mut self) -> Option<&str> {
        let project = self.projects.get(self.project_selected)?;
        self.pending_delete = Some(project.id.clone());
        Some(project.title.as_str())
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn take_pending_delete(&mut self) -> Option<String> {
        self.pending_delete.take()
    }

    /// Insert a new project or replace the edited one
    pub fn apply_saved(&mut self, project: Project) {
        match self.projects.iter_mut().find(|p| p.id == project.id) {
            Some(existing) => *existing = project,
            None => self.projects.insert(0, project),
        }
        self.editing = None;
    }

    pub fn remove_project(&mut self, id: &str) {
        self.projects.retain(|p| p.id != id);
        self.clamp_selection();
    }

    pub fn replace_message(&mut self, message: ContactMessage) {
        if let Some(existing) = self.messages.iter_mut().find(|m| m.id == message.id) {
            *existing = message;
        }
    }

    /// Local bookkeeping after a response was accepted
    pub fn mark_responded(&mut self, id: &str, response: String, at: DateTime<Utc>) {
        if let Some(message) = self.messages.iter_mut().find(|m| m.id == id) {
            message.status = MessageStatus::Responded;
            message.response = Some(response);
            message.responded_at = Some(at);
        }
    }

    fn clamp_selection(&mut self) {
        self.project_selected = self.project_selected.min(self.projects.len().saturating_sub(1));
        self.message_selected = self.message_selected.min(self.messages.len().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Category;

    fn project(id: &str) -> Project {
        Project {
            id: id.to_string(),
            title: format!("Project {}", id),
            description: "d".into(),
            category: Category::Medical,
            images: vec!["a.jpg".to_string()].into(),
            created_at: None,
            updated_at: None,
        }
    }

    fn message(id: &str, status: MessageStatus) -> ContactMessage {
        ContactMessage {
            id: id.to_string(),
            name: "Asha".into(),
            email: "asha@example.com".into(),
            phone: "123".into(),
            message: "Quote please".into(),
            status,
            created_at: None,
            response: None,
            responded_at: None,
        }
    }

    fn panel() -> AdminPanel {
        let mut admin = AdminPanel::new(Some(Session::new("t".into(), Some("admin".into()))));
        admin.set_data(
            vec![project("1"), project("2")],
            vec![
                message("m1", MessageStatus::Unread),
                message("m2", MessageStatus::Read),
                message("m3", MessageStatus::Unread),
            ],
        );
        admin
    }

    #[test]
    fn test_stats() {
        assert_eq!(
            panel().stats(),
            AdminStats {
                total_projects: 2,
                total_messages: 3,
                unread_messages: 2,
            }
        );
    }

    #[test]
    fn test_apply_saved_inserts_or_replaces() {
        let mut admin = panel();
        let mut edited = project("2");
        edited.title = "Renamed".into();
        admin.apply_saved(edited);
        assert_eq!(admin.projects().len(), 2);
        assert_eq!(admin.projects()[1].title, "Renamed");

        admin.apply_saved(project("3"));
        assert_eq!(admin.projects()[0].id, "3");
    }

    #[test]
    fn test_delete_flow_clamps_selection() {
        let mut admin = panel();
        admin.move_selection(5);
        assert_eq!(admin.project_selected(), 1);
        assert_eq!(admin.request_delete(), Some("Project 2"));

        let id = admin.take_pending_delete().unwrap();
        admin.remove_project(&id);
        assert_eq!(admin.project_selected(), 0);
        assert!(admin.pending_delete().is_none());
    }

    #[test]
    fn test_mark_responded_updates_locally() {
        let mut admin = panel();
        let at = Utc::now();
        admin.mark_responded("m1", "Thanks".into(), at);
        let m = &admin.messages()[0];
        assert_eq!(m.status, MessageStatus::Responded);
        assert_eq!(m.response.as_deref(), Some("Thanks"));
        assert_eq!(m.responded_at, Some(at));
        assert_eq!(admin.stats().unread_messages, 1);
    }

    #[test]
    fn test_replace_message_ignores_unknown() {
        let mut admin = panel();
        admin.replace_message(message("m1", MessageStatus::Read));
        admin.replace_message(message("zz", MessageStatus::Read));
        assert_eq!(admin.messages()[0].status, MessageStatus::Read);
        assert_eq!(admin.messages().len(), 3);
    }

    #[test]
    fn test_logout_clears_everything() {
        let mut admin = panel();
        admin.tab = AdminTab::Messages;
        admin.move_selection(2);
        admin.logout();
        assert!(!admin.is_logged_in());
        assert_eq!(admin.stats(), AdminStats::default());
        assert_eq!(admin.message_selected(), 0);
    }

    #[test]
    fn test_preview_follows_selection() {
        let mut admin = panel();
        let now = Instant::now();
        admin.sync_preview(CarouselOptions::default(), now);
        assert_eq!(admin.preview().unwrap().title(), "Project 1");

        admin.move_selection(1);
        admin.sync_preview(CarouselOptions::default(), now);
        assert_eq!(admin.preview().unwrap().title(), "Project 2");

        let mut edited = project("2");
        edited.images = vec!["a.jpg".to_string(), "b.jpg".to_string()].into();
        admin.apply_saved(edited);
        admin.sync_preview(CarouselOptions::default(), now);
        assert_eq!(admin.preview().unwrap().len(), 2);

        admin.logout();
        assert!(admin.preview().is_none());
    }

    #[test]
    fn test_move_selection_on_empty_tab() {
        let mut admin = AdminPanel::new(None);
        admin.move_selection(-1);
        admin.move_selection(1);
        assert_eq!(admin.project_selected(), 0);
    }
}
