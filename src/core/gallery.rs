//! Project gallery: the loaded project list, the category filter, and one
//! mounted carousel per visible project.
//!
//! Hiding a project (filter change, reload) unmounts its carousel, which
//! drops its autoplay timer and any open lightbox listener with it.

use super::carousel::{AutoplayInterval, Carousel, CarouselOptions, Direction, NavError};
use super::lightbox::{KeyListenerRegistry, Lightbox, LightboxKeyOutcome};
use crate::data::{Category, Project};
use crossterm::event::KeyCode;
use std::time::Instant;

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load projects";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Filters offered in the gallery, in display order
    pub fn choices() -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(Category::SELECTABLE.iter().cloned().map(CategoryFilter::Only))
            .collect()
    }

    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(category) => category.as_str(),
        }
    }

    pub fn matches(&self, project: &Project) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => &project.category == category,
        }
    }
}

/// Callback that asks the host to fetch projects again.
///
/// Injected by whoever owns the network side (the TUI loop, dev tooling)
/// so the gallery never reaches into global state.
pub struct ReloadHook(Box<dyn Fn()>);

impl ReloadHook {
    pub fn new(hook: impl Fn() + 'static) -> Self {
        Self(Box::new(hook))
    }

    pub(crate) fn fire(&self) {
        (self.0)()
    }
}

/// A mounted gallery card
pub struct GalleryItem {
    pub project: Project,
    pub carousel: Carousel,
    lightbox: Option<Lightbox>,
}

impl GalleryItem {
    fn mount(project: Project, options: CarouselOptions, now: Instant) -> Self {
        let carousel = Carousel::new(project.images.clone(), project.title.clone(), options, now);
        Self {
            project,
            carousel,
            lightbox: None,
        }
    }

    pub fn lightbox(&self) -> Option<&Lightbox> {
        self.lightbox.as_ref()
    }

    pub fn lightbox_open(&self) -> bool {
        self.lightbox.as_ref().is_some_and(Lightbox::is_open)
    }
}

pub struct Gallery {
    projects: Vec<Project>,
    state: LoadState,
    filter: CategoryFilter,
    items: Vec<GalleryItem>,
    selected: usize,
    options: CarouselOptions,
    listeners: KeyListenerRegistry,
    reload_hook: Option<ReloadHook>,
}

impl Gallery {
    pub fn new(options: CarouselOptions, listeners: KeyListenerRegistry) -> Self {
        Self {
            projects: Vec::new(),
            state: LoadState::Loading,
            filter: CategoryFilter::All,
            items: Vec::new(),
            selected: 0,
            options,
            listeners,
            reload_hook: None,
        }
    }

    pub fn set_reload_hook(&mut self, hook: ReloadHook) {
        self.reload_hook = Some(hook);
    }

    /// Mark as loading and ask the host to fetch again
    pub fn request_reload(&mut self) {
        self.state = LoadState::Loading;
        match &self.reload_hook {
            Some(hook) => {
                tracing::info!("Reloading project gallery");
                hook.fire();
            }
            None => tracing::warn!("Gallery reload requested but no reload hook is installed"),
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&GalleryItem> {
        self.items.get(self.selected)
    }

    pub fn set_projects(&mut self, projects: Vec<Project>, now: Instant) {
        tracing::info!("Gallery received {} project(s)", projects.len());
        self.projects = projects;
        self.state = LoadState::Loaded;
        self.remount(now);
    }

    /// Show the failure notice; the hidden cards are unmounted with it
    pub fn set_failed(&mut self, reason: &str) {
        tracing::error!("Error loading projects: {}", reason);
        self.state = LoadState::Failed(LOAD_FAILED_MESSAGE.to_string());
        self.projects.clear();
        self.unmount();
        self.selected = 0;
    }

    pub fn set_filter(&mut self, filter: CategoryFilter, now: Instant) {
        if self.filter != filter {
            tracing::debug!("Gallery filter: {}", filter.label());
            self.filter = filter;
            self.remount(now);
        }
    }

    /// Message for an empty filtered list
    pub fn empty_message(&self) -> String {
        match &self.filter {
            CategoryFilter::All => "No projects available".to_string(),
            CategoryFilter::Only(category) => format!("No projects in {} category", category),
        }
    }

    pub fn select_next(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1) % self.items.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + self.items.len() - 1) % self.items.len();
        }
    }

    /// Arrow navigation on the selected card's carousel
    pub fn navigate_selected(&mut self, direction: Direction, now: Instant) {
        if let Some(item) = self.items.get_mut(self.selected) {
            item.carousel.navigate(direction, now);
        }
    }

    /// Dot selection on the selected card's carousel
    pub fn jump_selected(&mut self, index: usize, now: Instant) -> Result<(), NavError> {
        match self.items.get_mut(self.selected) {
            Some(item) => item.carousel.select(index, now),
            None => Err(NavError::OutOfRange { index, len: 0 }),
        }
    }

    /// Open the selected card's lightbox at its carousel position.
    ///
    /// Returns `false` when there is nothing to show.
    pub fn open_lightbox(&mut self) -> bool {
        let listeners = self.listeners.clone();
        let Some(item) = self.items.get_mut(self.selected) else {
            return false;
        };
        let Some(request) = item.carousel.open_current() else {
            return false;
        };

        let images = item.carousel.images().clone();
        let title = item.project.title.clone();
        let lightbox = item
            .lightbox
            .get_or_insert_with(|| Lightbox::new(images, title));

        match lightbox.open_at(request.index, &listeners) {
            Ok(()) => {
                debug_assert!(listeners.active_count() <= 1);
                tracing::debug!("Key listeners held by {:?}", listeners.owners());
                true
            }
            Err(e) => {
                tracing::warn!("Could not open lightbox: {}", e);
                false
            }
        }
    }

    pub fn open_lightbox_item(&self) -> Option<&GalleryItem> {
        self.items.iter().find(|item| item.lightbox_open())
    }

    pub fn is_lightbox_open(&self) -> bool {
        self.open_lightbox_item().is_some()
    }

    pub fn close_lightbox(&mut self) {
        for item in &mut self.items {
            if let Some(lightbox) = item.lightbox.as_mut() {
                lightbox.close();
            }
        }
    }

    /// Route a key to whichever lightbox holds the listener
    pub fn lightbox_key(&mut self, code: KeyCode) -> LightboxKeyOutcome {
        if !self.listeners.is_listening() {
            return LightboxKeyOutcome::Ignored;
        }
        self.items
            .iter_mut()
            .filter_map(|item| item.lightbox.as_mut())
            .find(|lightbox| lightbox.is_open())
            .map(|lightbox| lightbox.handle_key(code))
            .unwrap_or(LightboxKeyOutcome::Ignored)
    }

    pub fn autoplay(&self) -> bool {
        self.options.autoplay
    }

    /// Switch autoplay for every card, including ones mounted later
    pub fn set_autoplay(&mut self, enabled: bool, now: Instant) {
        self.options.autoplay = enabled;
        for item in &mut self.items {
            item.carousel.set_autoplay(enabled, now);
        }
    }

    pub fn interval(&self) -> AutoplayInterval {
        self.options.interval
    }

    /// Change the autoplay interval for every card, including ones mounted later
    pub fn set_interval(&mut self, interval: AutoplayInterval, now: Instant) {
        self.options.interval = interval;
        for item in &mut self.items {
            item.carousel.set_interval(interval, now);
        }
    }

    /// Drive every mounted carousel's autoplay
    pub fn tick(&mut self, now: Instant) {
        for item in &mut self.items {
            item.carousel.tick(now);
        }
    }

    /// Earliest autoplay deadline across mounted cards
    pub fn next_tick_at(&self) -> Option<Instant> {
        self.items
            .iter()
            .filter_map(|item| item.carousel.next_tick_at())
            .min()
    }

    /// Outgoing cards stop their timers and release the key listener
    fn unmount(&mut self) {
        self.close_lightbox();
        for item in &mut self.items {
            item.carousel.cancel_autoplay();
        }
        self.items.clear();
    }

    /// Rebuild cards for the visible projects; old carousels are dropped
    fn remount(&mut self, now: Instant) {
        let keep_id = self
            .items
            .get(self.selected)
            .map(|item| item.project.id.clone());

        self.unmount();
        self.items = self
            .projects
            .iter()
            .filter(|p| self.filter.matches(p))
            .cloned()
            .map(|p| GalleryItem::mount(p, self.options, now))
            .collect();

        self.selected = keep_id
            .and_then(|id| self.items.iter().position(|item| item.project.id == id))
            .unwrap_or(0);
    }
}
