//! Full-screen lightbox over a carousel's images.
//!
//! The lightbox mirrors the carousel's [`ImageSequence`] but keeps its own
//! index once opened. While open it holds a [`ListenerGuard`] from the
//! [`KeyListenerRegistry`]; the guard is the only way arrow keys reach it,
//! and dropping the guard (close, reopen, or dropping the lightbox)
//! unregisters it.

use super::carousel::{step_index, Direction, NavError};
use crate::data::ImageSequence;
use crossterm::event::KeyCode;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Default)]
struct Registrations {
    next_id: u64,
    active: BTreeMap<ListenerId, String>,
}

/// Tracks which widgets currently listen for global arrow keys.
///
/// Cloning yields a handle onto the same registry.
#[derive(Debug, Clone, Default)]
pub struct KeyListenerRegistry {
    inner: Rc<RefCell<Registrations>>,
}

impl KeyListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; it stays registered until the guard is dropped
    pub fn register(&self, owner: &str) -> ListenerGuard {
        let mut regs = self.inner.borrow_mut();
        let id = ListenerId(regs.next_id);
        regs.next_id += 1;
        regs.active.insert(id, owner.to_string());
        tracing::debug!("Key listener {:?} registered for '{}'", id, owner);

        ListenerGuard {
            id,
            registry: Rc::clone(&self.inner),
        }
    }

    pub fn active_count(&self) -> usize {
        self.inner.borrow().active.len()
    }

    pub fn is_listening(&self) -> bool {
        !self.inner.borrow().active.is_empty()
    }

    /// Owners of the active listeners, oldest first
    pub fn owners(&self) -> Vec<String> {
        self.inner.borrow().active.values().cloned().collect()
    }
}

/// Scoped registration; unregisters on drop
#[derive(Debug)]
pub struct ListenerGuard {
    id: ListenerId,
    registry: Rc<RefCell<Registrations>>,
}

impl ListenerGuard {
    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Ok(mut regs) = self.registry.try_borrow_mut() {
            regs.active.remove(&self.id);
            tracing::debug!("Key listener {:?} released", self.id);
        }
    }
}

/// What a key did to an open lightbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxKeyOutcome {
    Moved,
    Closed,
    Ignored,
}

pub struct Lightbox {
    images: ImageSequence,
    title: String,
    current: usize,
    listener: Option<ListenerGuard>,
}

impl Lightbox {
    /// Create a closed lightbox over `images`
    pub fn new(images: ImageSequence, title: impl Into<String>) -> Self {
        Self {
            images,
            title: title.into(),
            current: 0,
            listener: None,
        }
    }

    /// Open at a snapshot index. Any previous listener is released before
    /// the new one is registered.
    pub fn open_at(&mut self, index: usize, registry: &KeyListenerRegistry) -> Result<(), NavError> {
        if index >= self.images.len() {
            return Err(NavError::OutOfRange {
                index,
                len: self.images.len(),
            });
        }

        self.listener = None;
        self.current = index;
        self.listener = Some(registry.register(&self.title));
        tracing::info!("Lightbox '{}' opened at image {}", self.title, index + 1);
        Ok(())
    }

    pub fn close(&mut self) {
        if self.listener.take().is_some() {
            tracing::info!("Lightbox '{}' closed", self.title);
        }
    }

    pub fn is_open(&self) -> bool {
        self.listener.is_some()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_image(&self) -> Option<&str> {
        self.images.get(self.current).map(String::as_str)
    }

    /// 1-based position, only meaningful with more than one image
    pub fn position(&self) -> Option<(usize, usize)> {
        (self.images.len() > 1).then(|| (self.current + 1, self.images.len()))
    }

    pub fn advance(&mut self, direction: Direction) {
        if let Some(next) = step_index(self.current, self.images.len(), direction) {
            self.current = next;
        }
    }

    /// Keyboard handling; does nothing unless the lightbox holds a listener
    pub fn handle_key(&mut self, code: KeyCode) -> LightboxKeyOutcome {
        if !self.is_open() {
            return LightboxKeyOutcome::Ignored;
        }

        match code {
            KeyCode::Right => {
                self.advance(Direction::Forward);
                LightboxKeyOutcome::Moved
            }
            KeyCode::Left => {
                self.advance(Direction::Backward);
                LightboxKeyOutcome::Moved
            }
            KeyCode::Home => {
                self.current = 0;
                LightboxKeyOutcome::Moved
            }
            KeyCode::End => {
                self.current = self.images.len().saturating_sub(1);
                LightboxKeyOutcome::Moved
            }
            KeyCode::Esc | KeyCode::Char('q') => {
                self.close();
                LightboxKeyOutcome::Closed
            }
            _ => LightboxKeyOutcome::Ignored,
        }
    }
}

impl std::fmt::Debug for Lightbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lightbox")
            .field("title", &self.title)
            .field("current", &self.current)
            .field("open", &self.is_open())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::carousel::{Carousel, CarouselOptions};
    use std::time::Instant;

    fn images(n: usize) -> ImageSequence {
        (0..n).map(|i| format!("img{}.jpg", i)).collect::<Vec<_>>().into()
    }

    #[test]
    fn test_open_snapshots_index_independently() {
        let now = Instant::now();
        let registry = KeyListenerRegistry::new();
        let seq = images(4);
        let mut carousel = Carousel::new(
            seq.clone(),
            "Ward",
            CarouselOptions {
                autoplay: false,
                ..CarouselOptions::default()
            },
            now,
        );
        carousel.jump_to(2).unwrap();

        let mut lightbox = Lightbox::new(seq, "Ward");
        let request = carousel.open_current().unwrap();
        lightbox.open_at(request.index, &registry).unwrap();
        assert_eq!(lightbox.current_index(), 2);

        carousel.advance(Direction::Forward);
        carousel.advance(Direction::Forward);
        assert_eq!(lightbox.current_index(), 2);

        lightbox.advance(Direction::Backward);
        assert_eq!(carousel.current_index(), Some(0));
        assert_eq!(lightbox.current_index(), 1);
    }

    #[test]
    fn test_reopen_resets_to_new_snapshot() {
        let registry = KeyListenerRegistry::new();
        let mut lightbox = Lightbox::new(images(5), "Villa");

        lightbox.open_at(1, &registry).unwrap();
        lightbox.advance(Direction::Forward);
        lightbox.advance(Direction::Forward);
        assert_eq!(lightbox.current_index(), 3);
        lightbox.close();

        lightbox.open_at(4, &registry).unwrap();
        assert_eq!(lightbox.current_index(), 4);
    }

    #[test]
    fn test_listener_only_while_open() {
        let registry = KeyListenerRegistry::new();
        let mut lightbox = Lightbox::new(images(3), "Clinic");
        assert_eq!(registry.active_count(), 0);

        for round in 0..5 {
            lightbox.open_at(round % 3, &registry).unwrap();
            assert_eq!(registry.active_count(), 1);
            lightbox.close();
            assert_eq!(registry.active_count(), 0);
        }

        lightbox.open_at(0, &registry).unwrap();
        lightbox.open_at(1, &registry).unwrap();
        assert_eq!(registry.active_count(), 1);
    }

    #[test]
    fn test_drop_releases_listener() {
        let registry = KeyListenerRegistry::new();
        {
            let mut lightbox = Lightbox::new(images(2), "Office");
            lightbox.open_at(0, &registry).unwrap();
            assert!(registry.is_listening());
            assert_eq!(registry.owners(), vec!["Office".to_string()]);
        }
        assert!(!registry.is_listening());
    }

    #[test]
    fn test_keys_ignored_when_closed() {
        let registry = KeyListenerRegistry::new();
        let mut lightbox = Lightbox::new(images(3), "t");
        assert_eq!(lightbox.handle_key(KeyCode::Right), LightboxKeyOutcome::Ignored);
        assert_eq!(lightbox.current_index(), 0);

        lightbox.open_at(0, &registry).unwrap();
        assert_eq!(lightbox.handle_key(KeyCode::Right), LightboxKeyOutcome::Moved);
        assert_eq!(lightbox.handle_key(KeyCode::Right), LightboxKeyOutcome::Moved);
        assert_eq!(lightbox.handle_key(KeyCode::Right), LightboxKeyOutcome::Moved);
        assert_eq!(lightbox.current_index(), 0);
        assert_eq!(lightbox.handle_key(KeyCode::Left), LightboxKeyOutcome::Moved);
        assert_eq!(lightbox.current_index(), 2);

        assert_eq!(lightbox.handle_key(KeyCode::Esc), LightboxKeyOutcome::Closed);
        assert!(!lightbox.is_open());
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn test_open_rejects_out_of_range() {
        let registry = KeyListenerRegistry::new();
        let mut lightbox = Lightbox::new(images(0), "empty");
        assert_eq!(
            lightbox.open_at(0, &registry),
            Err(NavError::OutOfRange { index: 0, len: 0 })
        );
        assert!(!lightbox.is_open());
        assert_eq!(registry.active_count(), 0);

        let mut lightbox = Lightbox::new(images(2), "two");
        assert!(lightbox.open_at(2, &registry).is_err());
        assert!(!lightbox.is_open());
    }

    #[test]
    fn test_single_image_position_hidden() {
        let registry = KeyListenerRegistry::new();
        let mut lightbox = Lightbox::new(images(1), "solo");
        lightbox.open_at(0, &registry).unwrap();
        assert_eq!(lightbox.position(), None);
        lightbox.handle_key(KeyCode::Right);
        assert_eq!(lightbox.current_index(), 0);
    }
}
