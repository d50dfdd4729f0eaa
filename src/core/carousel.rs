//! Carousel controller for a project's image sequence.
//!
//! Owns the position index and the autoplay schedule. Time is passed in
//! through [`Carousel::tick`], so the schedule lives inside the carousel and
//! cannot fire once the carousel is gone.
//!
//! Manual navigation leaves the schedule alone by default: the next automatic
//! advance still happens at its original deadline. Set
//! `reset_on_interaction` to restart the countdown after each manual move.

use crate::data::ImageSequence;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Placeholder shown when a project has no images
pub const EMPTY_PLACEHOLDER: &str = "No images available";

/// Default autoplay interval for a standalone carousel
pub const DEFAULT_INTERVAL_MS: u64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum NavError {
    #[error("image index {index} is out of range ({len} images)")]
    OutOfRange { index: usize, len: usize },
}

/// Wraparound step shared by the carousel and the lightbox.
///
/// Returns `None` for an empty sequence instead of dividing by zero.
pub fn step_index(index: usize, len: usize, direction: Direction) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let index = index % len;
    Some(match direction {
        Direction::Forward => (index + 1) % len,
        Direction::Backward => (index + len - 1) % len,
    })
}

/// Positive autoplay interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoplayInterval(Duration);

impl AutoplayInterval {
    /// `None` for zero, which would make the timer spin
    pub fn from_millis(ms: u64) -> Option<Self> {
        (ms > 0).then(|| Self(Duration::from_millis(ms)))
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }
}

impl Default for AutoplayInterval {
    fn default() -> Self {
        Self(Duration::from_millis(DEFAULT_INTERVAL_MS))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselOptions {
    pub autoplay: bool,
    pub interval: AutoplayInterval,
    pub reset_on_interaction: bool,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            autoplay: true,
            interval: AutoplayInterval::default(),
            reset_on_interaction: false,
        }
    }
}

/// Recurring deadline; exists only while autoplay can do something
#[derive(Debug, Clone, Copy)]
struct AutoplayTimer {
    interval: Duration,
    next_due: Instant,
}

/// Request for the lightbox to open at a snapshot of the carousel position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightboxRequest {
    pub index: usize,
}

/// Everything the renderer needs, with the show/hide rules already applied
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselView<'a> {
    pub title: &'a str,
    /// `None` means render [`EMPTY_PLACEHOLDER`]
    pub image: Option<&'a str>,
    pub alt_text: Option<String>,
    /// 1-based position and total, only when there is more than one image
    pub position: Option<(usize, usize)>,
    /// Previous/next arrows
    pub show_controls: bool,
    /// One entry per image, `true` for the current one; empty when hidden
    pub dots: Vec<bool>,
}

pub struct Carousel {
    images: ImageSequence,
    title: String,
    current: Option<usize>,
    options: CarouselOptions,
    timer: Option<AutoplayTimer>,
}

impl Carousel {
    pub fn new(
        images: ImageSequence,
        title: impl Into<String>,
        options: CarouselOptions,
        now: Instant,
    ) -> Self {
        let current = (!images.is_empty()).then_some(0);
        let mut carousel = Self {
            images,
            title: title.into(),
            current,
            options,
            timer: None,
        };
        carousel.reschedule(now);
        carousel
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn images(&self) -> &ImageSequence {
        &self.images
    }

    pub fn options(&self) -> CarouselOptions {
        self.options
    }

    /// `None` exactly when there are no images
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_image(&self) -> Option<&str> {
        self.current
            .and_then(|idx| self.images.get(idx))
            .map(String::as_str)
    }

    /// Move one image forward or back with wraparound
    pub fn advance(&mut self, direction: Direction) {
        if let Some(current) = self.current {
            self.current = step_index(current, self.images.len(), direction);
        }
    }

    /// Jump straight to `index`; out-of-range input leaves the state untouched
    pub fn jump_to(&mut self, index: usize) -> Result<(), NavError> {
        self.check_index(index)?;
        self.current = Some(index);
        Ok(())
    }

    /// Ask for the lightbox to open at `index`
    pub fn open(&self, index: usize) -> Result<LightboxRequest, NavError> {
        self.check_index(index)?;
        Ok(LightboxRequest { index })
    }

    /// Ask for the lightbox at the image currently shown
    pub fn open_current(&self) -> Option<LightboxRequest> {
        self.current.map(|index| LightboxRequest { index })
    }

    /// Manual arrow navigation
    pub fn navigate(&mut self, direction: Direction, now: Instant) {
        self.advance(direction);
        self.after_interaction(now);
    }

    /// Manual dot selection
    pub fn select(&mut self, index: usize, now: Instant) -> Result<(), NavError> {
        self.jump_to(index)?;
        self.after_interaction(now);
        Ok(())
    }

    pub fn set_autoplay(&mut self, enabled: bool, now: Instant) {
        if self.options.autoplay != enabled {
            self.options.autoplay = enabled;
            self.reschedule(now);
        }
    }

    /// Recreates the timer when the interval actually changes
    pub fn set_interval(&mut self, interval: AutoplayInterval, now: Instant) {
        if self.options.interval != interval {
            self.options.interval = interval;
            self.reschedule(now);
        }
    }

    /// Whether an autoplay timer currently exists
    pub fn autoplay_active(&self) -> bool {
        self.timer.is_some()
    }

    pub fn next_tick_at(&self) -> Option<Instant> {
        self.timer.map(|t| t.next_due)
    }

    /// Fire every autoplay deadline that has passed by `now`.
    ///
    /// Returns how many intervals elapsed. Each one counts as one forward
    /// step, so a late call catches up instead of dropping ticks.
    pub fn tick(&mut self, now: Instant) -> u32 {
        let Some(timer) = self.timer.as_mut() else {
            return 0;
        };
        if now < timer.next_due {
            return 0;
        }

        let overdue = now.duration_since(timer.next_due);
        let elapsed = overdue.as_nanos() / timer.interval.as_nanos().max(1) + 1;
        let elapsed = u32::try_from(elapsed).unwrap_or(u32::MAX);
        timer.next_due += timer.interval * elapsed;

        // Whole cycles land back on the same image
        let len = self.images.len();
        let steps = (elapsed as usize) % len.max(1);
        for _ in 0..steps {
            self.advance(Direction::Forward);
        }

        tracing::trace!(
            "Carousel '{}' autoplay advanced {} interval(s) to {:?}",
            self.title,
            elapsed,
            self.current
        );
        elapsed
    }

    /// Stop autoplay for good (until options change)
    pub fn cancel_autoplay(&mut self) {
        if self.timer.take().is_some() {
            tracing::trace!("Carousel '{}' autoplay cancelled", self.title);
        }
    }

    pub fn view(&self) -> CarouselView<'_> {
        let len = self.images.len();
        let multiple = len > 1;
        let image = self.current_image();

        CarouselView {
            title: &self.title,
            image,
            alt_text: self
                .current
                .map(|idx| format!("{} - Image {}", self.title, idx + 1)),
            position: if multiple {
                self.current.map(|idx| (idx + 1, len))
            } else {
                None
            },
            show_controls: multiple,
            dots: if multiple {
                (0..len).map(|i| Some(i) == self.current).collect()
            } else {
                Vec::new()
            },
        }
    }

    fn check_index(&self, index: usize) -> Result<(), NavError> {
        if index < self.images.len() {
            Ok(())
        } else {
            Err(NavError::OutOfRange {
                index,
                len: self.images.len(),
            })
        }
    }

    fn after_interaction(&mut self, now: Instant) {
        if self.options.reset_on_interaction && self.timer.is_some() {
            self.reschedule(now);
        }
    }

    /// Cancel any existing timer and create a fresh one if autoplay applies
    fn reschedule(&mut self, now: Instant) {
        self.timer = None;
        if self.options.autoplay && self.images.len() > 1 {
            let interval = self.options.interval.as_duration();
            self.timer = Some(AutoplayTimer {
                interval,
                next_due: now + interval,
            });
        }
    }
}

impl std::fmt::Debug for Carousel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Carousel")
            .field("title", &self.title)
            .field("len", &self.images.len())
            .field("current", &self.current)
            .field("autoplay_active", &self.timer.is_some())
            .finish()
    }
}
