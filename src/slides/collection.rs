//! The slide grid and the pairwise matching protocol.
//!
//! ## Selection cycle
//!
//! ```text
//! Idle --select--> OneSelected --select--> TwoSelected --check--> Idle
//! ```
//!
//! Selecting the second slide starts the hide timer. Resolving the pair
//! (`check_if_matched`) disables selection; the hide timer turns every
//! unmatched slide face down again and re-enables it. The opening
//! memorize phase works the same way with every slide face up.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use std::time::Duration;
use tracing::{debug, info};

use crate::core::{Category, Error, GameConfig, GameRng, Result};
use crate::events::{GameEvent, Outbox};
use crate::timing::{Scheduler, TimerHandle, TimerKind};

use super::picture::{Picture, PictureId};
use super::slide::{Slide, SlideView};
use super::source::ImageSource;

/// Ordered grid of slides for one session.
#[derive(Clone, Debug)]
pub struct SlideCollection {
    slides: Vec<Slide>,
    selected: SmallVec<[PictureId; 2]>,
    can_select: bool,
    placeholder: String,
    memorize_delay: Duration,
    peek_delay: Duration,
    memorize_timer: Option<TimerHandle>,
    hide_timer: Option<TimerHandle>,
    events: Outbox,
}

impl SlideCollection {
    /// Deal a new board for `category`.
    ///
    /// Takes the first `pair_count` distinct images from `source`, builds a
    /// pair of slides for each, turns every slide face up for the memorize
    /// phase and shuffles the result.
    pub fn create(
        source: &dyn ImageSource,
        category: Category,
        config: &GameConfig,
        rng: &mut GameRng,
    ) -> Result<Self> {
        let images = distinct(source.images(category)?);
        if images.len() < config.pair_count {
            return Err(Error::ResourceNotFound {
                category,
                found: images.len(),
                required: config.pair_count,
            });
        }

        let pictures = images
            .iter()
            .take(config.pair_count)
            .zip(0u32..)
            .flat_map(|(image, pair)| Picture::pair(pair, image))
            .collect();

        let mut collection = Self::from_pictures(pictures, config);
        collection.can_select = false;
        for slide in &mut collection.slides {
            slide.peek();
        }
        rng.scramble(&mut collection.slides, config.shuffle_rounds);

        info!(%category, slides = collection.slides.len(), "slides created");
        Ok(collection)
    }

    /// Lay out `pictures` face down, in the given order, ready to select.
    pub fn from_pictures(pictures: Vec<Picture>, config: &GameConfig) -> Self {
        Self {
            slides: pictures.into_iter().map(Slide::new).collect(),
            selected: SmallVec::new(),
            can_select: true,
            placeholder: config.placeholder.clone(),
            memorize_delay: config.memorize_delay,
            peek_delay: config.peek_delay,
            memorize_timer: None,
            hide_timer: None,
            events: Outbox::new(),
        }
    }

    // === Accessors ===

    /// Slides in board order.
    #[must_use]
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    #[must_use]
    pub fn slide(&self, id: PictureId) -> Option<&Slide> {
        self.slides.iter().find(|s| s.id() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Can the player pick a slide right now?
    #[must_use]
    pub fn can_select(&self) -> bool {
        self.can_select
    }

    /// False only while two selections are waiting to be compared.
    #[must_use]
    pub fn slides_active(&self) -> bool {
        self.selected.len() < 2
    }

    /// Current selections, in the order they were made.
    #[must_use]
    pub fn selected(&self) -> &[PictureId] {
        &self.selected
    }

    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Every slide has been matched.
    #[must_use]
    pub fn all_matched(&self) -> bool {
        self.slides.iter().all(Slide::is_matched)
    }

    /// Render-ready copies of every slide, in board order.
    #[must_use]
    pub fn views(&self) -> Vec<SlideView> {
        self.slides.iter().map(|s| s.view(&self.placeholder)).collect()
    }

    // === Phases ===

    /// Start the memorize phase timer.
    pub fn memorize(&mut self, scheduler: &mut impl Scheduler) {
        if let Some(old) = self.memorize_timer.take() {
            scheduler.cancel(old);
        }
        self.memorize_timer = Some(scheduler.schedule(TimerKind::Memorize, self.memorize_delay));
    }

    /// Pick a slide.
    ///
    /// Matched or face-up slides, unknown ids and a third pick are ignored.
    /// Returns true if the slide was taken as a selection.
    pub fn select_slide(&mut self, id: PictureId, scheduler: &mut impl Scheduler) -> bool {
        if self.selected.len() >= 2 || self.selected.contains(&id) {
            return false;
        }
        let Some(index) = self.index_of(id) else {
            return false;
        };
        if !self.slides[index].is_selectable() {
            return false;
        }

        self.slides[index].peek();
        self.selected.push(id);
        self.events.push(GameEvent::SlideChanged { id });
        debug!(%id, selected = self.selected.len(), "slide selected");

        if self.selected.len() == 2 {
            self.start_hide_timer(scheduler);
        }
        true
    }

    /// Compare the two selected slides and record the result.
    ///
    /// A match needs adjacent ids and the same displayed image. Both slides
    /// are marked matched or failed, the selection is cleared and selection
    /// stays disabled until the hide timer fires.
    ///
    /// Panics unless exactly two slides are selected.
    pub fn check_if_matched(&mut self) -> bool {
        assert!(
            self.selected.len() == 2,
            "check_if_matched needs two selected slides, have {}",
            self.selected.len()
        );
        let (first, second) = (self.selected[0], self.selected[1]);
        let (a, b) = (self.index_of_selected(first), self.index_of_selected(second));

        let matched = first.is_adjacent(second)
            && self.slides[a].display_image(&self.placeholder)
                == self.slides[b].display_image(&self.placeholder);

        for index in [a, b] {
            if matched {
                self.slides[index].mark_matched();
            } else {
                self.slides[index].mark_failed();
            }
        }

        self.selected.clear();
        self.set_can_select(false);
        self.events.push(GameEvent::SlideChanged { id: first });
        self.events.push(GameEvent::SlideChanged { id: second });
        self.events.push(GameEvent::PairResolved { first, second, matched });
        debug!(%first, %second, matched, "pair resolved");
        matched
    }

    /// Show every unmatched slide as failed and stop the hide timer.
    pub fn reveal_unmatched(&mut self, scheduler: &mut impl Scheduler) {
        if let Some(handle) = self.hide_timer.take() {
            scheduler.cancel(handle);
        }
        for slide in self.slides.iter_mut().filter(|s| !s.is_matched()) {
            slide.mark_failed();
            slide.peek();
            self.events.push(GameEvent::SlideChanged { id: slide.id() });
        }
    }

    /// Cancel any pending phase timers.
    pub fn cancel_timers(&mut self, scheduler: &mut impl Scheduler) {
        for handle in [self.memorize_timer.take(), self.hide_timer.take()].into_iter().flatten() {
            scheduler.cancel(handle);
        }
    }

    /// Handle a fired timer. Timers this collection does not own are ignored.
    ///
    /// Returns true if the timer belonged to this collection.
    pub fn on_timer(&mut self, handle: TimerHandle, kind: TimerKind) -> bool {
        match kind {
            TimerKind::Memorize if self.memorize_timer == Some(handle) => {
                self.memorize_timer = None;
                self.end_memorize();
                true
            }
            TimerKind::Hide if self.hide_timer == Some(handle) => {
                self.hide_timer = None;
                self.hide_unmatched();
                true
            }
            _ => false,
        }
    }

    /// Take queued events.
    pub fn take_events(&mut self) -> Outbox {
        std::mem::take(&mut self.events)
    }

    // === Internals ===

    fn index_of(&self, id: PictureId) -> Option<usize> {
        self.slides.iter().position(|s| s.id() == id)
    }

    fn index_of_selected(&self, id: PictureId) -> usize {
        self.index_of(id)
            .unwrap_or_else(|| panic!("selected slide {id} is not on the board"))
    }

    fn start_hide_timer(&mut self, scheduler: &mut impl Scheduler) {
        if let Some(old) = self.hide_timer.take() {
            scheduler.cancel(old);
        }
        self.hide_timer = Some(scheduler.schedule(TimerKind::Hide, self.peek_delay));
    }

    fn end_memorize(&mut self) {
        for slide in &mut self.slides {
            slide.close_peek();
            self.events.push(GameEvent::SlideChanged { id: slide.id() });
        }
        self.set_can_select(true);
        debug!("memorize phase over");
    }

    fn hide_unmatched(&mut self) {
        let mut any_unmatched = false;
        for slide in self.slides.iter_mut().filter(|s| !s.is_matched()) {
            slide.close_peek();
            any_unmatched = true;
            self.events.push(GameEvent::SlideChanged { id: slide.id() });
        }
        if any_unmatched {
            self.set_can_select(true);
        }
    }

    fn set_can_select(&mut self, can_select: bool) {
        if self.can_select != can_select {
            self.can_select = can_select;
            self.events.push(GameEvent::SelectionEnabled(can_select));
        }
    }
}

/// Drop repeated image references, keeping first occurrences in order.
fn distinct(images: Vec<String>) -> Vec<String> {
    let mut seen = FxHashSet::default();
    images.into_iter().filter(|image| seen.insert(image.clone())).collect()
}
