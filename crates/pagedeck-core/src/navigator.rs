//! Paging state machine for a deck of panels
//!
//! `PageNavigator` owns the active index and the busy flag that gates new
//! transitions. Index operations return a [`Step`]; the caller starts a
//! transition only when `should_transition` is set and reports its completion
//! through [`PageNavigator::finish_transition`].
//!
//! Two states: idle and transitioning. Every request that arrives while a
//! transition is in flight is dropped, never queued.

use std::num::NonZeroUsize;

use tracing::{debug, warn};

use crate::config::Orientation;
use crate::error::{Error, Result};

/// Position of a panel within the deck strip, in renderer units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelOffset {
    pub top: u32,
    pub left: u32,
}

impl PanelOffset {
    /// Offset along the scroll axis
    pub fn along(&self, orientation: Orientation) -> u32 {
        match orientation {
            Orientation::Vertical => self.top,
            Orientation::Horizontal => self.left,
        }
    }
}

/// Geometry supplied by the rendering layer, queried lazily
pub trait PanelLayout {
    /// Offset of the panel at `index`, `None` when the index has no panel
    fn offset_of(&self, index: usize) -> Option<PanelOffset>;

    /// Length of the viewport along the scroll axis
    fn viewport_length(&self) -> u32;
}

/// Outcome of an index operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub index: usize,
    pub should_transition: bool,
}

impl Step {
    fn stay(index: usize) -> Self {
        Self {
            index,
            should_transition: false,
        }
    }

    fn go(index: usize) -> Self {
        Self {
            index,
            should_transition: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigatorState {
    pub current_index: usize,
    pub busy: bool,
    pub orientation: Orientation,
    pub loop_pages: bool,
}

impl NavigatorState {
    /// Create the initial state; a start index outside the deck falls back to 0
    pub fn init(
        deck_size: NonZeroUsize,
        start_index: usize,
        orientation: Orientation,
        loop_pages: bool,
    ) -> Self {
        let current_index = if start_index < deck_size.get() {
            start_index
        } else {
            warn!(
                start_index,
                panels = deck_size.get(),
                "start index outside the deck, starting at 0"
            );
            0
        };
        Self {
            current_index,
            busy: false,
            orientation,
            loop_pages,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PageNavigator {
    state: NavigatorState,
    deck_size: NonZeroUsize,
}

impl PageNavigator {
    pub fn new(
        deck_size: NonZeroUsize,
        start_index: usize,
        orientation: Orientation,
        loop_pages: bool,
    ) -> Self {
        Self {
            state: NavigatorState::init(deck_size, start_index, orientation, loop_pages),
            deck_size,
        }
    }

    pub fn state(&self) -> &NavigatorState {
        &self.state
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    #[inline]
    pub fn is_busy(&self) -> bool {
        self.state.busy
    }

    pub fn deck_size(&self) -> usize {
        self.deck_size.get()
    }

    pub fn orientation(&self) -> Orientation {
        self.state.orientation
    }

    fn last_index(&self) -> usize {
        self.deck_size.get() - 1
    }

    /// Move to the previous panel, wrapping to the last one when looping
    pub fn retreat(&mut self) -> Step {
        if self.state.busy {
            return Step::stay(self.state.current_index);
        }

        let index = if self.state.current_index > 0 {
            self.state.current_index - 1
        } else if self.state.loop_pages {
            self.last_index()
        } else {
            return Step::stay(self.state.current_index);
        };

        self.state.current_index = index;
        Step::go(index)
    }

    /// Move to the next panel, wrapping to the first one when looping
    pub fn advance(&mut self) -> Step {
        if self.state.busy {
            return Step::stay(self.state.current_index);
        }

        let index = if self.state.current_index < self.last_index() {
            self.state.current_index + 1
        } else if self.state.loop_pages {
            0
        } else {
            return Step::stay(self.state.current_index);
        };

        self.state.current_index = index;
        Step::go(index)
    }

    /// Jump to any panel; re-selecting the current panel still transitions
    pub fn jump_to(&mut self, target: usize) -> Result<Step> {
        if target >= self.deck_size.get() {
            return Err(Error::PanelOutOfRange {
                index: target,
                len: self.deck_size.get(),
            });
        }
        if self.state.busy {
            return Ok(Step::stay(self.state.current_index));
        }

        self.state.current_index = target;
        Ok(Step::go(target))
    }

    /// Snap to the nearest panel after the viewport changed size.
    ///
    /// `measured_offset_delta` is the distance between where the current panel
    /// now sits and where the viewport was left pointing. A drift larger than
    /// half the viewport moves one panel against the drift.
    pub fn resolve_resize_correction(
        &mut self,
        measured_offset_delta: i64,
        viewport_length: u32,
    ) -> Step {
        let current = self.state.current_index;
        if self.state.busy || current == 0 {
            return Step::stay(current);
        }

        if measured_offset_delta.unsigned_abs() * 2 <= u64::from(viewport_length) {
            return Step::stay(current);
        }

        let index = if measured_offset_delta > 0 {
            current - 1
        } else {
            (current + 1).min(self.last_index())
        };

        debug!(
            from = current,
            to = index,
            delta = measured_offset_delta,
            "resize correction"
        );
        self.state.current_index = index;
        Step::go(index)
    }

    /// Mark a transition as in flight
    pub fn begin_transition(&mut self) {
        self.state.busy = true;
    }

    /// Mark the in-flight transition as complete.
    /// Returns false when no transition was in flight.
    pub fn finish_transition(&mut self) -> bool {
        std::mem::replace(&mut self.state.busy, false)
    }
}
