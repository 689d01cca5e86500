//! One open deck: navigator, geometry, viewport animation and pagination
//!
//! Every input path (wheel, keys, pagination clicks, resize correction and
//! the `next`/`prev` control surface) ends in [`DeckSession::apply`], which
//! starts at most one transition at a time.

use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use tracing::{debug, warn};

use pagedeck_core::{AppConfig, Debouncer, Deck, PageNavigator, Panel, PanelLayout, Step};

use crate::layout::DeckLayout;
use crate::pagination::Pagination;
use crate::scroll::{AnimationConfigExt, TransitionTiming, ViewportAnimator};
use crate::transition::{select_strategy, TransitionCompletionStrategy};

/// Lifecycle callback receiving the target panel and its index
pub type TransitionHook = Box<dyn FnMut(&Panel, usize)>;

/// Callbacks run immediately before and after each transition
#[derive(Default)]
pub struct TransitionHooks {
    pub before: Option<TransitionHook>,
    pub after: Option<TransitionHook>,
}

impl TransitionHooks {
    /// Hooks that log each transition of the deck titled `deck`
    pub fn logging(deck: &str) -> Self {
        let before_deck = deck.to_string();
        let after_deck = deck.to_string();
        Self {
            before: Some(Box::new(move |panel: &Panel, index: usize| {
                debug!(deck = %before_deck, panel = %panel.id, index, "leaving for panel");
            })),
            after: Some(Box::new(move |panel: &Panel, index: usize| {
                debug!(deck = %after_deck, panel = %panel.id, index, "arrived at panel");
            })),
        }
    }
}

pub struct DeckSession {
    deck: Deck,
    navigator: PageNavigator,
    layout: DeckLayout,
    animator: ViewportAnimator,
    completion: Box<dyn TransitionCompletionStrategy>,
    pagination: Option<Pagination>,
    resize: Debouncer<()>,
    timing: TransitionTiming,
    hooks: TransitionHooks,
    /// Start index still has to be scrolled into view once the viewport is known
    pending_placement: bool,
}

impl DeckSession {
    pub fn new(deck: Deck, config: &AppConfig) -> Self {
        let navigator = PageNavigator::new(
            deck.size(),
            config.deck.start_index,
            config.deck.orientation,
            config.deck.loop_pages,
        );
        let mut animator = ViewportAnimator::new();
        let completion = select_strategy(config.ui.transition_events, &mut animator);
        let pagination = config.deck.pagination.then(|| {
            Pagination::new(deck.len(), navigator.current_index(), config.deck.orientation)
        });

        debug!(
            deck = %deck.title,
            panels = deck.len(),
            start = navigator.current_index(),
            completion = completion.name(),
            "deck session created"
        );

        Self {
            layout: DeckLayout::new(config.deck.orientation, deck.len()),
            pending_placement: navigator.current_index() != 0,
            deck,
            navigator,
            animator,
            completion,
            pagination,
            resize: Debouncer::new(Duration::from_millis(config.resize.debounce_ms)),
            timing: config.animation.timing(),
            hooks: TransitionHooks::default(),
        }
    }

    pub fn with_hooks(mut self, hooks: TransitionHooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn set_hooks(&mut self, hooks: TransitionHooks) {
        self.hooks = hooks;
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn navigator(&self) -> &PageNavigator {
        &self.navigator
    }

    pub fn layout(&self) -> &DeckLayout {
        &self.layout
    }

    pub fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }

    pub fn pagination_mut(&mut self) -> Option<&mut Pagination> {
        self.pagination.as_mut()
    }

    /// Current viewport offset along the scroll axis
    pub fn offset(&self) -> u32 {
        self.animator.current()
    }

    pub fn is_busy(&self) -> bool {
        self.navigator.is_busy()
    }

    /// Whether frames should be drawn at animation rate
    pub fn needs_update(&self) -> bool {
        self.animator.is_animating() || self.resize.is_pending()
    }

    /// Record the area the deck is drawn into.
    ///
    /// The first measurement scrolls a non-zero start index into view.
    pub fn set_viewport(&mut self, area: Rect, now: Instant) {
        self.layout.set_viewport(area);

        if self.pending_placement && self.layout.is_measured() {
            self.pending_placement = false;
            let step = Step {
                index: self.navigator.current_index(),
                should_transition: true,
            };
            self.apply(step, now, true);
        }
    }

    /// Advance to the next panel
    pub fn next(&mut self, now: Instant) {
        let step = self.navigator.advance();
        self.apply(step, now, false);
    }

    /// Retreat to the previous panel
    pub fn prev(&mut self, now: Instant) {
        let step = self.navigator.retreat();
        self.apply(step, now, false);
    }

    /// Jump to the panel at `index`
    pub fn jump_to(&mut self, index: usize, now: Instant) -> pagedeck_core::Result<()> {
        let step = self.navigator.jump_to(index)?;
        self.apply(step, now, false);
        Ok(())
    }

    /// Wheel input: positive deltas go back, negative deltas go forward
    pub fn on_wheel(&mut self, delta: i32, now: Instant) {
        match delta.signum() {
            1 => self.prev(now),
            -1 => self.next(now),
            _ => {}
        }
    }

    /// Restart the resize quiescence window
    pub fn on_resize(&mut self) {
        self.resize.signal(());
    }

    /// Advance animations, observe completion and run due resize corrections.
    /// Returns the current viewport offset.
    pub fn tick(&mut self, now: Instant) -> u32 {
        self.animator.update(now);

        if self.completion.poll_complete() {
            self.complete_transition();
        }

        if self.resize.try_recv().is_some() {
            self.correct_after_resize(now);
        }

        self.animator.current()
    }

    /// Start the transition described by `step`, if any.
    /// `initial` placements leave the pagination labels untouched.
    fn apply(&mut self, step: Step, now: Instant, initial: bool) {
        if !step.should_transition {
            return;
        }
        let Some(target) = self.layout.axis_offset(step.index) else {
            warn!(index = step.index, "no geometry for panel");
            return;
        };

        self.navigator.begin_transition();

        let panel = self.deck.get(step.index);
        if let (Some(panel), Some(before)) = (panel, self.hooks.before.as_mut()) {
            before(panel, step.index);
        }

        self.completion
            .start(&mut self.animator, target, &self.timing, now);

        if !initial {
            if let (Some(pagination), Some(panel)) = (self.pagination.as_mut(), panel) {
                pagination.activate(step.index, &panel.id);
            }
        }

        debug!(
            index = step.index,
            target_offset = target,
            initial,
            "transition started"
        );
    }

    fn complete_transition(&mut self) {
        if !self.navigator.finish_transition() {
            return;
        }

        let index = self.navigator.current_index();
        if let (Some(panel), Some(after)) = (self.deck.get(index), self.hooks.after.as_mut()) {
            after(panel, index);
        }

        // The viewport may have been resized while the transition ran
        if let Some(offset) = self.layout.axis_offset(index) {
            if offset != self.animator.current() {
                self.animator.snap(offset);
            }
        }
    }

    fn correct_after_resize(&mut self, now: Instant) {
        if !self.layout.is_measured() {
            return;
        }

        let index = self.navigator.current_index();
        let Some(delta) = self.layout.measured_offset_delta(index, self.animator.current()) else {
            return;
        };

        let step = self
            .navigator
            .resolve_resize_correction(delta, self.layout.viewport_length());

        if step.should_transition {
            self.apply(step, now, false);
        } else if !self.navigator.is_busy() {
            if let Some(offset) = self.layout.axis_offset(index) {
                self.animator.snap(offset);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagedeck_core::Orientation;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn deck(n: usize) -> Deck {
        let panels = (0..n)
            .map(|i| Panel {
                id: format!("p{}", i),
                title: None,
                body: String::new(),
            })
            .collect();
        Deck::new("test", panels).unwrap()
    }

    fn config(loop_pages: bool, start: usize, transition_events: bool) -> AppConfig {
        let mut config = AppConfig::default();
        config.deck.loop_pages = loop_pages;
        config.deck.start_index = start;
        config.ui.transition_events = transition_events;
        config.animation.duration_ms = 100;
        config
    }

    fn session(n: usize, config: &AppConfig, now: Instant) -> DeckSession {
        let mut session = DeckSession::new(deck(n), config);
        session.set_viewport(Rect::new(0, 0, 80, 20), now);
        session
    }

    fn settle(session: &mut DeckSession, now: Instant) -> Instant {
        let later = now + Duration::from_millis(100);
        session.tick(later);
        later
    }

    #[test]
    fn test_next_prev_sequence() {
        let t0 = Instant::now();
        let mut s = session(4, &config(false, 0, false), t0);

        s.next(t0);
        let t = settle(&mut s, t0);
        s.next(t);
        let t = settle(&mut s, t);
        s.prev(t);
        settle(&mut s, t);

        assert_eq!(s.navigator().current_index(), 1);
        assert_eq!(s.offset(), 20);
        assert!(!s.is_busy());
    }

    #[test]
    fn test_burst_collapses_to_one_transition() {
        let t0 = Instant::now();
        let mut s = session(5, &config(false, 0, false), t0);

        s.on_wheel(-120, t0);
        s.on_wheel(-120, t0);
        s.on_wheel(-120, t0);
        assert!(s.is_busy());
        assert_eq!(s.navigator().current_index(), 1);

        settle(&mut s, t0);
        assert!(!s.is_busy());
        assert_eq!(s.navigator().current_index(), 1);
    }

    #[test]
    fn test_wheel_up_at_first_panel_is_noop() {
        let t0 = Instant::now();
        let mut s = session(3, &config(false, 0, false), t0);
        s.on_wheel(120, t0);
        assert!(!s.is_busy());
        assert_eq!(s.navigator().current_index(), 0);
    }

    #[test]
    fn test_wheel_up_loops_to_last_panel() {
        let t0 = Instant::now();
        let mut s = session(3, &config(true, 0, false), t0);
        s.on_wheel(120, t0);
        settle(&mut s, t0);
        assert_eq!(s.navigator().current_index(), 2);
        assert_eq!(s.offset(), 40);
    }

    #[test]
    fn test_hooks_run_before_and_after() {
        let t0 = Instant::now();
        let calls = Rc::new(RefCell::new(Vec::new()));
        let before_calls = calls.clone();
        let after_calls = calls.clone();
        let hooks = TransitionHooks {
            before: Some(Box::new(move |panel: &Panel, index: usize| {
                before_calls.borrow_mut().push(format!("before {} {}", panel.id, index));
            })),
            after: Some(Box::new(move |panel: &Panel, index: usize| {
                after_calls.borrow_mut().push(format!("after {} {}", panel.id, index));
            })),
        };
        let mut s = session(3, &config(false, 0, false), t0);
        s.set_hooks(hooks);

        s.next(t0);
        assert_eq!(calls.borrow().as_slice(), ["before p1 1"]);
        settle(&mut s, t0);
        assert_eq!(calls.borrow().as_slice(), ["before p1 1", "after p1 1"]);
    }

    #[test]
    fn test_pagination_follows_transitions() {
        let t0 = Instant::now();
        let mut s = session(3, &config(false, 0, false), t0);

        s.jump_to(2, t0).unwrap();
        let pagination = s.pagination().unwrap();
        assert_eq!(pagination.active_index(), Some(2));
        assert_eq!(pagination.markers()[2].label, "p2");
    }

    #[test]
    fn test_jump_to_out_of_range_is_error() {
        let t0 = Instant::now();
        let mut s = session(3, &config(false, 0, false), t0);
        assert!(s.jump_to(3, t0).is_err());
        assert!(!s.is_busy());
    }

    #[test]
    fn test_initial_placement_skips_labels() {
        let t0 = Instant::now();
        let mut s = DeckSession::new(deck(4), &config(false, 2, false));
        assert_eq!(s.offset(), 0);

        s.set_viewport(Rect::new(0, 0, 80, 20), t0);
        assert!(s.is_busy());
        let pagination = s.pagination().unwrap();
        assert_eq!(pagination.active_index(), Some(2));
        assert!(pagination.markers()[2].label.is_empty());

        settle(&mut s, t0);
        assert_eq!(s.offset(), 40);
        assert!(!s.is_busy());
    }

    #[test]
    fn test_out_of_range_start_falls_back_to_first_panel() {
        let t0 = Instant::now();
        let s = session(3, &config(false, 9, false), t0);
        assert_eq!(s.navigator().current_index(), 0);
        assert!(!s.is_busy());
    }

    #[test]
    fn test_notification_strategy_stays_busy_on_reclick() {
        let t0 = Instant::now();
        let mut s = session(3, &config(false, 0, true), t0);

        s.jump_to(0, t0).unwrap();
        settle(&mut s, t0);
        assert!(s.is_busy());

        s.next(t0);
        assert_eq!(s.navigator().current_index(), 0);
    }

    #[test]
    fn test_callback_strategy_completes_reclick() {
        let t0 = Instant::now();
        let mut s = session(3, &config(false, 0, false), t0);

        s.jump_to(0, t0).unwrap();
        settle(&mut s, t0);
        assert!(!s.is_busy());
    }

    #[test]
    fn test_horizontal_offsets_use_width() {
        let t0 = Instant::now();
        let mut config = config(false, 0, true);
        config.deck.orientation = Orientation::Horizontal;
        let mut s = session(3, &config, t0);

        s.next(t0);
        settle(&mut s, t0);
        assert_eq!(s.offset(), 80);
        assert!(!s.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn test_resize_correction_after_shrink() {
        let t0 = Instant::now();
        let mut s = session(5, &config(false, 0, false), t0);
        s.jump_to(2, t0).unwrap();
        let t = settle(&mut s, t0);
        assert_eq!(s.offset(), 40);

        // Panel 2 now starts at row 20 while the viewport still points at row 40,
        // so the panel sits above the viewport by more than half its height
        s.set_viewport(Rect::new(0, 0, 80, 10), t);
        s.on_resize();
        s.on_resize();
        tokio::time::sleep(Duration::from_millis(250)).await;

        s.tick(t);
        assert_eq!(s.navigator().current_index(), 3);
        assert!(s.is_busy());
        settle(&mut s, t);
        assert_eq!(s.offset(), 30);
        assert!(!s.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn test_small_resize_resnaps_without_transition() {
        let t0 = Instant::now();
        let mut s = session(5, &config(false, 0, false), t0);
        s.jump_to(1, t0).unwrap();
        let t = settle(&mut s, t0);

        s.set_viewport(Rect::new(0, 0, 80, 18), t);
        s.on_resize();
        tokio::time::sleep(Duration::from_millis(250)).await;

        s.tick(t);
        assert_eq!(s.navigator().current_index(), 1);
        assert!(!s.is_busy());
        assert_eq!(s.offset(), 18);
    }
}
