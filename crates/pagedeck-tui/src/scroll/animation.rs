//! L3 Molecular Layer: Viewport animation controller
//!
//! Combines easing functions and timing utilities to move the deck viewport
//! between panel offsets. Two ways to start a transition mirror the two ways
//! a renderer can report completion:
//!
//! - [`ViewportAnimator::transition_to`] behaves like a style transition: when
//!   the offset changes over a non-zero duration, a [`TransitionEnd`] is posted
//!   to the installed notifier once it settles. Nothing is posted otherwise.
//! - [`ViewportAnimator::animate`] runs a completion callback when the
//!   animation finishes, whatever its length.

use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use super::config::TransitionTiming;
use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, lerp_u32, progress};

/// Posted when a transition settles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionEnd {
    /// Offset the viewport settled on
    pub offset: u32,
}

/// Completion callback for [`ViewportAnimator::animate`]
pub type OnComplete = Box<dyn FnOnce(TransitionEnd)>;

/// Active viewport animation state
struct ActiveAnimation {
    /// Animation start time
    start: Instant,
    /// Starting offset
    from: u32,
    /// Target offset
    to: u32,
    /// Animation duration
    duration: Duration,
    /// Easing function
    easing: EasingType,
    /// How completion is reported
    report: Report,
}

enum Report {
    Notify,
    Callback(OnComplete),
}

/// Viewport animation controller
///
/// Call one of the start methods to begin a transition, then `update()` each
/// frame to get the current interpolated offset.
#[derive(Default)]
pub struct ViewportAnimator {
    /// Current active animation (if any)
    animation: Option<ActiveAnimation>,
    /// Current offset (always up-to-date)
    current: u32,
    /// Where end notifications are posted
    notifier: Option<mpsc::UnboundedSender<TransitionEnd>>,
}

impl std::fmt::Debug for ViewportAnimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewportAnimator")
            .field("current", &self.current)
            .field("target", &self.target())
            .field("animating", &self.is_animating())
            .finish()
    }
}

impl ViewportAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the channel that receives [`TransitionEnd`] notifications
    pub fn set_end_notifier(&mut self, tx: mpsc::UnboundedSender<TransitionEnd>) {
        self.notifier = Some(tx);
    }

    /// Check if an animation is currently active
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Get the current interpolated offset
    #[inline]
    pub fn current(&self) -> u32 {
        self.current
    }

    /// Get the target offset (final position after animation)
    pub fn target(&self) -> u32 {
        self.animation
            .as_ref()
            .map(|a| a.to)
            .unwrap_or(self.current)
    }

    /// Whether `transition_to(target, ..)` would post an end notification
    pub fn will_notify(&self, target: u32, timing: &TransitionTiming) -> bool {
        target != self.current && !timing.duration.is_zero()
    }

    /// Start a transition that reports through the end notifier.
    ///
    /// An unchanged offset or a zero duration applies immediately and posts
    /// no notification.
    pub fn transition_to(&mut self, target: u32, timing: &TransitionTiming, now: Instant) {
        if !self.will_notify(target, timing) {
            self.current = target;
            self.animation = None;
            return;
        }

        self.animation = Some(ActiveAnimation {
            start: now,
            from: self.current,
            to: target,
            duration: timing.duration,
            easing: timing.easing,
            report: Report::Notify,
        });
    }

    /// Start an animation that runs `on_complete` when it finishes, including
    /// zero-length and zero-duration animations
    pub fn animate(
        &mut self,
        target: u32,
        timing: &TransitionTiming,
        now: Instant,
        on_complete: OnComplete,
    ) {
        self.animation = Some(ActiveAnimation {
            start: now,
            from: self.current,
            to: target,
            duration: timing.duration,
            easing: timing.easing,
            report: Report::Callback(on_complete),
        });
    }

    /// Set the offset immediately, dropping any animation without reporting it
    pub fn snap(&mut self, offset: u32) {
        self.animation = None;
        self.current = offset;
    }

    /// Update animation state and return current offset
    ///
    /// Call this every frame to advance the animation.
    pub fn update(&mut self, now: Instant) -> u32 {
        let Some(anim) = self.animation.as_ref() else {
            return self.current;
        };

        if !is_complete(anim.start, anim.duration, now) {
            let t = progress(anim.start, anim.duration, now);
            self.current = lerp_u32(anim.from, anim.to, anim.easing.apply(t));
            return self.current;
        }

        if let Some(anim) = self.animation.take() {
            self.current = anim.to;
            let end = TransitionEnd { offset: anim.to };
            match anim.report {
                Report::Notify => {
                    if let Some(tx) = &self.notifier {
                        let _ = tx.send(end);
                    }
                }
                Report::Callback(on_complete) => on_complete(end),
            }
        }

        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn timing(ms: u64) -> TransitionTiming {
        TransitionTiming {
            duration: Duration::from_millis(ms),
            easing: EasingType::Linear,
        }
    }

    #[test]
    fn test_transition_interpolates_and_notifies() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut animator = ViewportAnimator::new();
        animator.set_end_notifier(tx);

        let t0 = Instant::now();
        animator.transition_to(100, &timing(100), t0);
        assert!(animator.is_animating());
        assert_eq!(animator.target(), 100);

        assert_eq!(animator.update(t0 + Duration::from_millis(50)), 50);
        assert!(rx.try_recv().is_err());

        assert_eq!(animator.update(t0 + Duration::from_millis(100)), 100);
        assert_eq!(rx.try_recv().ok(), Some(TransitionEnd { offset: 100 }));
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_transition_without_change_is_silent() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut animator = ViewportAnimator::new();
        animator.set_end_notifier(tx);
        let t0 = Instant::now();

        animator.transition_to(0, &timing(100), t0);
        animator.transition_to(40, &timing(0), t0);
        animator.update(t0 + Duration::from_secs(1));

        assert_eq!(animator.current(), 40);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_animate_always_calls_back() {
        let done = Rc::new(Cell::new(None));
        let mut animator = ViewportAnimator::new();
        let t0 = Instant::now();

        let seen = done.clone();
        animator.animate(0, &timing(0), t0, Box::new(move |end| seen.set(Some(end))));
        animator.update(t0);

        assert_eq!(done.get(), Some(TransitionEnd { offset: 0 }));
    }

    #[test]
    fn test_animate_moves_backwards() {
        let mut animator = ViewportAnimator::new();
        animator.snap(80);
        let t0 = Instant::now();

        animator.animate(20, &timing(200), t0, Box::new(|_| {}));
        assert_eq!(animator.update(t0 + Duration::from_millis(100)), 50);
        assert_eq!(animator.update(t0 + Duration::from_millis(250)), 20);
    }

    #[test]
    fn test_snap_drops_animation() {
        let mut animator = ViewportAnimator::new();
        let t0 = Instant::now();
        animator.animate(30, &timing(100), t0, Box::new(|_| panic!("dropped animation reported")));
        animator.snap(10);
        assert_eq!(animator.update(t0 + Duration::from_secs(1)), 10);
    }
}
