//! Transition completion strategies
//!
//! A deck session learns that its in-flight transition has finished through
//! exactly one of two mechanisms, picked once when the session is built:
//!
//! - [`NotificationCompletion`] listens for end notifications posted by the
//!   animator. Transitions that do not move the viewport, or that have a zero
//!   duration, never post one and leave the session busy.
//! - [`CallbackCompletion`] hands the animator a completion callback, which
//!   fires for every animation.

mod callback;
mod notification;

use std::time::Instant;

use crate::scroll::{TransitionTiming, ViewportAnimator};

pub use callback::CallbackCompletion;
pub use notification::NotificationCompletion;

pub trait TransitionCompletionStrategy {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Start moving the viewport to `target`
    fn start(
        &mut self,
        animator: &mut ViewportAnimator,
        target: u32,
        timing: &TransitionTiming,
        now: Instant,
    );

    /// Whether the in-flight transition finished since the last poll
    fn poll_complete(&mut self) -> bool;
}

/// Select the completion strategy for a session.
/// `transition_events` states whether the renderer posts end notifications.
pub fn select_strategy(
    transition_events: bool,
    animator: &mut ViewportAnimator,
) -> Box<dyn TransitionCompletionStrategy> {
    if transition_events {
        Box::new(NotificationCompletion::attach(animator))
    } else {
        Box::new(CallbackCompletion::new())
    }
}
