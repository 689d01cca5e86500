use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use super::TransitionCompletionStrategy;
use crate::scroll::{TransitionTiming, ViewportAnimator};

/// Completes transitions from the animator's completion callback
#[derive(Debug, Default)]
pub struct CallbackCompletion {
    done: Arc<AtomicBool>,
}

impl CallbackCompletion {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransitionCompletionStrategy for CallbackCompletion {
    fn name(&self) -> &'static str {
        "callback"
    }

    fn start(
        &mut self,
        animator: &mut ViewportAnimator,
        target: u32,
        timing: &TransitionTiming,
        now: Instant,
    ) {
        self.done.store(false, Ordering::Release);
        let done = Arc::clone(&self.done);
        animator.animate(
            target,
            timing,
            now,
            Box::new(move |_| done.store(true, Ordering::Release)),
        );
    }

    fn poll_complete(&mut self) -> bool {
        self.done.swap(false, Ordering::AcqRel)
    }
}
