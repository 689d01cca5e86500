use std::time::Instant;

use tokio::sync::mpsc;
use tracing::warn;

use super::TransitionCompletionStrategy;
use crate::scroll::{TransitionEnd, TransitionTiming, ViewportAnimator};

/// Completes transitions when the animator posts a [`TransitionEnd`]
#[derive(Debug)]
pub struct NotificationCompletion {
    rx: mpsc::UnboundedReceiver<TransitionEnd>,
}

impl NotificationCompletion {
    /// Install a fresh notification channel on `animator`
    pub fn attach(animator: &mut ViewportAnimator) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        animator.set_end_notifier(tx);
        Self { rx }
    }
}

impl TransitionCompletionStrategy for NotificationCompletion {
    fn name(&self) -> &'static str {
        "notification"
    }

    fn start(
        &mut self,
        animator: &mut ViewportAnimator,
        target: u32,
        timing: &TransitionTiming,
        now: Instant,
    ) {
        if !animator.will_notify(target, timing) {
            warn!(
                target_offset = target,
                duration_ms = timing.duration.as_millis() as u64,
                "transition will not post an end notification; deck stays busy"
            );
        }
        animator.transition_to(target, timing, now);
    }

    fn poll_complete(&mut self) -> bool {
        let mut completed = false;
        while self.rx.try_recv().is_ok() {
            completed = true;
        }
        completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::EasingType;
    use std::time::Duration;

    fn timing(ms: u64) -> TransitionTiming {
        TransitionTiming {
            duration: Duration::from_millis(ms),
            easing: EasingType::Linear,
        }
    }

    #[test]
    fn test_completes_on_notification() {
        let mut animator = ViewportAnimator::new();
        let mut strategy = NotificationCompletion::attach(&mut animator);
        let t0 = Instant::now();

        strategy.start(&mut animator, 24, &timing(100), t0);
        animator.update(t0 + Duration::from_millis(10));
        assert!(!strategy.poll_complete());

        animator.update(t0 + Duration::from_millis(100));
        assert!(strategy.poll_complete());
        assert!(!strategy.poll_complete());
    }

    #[test]
    fn test_zero_distance_never_completes() {
        let mut animator = ViewportAnimator::new();
        let mut strategy = NotificationCompletion::attach(&mut animator);
        let t0 = Instant::now();

        strategy.start(&mut animator, 0, &timing(100), t0);
        animator.update(t0 + Duration::from_secs(2));
        assert!(!strategy.poll_complete());
    }

    #[test]
    fn test_zero_duration_never_completes() {
        let mut animator = ViewportAnimator::new();
        let mut strategy = NotificationCompletion::attach(&mut animator);
        let t0 = Instant::now();

        strategy.start(&mut animator, 30, &timing(0), t0);
        animator.update(t0);
        assert_eq!(animator.current(), 30);
        assert!(!strategy.poll_complete());
    }
}
