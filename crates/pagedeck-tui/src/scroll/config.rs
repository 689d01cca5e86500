//! L4 Atomic Layer: Configuration types for panel transitions
//!
//! Re-exports configuration from pagedeck-core and provides additional utilities.

use std::time::Duration;

// Re-export config types from core
pub use pagedeck_core::config::AnimationConfig;
pub use pagedeck_core::EasingType;

/// Extension trait for AnimationConfig with utility methods
pub trait AnimationConfigExt {
    /// Get transition duration as Duration
    fn transition_duration(&self) -> Duration;

    /// Get tick duration for animation FPS
    fn animation_tick_duration(&self) -> Duration;

    /// Duration and easing of a single transition
    fn timing(&self) -> TransitionTiming;
}

/// Duration and easing of a single transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionTiming {
    pub duration: Duration,
    pub easing: EasingType,
}

impl Default for TransitionTiming {
    fn default() -> Self {
        AnimationConfig::default().timing()
    }
}

impl AnimationConfigExt for AnimationConfig {
    #[inline]
    fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    #[inline]
    fn animation_tick_duration(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis(1000 / self.animation_fps as u64)
        }
    }

    fn timing(&self) -> TransitionTiming {
        TransitionTiming {
            duration: self.transition_duration(),
            easing: self.easing,
        }
    }
}
