//! Viewport animation for panel transitions
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `easing` - Pure easing functions (CSS ease, cubic, quintic, exponential)
//! - `timing` - Time calculation utilities (progress, interpolation)
//! - `config` - Configuration types and defaults (re-exported from pagedeck-core)
//!
//! ## L3 Molecular Layer
//! - `animation` - Viewport animator combining atoms
//!
//! # Usage
//!
//! ```ignore
//! use pagedeck_tui::scroll::{AnimationConfig, AnimationConfigExt, ViewportAnimator};
//!
//! let timing = AnimationConfig::default().timing();
//! let mut animator = ViewportAnimator::new();
//!
//! animator.animate(target, &timing, Instant::now(), Box::new(|end| { /* settled */ }));
//!
//! // In main loop, update each frame and get current offset
//! let offset = animator.update(Instant::now());
//! ```

// L4 Atomic Layer
pub mod config;
pub mod easing;
pub mod timing;

// L3 Molecular Layer
pub mod animation;

// Re-exports for convenient access
pub use animation::{OnComplete, TransitionEnd, ViewportAnimator};
pub use config::{AnimationConfig, AnimationConfigExt, TransitionTiming};
pub use easing::{EasingType, EasingTypeExt};
