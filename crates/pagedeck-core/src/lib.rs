pub mod config;
pub mod debounce;
pub mod deck;
pub mod error;
pub mod navigator;
pub mod registry;

pub use config::{AppConfig, EasingType, Orientation};
pub use debounce::Debouncer;
pub use deck::{Deck, Panel};
pub use error::{Error, Result};
pub use navigator::{NavigatorState, PageNavigator, PanelLayout, PanelOffset, Step};
pub use registry::Registry;
