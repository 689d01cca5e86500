pub mod app;
pub mod event;
pub mod input;
pub mod keymap;
pub mod layout;
pub mod pagination;
pub mod scroll;
pub mod session;
pub mod theme;
pub mod themes;
pub mod transition;
pub mod widgets;

pub use app::{App, DeckKey};
pub use session::{DeckSession, TransitionHooks};
pub use theme::Theme;
pub use themes::load_theme;
