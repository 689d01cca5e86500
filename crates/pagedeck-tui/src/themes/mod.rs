//! Theme registry and loader

mod dracula;
mod nord;

use crate::theme::Theme;

/// Load a theme by name, falling back to gruvbox-dark
pub fn load_theme(name: &str) -> Theme {
    match name.to_lowercase().as_str() {
        "dracula" => dracula::default(),
        "nord" => nord::default(),
        "gruvbox" | "gruvbox-dark" => Theme::default(),
        other => {
            tracing::warn!("Unknown theme '{}', using gruvbox-dark", other);
            Theme::default()
        }
    }
}

/// Get list of available theme names
pub fn available_themes() -> Vec<&'static str> {
    vec!["gruvbox-dark", "dracula", "nord"]
}
