use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub deck: DeckConfig,
    #[serde(default)]
    pub markers: MarkersConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub resize: ResizeConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log file used while the TUI owns the terminal
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

/// Axis along which panels are stacked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

impl Orientation {
    pub fn is_vertical(self) -> bool {
        self == Orientation::Vertical
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckConfig {
    /// Panel shown first (out-of-range values fall back to 0)
    #[serde(default)]
    pub start_index: usize,
    /// Wrap around at either end of the deck
    #[serde(default)]
    pub loop_pages: bool,
    /// Show the pagination markers
    #[serde(default = "default_true")]
    pub pagination: bool,
    /// Enable keyboard navigation
    #[serde(default)]
    pub keyboard: bool,
    #[serde(default)]
    pub orientation: Orientation,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            start_index: 0,
            loop_pages: false,
            pagination: default_true(),
            keyboard: false,
            orientation: Orientation::default(),
        }
    }
}

/// Glyphs and delimiters standing in for the markup selectors of a web deck
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkersConfig {
    /// Line separating panels in plain-text decks
    #[serde(default = "default_section_delimiter")]
    pub section_delimiter: String,
    /// Inactive pagination marker
    #[serde(default = "default_page_marker")]
    pub page: String,
    /// Active pagination marker
    #[serde(default = "default_active_marker")]
    pub active: String,
}

impl Default for MarkersConfig {
    fn default() -> Self {
        Self {
            section_delimiter: default_section_delimiter(),
            page: default_page_marker(),
            active: default_active_marker(),
        }
    }
}

/// Easing curve applied to panel transitions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EasingType {
    /// Jump at the end of the duration
    None,
    Linear,
    /// CSS `ease`, cubic-bezier(0.25, 0.1, 0.25, 1.0)
    #[default]
    Ease,
    /// CSS `ease-in-out`, cubic-bezier(0.42, 0, 0.58, 1.0)
    EaseInOut,
    Cubic,
    Quintic,
    /// Exponential ease-out
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Transition duration in milliseconds
    #[serde(default = "default_duration")]
    pub duration_ms: u64,
    #[serde(default)]
    pub easing: EasingType,
    /// Frame rate while a transition is running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_duration(),
            easing: EasingType::default(),
            animation_fps: default_animation_fps(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResizeConfig {
    /// Quiescence window before a resize correction runs
    #[serde(default = "default_debounce")]
    pub debounce_ms: u64,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    #[serde(default = "default_true")]
    pub show_status_bar: bool,
    /// Detect transition completion from end notifications instead of callbacks.
    /// Zero-length transitions never notify and leave the deck busy.
    #[serde(default)]
    pub transition_events: bool,
    /// Theme name (e.g., "gruvbox-dark", "nord")
    #[serde(default = "default_theme_name")]
    pub theme: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            show_status_bar: default_true(),
            transition_events: false,
            theme: default_theme_name(),
        }
    }
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "k", "<C-j>" (Ctrl+j), "<S-g>" (Shift+g), "<CR>" (Enter), "<Esc>", "<Tab>", "<Space>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Quit the application
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Advance to the next panel
    #[serde(default = "default_key_next")]
    pub next: String,
    /// Retreat to the previous panel
    #[serde(default = "default_key_prev")]
    pub prev: String,
    /// Jump to the first panel
    #[serde(default = "default_key_first")]
    pub first: String,
    /// Jump to the last panel
    #[serde(default = "default_key_last")]
    pub last: String,
    /// Switch to the next open deck
    #[serde(default = "default_key_next_deck")]
    pub next_deck: String,
    /// Switch to the previous open deck
    #[serde(default = "default_key_prev_deck")]
    pub prev_deck: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            next: default_key_next(),
            prev: default_key_prev(),
            first: default_key_first(),
            last: default_key_last(),
            next_deck: default_key_next_deck(),
            prev_deck: default_key_prev_deck(),
        }
    }
}

// Default keymap values (Vim-style notation)
fn default_key_quit() -> String { "q".to_string() }
fn default_key_next() -> String { "j".to_string() }
fn default_key_prev() -> String { "k".to_string() }
fn default_key_first() -> String { "g".to_string() }
fn default_key_last() -> String { "G".to_string() }
fn default_key_next_deck() -> String { "<Tab>".to_string() }
fn default_key_prev_deck() -> String { "<S-Tab>".to_string() }

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_section_delimiter() -> String {
    "---".to_string()
}

fn default_page_marker() -> String {
    "○".to_string()
}

fn default_active_marker() -> String {
    "●".to_string()
}

fn default_duration() -> u64 {
    500
}

fn default_animation_fps() -> u32 {
    60
}

fn default_debounce() -> u64 {
    200
}

fn default_tick_rate() -> u64 {
    100
}

fn default_theme_name() -> String {
    "gruvbox-dark".to_string()
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, falling back to defaults when absent
    pub fn load_from(config_path: &std::path::Path) -> crate::Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &std::path::Path) -> crate::Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/pagedeck/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("pagedeck")
            .join("config.toml")
    }

    /// Get the log file path (with tilde expansion)
    pub fn log_file(&self) -> PathBuf {
        match &self.general.log_file {
            Some(path) => expand_tilde(path),
            None => dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("pagedeck")
                .join("pagedeck.log"),
        }
    }
}
