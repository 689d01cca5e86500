use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use ratatui::layout::Rect;
use tracing::{debug, info, warn};

use pagedeck_core::{AppConfig, Deck, Registry};

use crate::input::Action;
use crate::session::{DeckSession, TransitionHooks};

/// Identity of an open deck
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeckKey {
    /// The built-in deck shown when no file is given
    Welcome,
    File(PathBuf),
}

/// Application state
pub struct App {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// One session per open deck, in the order they were opened
    pub sessions: Registry<DeckKey, DeckSession>,
    /// Slot of the deck receiving input
    pub active: usize,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Status message
    pub status_message: Option<String>,
}

impl App {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            config,
            sessions: Registry::new(),
            active: 0,
            should_quit: false,
            status_message: None,
        }
    }

    /// Open the deck identified by `key`, loading it with `load` on first use.
    ///
    /// Opening a key that is already open returns its slot without reloading.
    pub fn open_deck<F>(&mut self, key: DeckKey, load: F) -> pagedeck_core::Result<usize>
    where
        F: FnOnce() -> pagedeck_core::Result<Deck>,
    {
        if let Some(slot) = self.sessions.slot_of(&key) {
            debug!(?key, slot, "deck already open");
            return Ok(slot);
        }

        let slot = self.sessions.len();
        let config = self.config.clone();
        self.sessions.get_or_try_insert_with(key, || {
            let deck = load()?;
            info!(deck = %deck.title, panels = deck.len(), slot, "opened deck");
            let hooks = TransitionHooks::logging(&deck.title);
            Ok::<_, pagedeck_core::Error>(DeckSession::new(deck, &config).with_hooks(hooks))
        })?;

        Ok(slot)
    }

    /// Open the built-in welcome deck
    pub fn open_welcome(&mut self) -> usize {
        match self.open_deck(DeckKey::Welcome, || Ok(Deck::welcome())) {
            Ok(slot) => slot,
            Err(e) => {
                warn!("Failed to open welcome deck: {}", e);
                0
            }
        }
    }

    pub fn active_session(&self) -> Option<&DeckSession> {
        self.sessions.at(self.active)
    }

    pub fn active_session_mut(&mut self) -> Option<&mut DeckSession> {
        self.sessions.at_mut(self.active)
    }

    /// Apply an input action to the active deck
    pub fn handle_action(&mut self, action: Action, now: Instant) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::NextDeck => self.cycle_deck(1),
            Action::PrevDeck => self.cycle_deck(-1),
            Action::None => {}
            _ => {
                if let Err(message) = self.navigate(action, now) {
                    self.set_status(message);
                }
            }
        }
    }

    fn navigate(&mut self, action: Action, now: Instant) -> Result<(), String> {
        let Some(session) = self.active_session_mut() else {
            return Ok(());
        };
        match action {
            Action::NextPanel => session.next(now),
            Action::PrevPanel => session.prev(now),
            Action::Wheel(delta) => session.on_wheel(delta, now),
            Action::FirstPanel => session.jump_to(0, now).map_err(|e| e.to_string())?,
            Action::LastPanel => {
                let last = session.deck().len().saturating_sub(1);
                session.jump_to(last, now).map_err(|e| e.to_string())?;
            }
            Action::JumpTo(index) => session.jump_to(index, now).map_err(|e| e.to_string())?,
            _ => {}
        }
        Ok(())
    }

    /// Make the deck `step` slots away the active one
    pub fn cycle_deck(&mut self, step: isize) {
        let count = self.sessions.len();
        if count < 2 {
            return;
        }
        let next = (self.active as isize + step).rem_euclid(count as isize) as usize;
        self.active = next;
        self.clear_status();

        if let Some(session) = self.active_session() {
            debug!(deck = %session.deck().title, slot = next, "switched deck");
        }
    }

    /// Record the deck area for every open deck, hidden ones included, so
    /// their resize corrections measure the current terminal size
    pub fn set_viewport(&mut self, area: Rect, now: Instant) {
        for session in self.sessions.values_mut() {
            session.set_viewport(area, now);
        }
    }

    /// Forward a terminal resize to every open deck
    pub fn on_resize(&mut self) {
        for session in self.sessions.values_mut() {
            session.on_resize();
        }
    }

    /// Advance every deck. Returns true while any deck needs frames at
    /// animation rate.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut needs_update = false;
        for session in self.sessions.values_mut() {
            session.tick(now);
            needs_update |= session.needs_update();
        }
        needs_update
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use pagedeck_core::Panel;

    fn config() -> Arc<AppConfig> {
        let mut config = AppConfig::default();
        config.animation.duration_ms = 100;
        Arc::new(config)
    }

    fn small_deck(title: &str) -> Deck {
        let panels = ["a", "b", "c", "d", "e"]
            .iter()
            .map(|id| Panel {
                id: id.to_string(),
                title: None,
                body: String::new(),
            })
            .collect();
        Deck::new(title, panels).unwrap()
    }

    #[test]
    fn test_open_deck_is_idempotent() {
        let mut app = App::new(config());
        let key = DeckKey::File(PathBuf::from("talk.txt"));

        let first = app.open_deck(key.clone(), || Ok(small_deck("talk"))).unwrap();
        let second = app
            .open_deck(key, || panic!("deck loaded twice"))
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(app.sessions.len(), 1);
    }

    #[test]
    fn test_failed_load_opens_nothing() {
        let mut app = App::new(config());
        let result = app.open_deck(DeckKey::File(PathBuf::from("missing.txt")), || {
            Err(pagedeck_core::Error::EmptyDeck)
        });
        assert!(result.is_err());
        assert!(app.sessions.is_empty());
        assert!(app.active_session().is_none());
    }

    #[test]
    fn test_actions_drive_active_deck() {
        let mut app = App::new(config());
        app.open_welcome();
        let now = Instant::now();
        app.active_session_mut()
            .unwrap()
            .set_viewport(Rect::new(0, 0, 40, 10), now);

        app.handle_action(Action::NextPanel, now);
        assert_eq!(app.active_session().unwrap().navigator().current_index(), 1);
        assert!(app.tick(now + Duration::from_millis(10)));

        // Busy: dropped
        app.handle_action(Action::Wheel(-120), now + Duration::from_millis(20));
        assert_eq!(app.active_session().unwrap().navigator().current_index(), 1);

        app.tick(now + Duration::from_millis(200));
        assert!(!app.active_session().unwrap().is_busy());
        assert_eq!(app.active_session().unwrap().offset(), 10);
    }

    #[test]
    fn test_jump_out_of_range_sets_status() {
        let mut app = App::new(config());
        app.open_welcome();
        app.active_session_mut()
            .unwrap()
            .set_viewport(Rect::new(0, 0, 40, 10), Instant::now());

        app.handle_action(Action::JumpTo(42), Instant::now());
        assert!(app.status_message.is_some());
        assert_eq!(app.active_session().unwrap().navigator().current_index(), 0);
    }

    #[test]
    fn test_quit() {
        let mut app = App::new(config());
        app.handle_action(Action::Quit, Instant::now());
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_cycle_deck_wraps() {
        let mut app = App::new(config());
        app.open_deck(DeckKey::File(PathBuf::from("a")), || Ok(small_deck("a")))
            .unwrap();
        app.open_deck(DeckKey::File(PathBuf::from("b")), || Ok(small_deck("b")))
            .unwrap();

        app.handle_action(Action::NextDeck, Instant::now());
        assert_eq!(app.active_session().unwrap().deck().title, "b");
        app.handle_action(Action::NextDeck, Instant::now());
        assert_eq!(app.active_session().unwrap().deck().title, "a");
        app.handle_action(Action::PrevDeck, Instant::now());
        assert_eq!(app.active, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resize_corrects_hidden_deck() {
        let mut app = App::new(config());
        app.open_deck(DeckKey::File(PathBuf::from("a")), || Ok(small_deck("a")))
            .unwrap();
        app.open_deck(DeckKey::File(PathBuf::from("b")), || Ok(small_deck("b")))
            .unwrap();
        let t0 = Instant::now();
        app.set_viewport(Rect::new(0, 0, 80, 20), t0);

        app.handle_action(Action::NextDeck, t0);
        app.handle_action(Action::JumpTo(2), t0);
        app.tick(t0 + Duration::from_millis(150));
        assert_eq!(app.active_session().unwrap().offset(), 40);
        app.handle_action(Action::PrevDeck, t0);

        // Shrink while deck "b" is hidden
        let t1 = t0 + Duration::from_millis(200);
        app.set_viewport(Rect::new(0, 0, 80, 10), t1);
        app.on_resize();
        tokio::time::sleep(Duration::from_millis(250)).await;
        app.tick(t1);
        app.tick(t1 + Duration::from_millis(150));

        let hidden = app.sessions.at(1).unwrap();
        assert_eq!(hidden.navigator().current_index(), 3);
        assert_eq!(hidden.offset(), 30);
        assert!(!hidden.is_busy());
    }
}
