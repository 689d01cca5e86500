use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tracing::{info, warn};

use pagedeck_core::{AppConfig, Deck};
use pagedeck_tui::{
    app::{App, DeckKey},
    event::{AppEvent, EventHandler},
    input::{handle_key_event, handle_mouse_event},
    keymap::Keymap,
    load_theme,
    widgets::{DeckViewWidget, PaginationWidget, StatusBarWidget},
};

pub async fn run(config: Arc<AppConfig>, decks: Vec<PathBuf>) -> Result<()> {
    // Create keymap from config
    let keymap = Keymap::from_config(&config.keymap);

    // Open decks before touching the terminal so load errors print normally
    let mut app = App::new(config.clone());
    open_decks(&mut app, &decks)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("pagedeck"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app, &keymap).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

/// Open every deck named on the command line, or the welcome deck when none
fn open_decks(app: &mut App, paths: &[PathBuf]) -> Result<()> {
    if paths.is_empty() {
        app.open_welcome();
        return Ok(());
    }

    let delimiter = app.config.markers.section_delimiter.clone();
    for path in paths {
        let key = DeckKey::File(std::fs::canonicalize(path).unwrap_or_else(|_| path.clone()));
        match app.open_deck(key, || Deck::load(path, &delimiter)) {
            Ok(slot) => info!(path = %path.display(), slot, "deck ready"),
            Err(e) if paths.len() > 1 => {
                warn!("Skipping {}: {}", path.display(), e);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("loading deck {}", path.display()));
            }
        }
    }

    if app.sessions.is_empty() {
        bail!("None of the given decks could be loaded");
    }
    Ok(())
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    keymap: &Keymap,
) -> Result<()> {
    let config = app.config.clone();

    // Load theme from config
    let theme = load_theme(&config.ui.theme);

    // Create event handler with animation FPS support
    let event_handler =
        EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.animation.animation_fps);

    // Track if we need high frame rate while a transition or resize correction is pending.
    // This is checked at the END of each iteration to determine NEXT iteration's tick rate
    let mut needs_fast_update = false;

    // Main loop
    loop {
        // Advance animations, completions and due resize corrections
        app.tick(Instant::now());

        // Draw UI
        terminal.draw(|frame| {
            let size = frame.area();

            // Main layout: deck + status bar
            let status_height = if config.ui.show_status_bar { 1 } else { 0 };
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(status_height)])
                .split(size);
            let deck_area = main_layout[0];

            // Hidden decks track the size too, so their resize corrections are current
            app.set_viewport(deck_area, Instant::now());
            if let Some(session) = app.active_session_mut() {
                DeckViewWidget::render(frame, deck_area, session, &theme);
                if let Some(pagination) = session.pagination_mut() {
                    PaginationWidget::render(frame, deck_area, pagination, &config.markers, &theme);
                }
            }

            if config.ui.show_status_bar {
                StatusBarWidget::render(frame, main_layout[1], app, &theme);
            }
        })?;

        // Handle events (use faster tick rate during animations)
        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            let now = Instant::now();
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, keymap, config.deck.keyboard);
                    app.handle_action(action, now);
                }
                AppEvent::Mouse(mouse) => {
                    let pagination = app.active_session().and_then(|s| s.pagination());
                    let action = handle_mouse_event(mouse, pagination);
                    app.handle_action(action, now);
                }
                AppEvent::Resize(_, _) => {
                    app.on_resize();
                }
                AppEvent::Tick => {}
            }
        }

        // Update fast update flag for next iteration
        needs_fast_update = app
            .sessions
            .iter()
            .any(|(_, session)| session.needs_update());

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
