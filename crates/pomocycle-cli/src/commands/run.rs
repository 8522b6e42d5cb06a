use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event};
use pomocycle_core::{App, AppEvent, Flow, SettingsStore, TomlFileBackend};
use ratatui::DefaultTerminal;
use tracing::info;

use crate::effects::DesktopEffects;
use crate::{keymap, logging, ui};

/// Upper bound between two ticks; keys are handled as soon as they arrive.
const TICK_RATE: Duration = Duration::from_millis(250);

pub fn run(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    logging::init(dir)?;

    let backend = TomlFileBackend::in_dir(dir);
    info!(path = %backend.path().display(), "starting");
    let store = SettingsStore::open(Arc::new(backend));
    let effects = DesktopEffects::spawn()?;
    let mut app = App::new(store, Box::new(effects))?;

    let mut terminal = ratatui::try_init()?;
    let result = event_loop(&mut terminal, &mut app);
    ratatui::restore();

    info!("exiting");
    result
}

fn event_loop(terminal: &mut DefaultTerminal, app: &mut App) -> Result<(), Box<dyn std::error::Error>> {
    let size = terminal.size()?;
    app.handle(AppEvent::Resize {
        width: size.width,
        height: size.height,
    });

    let mut last_tick = Instant::now();
    loop {
        let view = app.view();
        let page = app.current_page();
        terminal.draw(|frame| ui::render(frame, page, &view))?;

        let timeout = TICK_RATE.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(action) = keymap::classify(&key) {
                        if app.handle(AppEvent::Key(action)) == Flow::Quit {
                            return Ok(());
                        }
                    }
                }
                Event::Resize(width, height) => {
                    app.handle(AppEvent::Resize { width, height });
                }
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= TICK_RATE {
            app.handle(AppEvent::Tick(elapsed));
            last_tick = Instant::now();
        }
    }
}
