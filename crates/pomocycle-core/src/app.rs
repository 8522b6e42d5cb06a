//! Event dispatch for the whole application.
//!
//! ```ignore
//! let mut app = App::new(store, Box::new(effects))?;
//! // In the terminal loop:
//! if app.handle(AppEvent::Tick(elapsed)) == Flow::Quit { break; }
//! render(app.view());
//! ```

use tracing::warn;

use crate::effects::SideEffects;
use crate::error::Result;
use crate::pages::{AppEvent, PageContext, PageController, PageView, SettingsPage, TimerPage, Transition};
use crate::router::{PageKey, Router};
use crate::settings::{Settings, SettingsStore};

/// Whether the event loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    router: Router,
    ctx: PageContext,
}

impl App {
    /// Build both pages from the store's current settings, timer page first.
    ///
    /// # Errors
    ///
    /// Returns an error if the router cannot be built.
    pub fn new(store: SettingsStore, effects: Box<dyn SideEffects>) -> Result<Self> {
        let timer = TimerPage::new(store.current().clone(), effects);
        let settings = SettingsPage::new(store.current());
        let pages: Vec<Box<dyn PageController>> = vec![Box::new(timer), Box::new(settings)];
        let router = Router::new(pages)?;
        Ok(Self {
            router,
            ctx: PageContext { store },
        })
    }

    /// Deliver one event to the active page.
    pub fn handle(&mut self, event: AppEvent) -> Flow {
        match self.router.current_mut().handle(&event, &mut self.ctx) {
            Transition::Stay => Flow::Continue,
            Transition::Quit => Flow::Quit,
            Transition::Navigate(key) => {
                if let Err(e) = self.router.navigate(key, &mut self.ctx) {
                    warn!(error = %e, "navigation failed");
                }
                Flow::Continue
            }
        }
    }

    pub fn view(&self) -> PageView {
        self.router.current().view()
    }

    pub fn current_page(&self) -> PageKey {
        self.router.current_key()
    }

    pub fn settings(&self) -> &Settings {
        self.ctx.store.current()
    }

    pub fn store(&self) -> &SettingsStore {
        &self.ctx.store
    }
}
