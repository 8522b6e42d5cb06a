use tracing::debug;

use super::{AppEvent, KeyAction, PageContext, PageController, PageView, SessionTab, TimerView, Transition};
use crate::effects::SideEffects;
use crate::router::PageKey;
use crate::session::SessionCatalog;
use crate::settings::Settings;
use crate::timer::TimerController;

/// Widest the progress bar gets, in columns.
pub const PROGRESS_BAR_MAX_WIDTH: u16 = 43;

/// Minutes added or removed per Up/Down press.
const STEP_MINUTES: u32 = 1;

pub struct TimerPage {
    controller: TimerController,
    show_help: bool,
    progress_width: u16,
}

impl TimerPage {
    pub fn new(settings: Settings, effects: Box<dyn SideEffects>) -> Self {
        Self {
            controller: TimerController::new(settings, effects),
            show_help: false,
            progress_width: PROGRESS_BAR_MAX_WIDTH,
        }
    }

    pub fn controller(&self) -> &TimerController {
        &self.controller
    }

    fn on_key(&mut self, action: KeyAction) -> Transition {
        let event = match action {
            KeyAction::Toggle | KeyAction::Select => self.controller.toggle(),
            KeyAction::Reset => self.controller.reset(),
            KeyAction::Next => self.controller.next(),
            KeyAction::Left => self.controller.cycle_kind(-1),
            KeyAction::Right => self.controller.cycle_kind(1),
            KeyAction::Up => self.controller.add_minutes(STEP_MINUTES),
            KeyAction::Down => self.controller.subtract_minutes(STEP_MINUTES),
            KeyAction::Help => {
                self.show_help = !self.show_help;
                return Transition::Stay;
            }
            KeyAction::OpenSettings => return Transition::Navigate(PageKey::Settings),
            KeyAction::Quit => return Transition::Quit,
            KeyAction::Back => return Transition::Stay,
        };
        debug!(?event, "timer event");
        Transition::Stay
    }
}

impl PageController for TimerPage {
    fn key(&self) -> PageKey {
        PageKey::Timer
    }

    /// Pick up settings saved on the settings page. Unchanged settings leave
    /// the countdown alone.
    fn enter(&mut self, ctx: &mut PageContext) {
        let settings = ctx.store.current();
        if settings != self.controller.settings() {
            let event = self.controller.apply_settings(settings.clone());
            debug!(?event, "applied new settings");
        }
    }

    fn handle(&mut self, event: &AppEvent, _ctx: &mut PageContext) -> Transition {
        match *event {
            AppEvent::Tick(elapsed) => {
                if let Some(event) = self.controller.tick(elapsed) {
                    debug!(?event, "timer event");
                }
                Transition::Stay
            }
            AppEvent::Key(action) => self.on_key(action),
            AppEvent::Resize { width, .. } => {
                self.progress_width = width.min(PROGRESS_BAR_MAX_WIDTH);
                Transition::Stay
            }
        }
    }

    fn view(&self) -> PageView {
        let scheduler = self.controller.scheduler();
        let current = scheduler.current_kind();
        let settings = self.controller.settings();
        let show_progress = settings.show_progress_bar;
        PageView::Timer(TimerView {
            tabs: SessionCatalog::all()
                .iter()
                .map(|descriptor| SessionTab {
                    descriptor,
                    active: descriptor.kind == current,
                })
                .collect(),
            kind: current,
            state: self.controller.state(),
            remaining: self.controller.remaining(),
            progress: show_progress.then(|| self.controller.progress()),
            progress_width: self.progress_width,
            total_work_sessions: scheduler.total_work_sessions(),
            sessions_until_long_break: scheduler.sessions_until_long_break(),
            show_help: self.show_help,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::effects::NoopEffects;
    use crate::session::SessionKind;
    use crate::settings::{SettingsStore, TomlFileBackend};
    use crate::timer::TimerState;

    fn setup() -> (TimerPage, PageContext, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let ctx = PageContext {
            store: SettingsStore::open(Arc::new(TomlFileBackend::in_dir(dir.path()))),
        };
        let page = TimerPage::new(ctx.store.current().clone(), Box::new(NoopEffects));
        (page, ctx, dir)
    }

    fn timer_view(page: &TimerPage) -> TimerView {
        match page.view() {
            PageView::Timer(view) => view,
            PageView::Settings(_) => panic!("expected timer view"),
        }
    }

    #[test]
    fn keys_drive_the_controller() {
        let (mut page, mut ctx, _dir) = setup();
        page.handle(&AppEvent::Key(KeyAction::Toggle), &mut ctx);
        assert_eq!(page.controller().state(), TimerState::Running);
        page.handle(&AppEvent::Tick(Duration::from_secs(60)), &mut ctx);
        assert_eq!(page.controller().remaining(), Duration::from_secs(24 * 60));

        page.handle(&AppEvent::Key(KeyAction::Right), &mut ctx);
        assert_eq!(page.controller().scheduler().current_kind(), SessionKind::Break);
        page.handle(&AppEvent::Key(KeyAction::Up), &mut ctx);
        assert_eq!(page.controller().remaining(), Duration::from_secs(6 * 60));
        page.handle(&AppEvent::Key(KeyAction::Next), &mut ctx);
        assert_eq!(page.controller().scheduler().current_kind(), SessionKind::Work);
    }

    #[test]
    fn navigation_and_quit_transitions() {
        let (mut page, mut ctx, _dir) = setup();
        assert_eq!(
            page.handle(&AppEvent::Key(KeyAction::OpenSettings), &mut ctx),
            Transition::Navigate(PageKey::Settings)
        );
        assert_eq!(page.handle(&AppEvent::Key(KeyAction::Quit), &mut ctx), Transition::Quit);
    }

    #[test]
    fn resize_caps_progress_width() {
        let (mut page, mut ctx, _dir) = setup();
        page.handle(&AppEvent::Resize { width: 20, height: 10 }, &mut ctx);
        assert_eq!(timer_view(&page).progress_width, 20);
        page.handle(&AppEvent::Resize { width: 200, height: 10 }, &mut ctx);
        assert_eq!(timer_view(&page).progress_width, PROGRESS_BAR_MAX_WIDTH);
    }

    #[test]
    fn view_reflects_settings_and_counters() {
        let (mut page, mut ctx, _dir) = setup();
        let view = timer_view(&page);
        assert_eq!(view.tabs.len(), 3);
        assert!(view.tabs[0].active);
        assert_eq!(view.progress, Some(0.0));
        assert_eq!(view.sessions_until_long_break, Some(4));

        let mut settings = ctx.store.current().clone();
        settings.show_progress_bar = false;
        settings.work_sessions_until_long_break = 0;
        ctx.store.save(settings).unwrap();
        page.enter(&mut ctx);

        let view = timer_view(&page);
        assert_eq!(view.progress, None);
        assert_eq!(view.sessions_until_long_break, None);
    }

    #[test]
    fn entering_with_same_settings_keeps_countdown() {
        let (mut page, mut ctx, _dir) = setup();
        page.handle(&AppEvent::Key(KeyAction::Toggle), &mut ctx);
        page.handle(&AppEvent::Tick(Duration::from_secs(30)), &mut ctx);
        page.enter(&mut ctx);
        assert_eq!(page.controller().state(), TimerState::Running);
        assert_eq!(page.controller().remaining(), Duration::from_secs(25 * 60 - 30));
    }
}
