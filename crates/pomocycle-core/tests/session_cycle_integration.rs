//! End-to-end session cycles driven through the app's event interface.
//!
//! These tests feed ticks and key actions into [`App`] the way the terminal
//! loop does and check the scheduler, countdown, side effects and settings
//! persistence together.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use pomocycle_core::{
    App, AppEvent, Flow, KeyAction, PageKey, PageView, SessionKind, Settings, SettingsStore, SideEffects,
    TimerState, TimerView, TomlFileBackend,
};

#[derive(Clone, Default)]
struct Recorder {
    notifications: Rc<RefCell<Vec<String>>>,
    sounds: Rc<RefCell<u32>>,
}

impl SideEffects for Recorder {
    fn notify(&self, title: &str, _message: &str) {
        self.notifications.borrow_mut().push(title.to_string());
    }

    fn play_sound(&self) {
        *self.sounds.borrow_mut() += 1;
    }
}

fn minute_settings() -> Settings {
    let mut settings = Settings::default();
    for kind in SessionKind::ALL {
        settings.durations[kind] = Duration::from_secs(60);
    }
    settings
}

fn open_app(dir: &tempfile::TempDir, recorder: &Recorder) -> App {
    let store = SettingsStore::open(Arc::new(TomlFileBackend::in_dir(dir.path())));
    App::new(store, Box::new(recorder.clone())).unwrap()
}

fn timer_view(app: &App) -> TimerView {
    match app.view() {
        PageView::Timer(view) => view,
        PageView::Settings(_) => panic!("expected the timer page"),
    }
}

fn key(app: &mut App, action: KeyAction) -> Flow {
    app.handle(AppEvent::Key(action))
}

/// Deliver one-second ticks until `secs` have elapsed.
fn run_for(app: &mut App, secs: u64) {
    for _ in 0..secs {
        app.handle(AppEvent::Tick(Duration::from_secs(1)));
    }
}

#[test]
fn full_cycle_reaches_long_break_after_four_work_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = SettingsStore::open(Arc::new(TomlFileBackend::in_dir(dir.path())));
    store.save(minute_settings()).unwrap();
    drop(store);

    let recorder = Recorder::default();
    let mut app = open_app(&dir, &recorder);
    key(&mut app, KeyAction::Toggle);

    let mut kinds = Vec::new();
    for _ in 0..8 {
        run_for(&mut app, 60);
        kinds.push(timer_view(&app).kind);
    }

    use SessionKind::{Break, LongBreak, Work};
    assert_eq!(kinds, vec![Break, Work, Break, Work, Break, Work, LongBreak, Work]);

    let view = timer_view(&app);
    assert_eq!(view.total_work_sessions, 4);
    assert_eq!(view.sessions_until_long_break, Some(4));
    assert_eq!(view.state, TimerState::Running);
    assert_eq!(recorder.notifications.borrow().len(), 8);
    assert_eq!(*recorder.sounds.borrow(), 8);
    assert_eq!(recorder.notifications.borrow()[6], "Long Break");
}

#[test]
fn disabled_auto_start_waits_for_the_user() {
    let dir = tempfile::tempdir().unwrap();
    let recorder = Recorder::default();
    let mut app = open_app(&dir, &recorder);

    // Turn off auto start for breaks and shorten work to one minute.
    key(&mut app, KeyAction::OpenSettings);
    for _ in 0..24 {
        key(&mut app, KeyAction::Left);
    }
    for _ in 0..5 {
        key(&mut app, KeyAction::Down);
    }
    key(&mut app, KeyAction::Toggle);
    key(&mut app, KeyAction::Back);
    assert_eq!(app.current_page(), PageKey::Timer);
    assert!(!app.settings().auto_starts(SessionKind::Break));
    assert_eq!(app.settings().duration(SessionKind::Work), Duration::from_secs(60));

    key(&mut app, KeyAction::Toggle);
    run_for(&mut app, 60);
    let view = timer_view(&app);
    assert_eq!(view.kind, SessionKind::Break);
    assert_eq!(view.state, TimerState::Idle);

    run_for(&mut app, 30);
    assert_eq!(timer_view(&app).remaining, Duration::from_secs(5 * 60));
}

#[test]
fn manual_decrease_through_zero_advances_once() {
    let dir = tempfile::tempdir().unwrap();
    let recorder = Recorder::default();
    let mut app = open_app(&dir, &recorder);

    for _ in 0..24 {
        key(&mut app, KeyAction::Down);
    }
    assert_eq!(timer_view(&app).remaining, Duration::from_secs(60));
    assert_eq!(timer_view(&app).total_work_sessions, 0);

    key(&mut app, KeyAction::Down);
    let view = timer_view(&app);
    assert_eq!(view.kind, SessionKind::Break);
    assert_eq!(view.total_work_sessions, 1);
    assert_eq!(view.remaining, Duration::from_secs(5 * 60));
    assert_eq!(recorder.notifications.borrow().as_slice(), &["Short Break".to_string()]);
}

#[test]
fn settings_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let recorder = Recorder::default();
    {
        let mut app = open_app(&dir, &recorder);
        key(&mut app, KeyAction::OpenSettings);
        for _ in 0..3 {
            key(&mut app, KeyAction::Down);
        }
        // Long break interval 4 -> 0.
        for _ in 0..4 {
            key(&mut app, KeyAction::Left);
        }
        key(&mut app, KeyAction::Back);
        assert_eq!(key(&mut app, KeyAction::Quit), Flow::Quit);
    }

    let app = open_app(&dir, &recorder);
    assert_eq!(app.settings().work_sessions_until_long_break, 0);
    assert_eq!(timer_view(&app).sessions_until_long_break, None);
}

#[test]
fn counters_survive_a_visit_to_settings() {
    let dir = tempfile::tempdir().unwrap();
    let recorder = Recorder::default();
    let mut app = open_app(&dir, &recorder);

    key(&mut app, KeyAction::Next);
    key(&mut app, KeyAction::Next);
    assert_eq!(timer_view(&app).total_work_sessions, 1);

    key(&mut app, KeyAction::OpenSettings);
    key(&mut app, KeyAction::Right);
    key(&mut app, KeyAction::Back);

    let view = timer_view(&app);
    assert_eq!(view.total_work_sessions, 1);
    assert_eq!(view.kind, SessionKind::Work);
    assert_eq!(view.remaining, Duration::from_secs(26 * 60));
    assert!(recorder.notifications.borrow().is_empty());
}

#[test]
fn partial_minute_document_falls_back_and_survives_an_unedited_visit() {
    let dir = tempfile::tempdir().unwrap();
    let mut doc = Settings::default().to_toml().unwrap();
    doc = doc.replacen("work = 1500", "work = 90", 1);
    std::fs::write(dir.path().join("settings.toml"), doc).unwrap();

    let recorder = Recorder::default();
    let mut app = open_app(&dir, &recorder);
    assert_eq!(app.settings(), &Settings::default());

    key(&mut app, KeyAction::Toggle);
    run_for(&mut app, 30);
    key(&mut app, KeyAction::OpenSettings);
    key(&mut app, KeyAction::Back);

    let view = timer_view(&app);
    assert_eq!(view.state, TimerState::Running);
    assert_eq!(view.remaining, Duration::from_secs(25 * 60 - 30));

    let reopened = SettingsStore::open(Arc::new(TomlFileBackend::in_dir(dir.path())));
    assert_eq!(reopened.current().duration(SessionKind::Work), Duration::from_secs(25 * 60));
}
