use tracing::info;

use super::{AppEvent, KeyAction, PageContext, PageController, PageView, SettingsView, Transition};
use crate::router::PageKey;
use crate::settings::{Settings, SettingsForm};

pub struct SettingsPage {
    form: SettingsForm,
    show_help: bool,
}

impl SettingsPage {
    pub fn new(settings: &Settings) -> Self {
        Self {
            form: SettingsForm::from_settings(settings),
            show_help: false,
        }
    }

    pub fn form(&self) -> &SettingsForm {
        &self.form
    }
}

impl PageController for SettingsPage {
    fn key(&self) -> PageKey {
        PageKey::Settings
    }

    fn enter(&mut self, ctx: &mut PageContext) {
        self.form = SettingsForm::from_settings(ctx.store.current());
    }

    fn handle(&mut self, event: &AppEvent, ctx: &mut PageContext) -> Transition {
        let AppEvent::Key(action) = *event else {
            return Transition::Stay;
        };

        match action {
            KeyAction::Up => self.form.move_cursor(-1),
            KeyAction::Down => self.form.move_cursor(1),
            KeyAction::Left => self.form.decrease(),
            KeyAction::Right => self.form.increase(),
            KeyAction::Toggle | KeyAction::Select => self.form.toggle_current(),
            KeyAction::Reset => self.form.reset_to_defaults(),
            KeyAction::Help => self.show_help = !self.show_help,
            KeyAction::Back => {
                // The store keeps the new value in memory even if the write fails.
                if let Err(e) = ctx.store.save(self.form.to_settings()) {
                    info!(error = %e, "settings kept in memory only");
                }
                return Transition::Navigate(PageKey::Timer);
            }
            KeyAction::Quit => return Transition::Quit,
            KeyAction::Next | KeyAction::OpenSettings => {}
        }
        Transition::Stay
    }

    fn view(&self) -> PageView {
        PageView::Settings(SettingsView {
            fields: self.form.fields().to_vec(),
            cursor: self.form.cursor(),
            show_help: self.show_help,
        })
    }
}
