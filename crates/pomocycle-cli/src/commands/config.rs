use std::path::Path;
use std::sync::Arc;

use clap::Subcommand;
use pomocycle_core::{Settings, SettingsStore, TomlFileBackend};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective settings as TOML
    Show,
    /// Print the settings file location
    Path,
    /// Reset settings to defaults
    Reset,
}

pub fn run(action: ConfigAction, dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let backend = TomlFileBackend::in_dir(dir);
    match action {
        ConfigAction::Show => {
            let store = SettingsStore::open(Arc::new(backend));
            print!("{}", store.current().to_toml()?);
        }
        ConfigAction::Path => {
            println!("{}", backend.path().display());
        }
        ConfigAction::Reset => {
            let mut store = SettingsStore::open(Arc::new(backend));
            store.save(Settings::default())?;
            println!("settings reset to defaults");
        }
    }
    Ok(())
}
