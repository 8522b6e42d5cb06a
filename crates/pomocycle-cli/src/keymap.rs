//! Key classification.
//!
//! Letter bindings also accept the character in the same position on a
//! Russian ЙЦУКЕН layout, so switching keyboard layouts does not break them.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use pomocycle_core::{KeyAction, PageKey};

pub fn classify(key: &KeyEvent) -> Option<KeyAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(KeyAction::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char(' ') => Some(KeyAction::Toggle),
        KeyCode::Enter => Some(KeyAction::Select),
        KeyCode::Esc => Some(KeyAction::Back),
        KeyCode::Up => Some(KeyAction::Up),
        KeyCode::Down => Some(KeyAction::Down),
        KeyCode::Left => Some(KeyAction::Left),
        KeyCode::Right => Some(KeyAction::Right),
        KeyCode::Char(c) => classify_char(c),
        _ => None,
    }
}

fn classify_char(c: char) -> Option<KeyAction> {
    let action = match c.to_lowercase().next()? {
        'k' | 'w' | 'л' | 'ц' => KeyAction::Up,
        'j' | 's' | 'о' | 'ы' => KeyAction::Down,
        'h' | 'a' | 'р' | 'ф' => KeyAction::Left,
        'l' | 'd' | 'д' | 'в' => KeyAction::Right,
        'r' | 'к' => KeyAction::Reset,
        'n' | 'т' => KeyAction::Next,
        '?' | '/' => KeyAction::Help,
        'o' | 'щ' | ',' => KeyAction::OpenSettings,
        'b' | 'и' => KeyAction::Back,
        'q' | 'й' => KeyAction::Quit,
        _ => return None,
    };
    Some(action)
}

/// Key hints shown in the help footer, short form first.
pub fn short_help(page: PageKey) -> &'static str {
    match page {
        PageKey::Timer => "space start/stop • n next • o settings • ? help • q quit",
        PageKey::Settings => "↑/↓ move • ←/→ change • space toggle • esc back • ? help",
    }
}

pub fn full_help(page: PageKey) -> &'static [(&'static str, &'static str)] {
    match page {
        PageKey::Timer => &[
            ("space/enter", "start or stop"),
            ("r", "reset the current session"),
            ("n", "skip to the next session"),
            ("←/h  →/l", "switch session"),
            ("↑/k  ↓/j", "add or remove a minute"),
            ("o", "open settings"),
            ("?", "toggle help"),
            ("q/ctrl+c", "quit"),
        ],
        PageKey::Settings => &[
            ("↑/k  ↓/j", "move between fields"),
            ("←/h  →/l", "decrease or increase"),
            ("space/enter", "flip a toggle"),
            ("r", "restore defaults"),
            ("esc/b", "save and go back"),
            ("?", "toggle help"),
            ("q/ctrl+c", "quit without saving"),
        ],
    }
}
