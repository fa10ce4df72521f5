use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::session::{DialogKey, Signal};
use crate::tui::app::App;

use super::plain_char;

/// Translate a key into dialog input. Unmapped keys leave the dialog open.
fn dialog_key(key: &KeyEvent) -> Option<DialogKey> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(DialogKey::Dismiss),
            _ => None,
        };
    }
    if let Some(c) = plain_char(key) {
        return match c {
            'y' | 'Y' => Some(DialogKey::Accept),
            'n' | 'N' | 'q' => Some(DialogKey::Dismiss),
            'h' | 'l' => Some(DialogKey::Toggle),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
            Some(DialogKey::Toggle)
        }
        KeyCode::Enter => Some(DialogKey::Submit),
        KeyCode::Esc => Some(DialogKey::Dismiss),
        _ => None,
    }
}

/// Every key goes to the dialog while one is open
pub(super) fn handle_dialog(app: &mut App, key: &KeyEvent) -> Signal {
    // A confirm view without a dialog has nothing to confirm
    if app.session.dialog().is_none() {
        return app.session.cancel_dialog();
    }
    match dialog_key(key) {
        Some(k) => app.session.dialog_input(k),
        None => Signal::None,
    }
}
