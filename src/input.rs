use crossterm::event::KeyCode;

use crate::app::App;
use crate::models::Screen;

/// Applies one key press. Returns `false` when the app should exit.
pub fn handle_key(app: &mut App, key: KeyCode) -> bool {
    if app.lang_menu.visible {
        match key {
            KeyCode::Up | KeyCode::Char('k') => app.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => app.move_cursor(1),
            KeyCode::Enter => app.activate(),
            KeyCode::Esc | KeyCode::Char('l') => app.close_language_menu(),
            KeyCode::Char('q') => return false,
            _ => {}
        }
        return true;
    }

    match key {
        KeyCode::Char('q') => return false,
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('l') => app.toggle_language_menu(),
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor(1),
        KeyCode::Enter => app.activate(),
        KeyCode::Esc | KeyCode::Char('b') => app.back(),
        _ => {}
    }

    if app.screen == Screen::Result {
        match key {
            // digits pick a card, 1-based
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if index < app.current_greetings.len() {
                    app.cursor = index;
                }
            }
            KeyCode::Char('c') => app.copy(app.cursor),
            KeyCode::Char('s') => app.share(app.cursor),
            KeyCode::Char('r') => app.regenerate(),
            KeyCode::Char('n') => app.start_over(),
            KeyCode::Char('x') => app.clear_history(),
            _ => {}
        }
    }

    true
}
