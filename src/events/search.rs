//! Search-box key handling: a local keystroke buffer with caret editing.
//!
//! Typing never touches the location. The buffer is committed only on Enter,
//! and the title bar shows an "unsubmitted" marker while buffer and applied
//! search differ.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::events::{Effect, refresh};
use crate::state::AppState;
use crate::state::types::Focus;

/// Byte offset of the caret's character position.
fn byte_at(text: &str, caret: usize) -> usize {
    text.char_indices()
        .nth(caret)
        .map_or(text.len(), |(i, _)| i)
}

/// Insert `ch` at the caret.
fn insert_char(app: &mut AppState, ch: char) {
    let at = byte_at(&app.input, app.caret);
    app.input.insert(at, ch);
    app.caret += 1;
}

/// Remove the character before the caret.
fn backspace(app: &mut AppState) {
    if app.caret == 0 {
        return;
    }
    let at = byte_at(&app.input, app.caret - 1);
    app.input.remove(at);
    app.caret -= 1;
}

/// Remove the character under the caret.
fn delete_forward(app: &mut AppState) {
    if app.caret >= app.input.chars().count() {
        return;
    }
    let at = byte_at(&app.input, app.caret);
    app.input.remove(at);
}

/// What: Handle a key press while the search box has focus.
///
/// Details:
/// - Enter commits the buffer (the codec resets the page iff the text
///   actually changed) and issues a fetch for the new state.
/// - Esc / Tab / Down hand focus to the results list without committing.
pub fn handle_key(app: &mut AppState, key: &KeyEvent) -> Vec<Effect> {
    match key.code {
        KeyCode::Enter => {
            app.list.submit_search(&app.input, &mut app.location);
            app.input = app.list.state(&app.location).search;
            app.caret = app.input.chars().count();
            return refresh(app).into_iter().collect();
        }
        KeyCode::Esc | KeyCode::Tab | KeyCode::Down => app.focus = Focus::Results,
        KeyCode::Backspace => backspace(app),
        KeyCode::Delete => delete_forward(app),
        KeyCode::Left => app.caret = app.caret.saturating_sub(1),
        KeyCode::Right => app.caret = (app.caret + 1).min(app.input.chars().count()),
        KeyCode::Home => app.caret = 0,
        KeyCode::End => app.caret = app.input.chars().count(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.input.clear();
            app.caret = 0;
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if app.list.options().supports_search {
                insert_char(app, ch);
            }
        }
        _ => {}
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::tests::press;

    /// What: Typing edits only the buffer; Enter commits and fetches
    ///
    /// - Input: Type "dao", then Enter
    /// - Output: Location untouched until Enter; one page effect after
    #[test]
    fn search_commit_on_enter_only() {
        let mut app = AppState::default();
        for ch in ['d', 'a', 'o'] {
            assert!(handle_key(&mut app, &press(KeyCode::Char(ch))).is_empty());
        }
        assert_eq!(app.input, "dao");
        assert!(app.list.state(&app.location).search.is_empty());

        let effects = handle_key(&mut app, &press(KeyCode::Enter));
        assert!(matches!(effects.as_slice(), [Effect::Page(_)]));
        assert_eq!(app.list.state(&app.location).search, "dao");
    }

    /// What: Caret editing is char-based and bounded
    ///
    /// - Input: Multi-byte text with backspace/delete/home/end moves
    /// - Output: No mid-codepoint splits, caret clamped
    #[test]
    fn search_caret_editing() {
        let mut app = AppState::default();
        for ch in ['é', 'b', 'c'] {
            handle_key(&mut app, &press(KeyCode::Char(ch)));
        }
        handle_key(&mut app, &press(KeyCode::Home));
        handle_key(&mut app, &press(KeyCode::Delete));
        assert_eq!(app.input, "bc");
        handle_key(&mut app, &press(KeyCode::End));
        handle_key(&mut app, &press(KeyCode::Backspace));
        assert_eq!(app.input, "b");
        handle_key(&mut app, &press(KeyCode::Left));
        handle_key(&mut app, &press(KeyCode::Left));
        assert_eq!(app.caret, 0);
    }

    /// What: Views without search ignore printable input
    ///
    /// - Input: Typing on the funds view
    /// - Output: Buffer stays empty
    #[test]
    fn search_disabled_views_ignore_typing() {
        let mut app = AppState::new(
            crate::query::params::View::Funds,
            crate::config::Settings::default(),
        );
        handle_key(&mut app, &press(KeyCode::Char('x')));
        assert!(app.input.is_empty());
    }
}
