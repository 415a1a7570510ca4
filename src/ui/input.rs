use crate::ui::{message::AppMessage, state::Focus};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key(key: KeyEvent, focus: Focus) -> Option<AppMessage> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => Some(AppMessage::Quit),
                KeyCode::Char('g') => Some(AppMessage::Submit),
                KeyCode::Char('p') => Some(AppMessage::TogglePlayback),
                KeyCode::Char('x') => Some(AppMessage::StopPlayback),
                KeyCode::Char('d') => Some(AppMessage::Download),
                KeyCode::Char('u') => Some(AppMessage::ClearField),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Tab => return Some(AppMessage::FocusNext),
            KeyCode::BackTab => return Some(AppMessage::FocusPrevious),
            _ => {}
        }

        match focus {
            Focus::Lyrics => match key.code {
                KeyCode::Enter => Some(AppMessage::Input('\n')),
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => {
                    Some(AppMessage::Input(c))
                }
                KeyCode::Backspace => Some(AppMessage::Backspace),
                _ => None,
            },
            Focus::Genre => match key.code {
                KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => {
                    Some(AppMessage::PreviousGenre)
                }
                KeyCode::Right
                | KeyCode::Down
                | KeyCode::Char('l')
                | KeyCode::Char('j')
                | KeyCode::Char(' ') => Some(AppMessage::NextGenre),
                KeyCode::Enter => Some(AppMessage::FocusNext),
                _ => None,
            },
            Focus::VoiceSample => match key.code {
                KeyCode::Enter => Some(AppMessage::FocusNext),
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => {
                    Some(AppMessage::Input(c))
                }
                KeyCode::Backspace => Some(AppMessage::Backspace),
                _ => None,
            },
            Focus::Submit => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => Some(AppMessage::Submit),
                KeyCode::Esc => Some(AppMessage::Quit),
                _ => None,
            },
        }
    }
}
