use crate::quiz::QuizState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Labels shown in front of each option; also the keys that pick them.
pub const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Answer with the option at this index.
    Choose(usize),
    Advance,
    /// Start a fresh session on the same topic.
    Replay,
    Quit,
}

/// Translate a key press into a command for the given quiz state.
pub fn command_for(key: KeyEvent, state: QuizState) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    match (key.code, state) {
        (KeyCode::Esc, _) | (KeyCode::Char('q'), QuizState::Result | QuizState::Finished) => {
            Some(Command::Quit)
        }
        (KeyCode::Char(c), QuizState::Playing) => option_index(c).map(Command::Choose),
        (KeyCode::Enter | KeyCode::Right | KeyCode::Char(' ') | KeyCode::Char('n'), QuizState::Result) => {
            Some(Command::Advance)
        }
        (KeyCode::Char('r'), QuizState::Finished) => Some(Command::Replay),
        _ => None,
    }
}

fn option_index(c: char) -> Option<usize> {
    let upper = c.to_ascii_uppercase();
    OPTION_LABELS
        .iter()
        .position(|label| *label == upper)
        .or_else(|| c.to_digit(10).and_then(|d| (d as usize).checked_sub(1)).filter(|i| *i < OPTION_LABELS.len()))
}
