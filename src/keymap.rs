//! Translates terminal key presses into core actions.
//!
//! This is the input-handling layer: answer entry only ever produces
//! digits and never grows past `MAX_ANSWER_LEN`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{Action, Modal, ScreenKind, View};
use crate::game::MAX_ANSWER_LEN;
use crate::setup::QuestionCount;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Action),
    Quit,
}

pub fn map_key(view: &View, key: KeyEvent) -> Option<Command> {
    // ctrl+c to quit from anywhere
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    match view.screen {
        ScreenKind::Setup => setup_key(key),
        ScreenKind::Playing => match view.modal {
            Modal::None => answer_key(view, key),
            Modal::Feedback | Modal::Summary => acknowledge_key(key),
            Modal::ResetConfirm => reset_key(key),
        },
    }
}

fn setup_key(key: KeyEvent) -> Option<Command> {
    let action = match key.code {
        KeyCode::Esc => return Some(Command::Quit),
        KeyCode::Left | KeyCode::Char('-') => Action::StepDown,
        KeyCode::Right | KeyCode::Char('+') => Action::StepUp,
        KeyCode::Down | KeyCode::Tab => Action::NextQuestionCount,
        KeyCode::Up | KeyCode::BackTab => Action::PreviousQuestionCount,
        KeyCode::Char('1') => Action::SelectQuestionCount(QuestionCount::Five),
        KeyCode::Char('2') => Action::SelectQuestionCount(QuestionCount::Ten),
        KeyCode::Char('3') => Action::SelectQuestionCount(QuestionCount::Twenty),
        KeyCode::Enter => Action::ConfirmSetup,
        _ => return None,
    };
    Some(Command::Dispatch(action))
}

fn answer_key(view: &View, key: KeyEvent) -> Option<Command> {
    let pending = view
        .game
        .as_ref()
        .map(|g| g.pending_answer)
        .unwrap_or_default();

    let action = match key.code {
        KeyCode::Esc => return Some(Command::Quit),
        KeyCode::Char(c) if c.is_ascii_digit() => {
            if pending.chars().count() >= MAX_ANSWER_LEN {
                return None;
            }
            let mut text = pending.to_string();
            text.push(c);
            Action::AnswerChanged(text)
        }
        KeyCode::Backspace => {
            if pending.is_empty() {
                return None;
            }
            let mut text = pending.to_string();
            text.pop();
            Action::AnswerChanged(text)
        }
        KeyCode::Enter => Action::Submit,
        KeyCode::Char('n') => Action::RequestReset,
        _ => return None,
    };
    Some(Command::Dispatch(action))
}

fn acknowledge_key(key: KeyEvent) -> Option<Command> {
    let action = match key.code {
        KeyCode::Esc => return Some(Command::Quit),
        KeyCode::Enter | KeyCode::Char(' ') => Action::Acknowledge,
        KeyCode::Char('n') => Action::RequestReset,
        _ => return None,
    };
    Some(Command::Dispatch(action))
}

fn reset_key(key: KeyEvent) -> Option<Command> {
    let action = match key.code {
        KeyCode::Char('y') | KeyCode::Enter => Action::ConfirmReset,
        KeyCode::Char('n') | KeyCode::Esc => Action::CancelReset,
        _ => return None,
    };
    Some(Command::Dispatch(action))
}
