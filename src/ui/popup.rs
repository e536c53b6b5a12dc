use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::{bold, centered};
use crate::app::{Modal, View};

const POPUP_WIDTH: u16 = 50;
const POPUP_HEIGHT: u16 = 6;

struct Popup {
    title: String,
    accent: Color,
    message: String,
    hint: &'static str,
}

fn popup_for(view: &View) -> Option<Popup> {
    let game = view.game.as_ref()?;
    match view.modal {
        Modal::None => None,
        Modal::Feedback => {
            let fb = game.feedback?;
            Some(Popup {
                title: fb.title().to_string(),
                accent: if fb.is_correct() {
                    Color::Green
                } else {
                    Color::Red
                },
                message: fb.message(),
                hint: "(enter) next",
            })
        }
        Modal::ResetConfirm => Some(Popup {
            title: "New Game".to_string(),
            accent: Color::Yellow,
            message: "Are you sure you want to start a new game?".to_string(),
            hint: "(y)es / (n)o",
        }),
        Modal::Summary => Some(Popup {
            title: "Game Over".to_string(),
            accent: Color::Cyan,
            message: game.summary.clone().unwrap_or_default(),
            hint: "(enter) play again / (n)ew game",
        }),
    }
}

pub fn render_modal(view: &View, area: Rect, buf: &mut Buffer) {
    let Some(popup) = popup_for(view) else {
        return;
    };
    let rect = centered(area, POPUP_WIDTH, POPUP_HEIGHT);
    Clear.render(rect, buf);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(popup.accent))
        .title(Span::styled(popup.title, bold().fg(popup.accent)));

    Paragraph::new(vec![
        Line::from(Span::raw(popup.message)),
        Line::from(""),
        Line::from(Span::styled(
            popup.hint,
            Style::default().add_modifier(Modifier::ITALIC),
        )),
    ])
    .block(block)
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .render(rect, buf);
}
