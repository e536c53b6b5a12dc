use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use super::{bold, inner_area, position_in};
use crate::app::{GameView, View};

const ANSWER_PLACEHOLDER: &str = "?";

struct PlayingLayout {
    status: Rect,
    question: Rect,
    legend: Rect,
}

fn layout(area: Rect) -> PlayingLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // status bar
            Constraint::Min(0),
            Constraint::Length(1), // question
            Constraint::Min(0),
            Constraint::Length(1), // legend
        ])
        .split(inner_area(area));

    PlayingLayout {
        status: chunks[0],
        question: chunks[2],
        legend: chunks[4],
    }
}

fn question_prefix(game: &GameView) -> String {
    format!("{} x {} = ", game.question.left, game.question.right)
}

fn answer_text<'a>(game: &GameView<'a>) -> &'a str {
    if game.pending_answer.is_empty() {
        ANSWER_PLACEHOLDER
    } else {
        game.pending_answer
    }
}

pub fn render_playing(view: &View, area: Rect, buf: &mut Buffer) {
    let Some(game) = view.game.as_ref() else {
        return;
    };
    let chunks = layout(area);

    let status = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("Question {}/{}", game.current_question, game.question_count),
            bold(),
        ),
        Span::raw("   "),
        Span::styled(format!("Score: {}", game.score), bold().fg(Color::Green)),
        Span::raw("   "),
        Span::styled("(n)ew game", Style::default().fg(Color::Red)),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    status.render(chunks.status, buf);

    let answer_style = if game.pending_answer.is_empty() {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        bold().add_modifier(Modifier::UNDERLINED)
    };
    Paragraph::new(Line::from(vec![
        Span::styled(question_prefix(game), bold()),
        Span::styled(answer_text(game), answer_style),
    ]))
    .alignment(Alignment::Center)
    .render(chunks.question, buf);

    Paragraph::new(Span::styled(
        "(0-9) answer / (enter) let's go / (n)ew game / (esc)ape",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks.legend, buf);
}

/// Where the terminal cursor sits while typing: just after the typed digits
pub fn answer_cursor(view: &View, area: Rect) -> Option<Position> {
    let game = view.game.as_ref()?;
    let row = layout(area).question;
    if row.height == 0 {
        return None;
    }

    let prefix = question_prefix(game);
    let line_width = (prefix.width() + answer_text(game).width()) as u16;
    let start = row.x + row.width.saturating_sub(line_width) / 2;
    let x = start + (prefix.width() + game.pending_answer.width()) as u16;
    position_in(row, x, row.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Action, App};
    use crate::question::ScriptedQuestions;
    use crate::setup::Configuration;
    use crate::ui::buffer_text;

    fn playing(answer: &str) -> App {
        let mut app = App::with_source(
            Configuration::default(),
            Box::new(ScriptedQuestions::new([(5, 5)])),
        );
        app.dispatch(Action::ConfirmSetup);
        app.dispatch(Action::AnswerChanged(answer.to_string()));
        app
    }

    #[test]
    fn placeholder_when_empty() {
        let app = playing("");
        let area = Rect::new(0, 0, 60, 12);
        let mut buf = Buffer::empty(area);
        render_playing(&app.view(), area, &mut buf);
        assert!(buffer_text(&buf).contains("5 x 5 = ?"));
    }

    #[test]
    fn cursor_after_typed_digits() {
        let area = Rect::new(0, 0, 60, 12);
        let empty = playing("");
        let typed = playing("25");

        let at_start = answer_cursor(&empty.view(), area).unwrap();
        let after = answer_cursor(&typed.view(), area).unwrap();
        assert_eq!(at_start.y, after.y);
        assert!(after.x > at_start.x);
    }

    #[test]
    fn no_cursor_without_room() {
        let app = playing("1");
        assert_eq!(answer_cursor(&app.view(), Rect::new(0, 0, 0, 0)), None);
    }
}
