use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::{bold, inner_area};
use crate::app::View;
use crate::setup::QuestionCount;

pub fn render_setup(view: &View, area: Rect, buf: &mut Buffer) {
    let tables_max = view.config.tables_max;
    let selected = view.config.question_count;

    let title_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(2), // tables prompt
            Constraint::Length(2), // stepper
            Constraint::Length(2), // count prompt
            Constraint::Length(2), // selector
            Constraint::Min(0),
            Constraint::Length(1), // legend
        ])
        .split(inner_area(area));

    Paragraph::new(Span::styled(
        "I want to practice times tables up to...",
        title_style,
    ))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .render(chunks[1], buf);

    let arrow = |enabled: bool, symbol: &'static str| {
        if enabled {
            Span::styled(symbol, bold())
        } else {
            Span::styled(symbol, dim_style)
        }
    };
    Paragraph::new(Line::from(vec![
        arrow(tables_max.can_decrement(), "◀"),
        Span::styled(format!("  {:>2}  ", tables_max.get()), bold()),
        arrow(tables_max.can_increment(), "▶"),
    ]))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);

    Paragraph::new(Span::styled(
        "I want to answer this many questions...",
        title_style,
    ))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .render(chunks[3], buf);

    let mut segments = Vec::with_capacity(QuestionCount::ALL.len() * 2);
    for (i, count) in QuestionCount::ALL.into_iter().enumerate() {
        if i > 0 {
            segments.push(Span::styled(" │ ", dim_style));
        }
        let style = if count == selected {
            bold().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        segments.push(Span::styled(format!(" {count:>2} "), style));
    }
    Paragraph::new(Line::from(segments))
        .alignment(Alignment::Center)
        .render(chunks[4], buf);

    Paragraph::new(Span::styled(
        "(←/→) tables / (↑/↓) questions / (enter) next / (esc)ape",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks[6], buf);
}
