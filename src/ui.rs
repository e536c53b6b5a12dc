pub mod playing;
pub mod popup;
pub mod setup;

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Modifier, Style},
    widgets::Widget,
    Frame,
};

use crate::app::{App, ScreenKind, View};
use crate::game::Focus;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

impl Widget for &View<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.screen {
            ScreenKind::Setup => setup::render_setup(self, area, buf),
            ScreenKind::Playing => {
                playing::render_playing(self, area, buf);
                popup::render_modal(self, area, buf);
            }
        }
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        (&self.view()).render(area, buf);
    }
}

/// Draw a full frame and place the terminal cursor on the answer field when it has focus
pub fn draw(app: &App, f: &mut Frame) {
    let view = app.view();
    let area = f.area();
    f.render_widget(&view, area);

    if view.focus == Focus::Answer {
        if let Some(pos) = playing::answer_cursor(&view, area) {
            f.set_cursor_position(pos);
        }
    }
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn inner_area(area: Rect) -> Rect {
    Rect {
        x: area.x + HORIZONTAL_MARGIN.min(area.width / 2),
        y: area.y + VERTICAL_MARGIN.min(area.height / 2),
        width: area.width.saturating_sub(HORIZONTAL_MARGIN * 2),
        height: area.height.saturating_sub(VERTICAL_MARGIN * 2),
    }
}

/// A `width` x `height` rect centered in `area`, shrunk to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn position_in(area: Rect, x: u16, y: u16) -> Option<Position> {
    let pos = Position::new(x, y);
    area.contains(pos).then_some(pos)
}

#[cfg(test)]
pub(crate) fn buffer_text(buf: &Buffer) -> String {
    let area = buf.area();
    (area.y..area.y + area.height)
        .map(|y| {
            (area.x..area.x + area.width)
                .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
