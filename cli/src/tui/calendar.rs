// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use chrono::Datelike;
use daycal_core::{HolidayKind, Marker};
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;

use crate::tui::app_store::AppStore;
use crate::tui::component::{Component, Message, set_line_clipped, set_string_clipped};
use crate::tui::component_page::SinglePage;
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::util::truncate_to_width;

const CELL_WIDTH: u16 = 6;
const CELL_HEIGHT: u16 = 3;
const GRID_WIDTH: u16 = CELL_WIDTH * 7;
const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MARKER: &str = "●";

/// Columns available for markers and the event title inside a cell.
const LABEL_WIDTH: usize = CELL_WIDTH as usize - 1;

/// Offset of the first week row from the top of the grid.
const WEEKS_TOP: u16 = 3;

pub fn new_calendar() -> SinglePage<AppStore, MonthGrid> {
    SinglePage::new("Calendar", MonthGrid).with_instructions(vec![
        ("Move", "<Arrows>"),
        ("Month", "<PgUp/PgDn>"),
        ("Open", "<Enter>"),
        ("Quit", "<q>"),
    ])
}

fn marker_color(marker: Marker) -> Color {
    match marker {
        Marker::Holiday(HolidayKind::Public) => Color::Red,
        Marker::Holiday(HolidayKind::Bank) => Color::Blue,
        Marker::Holiday(HolidayKind::Mercantile) => Color::Rgb(0xff, 0x00, 0xaa),
        Marker::Event => Color::Rgb(0x93, 0x00, 0xff),
    }
}

/// The month grid with its title, weekday header, legend and notice line.
pub struct MonthGrid;

impl MonthGrid {
    /// Top-left corner of the cell at the given week row and weekday column.
    fn cell_origin(grid: Rect, row: u16, col: u16) -> (u16, u16) {
        (
            grid.x + col * CELL_WIDTH,
            grid.y + WEEKS_TOP + row * CELL_HEIGHT,
        )
    }

    fn grid_area(area: Rect) -> Rect {
        let x = area.x + area.width.saturating_sub(GRID_WIDTH) / 2;
        Rect::new(x, area.y, GRID_WIDTH.min(area.width), area.height)
    }

    fn render_legend(area: Rect, x: u16, y: u16, buf: &mut Buffer) {
        let items = [
            Marker::Holiday(HolidayKind::Public),
            Marker::Holiday(HolidayKind::Bank),
            Marker::Holiday(HolidayKind::Mercantile),
            Marker::Event,
        ];

        let mut spans = Vec::new();
        for marker in items {
            let label = match marker {
                Marker::Holiday(kind) => kind.label(),
                Marker::Event => "Event",
            };
            spans.push(Span::styled(MARKER, Style::new().fg(marker_color(marker))));
            spans.push(Span::raw(format!(" {label}  ")));
        }
        set_line_clipped(buf, area, x, y, &Line::from(spans));
    }
}

impl Component<AppStore> for MonthGrid {
    fn render(&self, store: &RefCell<AppStore>, area: Rect, buf: &mut Buffer) {
        let store = store.borrow();
        let events = store.events.borrow();
        let view = &store.view;
        let grid = Self::grid_area(area);

        let title = Line::from(vec![
            "◀ ".dark_gray(),
            view.month_title().bold(),
            " ▶".dark_gray(),
        ]);
        let title_x = grid.x + GRID_WIDTH.saturating_sub(title.width() as u16) / 2;
        set_line_clipped(buf, area, title_x, grid.y, &title);

        for (col, name) in WEEKDAYS.iter().enumerate() {
            let x = grid.x + col as u16 * CELL_WIDTH + 1;
            set_string_clipped(buf, area, x, grid.y + 2, name, Style::new().bold());
        }

        let selected = view.selected().day();
        let weeks = view.grid();
        for (row, week) in weeks.iter().enumerate() {
            for (col, day) in week.iter().enumerate() {
                let Some(day) = *day else {
                    continue;
                };

                let (x, y) = Self::cell_origin(grid, row as u16, col as u16);
                if y >= area.bottom() {
                    continue;
                }

                let mut style = Style::new();
                if view.is_today(day) {
                    style = style.fg(Color::Yellow).bold();
                }
                if day == selected {
                    style = style.reversed();
                }
                set_string_clipped(buf, area, x + 1, y, &format!("{day:>3}"), style);

                let markers = view.markers_for_day(&events, day);
                for (i, marker) in markers.iter().take(LABEL_WIDTH).enumerate() {
                    let style = Style::new().fg(marker_color(*marker));
                    set_string_clipped(buf, area, x + 1 + i as u16, y + 1, MARKER, style);
                }

                if let Some(event) = view.event_for_day(&events, day) {
                    let label = truncate_to_width(&event.title, LABEL_WIDTH);
                    let style = Style::new().fg(marker_color(Marker::Event));
                    set_string_clipped(buf, area, x + 1, y + 2, label, style);
                }
            }
        }

        let bottom = grid.y + WEEKS_TOP + weeks.len() as u16 * CELL_HEIGHT + 1;
        Self::render_legend(area, grid.x, bottom, buf);
        if let Some(notice) = store.notice.borrow().as_deref() {
            set_string_clipped(buf, area, grid.x, bottom + 2, notice, Style::new().green());
        }
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        _store: &RefCell<AppStore>,
        _area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        let action = match event.code {
            KeyCode::Left | KeyCode::Char('h') => Action::MoveSelection(-1),
            KeyCode::Right | KeyCode::Char('l') => Action::MoveSelection(1),
            KeyCode::Up | KeyCode::Char('k') => Action::MoveSelection(-7),
            KeyCode::Down | KeyCode::Char('j') => Action::MoveSelection(7),
            KeyCode::PageUp | KeyCode::Char('[') | KeyCode::Char('p') => Action::ChangeMonth(-1),
            KeyCode::PageDown | KeyCode::Char(']') | KeyCode::Char('n') => Action::ChangeMonth(1),
            KeyCode::Enter | KeyCode::Char(' ') => Action::PressDay,
            KeyCode::Char('q') => return Some(Message::Exit),
            _ => return None,
        };

        dispatcher.dispatch(action);
        Some(Message::Handled)
    }
}
