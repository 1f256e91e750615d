// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Render the host screen behind the picker.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Padding, Paragraph, Row, Table},
};

use crate::App;

const HELP: &str = "o: pick one · O: pick several · c: clear · :: command · q: quit";

/// Renders the media inserted so far, or a hint when there is none.
pub(crate) fn draw_home(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(vec![
            Span::styled(" Inserted media ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("({}) ", app.inserted.len())),
        ]))
        .title_bottom(Line::from(format!(" {HELP} ")).style(Style::default().fg(theme.border_colour)))
        .border_style(Style::default().fg(theme.border_colour))
        .padding(Padding::horizontal(1));

    if app.inserted.is_empty() {
        let hint = Paragraph::new("Nothing inserted yet, press o to open the media library")
            .style(Style::default().fg(theme.disabled_colour))
            .block(block);
        f.render_widget(hint, area);
        return;
    }

    let rows = app.inserted.iter().map(|item| {
        Row::new(vec![
            Cell::from(Line::from(item.name.as_str()).style(Style::default().fg(theme.table_name_fg))),
            Cell::from(Line::from(item.url.as_str()).style(Style::default().fg(theme.table_url_fg))),
        ])
    });

    let table = Table::new(rows, [Constraint::Percentage(35), Constraint::Percentage(65)])
        .header(
            Row::new(vec![Cell::from("Name"), Cell::from("Url")]).style(
                Style::default()
                    .fg(theme.accent_colour)
                    .add_modifier(Modifier::BOLD),
            ),
        )
        .block(block);

    f.render_widget(table, area);
}
