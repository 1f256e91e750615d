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

//! UI rendering logic for the media picker modal.
//!
//! This module draws the modal over whatever is behind it: the tab bar, the
//! search input and media table of the library tab, the path input of the
//! upload tab, and a footer with pagination status and the insert affordance.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs},
};

use crate::{
    components::{PickerFocus, PickerView},
    picker::{MediaPicker, PickerTab},
    theme::Theme,
    util::format::format_size,
};

impl PickerView {
    pub(crate) fn draw(&mut self, f: &mut Frame, area: Rect, picker: &MediaPicker, theme: &Theme) {
        let Some(tab) = picker.tab() else {
            return;
        };

        let modal = centered(area, 85, 80);
        f.render_widget(Clear, modal);

        let mode = if picker.allow_multiple() { "multiple" } else { "single" };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Media Library ({mode}) "))
            .border_style(Style::default().fg(theme.accent_colour))
            .style(Style::default().bg(theme.background_colour));

        let inner = block.inner(modal);
        f.render_widget(block, modal);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        self.draw_tabs(f, chunks[0], tab, theme);

        match tab {
            PickerTab::Library => {
                self.draw_search(f, chunks[1], theme);
                self.draw_table(f, chunks[2], picker, theme);
            }
            PickerTab::Upload => self.draw_upload(f, chunks[1], chunks[2], picker, theme),
        }

        draw_footer(f, chunks[3], picker, theme);
    }

    fn draw_tabs(&self, f: &mut Frame, area: Rect, tab: PickerTab, theme: &Theme) {
        let selected = match tab {
            PickerTab::Library => 0,
            PickerTab::Upload => 1,
        };

        let tabs = Tabs::new(vec!["Library", "Upload"])
            .select(selected)
            .style(Style::default().fg(theme.border_colour))
            .highlight_style(
                Style::default()
                    .fg(theme.accent_colour)
                    .add_modifier(Modifier::BOLD),
            );

        f.render_widget(tabs, area);
    }

    fn draw_search(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        const PROMPT: &str = "Search: ";

        let focused = self.focus == PickerFocus::Search;
        let prompt_style = if focused {
            Style::default().fg(theme.accent_colour)
        } else {
            Style::default().fg(theme.border_colour)
        };

        let line = Line::from(vec![
            Span::styled(PROMPT, prompt_style),
            Span::styled(self.search.value(), Style::default().fg(theme.commander_colour)),
        ]);
        f.render_widget(Paragraph::new(line), area);

        if focused {
            let x = area.x + (PROMPT.len() + self.search.visual_cursor()) as u16;
            f.set_cursor_position((x.min(area.right().saturating_sub(1)), area.y));
        }
    }

    fn draw_table(&mut self, f: &mut Frame, area: Rect, picker: &MediaPicker, theme: &Theme) {
        if let Some(message) = picker.load_error().filter(|_| picker.items().is_empty()) {
            draw_message(f, area, &format!("Error loading media ({message})"), theme.error_colour);
            return;
        }

        if picker.items().is_empty() {
            let message = if picker.cursor().is_loading { "Loading…" } else { "No media found" };
            draw_message(f, area, message, theme.border_colour);
            return;
        }

        self.sync_highlight(picker.items().len());

        let selection = picker.selection();
        let rows = picker.items().iter().map(|item| {
            let marker = if selection.contains(&item.url) {
                Line::from("+").style(Style::default().fg(Color::Black).bg(theme.accent_colour))
            } else {
                Line::from("")
            };

            let size = item.size.map(format_size).unwrap_or_default();

            Row::new(vec![
                Cell::from(marker),
                Cell::from(Line::from(item.name.as_str()).style(Style::default().fg(theme.table_name_fg))),
                Cell::from(
                    Line::from(item.folder.clone().unwrap_or_default())
                        .style(Style::default().fg(theme.table_folder_fg)),
                ),
                Cell::from(
                    Line::from(size)
                        .style(Style::default().fg(theme.table_size_fg))
                        .alignment(Alignment::Right),
                ),
                Cell::from(Line::from(item.url.as_str()).style(Style::default().fg(theme.table_url_fg))),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(1),
                Constraint::Percentage(35),
                Constraint::Percentage(15),
                Constraint::Length(9),
                Constraint::Percentage(50),
            ],
        )
        .header(
            Row::new(vec![
                Cell::from(""),
                Cell::from("Name"),
                Cell::from("Folder"),
                Cell::from(Line::from("Size").alignment(Alignment::Right)),
                Cell::from("Url"),
            ])
            .style(
                Style::default()
                    .fg(theme.accent_colour)
                    .add_modifier(Modifier::BOLD),
            ),
        )
        .row_highlight_style(Style::default().bg(Color::Blue).fg(Color::White));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);

        f.render_stateful_widget(table, chunks[0], &mut self.table_state);

        // Failed page appends keep the rows, the error goes underneath.
        if let Some(message) = picker.load_error() {
            draw_message(f, chunks[1], &format!("Error loading media ({message})"), theme.error_colour);
        }
    }

    fn draw_upload(&self, f: &mut Frame, input_area: Rect, body: Rect, picker: &MediaPicker, theme: &Theme) {
        const PROMPT: &str = "Files: ";

        let line = Line::from(vec![
            Span::styled(PROMPT, Style::default().fg(theme.accent_colour)),
            Span::styled(self.upload.value(), Style::default().fg(theme.commander_colour)),
        ]);
        f.render_widget(Paragraph::new(line), input_area);

        if !picker.is_uploading() {
            let x = input_area.x + (PROMPT.len() + self.upload.visual_cursor()) as u16;
            f.set_cursor_position((x.min(input_area.right().saturating_sub(1)), input_area.y));
        }

        let mut lines = vec![
            Line::from(""),
            Line::from("Type file or directory paths separated by spaces and press Enter."),
            Line::from("Directories are searched for jpg, jpeg, png, gif, webp and svg images."),
            Line::from(""),
        ];

        if picker.is_uploading() {
            lines.push(Line::from("Uploading…").style(Style::default().fg(theme.accent_colour)));
        } else if let Some(report) = picker.last_upload() {
            lines.push(Line::from(format!(
                "Last batch: {} of {} uploaded",
                report.succeeded, report.attempted
            )));
        }

        let paragraph = Paragraph::new(lines).style(Style::default().fg(theme.border_colour));
        f.render_widget(paragraph, body);
    }
}

fn draw_footer(f: &mut Frame, area: Rect, picker: &MediaPicker, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(14)])
        .split(area);

    let cursor = picker.cursor();
    let mut status = format!("Page {}", cursor.page_number);
    match picker.total_count() {
        Some(total) => status.push_str(&format!(" · {} of {} loaded", picker.items().len(), total)),
        None => status.push_str(&format!(" · {} loaded", picker.items().len())),
    }
    if cursor.has_next_page {
        status.push_str(" · n: more");
    }
    if cursor.is_loading {
        status.push_str(" · loading…");
    }
    if let Some(report) = picker.last_upload().filter(|r| r.failed() > 0) {
        status.push_str(&format!(" · {} upload(s) failed", report.failed()));
    }

    f.render_widget(
        Paragraph::new(status).style(Style::default().fg(theme.border_colour)),
        chunks[0],
    );

    let insert_style = if picker.can_insert() {
        Style::default()
            .fg(Color::Black)
            .bg(theme.accent_colour)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.disabled_colour)
    };

    f.render_widget(
        Paragraph::new(format!("[ {} ]", picker.insert_label()))
            .style(insert_style)
            .alignment(Alignment::Right),
        chunks[1],
    );
}

fn draw_message(f: &mut Frame, area: Rect, message: &str, colour: Color) {
    f.render_widget(
        Paragraph::new(message)
            .style(Style::default().fg(colour))
            .alignment(Alignment::Center),
        area,
    );
}

/// Returns a rectangle of the given percentage size centred in `area`.
fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
