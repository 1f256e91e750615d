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

//! Input handling for the media picker widget.
//!
//! This module maps raw terminal keyboard events to highlight movement, input
//! editing and [`PickerAction`]s for the event handlers to apply.

use crossterm::event::{Event, KeyCode};
use tui_input::backend::crossterm::EventHandler;

use crate::{
    components::{PickerAction, PickerFocus, PickerView},
    picker::{MediaPicker, PickerTab},
};

impl PickerView {
    pub(crate) fn process_event(&mut self, event: &Event, picker: &MediaPicker) -> Option<PickerAction> {
        let Event::Key(key_event) = event else {
            return None;
        };

        match picker.tab()? {
            PickerTab::Library if self.focus == PickerFocus::Search => match key_event.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Down => {
                    self.focus = PickerFocus::Grid;
                    None
                }
                KeyCode::Tab => Some(PickerAction::SwitchTab(PickerTab::Upload)),
                _ => {
                    let changed = self.search.handle_event(event).is_some_and(|c| c.value);
                    changed.then(|| PickerAction::SearchChanged(self.search.value().to_string()))
                }
            },

            PickerTab::Library => {
                let len = picker.items().len();

                match key_event.code {
                    KeyCode::Esc => Some(PickerAction::Close),
                    KeyCode::Tab => Some(PickerAction::SwitchTab(PickerTab::Upload)),
                    KeyCode::Char('/') => {
                        self.focus = PickerFocus::Search;
                        None
                    }

                    KeyCode::Char('j') | KeyCode::Down => {
                        let at_end = self.goto_next(len);
                        (at_end && picker.cursor().has_next_page).then_some(PickerAction::NextPage)
                    }
                    KeyCode::Char('k') | KeyCode::Up => {
                        self.goto_previous(len);
                        None
                    }
                    KeyCode::Char('g') | KeyCode::Home => {
                        self.goto_first(len);
                        None
                    }
                    KeyCode::Char('G') | KeyCode::End => {
                        self.goto_last(len);
                        None
                    }
                    KeyCode::Char('n') => Some(PickerAction::NextPage),

                    KeyCode::Char(' ') => self.highlighted(picker).cloned().map(PickerAction::Toggle),
                    KeyCode::Enter => picker.can_insert().then_some(PickerAction::Commit),

                    _ => None,
                }
            }

            PickerTab::Upload => match key_event.code {
                KeyCode::Esc => Some(PickerAction::Close),
                KeyCode::Tab => Some(PickerAction::SwitchTab(PickerTab::Library)),
                KeyCode::Enter if !picker.is_uploading() => {
                    let paths = self.upload.value().trim().to_string();
                    if paths.is_empty() {
                        return None;
                    }
                    self.upload.reset();
                    Some(PickerAction::Upload(paths))
                }
                _ => {
                    self.upload.handle_event(event);
                    None
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;
    use crate::{
        model::{MediaDescriptor, MediaPage},
        picker::PickerConfig,
        tasks::testing::RecordingSink,
    };

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn media(n: usize) -> MediaDescriptor {
        MediaDescriptor::new(format!("/uploads/{n}.png"), format!("{n}.png"))
    }

    fn loaded_picker(count: usize, has_next: bool, sink: &RecordingSink) -> MediaPicker {
        let mut picker = MediaPicker::new();
        let config = PickerConfig {
            allow_multiple: true,
            on_commit: Box::new(|_| {}),
        };
        picker.open(config, sink).unwrap();

        let (ticket, _, _) = sink.last_listing();
        let page = MediaPage {
            files: (0..count).map(media).collect(),
            has_next,
            ..MediaPage::default()
        };
        picker.on_page_loaded(ticket, Ok(page), sink).unwrap();
        picker
    }

    #[test]
    fn moving_past_last_row_requests_next_page() {
        let sink = RecordingSink::default();
        let picker = loaded_picker(2, true, &sink);
        let mut view = PickerView::new();

        assert_eq!(view.process_event(&key(KeyCode::Down), &picker), None);
        assert_eq!(view.process_event(&key(KeyCode::Down), &picker), None);
        assert_eq!(view.table_state.selected(), Some(1));
        assert_eq!(
            view.process_event(&key(KeyCode::Down), &picker),
            Some(PickerAction::NextPage)
        );
    }

    #[test]
    fn last_row_without_more_pages_stays_put() {
        let sink = RecordingSink::default();
        let picker = loaded_picker(1, false, &sink);
        let mut view = PickerView::new();

        view.process_event(&key(KeyCode::Char('j')), &picker);
        assert_eq!(view.process_event(&key(KeyCode::Char('j')), &picker), None);
        assert_eq!(view.table_state.selected(), Some(0));
    }

    #[test]
    fn space_toggles_highlighted_item() {
        let sink = RecordingSink::default();
        let picker = loaded_picker(3, false, &sink);
        let mut view = PickerView::new();

        view.process_event(&key(KeyCode::Down), &picker);
        view.process_event(&key(KeyCode::Down), &picker);

        assert_eq!(
            view.process_event(&key(KeyCode::Char(' ')), &picker),
            Some(PickerAction::Toggle(media(1)))
        );
    }

    #[test]
    fn enter_commits_only_with_a_selection() {
        let sink = RecordingSink::default();
        let mut picker = loaded_picker(3, false, &sink);
        let mut view = PickerView::new();

        assert_eq!(view.process_event(&key(KeyCode::Enter), &picker), None);

        picker.toggle_selection(media(0));
        assert_eq!(
            view.process_event(&key(KeyCode::Enter), &picker),
            Some(PickerAction::Commit)
        );
    }

    #[test]
    fn every_search_edit_is_reported() {
        let sink = RecordingSink::default();
        let picker = loaded_picker(3, false, &sink);
        let mut view = PickerView::new();

        view.process_event(&key(KeyCode::Char('/')), &picker);
        assert_eq!(view.focus, PickerFocus::Search);

        assert_eq!(
            view.process_event(&key(KeyCode::Char('s')), &picker),
            Some(PickerAction::SearchChanged("s".to_string()))
        );
        assert_eq!(
            view.process_event(&key(KeyCode::Char('o')), &picker),
            Some(PickerAction::SearchChanged("so".to_string()))
        );
        assert_eq!(
            view.process_event(&key(KeyCode::Backspace), &picker),
            Some(PickerAction::SearchChanged("s".to_string()))
        );

        view.process_event(&key(KeyCode::Esc), &picker);
        assert_eq!(view.focus, PickerFocus::Grid);
    }

    #[test]
    fn upload_tab_submits_typed_paths() {
        let sink = RecordingSink::default();
        let mut picker = loaded_picker(0, false, &sink);
        picker.set_tab(PickerTab::Upload);
        let mut view = PickerView::new();

        assert_eq!(view.process_event(&key(KeyCode::Enter), &picker), None);

        for c in "a.png".chars() {
            view.process_event(&key(KeyCode::Char(c)), &picker);
        }

        assert_eq!(
            view.process_event(&key(KeyCode::Enter), &picker),
            Some(PickerAction::Upload("a.png".to_string()))
        );
        assert_eq!(view.upload.value(), "");
    }

    #[test]
    fn closed_picker_consumes_nothing() {
        let picker = MediaPicker::new();
        let mut view = PickerView::new();

        assert_eq!(view.process_event(&key(KeyCode::Esc), &picker), None);
    }
}
