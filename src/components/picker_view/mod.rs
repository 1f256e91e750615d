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

//! Interactive media picker widget state.
//!
//! This module holds the transient view state of the picker modal: the
//! highlighted row, the search and upload inputs and which of them has focus.
//! The picker's own state lives in [`crate::picker::MediaPicker`]; this view
//! only reads it and reports user intent as [`PickerAction`]s, which the event
//! handlers apply.

mod event;
mod render;

use ratatui::widgets::TableState;
use tui_input::Input;

use crate::{
    model::MediaDescriptor,
    picker::{MediaPicker, PickerTab},
};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum PickerFocus {
    Grid,
    Search,
}

#[derive(Debug, PartialEq)]
pub(crate) enum PickerAction {
    Close,
    Commit,
    Toggle(MediaDescriptor),
    SearchChanged(String),
    NextPage,
    Upload(String),
    SwitchTab(PickerTab),
}

pub(crate) struct PickerView {
    pub(crate) table_state: TableState,
    pub(crate) search: Input,
    pub(crate) upload: Input,
    pub(crate) focus: PickerFocus,
}

impl PickerView {
    pub(crate) fn new() -> Self {
        Self {
            table_state: TableState::new(),
            search: Input::default(),
            upload: Input::default(),
            focus: PickerFocus::Grid,
        }
    }

    /// Returns the view to its initial state, used whenever the picker opens.
    pub(crate) fn reset(&mut self) {
        *self = Self::new();
    }

    /// Whether typed characters belong to one of the picker's inputs.
    pub(crate) fn is_editing(&self, picker: &MediaPicker) -> bool {
        match picker.tab() {
            Some(PickerTab::Library) => self.focus == PickerFocus::Search,
            Some(PickerTab::Upload) => true,
            None => false,
        }
    }

    pub(crate) fn highlighted<'a>(&self, picker: &'a MediaPicker) -> Option<&'a MediaDescriptor> {
        let index = self.table_state.selected()?;
        picker.items().get(index)
    }

    /// Keeps the highlight on a valid row after the listing changed.
    pub(crate) fn sync_highlight(&mut self, len: usize) {
        match self.table_state.selected() {
            _ if len == 0 => self.table_state.select(None),
            Some(i) if i >= len => self.table_state.select(Some(len - 1)),
            None => self.table_state.select(Some(0)),
            Some(_) => {}
        }
    }

    /// Moves the highlight down.
    ///
    /// Returns `true` when the highlight is already on the last loaded row,
    /// which is where the next page should be requested.
    fn goto_next(&mut self, len: usize) -> bool {
        if len == 0 {
            return false;
        }

        match self.table_state.selected() {
            Some(i) if i + 1 >= len => true,
            Some(i) => {
                self.table_state.select(Some(i + 1));
                false
            }
            None => {
                self.table_state.select(Some(0));
                false
            }
        }
    }

    fn goto_previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }

        let i = match self.table_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    fn goto_first(&mut self, len: usize) {
        if len > 0 {
            self.table_state.select(Some(0));
        }
    }

    fn goto_last(&mut self, len: usize) {
        if len > 0 {
            self.table_state.select(Some(len - 1));
        }
    }
}
