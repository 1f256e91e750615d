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

//! Pagination and search position of the media listing.

pub(crate) const FIRST_PAGE: u32 = 1;

#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct PageCursor {
    pub(crate) page_number: u32,
    pub(crate) search_text: String,
    pub(crate) has_next_page: bool,
    pub(crate) is_loading: bool,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self {
            page_number: FIRST_PAGE,
            search_text: String::new(),
            has_next_page: false,
            is_loading: false,
        }
    }
}

impl PageCursor {
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn next_page(&self) -> Option<u32> {
        if !self.has_next_page {
            return None;
        }

        self.page_number.checked_add(1)
    }
}
