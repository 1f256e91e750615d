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

//! Ordered, url-unique set of selected media.

use crate::model::MediaDescriptor;

#[derive(Debug, Default, Clone)]
pub(crate) struct SelectionSet {
    items: Vec<MediaDescriptor>,
}

impl SelectionSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn items(&self) -> &[MediaDescriptor] {
        &self.items
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn contains(&self, url: &str) -> bool {
        self.items.iter().any(|item| item.url == url)
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }

    /// Makes `item` the only selected entry.
    pub(crate) fn replace(&mut self, item: MediaDescriptor) {
        self.items.clear();
        self.items.push(item);
    }

    /// Removes `item` if it is selected, appends it otherwise.
    ///
    /// Returns `true` if the item is selected afterwards.
    pub(crate) fn toggle(&mut self, item: MediaDescriptor) -> bool {
        match self.items.iter().position(|i| i.same_asset(&item)) {
            Some(index) => {
                self.items.remove(index);
                false
            }
            None => {
                self.items.push(item);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media(n: usize) -> MediaDescriptor {
        MediaDescriptor::new(format!("/uploads/{n}.png"), format!("{n}.png"))
    }

    #[test]
    fn toggle_twice_restores_previous_set() {
        let mut selection = SelectionSet::new();
        selection.toggle(media(1));
        selection.toggle(media(2));
        let before: Vec<String> = selection.items().iter().map(|i| i.url.clone()).collect();

        assert!(selection.toggle(media(3)));
        assert!(!selection.toggle(media(3)));

        let after: Vec<String> = selection.items().iter().map(|i| i.url.clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn toggle_preserves_insertion_order() {
        let mut selection = SelectionSet::new();
        selection.toggle(media(3));
        selection.toggle(media(1));
        selection.toggle(media(2));
        selection.toggle(media(1));

        let urls: Vec<&str> = selection.items().iter().map(|i| i.url.as_str()).collect();
        assert_eq!(urls, ["/uploads/3.png", "/uploads/2.png"]);
    }

    #[test]
    fn identity_is_the_url() {
        let mut selection = SelectionSet::new();
        selection.toggle(media(1));

        let mut renamed = media(1);
        renamed.name = "renamed.png".to_string();

        assert!(!selection.toggle(renamed));
        assert!(selection.is_empty());
    }

    #[test]
    fn replace_keeps_a_single_item() {
        let mut selection = SelectionSet::new();
        selection.toggle(media(1));
        selection.toggle(media(2));

        selection.replace(media(5));

        assert_eq!(selection.len(), 1);
        assert!(selection.contains("/uploads/5.png"));
    }
}
