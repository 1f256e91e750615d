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

//! Cancellation tokens tied to the picker's open/closed lifecycle.
//!
//! Every time the picker opens it starts a new session. Tasks carry a clone of
//! the session token; closing the picker cancels it, so background work can
//! stop early and late results are recognisably stale.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

#[derive(Debug, Clone)]
pub(crate) struct SessionToken {
    id: u64,
    cancelled: Arc<AtomicBool>,
}

impl SessionToken {
    pub(crate) fn new(id: u64) -> Self {
        Self {
            id,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A token that is already cancelled, used before the first open.
    pub(crate) fn inactive() -> Self {
        let token = Self::new(0);
        token.cancel();
        token
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Identifies one listing request within a session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) struct ListingTicket {
    pub(crate) session: u64,
    pub(crate) request: u64,
}

/// Identifies one upload batch within a session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) struct UploadTicket {
    pub(crate) session: u64,
    pub(crate) batch: u64,
}
