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

//! Terminal environment and styling utilities.
//!
//! The UI is drawn on `stderr` so that `stdout` stays free for the committed
//! media urls printed on exit. The background color is changed with OSC
//! (Operating System Command) escape sequences on the same stream.
//!
//! # Compatibility
//!
//! These functions rely on the terminal emulator supporting the specific OSC
//! codes. Most modern terminals (XTerm, iTerm2, Alacritty, Kitty) support these
//! sequences.

use std::io::{self, Write};

/// Sets the terminal background color using an OSC 11 escape sequence.
///
/// # Arguments
///
/// * `hex_color` - A string slice representing the color (e.g., `"#1e1e1e"`).
pub(crate) fn set_terminal_bg(hex_color: &str) {
    write_osc(&format!("\x1b]11;{}\x07", hex_color));
}

/// Resets the terminal background to the user's configured color (OSC 111).
pub(crate) fn reset_terminal_bg() {
    write_osc("\x1b]111\x07");
}

// Best effort, a terminal that ignores the sequence is not an error.
fn write_osc(sequence: &str) {
    let mut stderr = io::stderr();
    let _ = stderr.write_all(sequence.as_bytes());
    let _ = stderr.flush();
}
