//! Cursor motion helpers.
//!
//! These operate purely on a [`Buffer`] through `char_at`/`set_cursor` and are
//! free of control state. Word and line jumps are deliberately simple linear
//! scans bounded by spaces and newlines; there is no visual-column tracking
//! and no wrap awareness.

use crate::Buffer;

/// One position left, stopping at the start of the buffer.
pub fn left(buf: &mut Buffer) {
    buf.set_cursor(buf.cursor().saturating_sub(1));
}

/// One position right, stopping at the end of the buffer.
pub fn right(buf: &mut Buffer) {
    let cur = buf.cursor();
    buf.set_cursor(cur.saturating_add(1));
}

/// Offset of the previous word boundary: just after the last space found
/// scanning back from the character preceding the cursor, or 0 when no space
/// exists there. Skipping that first character means a cursor already resting
/// just after a space still jumps a full word. Shared by word-left navigation
/// and ctrl-backspace word deletion (which deletes back to, but not past, the
/// boundary).
pub fn prev_word_boundary(buf: &Buffer) -> usize {
    let mut i = buf.cursor().saturating_sub(1);
    while i > 0 {
        if buf.char_at(i - 1) == Some(' ') {
            return i;
        }
        i -= 1;
    }
    0
}

/// Jump left to the previous word boundary.
pub fn word_left(buf: &mut Buffer) {
    let target = prev_word_boundary(buf);
    buf.set_cursor(target);
}

/// Jump right onto the first space at or after the cursor, or to the end of
/// the buffer when none exists. A cursor already on a space does not move;
/// there is no skip-current-word normalization.
pub fn word_right(buf: &mut Buffer) {
    let target = scan_forward(buf, ' ');
    buf.set_cursor(target);
}

/// Jump to the offset of the last newline before the cursor; with no newline
/// above, the cursor stays where it is (not at the start of the line).
pub fn up(buf: &mut Buffer) {
    for i in (0..buf.cursor()).rev() {
        if buf.char_at(i) == Some('\n') {
            buf.set_cursor(i);
            return;
        }
    }
}

/// Jump to the offset of the first newline at or after the cursor, or to the
/// end of the buffer when none exists.
pub fn down(buf: &mut Buffer) {
    let target = scan_forward(buf, '\n');
    buf.set_cursor(target);
}

fn scan_forward(buf: &Buffer, needle: char) -> usize {
    let len = buf.len_chars();
    for i in buf.cursor()..len {
        if buf.char_at(i) == Some(needle) {
            return i;
        }
    }
    len
}
