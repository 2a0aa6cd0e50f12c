//! Rope-based text buffer with a single char-offset cursor (the type point).
//!
//! Offsets count chars, not bytes and not grapheme clusters; a combining
//! sequence is several cursor positions. This is the documented limitation of
//! the control and keeps every mutation O(log n) through `ropey`.
//!
//! Every mutation leaves the cursor clamped into `[0, len_chars]`. Invalid
//! inputs (empty or multi-char letters, deletes at offset 0, out-of-range
//! cursor targets) are silent no-ops or clamps, never errors.

use ropey::Rope;

pub mod motion;

/// Logical text content plus the type point.
#[derive(Debug, Clone)]
pub struct Buffer {
    rope: Rope,
    cursor: usize,
}

impl Buffer {
    /// Construct from initial text with the cursor at the end, matching a
    /// freshly created control.
    pub fn from_str(content: &str) -> Self {
        let rope = Rope::from_str(content);
        let cursor = rope.len_chars();
        Self { rope, cursor }
    }

    /// Total char count of the content.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Current cursor offset, always within `[0, len_chars]`.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor, clamping into `[0, len_chars]`. Out-of-range targets
    /// are accepted and clamped, never rejected.
    pub fn set_cursor(&mut self, to: usize) {
        self.cursor = to.min(self.rope.len_chars());
    }

    /// Char at the given offset, `None` past the end.
    pub fn char_at(&self, offset: usize) -> Option<char> {
        if offset < self.rope.len_chars() {
            Some(self.rope.char(offset))
        } else {
            None
        }
    }

    /// Insert a single character at the cursor and advance past it. Returns
    /// whether the buffer changed: empty and multi-char inputs are no-ops.
    pub fn insert_letter(&mut self, letter: &str) -> bool {
        let mut chars = letter.chars();
        let (Some(_), None) = (chars.next(), chars.next()) else {
            return false;
        };
        self.rope.insert(self.cursor, letter);
        self.set_cursor(self.cursor + 1);
        true
    }

    /// Remove the character immediately before the cursor and step back over
    /// it. Returns whether the buffer changed; at offset 0 this is a no-op.
    pub fn remove_letter(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.rope.remove(self.cursor - 1..self.cursor);
        self.cursor -= 1;
        true
    }

    /// Text from the start up to (excluding) the cursor.
    pub fn text_before_cursor(&self) -> String {
        self.rope.slice(..self.cursor).to_string()
    }

    /// Text from the cursor to the end.
    pub fn text_after_cursor(&self) -> String {
        self.rope.slice(self.cursor..).to_string()
    }

    /// Full content as an owned string.
    pub fn content(&self) -> String {
        self.rope.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_cursor_at_end() {
        let b = Buffer::from_str("abc");
        assert_eq!(b.cursor(), 3);
        assert_eq!(b.len_chars(), 3);
    }

    #[test]
    fn insert_advances_and_splices_at_cursor() {
        let mut b = Buffer::from_str("ac");
        b.set_cursor(1);
        assert!(b.insert_letter("b"));
        assert_eq!(b.content(), "abc");
        assert_eq!(b.cursor(), 2);
    }

    #[test]
    fn insert_rejects_empty_and_multichar() {
        let mut b = Buffer::from_str("x");
        assert!(!b.insert_letter(""));
        assert!(!b.insert_letter("ab"));
        assert_eq!(b.content(), "x");
        assert_eq!(b.cursor(), 1);
    }

    #[test]
    fn insert_counts_chars_not_bytes() {
        let mut b = Buffer::from_str("");
        assert!(b.insert_letter("£"));
        assert!(b.insert_letter("¬"));
        assert_eq!(b.cursor(), 2);
        assert_eq!(b.content(), "£¬");
    }

    #[test]
    fn remove_at_start_is_noop() {
        let mut b = Buffer::from_str("abc");
        b.set_cursor(0);
        assert!(!b.remove_letter());
        assert_eq!(b.content(), "abc");
        assert_eq!(b.cursor(), 0);
    }

    // Insert-then-delete is not a strict inverse at the start boundary: the
    // delete half degenerates to a no-op once the cursor is back at 0.
    #[test]
    fn insert_delete_boundary_asymmetry() {
        let mut b = Buffer::from_str("");
        assert!(b.insert_letter("a"));
        assert!(b.remove_letter());
        assert_eq!(b.content(), "");
        assert_eq!(b.cursor(), 0);
        assert!(!b.remove_letter());
    }

    #[test]
    fn set_cursor_clamps_past_end() {
        let mut b = Buffer::from_str("hi");
        b.set_cursor(99);
        assert_eq!(b.cursor(), 2);
    }

    #[test]
    fn cursor_invariant_under_mutation_sequences() {
        let mut b = Buffer::from_str("seed");
        let script: &[(usize, &str)] = &[(0, "x"), (4, "y"), (99, "z"), (1, ""), (2, "q")];
        for &(target, letter) in script {
            b.set_cursor(target);
            b.insert_letter(letter);
            assert!(b.cursor() <= b.len_chars());
            b.remove_letter();
            assert!(b.cursor() <= b.len_chars());
        }
    }

    #[test]
    fn slices_around_cursor() {
        let mut b = Buffer::from_str("hello world");
        b.set_cursor(5);
        assert_eq!(b.text_before_cursor(), "hello");
        assert_eq!(b.text_after_cursor(), " world");
    }
}
